use super::OutputFormatter;

/// Azure Pipelines `task.setvariable` logging commands.
pub(crate) struct AzureFormatter;

impl OutputFormatter for AzureFormatter {
    fn format_variable(&self, name: &str, value: &str) -> String {
        format!("##vso[task.setvariable variable={name};isoutput=true;]{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_output_variable() {
        assert_eq!(
            AzureFormatter.format_variable("pkga", "1.0.1"),
            "##vso[task.setvariable variable=pkga;isoutput=true;]1.0.1"
        );
    }
}
