/// Renders one pipeline variable as a line of stdout.
pub(crate) trait OutputFormatter {
    fn format_variable(&self, name: &str, value: &str) -> String;
}

/// Package names become variable names by dropping `-`, `_` and `.`.
pub(crate) fn safe_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | '.'))
        .collect()
}
