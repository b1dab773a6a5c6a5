use super::OutputFormatter;

pub(crate) struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_variable(&self, name: &str, value: &str) -> String {
        format!("{name}={value}")
    }
}
