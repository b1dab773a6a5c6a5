mod azure;
mod formatter;
mod plain;
mod report;

pub(crate) use azure::AzureFormatter;
pub(crate) use formatter::{OutputFormatter, safe_name};
pub(crate) use plain::PlainFormatter;
pub(crate) use report::render_report;
