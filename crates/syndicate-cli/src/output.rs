//! Result rendering.

use anyhow::Result;
use clap::ValueEnum;
use syndicate_lookup::LookupResult;

/// Output format for lookup results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated `identifier<TAB>syndicate-or-error`
    Text,
    /// One JSON object per line
    Json,
}

/// Render one result as a single line.
pub fn render(result: &LookupResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Text => Ok(match result {
            LookupResult::Success {
                identifier,
                syndicate_name,
            } => format!("{identifier}\t{syndicate_name}"),
            LookupResult::Failure {
                identifier,
                error_kind,
                message,
            } => format!("{identifier}\t{error_kind}: {message}"),
        }),
    }
}
