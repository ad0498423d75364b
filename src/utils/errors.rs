use thiserror::Error;

/// Everything that can stop a chart from being generated
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Could not connect to the analytics API: {0}")]
    Connectivity(String),
    #[error("Analytics API returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Analytics API returned no click data")]
    EmptyData,
    #[error("Analytics API returned malformed JSON ({reason}). Raw body: {body}")]
    MalformedResponse { reason: String, body: String },
    #[error("Record {index} has an invalid date '{value}' (expected YYYY-MM-DD)")]
    DateParse { value: String, index: usize },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("{0}")]
    Unclassified(String),
}

impl From<std::io::Error> for ChartError {
    fn from(e: std::io::Error) -> Self {
        ChartError::Unclassified(e.to_string())
    }
}

/// Cut a response body down to something that fits on one log line
pub fn truncate_body(body: &str, max_chars: usize) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(max_chars).collect();
    out.push('…');
    out
}
