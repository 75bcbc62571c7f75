use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors raised while rendering pages, computing features or persisting results
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A CSS selector failed to parse
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    /// A URL (page or href) could not be parsed or resolved
    #[error("invalid url `{0}`")]
    InvalidUrl(String),

    /// Navigation did not finish within the configured timeout
    #[error("navigation to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    /// A WebDriver command failed
    #[error("webdriver error: {0}")]
    WebDriver(String),

    /// A WebDriver session could not be created
    #[error("webdriver session error: {0}")]
    Session(String),

    /// The input file has no recognisable URL column
    #[error("no URL column found in input header (looked for {0})")]
    MissingUrlColumn(String),

    /// Invalid configuration
    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtractError {
    /// Whether retrying the same URL may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ExtractError::Timeout { .. } | ExtractError::WebDriver(_) | ExtractError::Session(_)
        )
    }
}

impl From<fantoccini::error::CmdError> for ExtractError {
    fn from(e: fantoccini::error::CmdError) -> Self {
        ExtractError::WebDriver(e.to_string())
    }
}

impl From<fantoccini::error::NewSessionError> for ExtractError {
    fn from(e: fantoccini::error::NewSessionError) -> Self {
        ExtractError::Session(e.to_string())
    }
}
