/// Result alias that carries the custom [`PageError`] type.
pub type Result<T> = std::result::Result<T, PageError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Free-form failure with a readable message.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// A configuration or scenario document could not be decoded.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The configuration decoded but holds values the widgets cannot run with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A required form field was left blank.
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),
    /// The redirect target could not be built.
    #[error("{0}")]
    Url(#[from] url::ParseError),
}

impl PageError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn config<T: Into<String>>(msg: T) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<&str> for PageError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for PageError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
