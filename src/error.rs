use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or incomplete article JSON. Rejects the whole batch.
    #[error("{0}")]
    Validation(String),

    /// Cover image could not be read or encoded. Does not invalidate
    /// the JSON-derived article fields.
    #[error("Failed to read the image file: {0}")]
    ImageRead(String),

    /// Generation service failure. Carries only the user-facing message;
    /// the root cause is logged at the call site, never shown in the UI.
    #[error("{0}")]
    Generation(String),

    /// Clipboard write denied or unavailable. Blocks any share navigation
    /// that depends on the copy having happened.
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
