#[derive(Debug, thiserror::Error)]
pub enum PackSimError {
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Pack generation failed: {0}")]
    PackGenerationFailed(#[source] Box<PackSimError>),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("A pack is already being opened")]
    GenerationInProgress,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl PackSimError {
    /// Text shown in the error banner.
    ///
    /// Catalog failures (bare or wrapped by a failed generation) yield the
    /// message the service sent, or the transport description when it sent
    /// none.
    pub fn user_message(&self) -> String {
        match self {
            PackSimError::CatalogUnavailable(msg) => msg.clone(),
            PackSimError::PackGenerationFailed(inner) => inner.user_message(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for PackSimError {
    fn from(e: reqwest::Error) -> Self {
        PackSimError::CatalogUnavailable(e.to_string())
    }
}

impl From<serde_json::Error> for PackSimError {
    fn from(e: serde_json::Error) -> Self {
        PackSimError::CatalogUnavailable(format!("Invalid catalog response: {e}"))
    }
}

pub type Result<T> = std::result::Result<T, PackSimError>;
