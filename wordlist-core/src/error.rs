use thiserror::Error;

pub type Result<T> = std::result::Result<T, WordListError>;

#[derive(Debug, Error)]
pub enum WordListError {
    /// Raised only while loading the catalog at startup, never per request.
    #[error("attribute catalog is empty")]
    EmptyCatalog,

    #[error("storage unavailable: {0}")]
    StorageUnavailable(anyhow::Error),

    #[error("invalid word data: {0}")]
    InvalidData(String),

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl WordListError {
    /// Wrap a storage-side failure. Used by every `WordStore` adapter.
    pub fn storage(err: impl Into<anyhow::Error>) -> Self {
        Self::StorageUnavailable(err.into())
    }

    pub fn http_status(&self) -> u16 {
        match self {
            Self::StorageUnavailable(_) => 503,
            Self::EmptyCatalog => 500,
            Self::InvalidData(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// True when retrying the same request later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}
