pub mod repository;
pub mod identity;

pub use repository::{Collection, Condition, DocumentStore, Filter, StoreError, StoreResult};
pub use identity::{IdentityVerifier, MockIdentityVerifier, Session, User, VerifiedIdentity, VerifyError};

/// Maximum number of documents any listing endpoint returns.
pub const LIST_LIMIT: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Upstream service error: {0}")]
    UpstreamFailure(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl From<VerifyError> for CoreError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::Rejected { .. } => CoreError::Unauthorized("Invalid session".to_string()),
            VerifyError::Upstream(msg) => CoreError::UpstreamFailure(msg),
        }
    }
}
