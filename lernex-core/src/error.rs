use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("unresolvable video source: {0}")]
    UnresolvableSource(String),

    #[error("lesson requires enrollment")]
    AccessDenied,

    #[error("transient persistence failure: {0}")]
    PersistenceTransient(String),

    #[error("already enrolled")]
    DuplicateEnrollment,

    #[error("certificate issuance failed: {0}")]
    CertificateIssuance(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid record: {0}")]
    InvalidRecord(#[from] lernex_model::ModelError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniquenessViolation(detail) => {
                CoreError::Internal(format!("unexpected uniqueness violation: {detail}"))
            }
            StoreError::Unavailable(detail) => CoreError::PersistenceTransient(detail),
            StoreError::Backend(detail) => CoreError::Internal(detail),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
