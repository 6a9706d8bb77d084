use async_trait::async_trait;
use thiserror::Error;

use lernex_model::{
    CertificateRecord, Enrollment, LessonID, LessonProgressRecord, Offering,
    OfferingKind, UserID,
};

/// Store-level failure with a machine-readable kind.
///
/// `UniquenessViolation` must stay distinguishable from generic failure:
/// enrollment and certificate insertion branch on it.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("uniqueness violation: {0}")]
    UniquenessViolation(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_uniqueness_violation(&self) -> bool {
        matches!(self, StoreError::UniquenessViolation(_))
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Durable playback progress per (viewer, lesson).
///
/// Position writes are last-write-wins; completion is set-once. Both are
/// idempotent so in-flight writes may land out of order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Upsert the resume position for a lesson. Never clears a completion
    /// flag already present on the row.
    async fn upsert_position(
        &self,
        user_id: UserID,
        lesson_id: LessonID,
        position_secs: f64,
    ) -> StoreResult<()>;

    /// Set the completion flag (and final position) for a lesson.
    async fn mark_completed(
        &self,
        user_id: UserID,
        lesson_id: LessonID,
        position_secs: f64,
    ) -> StoreResult<()>;

    async fn lesson_progress(
        &self,
        user_id: UserID,
        lesson_id: LessonID,
    ) -> StoreResult<Option<LessonProgressRecord>>;

    /// All progress rows for a user, for resume and aggregation.
    async fn user_progress(
        &self,
        user_id: UserID,
    ) -> StoreResult<Vec<LessonProgressRecord>>;
}

/// Enrollment facts. Read-mostly; `insert` is the one write path and is
/// uniqueness-aware on (user, offering).
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn insert(&self, enrollment: &Enrollment) -> StoreResult<()>;

    async fn is_enrolled(
        &self,
        user_id: UserID,
        offering: Offering,
    ) -> StoreResult<bool>;

    /// All paid enrollments of one kind, for the certificate scan.
    async fn paid_enrollments(
        &self,
        kind: OfferingKind,
    ) -> StoreResult<Vec<Enrollment>>;
}

/// Issued certificates. Insert-only; records are immutable once written.
#[async_trait]
pub trait CertificateRepository: Send + Sync {
    /// Insert a new certificate. A duplicate code (or duplicate
    /// user/offering pair) surfaces as `UniquenessViolation`.
    async fn insert(&self, record: &CertificateRecord) -> StoreResult<()>;

    async fn all(&self) -> StoreResult<Vec<CertificateRecord>>;

    async fn for_user(&self, user_id: UserID) -> StoreResult<Vec<CertificateRecord>>;
}
