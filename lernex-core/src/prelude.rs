//! Curated re-exports for downstream consumers.

pub use crate::access::{LessonAvailability, availability, can_access};
pub use crate::certificates::{
    EligibleCertificate, eligible_certificates, issue_certificate, scan_eligible,
};
pub use crate::config::Settings;
pub use crate::enrollment::enroll;
pub use crate::error::{CoreError, Result};
pub use crate::navigation::{
    has_next_lesson, next_lesson, ordered_lessons, select_lesson,
};
pub use crate::playback::{
    COMPLETION_WINDOW_SECS, LessonPlayer, PlaybackCapabilities, PlaybackEvent,
    ResolvedSource, is_playable,
};
pub use crate::progress::{
    LessonStatus, ProgressTracker, UserProgress, course_percentage,
};
pub use crate::session::{AuthEvents, SessionTracker};
pub use crate::store::{
    CertificateRepository, EnrollmentRepository, MemoryStore, ProgressRepository,
    StoreError, StoreResult,
};

#[cfg(feature = "database")]
pub use crate::store::PgStore;
