//! Core data model definitions shared across Lernex crates.
#![allow(missing_docs)]

pub mod certificate;
pub mod course;
pub mod enrollment;
pub mod error;
pub mod ids;
pub mod offering;
pub mod prelude;
pub mod progress;

// Intentionally curated re-exports for downstream consumers.
pub use certificate::CertificateRecord;
pub use course::{Course, CourseModule, Lesson, VideoProvider, VideoSource};
pub use enrollment::{Enrollment, PaymentStatus};
pub use error::{ModelError, Result as ModelResult};
pub use ids::{
    CertificateID, ClassGroupID, CourseID, EnrollmentID, LessonID, MentorshipID,
    ModuleID, UserID,
};
pub use offering::{Offering, OfferingKind};
pub use progress::{LessonProgressRecord, UpdatePositionRequest};
