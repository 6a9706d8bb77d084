//! Curated re-exports for downstream consumers.

pub use crate::certificate::CertificateRecord;
pub use crate::course::{Course, CourseModule, Lesson, VideoProvider, VideoSource};
pub use crate::enrollment::{Enrollment, PaymentStatus};
pub use crate::error::{ModelError, Result as ModelResult};
pub use crate::ids::{
    CertificateID, ClassGroupID, CourseID, EnrollmentID, LessonID, MentorshipID,
    ModuleID, UserID,
};
pub use crate::offering::{Offering, OfferingKind};
pub use crate::progress::{LessonProgressRecord, UpdatePositionRequest};
