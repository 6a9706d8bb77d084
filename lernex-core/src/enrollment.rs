//! Enrollment insertion.
//!
//! One write path on top of the enrollment port; the store's uniqueness
//! violation on (user, offering) becomes [`CoreError::DuplicateEnrollment`]
//! so the caller can show "already enrolled" instead of a generic failure.

use tracing::info;

use lernex_model::{Enrollment, Offering, UserID};

use crate::error::{CoreError, Result};
use crate::store::EnrollmentRepository;

pub async fn enroll(
    store: &dyn EnrollmentRepository,
    user_id: UserID,
    offering: impl Into<Offering>,
) -> Result<Enrollment> {
    let enrollment = Enrollment::new(user_id, offering);
    match store.insert(&enrollment).await {
        Ok(()) => {
            info!(user_id = %enrollment.user_id, offering = %enrollment.offering, "enrolled");
            Ok(enrollment)
        }
        Err(err) if err.is_uniqueness_violation() => Err(CoreError::DuplicateEnrollment),
        Err(err) => Err(err.into()),
    }
}
