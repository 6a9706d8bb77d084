use chrono::{DateTime, Utc};

use crate::error::{ModelError, Result};
use crate::ids::{CertificateID, ClassGroupID, CourseID, UserID};
use crate::offering::Offering;

/// An issued completion certificate. Immutable once written: there is no
/// edit or revoke operation.
///
/// Exactly one of `course_id` / `class_group_id` is set; the pair of
/// columns mirrors the persisted record shape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CertificateRecord {
    pub id: CertificateID,
    pub user_id: UserID,
    pub course_id: Option<CourseID>,
    pub class_group_id: Option<ClassGroupID>,
    /// Human-legible issuance code, unique across certificates.
    pub code: String,
    pub issued_at: DateTime<Utc>,
}

impl CertificateRecord {
    /// Build a record for one certifiable offering.
    ///
    /// Mentorships have no certificate column and are rejected.
    pub fn for_offering(
        user_id: UserID,
        offering: Offering,
        code: impl Into<String>,
    ) -> Result<Self> {
        let (course_id, class_group_id) = match offering {
            Offering::Course(id) => (Some(id), None),
            Offering::ClassGroup(id) => (None, Some(id)),
            Offering::Mentorship(_) => {
                return Err(ModelError::InvalidCertificate(
                    "mentorships are not certifiable".to_string(),
                ));
            }
        };

        Ok(Self {
            id: CertificateID::new(),
            user_id,
            course_id,
            class_group_id,
            code: code.into(),
            issued_at: Utc::now(),
        })
    }

    /// The offering this certificate covers, derived from whichever column
    /// is set. `None` for a malformed record with neither column.
    pub fn offering(&self) -> Option<Offering> {
        match (self.course_id, self.class_group_id) {
            (Some(course), _) => Some(Offering::Course(course)),
            (None, Some(group)) => Some(Offering::ClassGroup(group)),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::MentorshipID;

    #[test]
    fn course_certificate_sets_one_column() {
        let cert = CertificateRecord::for_offering(
            UserID::new(),
            Offering::Course(CourseID::new()),
            "LX-20260101-ABC123",
        )
        .unwrap();
        assert!(cert.course_id.is_some());
        assert!(cert.class_group_id.is_none());
        assert_eq!(cert.offering().unwrap().kind().as_str(), "course");
    }

    #[test]
    fn mentorship_certificate_is_rejected() {
        let err = CertificateRecord::for_offering(
            UserID::new(),
            Offering::Mentorship(MentorshipID::new()),
            "LX-X",
        );
        assert!(err.is_err());
    }
}
