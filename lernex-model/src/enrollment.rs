use chrono::{DateTime, Utc};

use crate::ids::{EnrollmentID, UserID};
use crate::offering::Offering;

/// Payment state of an enrollment. Only `Paid` enrollments count toward
/// certificate eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's enrollment in an offering.
///
/// (user, offering) is unique in the store; a second insert for the same
/// pair is rejected with a uniqueness violation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enrollment {
    pub id: EnrollmentID,
    pub user_id: UserID,
    pub offering: Offering,
    pub payment_status: PaymentStatus,
    pub enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(user_id: UserID, offering: impl Into<Offering>) -> Self {
        Self {
            id: EnrollmentID::new(),
            user_id,
            offering: offering.into(),
            payment_status: PaymentStatus::Pending,
            enrolled_at: Utc::now(),
        }
    }

    pub fn paid(mut self) -> Self {
        self.payment_status = PaymentStatus::Paid;
        self
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}
