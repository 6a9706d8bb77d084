use std::collections::HashSet;

use lernex_model::{CertificateRecord, Enrollment, Offering, OfferingKind, UserID};

use crate::error::Result;
use crate::store::{CertificateRepository, EnrollmentRepository};

/// A paid enrollment with no issued certificate yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EligibleCertificate {
    pub user_id: UserID,
    pub offering: Offering,
}

impl EligibleCertificate {
    pub fn kind(&self) -> OfferingKind {
        self.offering.kind()
    }
}

/// Diff paid enrollments against issued certificates.
///
/// Builds one hash key per certificate (from whichever of the course /
/// class-group columns is set) and walks the enrollments once: O(E + C),
/// never a nested scan. Non-certifiable kinds (mentorships) and unpaid
/// enrollments are skipped.
pub fn eligible_certificates(
    enrollments: &[Enrollment],
    certificates: &[CertificateRecord],
) -> Vec<EligibleCertificate> {
    let issued: HashSet<(UserID, Offering)> = certificates
        .iter()
        .filter_map(|c| c.offering().map(|offering| (c.user_id, offering)))
        .collect();

    let mut emitted: HashSet<(UserID, Offering)> = HashSet::new();
    enrollments
        .iter()
        .filter(|e| e.is_paid() && e.offering.certifiable())
        .filter(|e| !issued.contains(&(e.user_id, e.offering)))
        .filter(|e| emitted.insert((e.user_id, e.offering)))
        .map(|e| EligibleCertificate {
            user_id: e.user_id,
            offering: e.offering,
        })
        .collect()
}

/// Load paid enrollments of every certifiable kind plus all issued
/// certificates, and return the eligible set. The administrative batch
/// entry point; runs offline of playback.
pub async fn scan_eligible(
    enrollments: &dyn EnrollmentRepository,
    certificates: &dyn CertificateRepository,
) -> Result<Vec<EligibleCertificate>> {
    let mut paid = enrollments.paid_enrollments(OfferingKind::Course).await?;
    paid.extend(
        enrollments
            .paid_enrollments(OfferingKind::ClassGroup)
            .await?,
    );
    let issued = certificates.all().await?;
    Ok(eligible_certificates(&paid, &issued))
}
