use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use tracing::{info, warn};

use lernex_model::CertificateRecord;

use crate::error::{CoreError, Result};
use crate::store::CertificateRepository;

use super::eligibility::EligibleCertificate;

const CODE_PREFIX: &str = "LX";
const CODE_SUFFIX_LEN: usize = 6;

/// Human-legible issuance code: timestamp-derived prefix plus a random
/// suffix. Collisions are accepted as negligible and only caught by the
/// store's uniqueness constraint, never actively prevented.
pub fn generate_code(issued_at: DateTime<Utc>) -> String {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(CODE_SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("{CODE_PREFIX}-{}-{suffix}", issued_at.format("%Y%m%d%H%M"))
}

/// Issue a certificate for one eligible tuple.
///
/// A single insert; on a uniqueness violation (colliding code or a
/// concurrently issued certificate) the operation aborts with no partial
/// state and the error is surfaced to the administrator.
pub async fn issue_certificate(
    certificates: &dyn CertificateRepository,
    candidate: &EligibleCertificate,
) -> Result<CertificateRecord> {
    let issued_at = Utc::now();
    let code = generate_code(issued_at);
    let record = CertificateRecord::for_offering(candidate.user_id, candidate.offering, code)?;

    match certificates.insert(&record).await {
        Ok(()) => {
            info!(user_id = %record.user_id, code = %record.code, "certificate issued");
            Ok(record)
        }
        Err(err) if err.is_uniqueness_violation() => {
            warn!(user_id = %record.user_id, %err, "certificate insert hit uniqueness constraint");
            Err(CoreError::CertificateIssuance(err.to_string()))
        }
        Err(err) => Err(CoreError::CertificateIssuance(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_carries_timestamp_prefix_and_random_suffix() {
        let at = "2026-08-07T10:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let code = generate_code(at);
        assert!(code.starts_with("LX-202608071030-"));
        let suffix = code.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), CODE_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(!suffix.chars().any(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn codes_differ_across_calls() {
        let at = Utc::now();
        assert_ne!(generate_code(at), generate_code(at));
    }
}
