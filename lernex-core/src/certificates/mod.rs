//! Certificate eligibility and issuance.
//!
//! An administrative batch path, independent of playback: diff paid
//! enrollments against issued certificates, then insert one immutable
//! record per selected candidate.

pub mod eligibility;
pub mod issuer;

pub use eligibility::{EligibleCertificate, eligible_certificates, scan_eligible};
pub use issuer::{generate_code, issue_certificate};
