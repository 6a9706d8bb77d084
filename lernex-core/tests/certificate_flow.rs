//! Administrative flows: enrollment uniqueness and the certificate
//! eligibility/issuance batch.

use lernex_core::CoreError;
use lernex_core::certificates::{issue_certificate, scan_eligible};
use lernex_core::enrollment::enroll;
use lernex_core::store::MemoryStore;
use lernex_model::{
    CertificateRecord, ClassGroupID, CourseID, Enrollment, Offering, UserID,
};

#[tokio::test]
async fn duplicate_enrollment_surfaces_already_enrolled() {
    let store = MemoryStore::new();
    let user = UserID::new();
    let course = CourseID::new();

    enroll(&store, user, course).await.expect("first enrollment");
    let err = enroll(&store, user, course).await.unwrap_err();
    assert!(matches!(err, CoreError::DuplicateEnrollment));
    assert_eq!(store.enrollment_count().await, 1, "no duplicate row");
}

#[tokio::test]
async fn eligibility_diff_matches_paid_minus_issued() {
    let store = MemoryStore::new();
    let u1 = UserID::new();
    let u2 = UserID::new();
    let c1 = CourseID::new();
    let g1 = ClassGroupID::new();

    store.seed_enrollment(Enrollment::new(u1, c1).paid()).await;
    store.seed_enrollment(Enrollment::new(u2, g1).paid()).await;
    store
        .seed_certificate(
            CertificateRecord::for_offering(u1, Offering::Course(c1), "LX-SEED").unwrap(),
        )
        .await;

    let eligible = scan_eligible(&store, &store).await.expect("scan");
    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].user_id, u2);
    assert_eq!(eligible[0].offering, Offering::ClassGroup(g1));
}

#[tokio::test]
async fn issuing_removes_exactly_the_issued_tuple() {
    let store = MemoryStore::new();
    let u1 = UserID::new();
    let u2 = UserID::new();
    let c1 = CourseID::new();

    store.seed_enrollment(Enrollment::new(u1, c1).paid()).await;
    store.seed_enrollment(Enrollment::new(u2, c1).paid()).await;

    let before = scan_eligible(&store, &store).await.unwrap();
    assert_eq!(before.len(), 2);

    let candidate = before.iter().find(|e| e.user_id == u1).copied().unwrap();
    let record = issue_certificate(&store, &candidate).await.expect("issues");
    assert_eq!(record.user_id, u1);
    assert_eq!(record.course_id, Some(c1));
    assert!(record.code.starts_with("LX-"));

    let after = scan_eligible(&store, &store).await.unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].user_id, u2);
}

#[tokio::test]
async fn double_issuance_aborts_with_reportable_error() {
    let store = MemoryStore::new();
    let user = UserID::new();
    let course = CourseID::new();
    store.seed_enrollment(Enrollment::new(user, course).paid()).await;

    let eligible = scan_eligible(&store, &store).await.unwrap();
    let candidate = eligible[0];

    issue_certificate(&store, &candidate).await.expect("first issue");
    let err = issue_certificate(&store, &candidate).await.unwrap_err();
    assert!(matches!(err, CoreError::CertificateIssuance(_)));

    // No partial state: still exactly one certificate for the user.
    let certs = lernex_core::store::CertificateRepository::for_user(&store, user)
        .await
        .unwrap();
    assert_eq!(certs.len(), 1);
}
