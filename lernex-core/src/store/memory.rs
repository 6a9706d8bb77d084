//! In-memory store adapter.
//!
//! Backs tests and demo seeding; implements the same ports as the Postgres
//! adapter, including uniqueness semantics on enrollments and certificates.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use lernex_model::{
    CertificateRecord, Enrollment, LessonID, LessonProgressRecord, Offering,
    OfferingKind, UserID,
};

use super::ports::{
    CertificateRepository, EnrollmentRepository, ProgressRepository, StoreError,
    StoreResult,
};

#[derive(Debug, Default)]
struct MemoryInner {
    progress: HashMap<(UserID, LessonID), LessonProgressRecord>,
    enrollments: Vec<Enrollment>,
    certificates: Vec<CertificateRecord>,
}

/// Shared in-memory store implementing all repository ports.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an enrollment without going through uniqueness checks.
    pub async fn seed_enrollment(&self, enrollment: Enrollment) {
        self.inner.write().await.enrollments.push(enrollment);
    }

    /// Seed an issued certificate.
    pub async fn seed_certificate(&self, record: CertificateRecord) {
        self.inner.write().await.certificates.push(record);
    }

    /// Number of stored enrollment rows (test observability).
    pub async fn enrollment_count(&self) -> usize {
        self.inner.read().await.enrollments.len()
    }
}

#[async_trait]
impl ProgressRepository for MemoryStore {
    async fn upsert_position(
        &self,
        user_id: UserID,
        lesson_id: LessonID,
        position_secs: f64,
    ) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let entry = inner
            .progress
            .entry((user_id, lesson_id))
            .or_insert_with(|| {
                LessonProgressRecord::started(user_id, lesson_id, position_secs)
            });
        entry.position_secs = position_secs;
        entry.updated_at = Utc::now();
        Ok(())
    }

    async fn mark_completed(
        &self,
        user_id: UserID,
        lesson_id: LessonID,
        position_secs: f64,
    ) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let entry = inner
            .progress
            .entry((user_id, lesson_id))
            .or_insert_with(|| {
                LessonProgressRecord::started(user_id, lesson_id, position_secs)
            });
        entry.position_secs = position_secs;
        entry.completed = true;
        entry.updated_at = Utc::now();
        Ok(())
    }

    async fn lesson_progress(
        &self,
        user_id: UserID,
        lesson_id: LessonID,
    ) -> StoreResult<Option<LessonProgressRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.progress.get(&(user_id, lesson_id)).cloned())
    }

    async fn user_progress(
        &self,
        user_id: UserID,
    ) -> StoreResult<Vec<LessonProgressRecord>> {
        let inner = self.inner.read().await;
        Ok(inner
            .progress
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl EnrollmentRepository for MemoryStore {
    async fn insert(&self, enrollment: &Enrollment) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let duplicate = inner.enrollments.iter().any(|e| {
            e.user_id == enrollment.user_id && e.offering == enrollment.offering
        });
        if duplicate {
            return Err(StoreError::UniquenessViolation(format!(
                "enrollment exists for user {} in {}",
                enrollment.user_id, enrollment.offering
            )));
        }
        inner.enrollments.push(enrollment.clone());
        Ok(())
    }

    async fn is_enrolled(
        &self,
        user_id: UserID,
        offering: Offering,
    ) -> StoreResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner
            .enrollments
            .iter()
            .any(|e| e.user_id == user_id && e.offering == offering))
    }

    async fn paid_enrollments(
        &self,
        kind: OfferingKind,
    ) -> StoreResult<Vec<Enrollment>> {
        let inner = self.inner.read().await;
        Ok(inner
            .enrollments
            .iter()
            .filter(|e| e.is_paid() && e.offering.kind() == kind)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CertificateRepository for MemoryStore {
    async fn insert(&self, record: &CertificateRecord) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if inner.certificates.iter().any(|c| c.code == record.code) {
            return Err(StoreError::UniquenessViolation(format!(
                "certificate code {} exists",
                record.code
            )));
        }
        let duplicate_offering = inner.certificates.iter().any(|c| {
            c.user_id == record.user_id && c.offering() == record.offering()
        });
        if duplicate_offering {
            return Err(StoreError::UniquenessViolation(format!(
                "certificate exists for user {}",
                record.user_id
            )));
        }
        inner.certificates.push(record.clone());
        Ok(())
    }

    async fn all(&self) -> StoreResult<Vec<CertificateRecord>> {
        Ok(self.inner.read().await.certificates.clone())
    }

    async fn for_user(&self, user_id: UserID) -> StoreResult<Vec<CertificateRecord>> {
        let inner = self.inner.read().await;
        Ok(inner
            .certificates
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }
}
