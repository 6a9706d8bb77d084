//! Postgres store adapter.
//!
//! Runtime-checked sqlx queries over a shared [`PgPool`]. Uniqueness
//! violations (SQLSTATE 23505) are mapped to
//! [`StoreError::UniquenessViolation`] so callers can branch on them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use lernex_model::{
    CertificateID, CertificateRecord, ClassGroupID, CourseID, Enrollment,
    EnrollmentID, LessonID, LessonProgressRecord, Offering, OfferingKind,
    PaymentStatus, UserID,
};

use super::ports::{
    CertificateRepository, EnrollmentRepository, ProgressRepository, StoreError,
    StoreResult,
};

const UNIQUE_VIOLATION: &str = "23505";

/// Postgres-backed store implementing all repository ports.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap a pool and make sure the schema exists.
    pub async fn connect(pool: PgPool) -> StoreResult<Self> {
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS lesson_progress (
                user_id UUID NOT NULL,
                lesson_id UUID NOT NULL,
                position_secs DOUBLE PRECISION NOT NULL DEFAULT 0,
                completed BOOLEAN NOT NULL DEFAULT FALSE,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (user_id, lesson_id)
            )
            "#,
        )
        .execute(self.pool())
        .await
        .map_err(map_sqlx_err)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS enrollments (
                id UUID PRIMARY KEY,
                user_id UUID NOT NULL,
                offering_kind TEXT NOT NULL,
                offering_id UUID NOT NULL,
                payment_status TEXT NOT NULL,
                enrolled_at TIMESTAMPTZ NOT NULL,
                UNIQUE (user_id, offering_kind, offering_id)
            )
            "#,
        )
        .execute(self.pool())
        .await
        .map_err(map_sqlx_err)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS certificates (
                id UUID PRIMARY KEY,
                user_id UUID NOT NULL,
                course_id UUID,
                class_group_id UUID,
                code TEXT NOT NULL UNIQUE,
                issued_at TIMESTAMPTZ NOT NULL,
                CHECK (num_nonnulls(course_id, class_group_id) = 1)
            )
            "#,
        )
        .execute(self.pool())
        .await
        .map_err(map_sqlx_err)?;

        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS certificates_user_course
            ON certificates (user_id, course_id) WHERE course_id IS NOT NULL
            "#,
        )
        .execute(self.pool())
        .await
        .map_err(map_sqlx_err)?;

        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS certificates_user_class_group
            ON certificates (user_id, class_group_id) WHERE class_group_id IS NOT NULL
            "#,
        )
        .execute(self.pool())
        .await
        .map_err(map_sqlx_err)?;

        Ok(())
    }
}

fn map_sqlx_err(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) => {
            if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
                StoreError::UniquenessViolation(db.message().to_string())
            } else {
                StoreError::Backend(db.message().to_string())
            }
        }
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::Unavailable(err.to_string())
        }
        _ => StoreError::Backend(err.to_string()),
    }
}

fn payment_status_from_str(raw: &str) -> StoreResult<PaymentStatus> {
    match raw {
        "pending" => Ok(PaymentStatus::Pending),
        "paid" => Ok(PaymentStatus::Paid),
        "failed" => Ok(PaymentStatus::Failed),
        other => Err(StoreError::Backend(format!(
            "unknown payment status: {other}"
        ))),
    }
}

fn offering_kind_from_str(raw: &str) -> StoreResult<OfferingKind> {
    match raw {
        "course" => Ok(OfferingKind::Course),
        "mentorship" => Ok(OfferingKind::Mentorship),
        "class_group" => Ok(OfferingKind::ClassGroup),
        other => Err(StoreError::Backend(format!(
            "unknown offering kind: {other}"
        ))),
    }
}

fn enrollment_from_row(row: &PgRow) -> StoreResult<Enrollment> {
    let kind = offering_kind_from_str(row.get::<&str, _>("offering_kind"))?;
    let payment_status = payment_status_from_str(row.get::<&str, _>("payment_status"))?;
    Ok(Enrollment {
        id: EnrollmentID(row.get::<Uuid, _>("id")),
        user_id: UserID(row.get::<Uuid, _>("user_id")),
        offering: Offering::from_parts(kind, row.get::<Uuid, _>("offering_id")),
        payment_status,
        enrolled_at: row.get::<DateTime<Utc>, _>("enrolled_at"),
    })
}

fn certificate_from_row(row: &PgRow) -> CertificateRecord {
    CertificateRecord {
        id: CertificateID(row.get::<Uuid, _>("id")),
        user_id: UserID(row.get::<Uuid, _>("user_id")),
        course_id: row.get::<Option<Uuid>, _>("course_id").map(CourseID),
        class_group_id: row
            .get::<Option<Uuid>, _>("class_group_id")
            .map(ClassGroupID),
        code: row.get::<String, _>("code"),
        issued_at: row.get::<DateTime<Utc>, _>("issued_at"),
    }
}

fn progress_from_row(row: &PgRow) -> LessonProgressRecord {
    LessonProgressRecord {
        user_id: UserID(row.get::<Uuid, _>("user_id")),
        lesson_id: LessonID(row.get::<Uuid, _>("lesson_id")),
        position_secs: row.get::<f64, _>("position_secs"),
        completed: row.get::<bool, _>("completed"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    }
}

#[async_trait]
impl ProgressRepository for PgStore {
    async fn upsert_position(
        &self,
        user_id: UserID,
        lesson_id: LessonID,
        position_secs: f64,
    ) -> StoreResult<()> {
        // Position writes never clear an already-set completion flag.
        sqlx::query(
            r#"
            INSERT INTO lesson_progress (user_id, lesson_id, position_secs, completed, updated_at)
            VALUES ($1, $2, $3, FALSE, NOW())
            ON CONFLICT (user_id, lesson_id) DO UPDATE SET
                position_secs = EXCLUDED.position_secs,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id.to_uuid())
        .bind(lesson_id.to_uuid())
        .bind(position_secs)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn mark_completed(
        &self,
        user_id: UserID,
        lesson_id: LessonID,
        position_secs: f64,
    ) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO lesson_progress (user_id, lesson_id, position_secs, completed, updated_at)
            VALUES ($1, $2, $3, TRUE, NOW())
            ON CONFLICT (user_id, lesson_id) DO UPDATE SET
                position_secs = EXCLUDED.position_secs,
                completed = TRUE,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id.to_uuid())
        .bind(lesson_id.to_uuid())
        .bind(position_secs)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn lesson_progress(
        &self,
        user_id: UserID,
        lesson_id: LessonID,
    ) -> StoreResult<Option<LessonProgressRecord>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, lesson_id, position_secs, completed, updated_at
            FROM lesson_progress
            WHERE user_id = $1 AND lesson_id = $2
            "#,
        )
        .bind(user_id.to_uuid())
        .bind(lesson_id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        Ok(row.as_ref().map(progress_from_row))
    }

    async fn user_progress(
        &self,
        user_id: UserID,
    ) -> StoreResult<Vec<LessonProgressRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, lesson_id, position_secs, completed, updated_at
            FROM lesson_progress
            WHERE user_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(user_id.to_uuid())
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        Ok(rows.iter().map(progress_from_row).collect())
    }
}

#[async_trait]
impl EnrollmentRepository for PgStore {
    async fn insert(&self, enrollment: &Enrollment) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO enrollments (id, user_id, offering_kind, offering_id, payment_status, enrolled_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(enrollment.id.to_uuid())
        .bind(enrollment.user_id.to_uuid())
        .bind(enrollment.offering.kind().as_str())
        .bind(enrollment.offering.to_uuid())
        .bind(enrollment.payment_status.as_str())
        .bind(enrollment.enrolled_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn is_enrolled(
        &self,
        user_id: UserID,
        offering: Offering,
    ) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM enrollments
                WHERE user_id = $1 AND offering_kind = $2 AND offering_id = $3
            )
            "#,
        )
        .bind(user_id.to_uuid())
        .bind(offering.kind().as_str())
        .bind(offering.to_uuid())
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        Ok(exists)
    }

    async fn paid_enrollments(
        &self,
        kind: OfferingKind,
    ) -> StoreResult<Vec<Enrollment>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, offering_kind, offering_id, payment_status, enrolled_at
            FROM enrollments
            WHERE offering_kind = $1 AND payment_status = 'paid'
            ORDER BY enrolled_at
            "#,
        )
        .bind(kind.as_str())
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        rows.iter().map(enrollment_from_row).collect()
    }
}

#[async_trait]
impl CertificateRepository for PgStore {
    async fn insert(&self, record: &CertificateRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO certificates (id, user_id, course_id, class_group_id, code, issued_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id.to_uuid())
        .bind(record.user_id.to_uuid())
        .bind(record.course_id.map(|id| id.to_uuid()))
        .bind(record.class_group_id.map(|id| id.to_uuid()))
        .bind(&record.code)
        .bind(record.issued_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn all(&self) -> StoreResult<Vec<CertificateRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, course_id, class_group_id, code, issued_at
            FROM certificates
            ORDER BY issued_at
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        Ok(rows.iter().map(certificate_from_row).collect())
    }

    async fn for_user(&self, user_id: UserID) -> StoreResult<Vec<CertificateRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, course_id, class_group_id, code, issued_at
            FROM certificates
            WHERE user_id = $1
            ORDER BY issued_at
            "#,
        )
        .bind(user_id.to_uuid())
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        Ok(rows.iter().map(certificate_from_row).collect())
    }
}
