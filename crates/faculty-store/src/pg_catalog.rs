//! `PostgreSQL` implementations of the subject, preference and instructor
//! collaborators.

use async_trait::async_trait;
use sqlx::PgPool;

use faculty_core::catalog::{PreferenceStatus, Subject, TeachingPreference};
use faculty_core::error::DomainError;
use faculty_core::repository::{InstructorDirectory, PreferenceRepository, SubjectRepository};

use crate::infrastructure;

#[derive(Debug, sqlx::FromRow)]
struct SubjectRow {
    id: i64,
    name: String,
    code: String,
    classroom: String,
    credits: i32,
    instructor_id: Option<i64>,
}

impl From<SubjectRow> for Subject {
    fn from(row: SubjectRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            code: row.code,
            classroom: row.classroom,
            credits: row.credits,
            instructor_id: row.instructor_id,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PreferenceRow {
    id: i64,
    instructor_id: i64,
    subject_id: i64,
    weekday: String,
    time_slot: String,
    status: String,
}

impl TryFrom<PreferenceRow> for TeachingPreference {
    type Error = DomainError;

    fn try_from(row: PreferenceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.id),
            instructor_id: row.instructor_id,
            subject_id: row.subject_id,
            weekday: row.weekday,
            time_slot: row.time_slot,
            status: row.status.parse()?,
        })
    }
}

/// PostgreSQL-backed subject repository.
#[derive(Debug, Clone)]
pub struct PgSubjectRepository {
    pool: PgPool,
}

impl PgSubjectRepository {
    /// Creates a new `PgSubjectRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubjectRepository for PgSubjectRepository {
    async fn find_by_id(&self, subject_id: i64) -> Result<Option<Subject>, DomainError> {
        let row = sqlx::query_as::<_, SubjectRow>(
            "SELECT id, name, code, classroom, credits, instructor_id FROM subjects WHERE id = $1",
        )
        .bind(subject_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?;
        Ok(row.map(Subject::from))
    }

    async fn assign_instructor(
        &self,
        subject_id: i64,
        instructor_id: Option<i64>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE subjects SET instructor_id = $1 WHERE id = $2")
            .bind(instructor_id)
            .bind(subject_id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(result.rows_affected() > 0)
    }
}

/// PostgreSQL-backed teaching preference repository.
#[derive(Debug, Clone)]
pub struct PgPreferenceRepository {
    pool: PgPool,
}

impl PgPreferenceRepository {
    /// Creates a new `PgPreferenceRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceRepository for PgPreferenceRepository {
    async fn find_by_id(
        &self,
        preference_id: i64,
    ) -> Result<Option<TeachingPreference>, DomainError> {
        let row = sqlx::query_as::<_, PreferenceRow>(
            r"
            SELECT id, instructor_id, subject_id, weekday, time_slot, status
            FROM teaching_preferences
            WHERE id = $1
            ",
        )
        .bind(preference_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?;
        row.map(TeachingPreference::try_from).transpose()
    }

    async fn create(
        &self,
        mut preference: TeachingPreference,
    ) -> Result<TeachingPreference, DomainError> {
        let (id,): (i64,) = sqlx::query_as(
            r"
            INSERT INTO teaching_preferences (instructor_id, subject_id, weekday, time_slot, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(preference.instructor_id)
        .bind(preference.subject_id)
        .bind(&preference.weekday)
        .bind(&preference.time_slot)
        .bind(preference.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(infrastructure)?;
        preference.id = Some(id);
        Ok(preference)
    }

    async fn update_status(
        &self,
        preference_id: i64,
        status: PreferenceStatus,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE teaching_preferences SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(preference_id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(result.rows_affected() > 0)
    }
}

/// PostgreSQL-backed instructor lookup.
#[derive(Debug, Clone)]
pub struct PgInstructorDirectory {
    pool: PgPool,
}

impl PgInstructorDirectory {
    /// Creates a new `PgInstructorDirectory`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstructorDirectory for PgInstructorDirectory {
    async fn instructor_exists(&self, instructor_id: i64) -> Result<bool, DomainError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM instructors WHERE id = $1)")
                .bind(instructor_id)
                .fetch_one(&self.pool)
                .await
                .map_err(infrastructure)?;
        Ok(exists)
    }
}
