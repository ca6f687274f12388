use sqlx::PgPool;
use tracing::instrument;

use tutorhub_core::{AppError, DomainError};
use tutorhub_models::Subject;

/// Column values written by create and update.
#[derive(Debug, Clone)]
pub struct SubjectFields {
    pub feature_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

#[trait_variant::make(SubjectRepository: Send)]
pub trait LocalSubjectRepository {
    /// Active subjects of one feature.
    async fn list_subjects_by_feature(&self, feature_id: i64) -> Result<Vec<Subject>, AppError>;

    async fn find_subject(&self, id: i64) -> Result<Option<Subject>, AppError>;

    async fn subject_in_feature(&self, subject_id: i64, feature_id: i64)
    -> Result<bool, AppError>;

    /// Case-insensitive, trimmed name lookup within a feature, optionally
    /// ignoring one row.
    async fn subject_name_taken(
        &self,
        feature_id: i64,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError>;

    async fn insert_subject(&self, fields: SubjectFields) -> Result<Subject, AppError>;

    async fn update_subject(
        &self,
        id: i64,
        fields: SubjectFields,
    ) -> Result<Option<Subject>, AppError>;

    async fn delete_subject(&self, id: i64) -> Result<bool, AppError>;
}

const SUBJECT_COLUMNS: &str = "id, feature_id, name, description, is_active, created_at, updated_at";

fn map_write_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DomainError::Conflict("subject name already exists in this feature".to_string()).into()
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            DomainError::Conflict("subject is still referenced by courses".to_string()).into()
        }
        _ => e.into(),
    }
}

impl SubjectRepository for PgPool {
    #[instrument(skip(self))]
    async fn list_subjects_by_feature(&self, feature_id: i64) -> Result<Vec<Subject>, AppError> {
        let subjects = sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects
             WHERE feature_id = $1 AND is_active = TRUE
             ORDER BY id"
        ))
        .bind(feature_id)
        .fetch_all(self)
        .await?;

        Ok(subjects)
    }

    #[instrument(skip(self))]
    async fn find_subject(&self, id: i64) -> Result<Option<Subject>, AppError> {
        let subject = sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self)
        .await?;

        Ok(subject)
    }

    #[instrument(skip(self))]
    async fn subject_in_feature(
        &self,
        subject_id: i64,
        feature_id: i64,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM subjects WHERE id = $1 AND feature_id = $2)",
        )
        .bind(subject_id)
        .bind(feature_id)
        .fetch_one(self)
        .await?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn subject_name_taken(
        &self,
        feature_id: i64,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM subjects
                WHERE feature_id = $1
                  AND LOWER(TRIM(name)) = LOWER(TRIM($2))
                  AND ($3::BIGINT IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(feature_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_one(self)
        .await?;

        Ok(taken)
    }

    #[instrument(skip(self))]
    async fn insert_subject(&self, fields: SubjectFields) -> Result<Subject, AppError> {
        let subject = sqlx::query_as::<_, Subject>(&format!(
            "INSERT INTO subjects (feature_id, name, description, is_active)
             VALUES ($1, $2, $3, $4)
             RETURNING {SUBJECT_COLUMNS}"
        ))
        .bind(fields.feature_id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.is_active)
        .fetch_one(self)
        .await
        .map_err(map_write_error)?;

        Ok(subject)
    }

    #[instrument(skip(self))]
    async fn update_subject(
        &self,
        id: i64,
        fields: SubjectFields,
    ) -> Result<Option<Subject>, AppError> {
        let subject = sqlx::query_as::<_, Subject>(&format!(
            "UPDATE subjects
             SET feature_id = $2, name = $3, description = $4, is_active = $5, updated_at = NOW()
             WHERE id = $1
             RETURNING {SUBJECT_COLUMNS}"
        ))
        .bind(id)
        .bind(fields.feature_id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.is_active)
        .fetch_optional(self)
        .await
        .map_err(map_write_error)?;

        Ok(subject)
    }

    #[instrument(skip(self))]
    async fn delete_subject(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(self)
            .await
            .map_err(map_write_error)?;

        Ok(result.rows_affected() > 0)
    }
}
