use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use tutorhub_core::{AppError, DomainError, RoleSet, UserRole};
use tutorhub_models::Feature;

#[trait_variant::make(FeatureRepository: Send)]
pub trait LocalFeatureRepository {
    /// Active features whose role set contains `role`.
    async fn list_features_for_role(&self, role: UserRole) -> Result<Vec<Feature>, AppError>;

    async fn find_feature(&self, id: i64) -> Result<Option<Feature>, AppError>;

    async fn feature_is_active(&self, id: i64) -> Result<bool, AppError>;

    /// Case-insensitive, trimmed name lookup, optionally ignoring one row.
    async fn feature_name_taken(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError>;

    async fn insert_feature(
        &self,
        name: &str,
        roles: RoleSet,
        is_active: bool,
    ) -> Result<Feature, AppError>;

    async fn update_feature(
        &self,
        id: i64,
        name: &str,
        roles: RoleSet,
        is_active: bool,
    ) -> Result<Option<Feature>, AppError>;

    /// Returns whether a row was removed.
    async fn delete_feature(&self, id: i64) -> Result<bool, AppError>;
}

#[derive(FromRow)]
struct FeatureRow {
    id: i64,
    name: String,
    roles: i16,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FeatureRow> for Feature {
    fn from(row: FeatureRow) -> Self {
        Feature {
            id: row.id,
            name: row.name,
            roles: RoleSet::from_bits(row.roles),
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DomainError::Conflict("feature name already exists".to_string()).into()
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            DomainError::Conflict("feature is still referenced by courses".to_string()).into()
        }
        _ => e.into(),
    }
}

impl FeatureRepository for PgPool {
    #[instrument(skip(self))]
    async fn list_features_for_role(&self, role: UserRole) -> Result<Vec<Feature>, AppError> {
        let mask = RoleSet::from_iter([role]).bits();

        let rows = sqlx::query_as::<_, FeatureRow>(
            r#"
            SELECT id, name, roles, is_active, created_at, updated_at
            FROM features
            WHERE is_active = TRUE AND (roles & $1) <> 0
            ORDER BY id
            "#,
        )
        .bind(mask)
        .fetch_all(self)
        .await?;

        Ok(rows.into_iter().map(Feature::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_feature(&self, id: i64) -> Result<Option<Feature>, AppError> {
        let row = sqlx::query_as::<_, FeatureRow>(
            "SELECT id, name, roles, is_active, created_at, updated_at FROM features WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self)
        .await?;

        Ok(row.map(Feature::from))
    }

    #[instrument(skip(self))]
    async fn feature_is_active(&self, id: i64) -> Result<bool, AppError> {
        let active = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM features WHERE id = $1 AND is_active = TRUE)",
        )
        .bind(id)
        .fetch_one(self)
        .await?;

        Ok(active)
    }

    #[instrument(skip(self))]
    async fn feature_name_taken(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM features
                WHERE LOWER(TRIM(name)) = LOWER(TRIM($1))
                  AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(self)
        .await?;

        Ok(taken)
    }

    #[instrument(skip(self))]
    async fn insert_feature(
        &self,
        name: &str,
        roles: RoleSet,
        is_active: bool,
    ) -> Result<Feature, AppError> {
        let row = sqlx::query_as::<_, FeatureRow>(
            r#"
            INSERT INTO features (name, roles, is_active)
            VALUES ($1, $2, $3)
            RETURNING id, name, roles, is_active, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(roles.bits())
        .bind(is_active)
        .fetch_one(self)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn update_feature(
        &self,
        id: i64,
        name: &str,
        roles: RoleSet,
        is_active: bool,
    ) -> Result<Option<Feature>, AppError> {
        let row = sqlx::query_as::<_, FeatureRow>(
            r#"
            UPDATE features
            SET name = $2, roles = $3, is_active = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, roles, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(roles.bits())
        .bind(is_active)
        .fetch_optional(self)
        .await
        .map_err(map_write_error)?;

        Ok(row.map(Feature::from))
    }

    #[instrument(skip(self))]
    async fn delete_feature(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM features WHERE id = $1")
            .bind(id)
            .execute(self)
            .await
            .map_err(map_write_error)?;

        Ok(result.rows_affected() > 0)
    }
}
