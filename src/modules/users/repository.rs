//! Credential store: user accounts and their role-linked identity rows.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use tutorhub_core::{AppError, DomainError, UserRole};
use tutorhub_models::{NewUser, User};

#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Active, non-deleted account with this exact email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Insert the linked tutor/participant row (when the role has one) and the
    /// user row as one atomic unit.
    async fn create_user(&self, user: NewUser) -> Result<User, AppError>;

    /// The user row, carrying its own tutor/participant id.
    async fn find_linked_identity(&self, user_id: i64) -> Result<Option<User>, AppError>;

    async fn tutor_exists(&self, tutor_id: i64) -> Result<bool, AppError>;
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password: String,
    role: String,
    tutor_id: Option<i64>,
    participant_id: Option<i64>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: UserRole = row.role.parse()?;
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            password: row.password,
            role,
            tutor_id: row.tutor_id,
            participant_id: row.participant_id,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

const USER_COLUMNS: &str =
    "id, name, email, password, role, tutor_id, participant_id, is_active, created_at";

impl UserRepository for PgPool {
    #[instrument(skip(self))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE email = $1 AND is_active = TRUE AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(self)
        .await?;

        row.map(User::try_from).transpose()
    }

    #[instrument(skip(self, user), fields(email = %user.email, role = %user.role))]
    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tx = self.begin().await?;

        let (tutor_id, participant_id) = match user.role {
            UserRole::Tutor => {
                let id: i64 =
                    sqlx::query_scalar("INSERT INTO tutors (is_active) VALUES (TRUE) RETURNING id")
                        .fetch_one(&mut *tx)
                        .await?;
                (Some(id), None)
            }
            UserRole::Participant => {
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO participants (is_active) VALUES (TRUE) RETURNING id",
                )
                .fetch_one(&mut *tx)
                .await?;
                (None, Some(id))
            }
            UserRole::Admin => (None, None),
        };

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (name, email, password, role, tutor_id, participant_id, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, TRUE)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(tutor_id)
        .bind(participant_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::from(DomainError::DuplicateEmail)
            }
            _ => AppError::from(e),
        })?;

        tx.commit().await?;

        User::try_from(row)
    }

    #[instrument(skip(self))]
    async fn find_linked_identity(&self, user_id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(user_id)
        .fetch_optional(self)
        .await?;

        row.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn tutor_exists(&self, tutor_id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM tutors WHERE id = $1 AND is_active = TRUE)",
        )
        .bind(tutor_id)
        .fetch_one(self)
        .await?;

        Ok(exists)
    }
}
