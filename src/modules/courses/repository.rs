use sqlx::PgPool;
use tracing::instrument;

use tutorhub_core::AppError;
use tutorhub_models::{Course, CourseChanges, NewCourse};

/// Course persistence. Soft-deleted rows are invisible to every read.
#[trait_variant::make(CourseRepository: Send)]
pub trait LocalCourseRepository {
    async fn find_course(&self, id: i64) -> Result<Option<Course>, AppError>;

    async fn list_courses_by_tutor(&self, tutor_id: i64) -> Result<Vec<Course>, AppError>;

    async fn list_active_courses(&self) -> Result<Vec<Course>, AppError>;

    async fn course_name_taken_for_tutor(
        &self,
        name: &str,
        tutor_id: i64,
    ) -> Result<bool, AppError>;

    async fn course_name_taken_in_subject(
        &self,
        name: &str,
        feature_id: i64,
        subject_id: i64,
        exclude_id: i64,
    ) -> Result<bool, AppError>;

    async fn insert_course(&self, course: NewCourse) -> Result<Course, AppError>;

    async fn update_course(
        &self,
        id: i64,
        changes: CourseChanges,
    ) -> Result<Option<Course>, AppError>;

    /// Stamps `deleted_at`; returns whether a live row was affected.
    async fn soft_delete_course(&self, id: i64) -> Result<bool, AppError>;
}

const COURSE_COLUMNS: &str = "id, tutor_id, feature_id, subject_id, name, description, price, \
     capacity, thumbnail, is_active, created_at, updated_at, deleted_at";

impl CourseRepository for PgPool {
    #[instrument(skip(self))]
    async fn find_course(&self, id: i64) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(self)
        .await?;

        Ok(course)
    }

    #[instrument(skip(self))]
    async fn list_courses_by_tutor(&self, tutor_id: i64) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses
             WHERE tutor_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(tutor_id)
        .fetch_all(self)
        .await?;

        Ok(courses)
    }

    #[instrument(skip(self))]
    async fn list_active_courses(&self) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses
             WHERE is_active = TRUE AND deleted_at IS NULL
             ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self)
        .await?;

        Ok(courses)
    }

    #[instrument(skip(self))]
    async fn course_name_taken_for_tutor(
        &self,
        name: &str,
        tutor_id: i64,
    ) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM courses
                WHERE LOWER(TRIM(name)) = LOWER(TRIM($1))
                  AND tutor_id = $2
                  AND deleted_at IS NULL
            )
            "#,
        )
        .bind(name)
        .bind(tutor_id)
        .fetch_one(self)
        .await?;

        Ok(taken)
    }

    #[instrument(skip(self))]
    async fn course_name_taken_in_subject(
        &self,
        name: &str,
        feature_id: i64,
        subject_id: i64,
        exclude_id: i64,
    ) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM courses
                WHERE LOWER(TRIM(name)) = LOWER(TRIM($1))
                  AND feature_id = $2
                  AND subject_id = $3
                  AND id <> $4
                  AND deleted_at IS NULL
            )
            "#,
        )
        .bind(name)
        .bind(feature_id)
        .bind(subject_id)
        .bind(exclude_id)
        .fetch_one(self)
        .await?;

        Ok(taken)
    }

    #[instrument(skip(self, course), fields(tutor_id = course.tutor_id, name = %course.name))]
    async fn insert_course(&self, course: NewCourse) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses
                (tutor_id, feature_id, subject_id, name, description, price, capacity, thumbnail, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(course.tutor_id)
        .bind(course.feature_id)
        .bind(course.subject_id)
        .bind(&course.name)
        .bind(&course.description)
        .bind(course.price)
        .bind(course.capacity)
        .bind(&course.thumbnail)
        .bind(course.is_active)
        .fetch_one(self)
        .await?;

        Ok(course)
    }

    #[instrument(skip(self, changes))]
    async fn update_course(
        &self,
        id: i64,
        changes: CourseChanges,
    ) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses
             SET feature_id = $2, subject_id = $3, name = $4, description = $5, price = $6,
                 capacity = $7, thumbnail = $8, is_active = $9, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.feature_id)
        .bind(changes.subject_id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.price)
        .bind(changes.capacity)
        .bind(&changes.thumbnail)
        .bind(changes.is_active)
        .fetch_optional(self)
        .await?;

        Ok(course)
    }

    #[instrument(skip(self))]
    async fn soft_delete_course(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE courses SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(self)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
