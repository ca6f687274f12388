use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use tutorhub_auth::Identity;
use tutorhub_core::file_storage::{StorageError, thumbnail_extension};
use tutorhub_core::{AppError, DomainError, FileStorage, UserRole};
use tutorhub_models::{
    Course, CourseChanges, CourseForm, CourseListQuery, CourseResponse, NewCourse,
    ThumbnailUpload,
};
use tutorhub_observability::{track_course_created, track_thumbnail_compensation};

use crate::middleware::role::require_role;
use crate::modules::courses::repository::CourseRepository;
use crate::modules::features::repository::FeatureRepository;
use crate::modules::subjects::repository::SubjectRepository;
use crate::modules::users::repository::UserRepository;
use crate::utils::auth_helpers::{CourseAccess, authorize_course_access, caller_tutor_id};

/// Every store the course usecases read from.
pub trait CourseStore:
    UserRepository + FeatureRepository + SubjectRepository + CourseRepository
{
}

impl<T> CourseStore for T where
    T: UserRepository + FeatureRepository + SubjectRepository + CourseRepository
{
}

/// Required form fields after trimming and range checks.
#[derive(Debug)]
struct CourseDetails {
    name: String,
    description: String,
    price: f64,
    feature_id: i64,
    subject_id: i64,
}

impl CourseDetails {
    fn from_form(form: &CourseForm) -> Result<Self, DomainError> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name is required"));
        }

        let description = form.description.trim();
        if description.is_empty() {
            return Err(DomainError::validation("description is required"));
        }

        if !form.price.is_finite() || form.price <= 0.0 {
            return Err(DomainError::validation("price must be greater than 0"));
        }

        if form.feature_id <= 0 {
            return Err(DomainError::validation("feature_id is required"));
        }

        if form.subject_id <= 0 {
            return Err(DomainError::validation("subject_id is required"));
        }

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            price: form.price,
            feature_id: form.feature_id,
            subject_id: form.subject_id,
        })
    }
}

fn check_capacity(capacity: Option<i32>) -> Result<Option<i32>, DomainError> {
    match capacity {
        Some(n) if n < 0 => Err(DomainError::validation("limit_peserta must not be negative")),
        other => Ok(other),
    }
}

/// `thumbnails/bimbel_<millis>_<uuid>.<ext>`
fn thumbnail_key(file_name: &str) -> Result<String, StorageError> {
    let ext = thumbnail_extension(file_name)?;
    Ok(format!(
        "thumbnails/bimbel_{}_{}.{ext}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    ))
}

async fn store_thumbnail<S>(storage: &S, upload: &ThumbnailUpload) -> Result<String, AppError>
where
    S: FileStorage + ?Sized,
{
    if upload.bytes.is_empty() {
        return Err(DomainError::validation("thumbnail is empty").into());
    }

    let key = thumbnail_key(&upload.file_name)?;
    Ok(storage.save(&key, &upload.bytes).await?)
}

/// Best-effort removal of a file whose row never made it to the database.
async fn discard_thumbnail<S>(storage: &S, key: &str)
where
    S: FileStorage + ?Sized,
{
    track_thumbnail_compensation();
    if let Err(err) = storage.delete(key).await {
        tracing::warn!(key, error = %err, "failed to remove orphaned thumbnail");
    }
}

fn to_response<S>(storage: &S, course: Course) -> Result<CourseResponse, AppError>
where
    S: FileStorage + ?Sized,
{
    let thumbnail_url = storage.get_url(&course.thumbnail)?;
    Ok(CourseResponse {
        course,
        thumbnail_url,
    })
}

pub struct CourseService;

impl CourseService {
    /// Store the thumbnail, then validate and insert the course.
    ///
    /// Any failure after the file is written removes it again.
    #[instrument(skip(repo, storage, form), fields(course_name = %form.name))]
    pub async fn create<R, S>(
        repo: &R,
        storage: &S,
        caller: &Identity,
        mut form: CourseForm,
    ) -> Result<CourseResponse, AppError>
    where
        R: CourseStore,
        S: FileStorage + ?Sized,
    {
        require_role(caller, &[UserRole::Admin, UserRole::Tutor])?;

        let upload = form
            .thumbnail
            .take()
            .ok_or_else(|| DomainError::validation("thumbnail is required"))?;
        let key = store_thumbnail(storage, &upload).await?;

        match Self::insert_with_thumbnail(repo, storage, caller, &form, &key).await {
            Ok(created) => {
                track_course_created();
                tracing::info!(
                    course_id = created.course.id,
                    tutor_id = created.course.tutor_id,
                    "course created"
                );
                Ok(created)
            }
            Err(err) => {
                discard_thumbnail(storage, &key).await;
                Err(err)
            }
        }
    }

    async fn insert_with_thumbnail<R, S>(
        repo: &R,
        storage: &S,
        caller: &Identity,
        form: &CourseForm,
        key: &str,
    ) -> Result<CourseResponse, AppError>
    where
        R: CourseStore,
        S: FileStorage + ?Sized,
    {
        let details = CourseDetails::from_form(form)?;
        let capacity = check_capacity(form.capacity)?;
        let tutor_id = Self::resolve_owner(repo, caller, form.tutor_id).await?;

        Self::check_catalog(repo, details.feature_id, details.subject_id).await?;

        if repo
            .course_name_taken_for_tutor(&details.name, tutor_id)
            .await?
        {
            return Err(DomainError::Conflict(
                "course name already exists for this tutor".to_string(),
            )
            .into());
        }

        let thumbnail_url = storage.get_url(key)?;

        let course = repo
            .insert_course(NewCourse {
                tutor_id,
                feature_id: details.feature_id,
                subject_id: details.subject_id,
                name: details.name,
                description: details.description,
                price: details.price,
                capacity: capacity.unwrap_or(0),
                thumbnail: key.to_string(),
                is_active: form.is_active.unwrap_or(true),
            })
            .await?;

        Ok(CourseResponse {
            course,
            thumbnail_url,
        })
    }

    /// Replace a course's fields, and its thumbnail when a new one is sent.
    ///
    /// The previous file is removed only once the row points at the new one.
    #[instrument(skip(repo, storage, form))]
    pub async fn update<R, S>(
        repo: &R,
        storage: &S,
        caller: &Identity,
        id: i64,
        mut form: CourseForm,
    ) -> Result<CourseResponse, AppError>
    where
        R: CourseStore,
        S: FileStorage + ?Sized,
    {
        let existing = Self::load(repo, id).await?;
        authorize_course_access(repo, caller, &existing, CourseAccess::Modify).await?;

        let details = CourseDetails::from_form(&form)?;
        let capacity = check_capacity(form.capacity)?.unwrap_or(existing.capacity);

        Self::check_catalog(repo, details.feature_id, details.subject_id).await?;

        if repo
            .course_name_taken_in_subject(&details.name, details.feature_id, details.subject_id, id)
            .await?
        {
            return Err(DomainError::Conflict(
                "course name already exists for this feature and subject".to_string(),
            )
            .into());
        }

        let new_key = match form.thumbnail.take() {
            Some(upload) => Some(store_thumbnail(storage, &upload).await?),
            None => None,
        };

        let changes = CourseChanges {
            feature_id: details.feature_id,
            subject_id: details.subject_id,
            name: details.name,
            description: details.description,
            price: details.price,
            capacity,
            thumbnail: new_key.clone().unwrap_or_else(|| existing.thumbnail.clone()),
            is_active: form.is_active.unwrap_or(existing.is_active),
        };

        let updated = match repo.update_course(id, changes).await {
            Ok(Some(course)) => course,
            result => {
                if let Some(key) = &new_key {
                    discard_thumbnail(storage, key).await;
                }
                return match result {
                    Err(err) => Err(err),
                    _ => Err(DomainError::NotFound("course").into()),
                };
            }
        };

        if new_key.is_some()
            && let Err(err) = storage.delete(&existing.thumbnail).await
        {
            tracing::warn!(
                key = %existing.thumbnail,
                error = %err,
                "failed to remove replaced thumbnail"
            );
        }

        tracing::info!(course_id = id, "course updated");
        to_response(storage, updated)
    }

    /// Soft delete. The thumbnail stays on disk.
    #[instrument(skip(repo))]
    pub async fn delete<R: CourseStore>(
        repo: &R,
        caller: &Identity,
        id: i64,
    ) -> Result<(), AppError> {
        let existing = Self::load(repo, id).await?;
        authorize_course_access(repo, caller, &existing, CourseAccess::Modify).await?;

        if !repo.soft_delete_course(id).await? {
            return Err(DomainError::NotFound("course").into());
        }

        tracing::info!(course_id = id, "course deleted");
        Ok(())
    }

    #[instrument(skip(repo, storage))]
    pub async fn get<R, S>(
        repo: &R,
        storage: &S,
        caller: &Identity,
        id: i64,
    ) -> Result<CourseResponse, AppError>
    where
        R: CourseStore,
        S: FileStorage + ?Sized,
    {
        let course = Self::load(repo, id).await?;
        authorize_course_access(repo, caller, &course, CourseAccess::Read).await?;
        to_response(storage, course)
    }

    /// Tutors see their own courses, admins a chosen tutor's courses or the
    /// active catalog, participants the active catalog.
    #[instrument(skip(repo, storage))]
    pub async fn list<R, S>(
        repo: &R,
        storage: &S,
        caller: &Identity,
        query: CourseListQuery,
    ) -> Result<Vec<CourseResponse>, AppError>
    where
        R: CourseStore,
        S: FileStorage + ?Sized,
    {
        let courses = match (caller.role, query.tutor_id) {
            (UserRole::Tutor, _) => {
                let tutor_id = caller_tutor_id(repo, caller).await?;
                repo.list_courses_by_tutor(tutor_id).await?
            }
            (UserRole::Admin, Some(tutor_id)) => repo.list_courses_by_tutor(tutor_id).await?,
            _ => repo.list_active_courses().await?,
        };

        courses
            .into_iter()
            .map(|course| to_response(storage, course))
            .collect()
    }

    async fn load<R: CourseRepository>(repo: &R, id: i64) -> Result<Course, AppError> {
        repo.find_course(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("course").into())
    }

    /// Tutors always own what they create; admins name the tutor.
    async fn resolve_owner<R: UserRepository>(
        repo: &R,
        caller: &Identity,
        requested: Option<i64>,
    ) -> Result<i64, AppError> {
        match caller.role {
            UserRole::Tutor => caller_tutor_id(repo, caller).await,
            UserRole::Admin => {
                let tutor_id = requested
                    .filter(|id| *id > 0)
                    .ok_or_else(|| DomainError::validation("tutor_id is required"))?;
                if !repo.tutor_exists(tutor_id).await? {
                    return Err(DomainError::validation("tutor not found").into());
                }
                Ok(tutor_id)
            }
            UserRole::Participant => Err(DomainError::Forbidden(
                "participants cannot create courses".to_string(),
            )
            .into()),
        }
    }

    async fn check_catalog<R>(repo: &R, feature_id: i64, subject_id: i64) -> Result<(), AppError>
    where
        R: FeatureRepository + SubjectRepository,
    {
        if !repo.feature_is_active(feature_id).await? {
            return Err(DomainError::InvalidFeatureReference.into());
        }
        if !repo.subject_in_feature(subject_id, feature_id).await? {
            return Err(DomainError::InvalidSubjectReference.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryStore, MemoryStorage, identity_of};
    use tutorhub_models::{Feature, Subject};

    struct Fixture {
        store: InMemoryStore,
        storage: MemoryStorage,
        feature: Feature,
        subject: Subject,
        tutor: Identity,
    }

    fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let feature = store.seed_feature("Bimbel", "admin,tutor", true);
        let subject = store.seed_subject(feature.id, "Math");
        let tutor = identity_of(&store.seed_user(UserRole::Tutor, "t@x.com"));
        Fixture {
            store,
            storage: MemoryStorage::new(),
            feature,
            subject,
            tutor,
        }
    }

    impl Fixture {
        fn form(&self, name: &str) -> CourseForm {
            CourseForm {
                name: name.to_string(),
                description: "Intensive algebra".to_string(),
                price: 150_000.0,
                feature_id: self.feature.id,
                subject_id: self.subject.id,
                capacity: Some(20),
                tutor_id: None,
                is_active: None,
                thumbnail: Some(ThumbnailUpload {
                    file_name: "cover.PNG".to_string(),
                    bytes: vec![0x89, 0x50, 0x4e, 0x47],
                }),
            }
        }

        fn user(&self, role: UserRole, email: &str) -> Identity {
            identity_of(&self.store.seed_user(role, email))
        }

        async fn create_as_tutor(&self, name: &str) -> CourseResponse {
            CourseService::create(&self.store, &self.storage, &self.tutor, self.form(name))
                .await
                .unwrap()
        }
    }

    #[tokio::test]
    async fn tutor_owns_created_course_regardless_of_form() {
        let fx = fixture();
        let mut form = fx.form("Algebra");
        form.tutor_id = Some(999);

        let created = CourseService::create(&fx.store, &fx.storage, &fx.tutor, form)
            .await
            .unwrap();

        let own_tutor_id = caller_tutor_id(&fx.store, &fx.tutor).await.unwrap();
        assert_eq!(created.course.tutor_id, own_tutor_id);
        assert!(created.course.is_active);
        assert_eq!(created.course.capacity, 20);
        assert!(created.course.thumbnail.starts_with("thumbnails/bimbel_"));
        assert!(created.course.thumbnail.ends_with(".png"));
        assert!(fx.storage.contains(&created.course.thumbnail));
        assert!(created.thumbnail_url.ends_with(&created.course.thumbnail));
    }

    #[tokio::test]
    async fn failed_validation_leaves_no_thumbnail_behind() {
        let fx = fixture();

        let mut zero_price = fx.form("Algebra");
        zero_price.price = 0.0;
        let mut blank_description = fx.form("Algebra");
        blank_description.description = "   ".to_string();
        let mut missing_subject = fx.form("Algebra");
        missing_subject.subject_id = 0;

        for form in [zero_price, blank_description, missing_subject] {
            let err = CourseService::create(&fx.store, &fx.storage, &fx.tutor, form)
                .await
                .unwrap_err();
            assert_eq!(err.status.as_u16(), 400);
        }

        assert!(fx.storage.is_empty());
        assert_eq!(fx.store.course_count(), 0);
    }

    #[tokio::test]
    async fn non_finite_prices_are_rejected() {
        let fx = fixture();

        for price in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let mut form = fx.form("Algebra");
            form.price = price;
            let err = CourseService::create(&fx.store, &fx.storage, &fx.tutor, form)
                .await
                .unwrap_err();
            assert_eq!(err.public_message(), "price must be greater than 0");
        }

        assert!(fx.storage.is_empty());
        assert_eq!(fx.store.course_count(), 0);
    }

    #[tokio::test]
    async fn thumbnail_is_required_and_must_be_an_image() {
        let fx = fixture();

        let mut no_file = fx.form("Algebra");
        no_file.thumbnail = None;
        let err = CourseService::create(&fx.store, &fx.storage, &fx.tutor, no_file)
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), "thumbnail is required");

        let mut gif = fx.form("Algebra");
        gif.thumbnail = Some(ThumbnailUpload {
            file_name: "cover.gif".to_string(),
            bytes: vec![1],
        });
        let err = CourseService::create(&fx.store, &fx.storage, &fx.tutor, gif)
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
        assert!(fx.storage.is_empty());
    }

    #[tokio::test]
    async fn duplicate_name_for_same_tutor_is_a_conflict() {
        let fx = fixture();
        fx.create_as_tutor("Algebra").await;

        let err = CourseService::create(&fx.store, &fx.storage, &fx.tutor, fx.form(" algebra "))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 409);
        assert_eq!(fx.storage.len(), 1);
        assert_eq!(fx.store.course_count(), 1);

        let other = fx.user(UserRole::Tutor, "t2@x.com");
        CourseService::create(&fx.store, &fx.storage, &other, fx.form("Algebra"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn catalog_references_are_checked() {
        let fx = fixture();
        let inactive = fx.store.seed_feature("Arsip", "tutor", false);
        let elsewhere = fx.store.seed_subject(inactive.id, "History");

        let mut bad_feature = fx.form("Algebra");
        bad_feature.feature_id = inactive.id;
        let err = CourseService::create(&fx.store, &fx.storage, &fx.tutor, bad_feature)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(&DomainError::InvalidFeatureReference));

        let mut foreign_subject = fx.form("Algebra");
        foreign_subject.subject_id = elsewhere.id;
        let err = CourseService::create(&fx.store, &fx.storage, &fx.tutor, foreign_subject)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(&DomainError::InvalidSubjectReference));

        assert!(fx.storage.is_empty());
    }

    #[tokio::test]
    async fn admin_creates_for_named_tutor() {
        let fx = fixture();
        let admin = fx.user(UserRole::Admin, "a@x.com");
        let tutor_id = caller_tutor_id(&fx.store, &fx.tutor).await.unwrap();

        let err = CourseService::create(&fx.store, &fx.storage, &admin, fx.form("Algebra"))
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), "tutor_id is required");

        let mut unknown = fx.form("Algebra");
        unknown.tutor_id = Some(tutor_id + 100);
        let err = CourseService::create(&fx.store, &fx.storage, &admin, unknown)
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);

        let mut form = fx.form("Algebra");
        form.tutor_id = Some(tutor_id);
        let created = CourseService::create(&fx.store, &fx.storage, &admin, form)
            .await
            .unwrap();
        assert_eq!(created.course.tutor_id, tutor_id);
        assert_eq!(fx.storage.len(), 1);
    }

    #[tokio::test]
    async fn participants_and_unlinked_tutors_cannot_create() {
        let fx = fixture();
        let participant = fx.user(UserRole::Participant, "p@x.com");

        let err = CourseService::create(&fx.store, &fx.storage, &participant, fx.form("Algebra"))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 403);

        let admin_user = fx.store.seed_user(UserRole::Admin, "a@x.com");
        let unlinked = Identity {
            role: UserRole::Tutor,
            ..identity_of(&admin_user)
        };
        let err = CourseService::create(&fx.store, &fx.storage, &unlinked, fx.form("Algebra"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(&DomainError::NotATutor));

        assert!(fx.storage.is_empty());
    }

    #[tokio::test]
    async fn other_tutors_cannot_touch_a_course() {
        let fx = fixture();
        let created = fx.create_as_tutor("Algebra").await;
        let intruder = fx.user(UserRole::Tutor, "t2@x.com");

        let err = CourseService::update(
            &fx.store,
            &fx.storage,
            &intruder,
            created.course.id,
            fx.form("Hijacked"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), Some(&DomainError::NotOwner));
        assert_eq!(err.status.as_u16(), 403);

        let err = CourseService::delete(&fx.store, &intruder, created.course.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(&DomainError::NotOwner));

        let err = CourseService::get(&fx.store, &fx.storage, &intruder, created.course.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(&DomainError::NotOwner));

        let unchanged = fx.store.course_row(created.course.id).unwrap();
        assert_eq!(unchanged.name, "Algebra");
        assert!(unchanged.deleted_at.is_none());
        assert_eq!(fx.storage.len(), 1);
    }

    #[tokio::test]
    async fn admin_may_update_any_course() {
        let fx = fixture();
        let created = fx.create_as_tutor("Algebra").await;
        let admin = fx.user(UserRole::Admin, "a@x.com");

        let mut form = fx.form("Algebra II");
        form.thumbnail = None;
        form.capacity = None;
        form.is_active = Some(false);

        let updated = CourseService::update(&fx.store, &fx.storage, &admin, created.course.id, form)
            .await
            .unwrap();
        assert_eq!(updated.course.name, "Algebra II");
        assert_eq!(updated.course.capacity, 20);
        assert!(!updated.course.is_active);
        assert_eq!(updated.course.thumbnail, created.course.thumbnail);
        assert!(fx.storage.contains(&created.course.thumbnail));
    }

    #[tokio::test]
    async fn replacing_thumbnail_removes_the_old_file() {
        let fx = fixture();
        let created = fx.create_as_tutor("Algebra").await;

        let mut form = fx.form("Algebra");
        form.thumbnail = Some(ThumbnailUpload {
            file_name: "new.jpeg".to_string(),
            bytes: vec![0xff, 0xd8],
        });
        let updated =
            CourseService::update(&fx.store, &fx.storage, &fx.tutor, created.course.id, form)
                .await
                .unwrap();

        assert_ne!(updated.course.thumbnail, created.course.thumbnail);
        assert!(updated.course.thumbnail.ends_with(".jpeg"));
        assert!(fx.storage.contains(&updated.course.thumbnail));
        assert!(!fx.storage.contains(&created.course.thumbnail));
        assert_eq!(fx.storage.len(), 1);
    }

    #[tokio::test]
    async fn failed_save_keeps_the_previous_thumbnail() {
        let fx = fixture();
        let created = fx.create_as_tutor("Algebra").await;
        fx.storage.fail_saves(true);

        let err = CourseService::update(
            &fx.store,
            &fx.storage,
            &fx.tutor,
            created.course.id,
            fx.form("Algebra"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status.as_u16(), 500);

        let row = fx.store.course_row(created.course.id).unwrap();
        assert_eq!(row.thumbnail, created.course.thumbnail);
        assert!(fx.storage.contains(&created.course.thumbnail));
    }

    #[tokio::test]
    async fn update_rejects_names_taken_in_same_subject() {
        let fx = fixture();
        fx.create_as_tutor("Algebra").await;
        let second = fx.create_as_tutor("Geometry").await;

        let mut form = fx.form("ALGEBRA");
        form.thumbnail = None;
        let err = CourseService::update(&fx.store, &fx.storage, &fx.tutor, second.course.id, form)
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 409);
    }

    #[tokio::test]
    async fn delete_is_soft_and_hides_the_course() {
        let fx = fixture();
        let created = fx.create_as_tutor("Algebra").await;

        CourseService::delete(&fx.store, &fx.tutor, created.course.id)
            .await
            .unwrap();

        let err = CourseService::get(&fx.store, &fx.storage, &fx.tutor, created.course.id)
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 404);

        let row = fx.store.course_row(created.course.id).unwrap();
        assert!(row.deleted_at.is_some());
        assert!(fx.storage.contains(&created.course.thumbnail));

        let err = CourseService::delete(&fx.store, &fx.tutor, created.course.id)
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 404);
    }

    #[tokio::test]
    async fn participants_read_but_never_modify() {
        let fx = fixture();
        let created = fx.create_as_tutor("Algebra").await;
        let participant = fx.user(UserRole::Participant, "p@x.com");

        let seen = CourseService::get(&fx.store, &fx.storage, &participant, created.course.id)
            .await
            .unwrap();
        assert_eq!(seen.course.id, created.course.id);

        let err = CourseService::delete(&fx.store, &participant, created.course.id)
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
    }

    #[tokio::test]
    async fn list_is_scoped_by_role() {
        let fx = fixture();
        fx.create_as_tutor("Algebra").await;
        let other = fx.user(UserRole::Tutor, "t2@x.com");
        let other_course = CourseService::create(&fx.store, &fx.storage, &other, fx.form("Calculus"))
            .await
            .unwrap();

        let own = CourseService::list(&fx.store, &fx.storage, &fx.tutor, CourseListQuery::default())
            .await
            .unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].course.name, "Algebra");

        let admin = fx.user(UserRole::Admin, "a@x.com");
        let scoped = CourseService::list(
            &fx.store,
            &fx.storage,
            &admin,
            CourseListQuery {
                tutor_id: Some(other_course.course.tutor_id),
            },
        )
        .await
        .unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].course.name, "Calculus");

        let participant = fx.user(UserRole::Participant, "p@x.com");
        let catalog =
            CourseService::list(&fx.store, &fx.storage, &participant, CourseListQuery::default())
                .await
                .unwrap();
        assert_eq!(catalog.len(), 2);
    }
}
