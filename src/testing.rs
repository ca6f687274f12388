//! In-memory repositories and file storage for exercising the usecases
//! without PostgreSQL or a disk.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use tutorhub_auth::Identity;
use tutorhub_core::file_storage::{FileStorage, StorageError, StorageFuture};
use tutorhub_core::{AppError, DomainError, RoleSet, UserRole};
use tutorhub_models::{Course, CourseChanges, Feature, NewCourse, NewUser, Subject, User};

use crate::modules::courses::repository::CourseRepository;
use crate::modules::features::repository::FeatureRepository;
use crate::modules::subjects::repository::{SubjectFields, SubjectRepository};
use crate::modules::users::repository::UserRepository;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    tutors: i64,
    participants: i64,
    features: Vec<Feature>,
    subjects: Vec<Subject>,
    courses: Vec<Course>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// One store backing every repository trait, like a single database pool.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn course_count(&self) -> usize {
        self.lock().courses.len()
    }

    /// Raw row access, including soft-deleted courses.
    pub fn course_row(&self, id: i64) -> Option<Course> {
        self.lock().courses.iter().find(|c| c.id == id).cloned()
    }

    /// Seed a user directly; role-linked ids are allocated like registration does.
    pub fn seed_user(&self, role: UserRole, email: &str) -> User {
        let mut t = self.lock();
        let id = t.next_id();
        let (tutor_id, participant_id) = match role {
            UserRole::Tutor => {
                t.tutors += 1;
                (Some(t.tutors), None)
            }
            UserRole::Participant => {
                t.participants += 1;
                (None, Some(t.participants))
            }
            UserRole::Admin => (None, None),
        };
        let user = User {
            id,
            name: email.split('@').next().unwrap_or_default().to_string(),
            email: email.to_string(),
            password: String::new(),
            role,
            tutor_id,
            participant_id,
            is_active: true,
            created_at: Utc::now(),
        };
        t.users.push(user.clone());
        user
    }

    pub fn seed_feature(&self, name: &str, roles: &str, is_active: bool) -> Feature {
        let mut t = self.lock();
        let id = t.next_id();
        let now = Utc::now();
        let feature = Feature {
            id,
            name: name.to_string(),
            roles: roles.parse().unwrap_or_default(),
            is_active,
            created_at: now,
            updated_at: now,
        };
        t.features.push(feature.clone());
        feature
    }

    pub fn seed_subject(&self, feature_id: i64, name: &str) -> Subject {
        let mut t = self.lock();
        let id = t.next_id();
        let now = Utc::now();
        let subject = Subject {
            id,
            feature_id,
            name: name.to_string(),
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        t.subjects.push(subject.clone());
        subject
    }

    pub fn deactivate_user(&self, user_id: i64) {
        let mut t = self.lock();
        if let Some(user) = t.users.iter_mut().find(|u| u.id == user_id) {
            user.is_active = false;
        }
    }
}

/// The caller identity a verified token would produce for `user`.
pub fn identity_of(user: &User) -> Identity {
    Identity {
        user_id: user.id,
        email: user.email.clone(),
        role: user.role,
        expires_at: i64::MAX,
    }
}

impl UserRepository for InMemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.email == email && u.is_active)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut t = self.lock();
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::DuplicateEmail.into());
        }
        let (tutor_id, participant_id) = match user.role {
            UserRole::Tutor => {
                t.tutors += 1;
                (Some(t.tutors), None)
            }
            UserRole::Participant => {
                t.participants += 1;
                (None, Some(t.participants))
            }
            UserRole::Admin => (None, None),
        };
        let id = t.next_id();
        let user = User {
            id,
            name: user.name,
            email: user.email,
            password: user.password_hash,
            role: user.role,
            tutor_id,
            participant_id,
            is_active: true,
            created_at: Utc::now(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_linked_identity(&self, user_id: i64) -> Result<Option<User>, AppError> {
        Ok(self.lock().users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn tutor_exists(&self, tutor_id: i64) -> Result<bool, AppError> {
        Ok(tutor_id > 0 && tutor_id <= self.lock().tutors)
    }
}

impl FeatureRepository for InMemoryStore {
    async fn list_features_for_role(&self, role: UserRole) -> Result<Vec<Feature>, AppError> {
        Ok(self
            .lock()
            .features
            .iter()
            .filter(|f| f.is_active && f.roles.contains(role))
            .cloned()
            .collect())
    }

    async fn find_feature(&self, id: i64) -> Result<Option<Feature>, AppError> {
        Ok(self.lock().features.iter().find(|f| f.id == id).cloned())
    }

    async fn feature_is_active(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.lock().features.iter().any(|f| f.id == id && f.is_active))
    }

    async fn feature_name_taken(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        Ok(self
            .lock()
            .features
            .iter()
            .any(|f| same_name(&f.name, name) && Some(f.id) != exclude_id))
    }

    async fn insert_feature(
        &self,
        name: &str,
        roles: RoleSet,
        is_active: bool,
    ) -> Result<Feature, AppError> {
        let mut t = self.lock();
        let id = t.next_id();
        let now = Utc::now();
        let feature = Feature {
            id,
            name: name.to_string(),
            roles,
            is_active,
            created_at: now,
            updated_at: now,
        };
        t.features.push(feature.clone());
        Ok(feature)
    }

    async fn update_feature(
        &self,
        id: i64,
        name: &str,
        roles: RoleSet,
        is_active: bool,
    ) -> Result<Option<Feature>, AppError> {
        let mut t = self.lock();
        Ok(t.features.iter_mut().find(|f| f.id == id).map(|f| {
            f.name = name.to_string();
            f.roles = roles;
            f.is_active = is_active;
            f.updated_at = Utc::now();
            f.clone()
        }))
    }

    async fn delete_feature(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.lock();
        let before = t.features.len();
        t.features.retain(|f| f.id != id);
        t.subjects.retain(|s| s.feature_id != id);
        Ok(t.features.len() < before)
    }
}

impl SubjectRepository for InMemoryStore {
    async fn list_subjects_by_feature(&self, feature_id: i64) -> Result<Vec<Subject>, AppError> {
        Ok(self
            .lock()
            .subjects
            .iter()
            .filter(|s| s.feature_id == feature_id && s.is_active)
            .cloned()
            .collect())
    }

    async fn find_subject(&self, id: i64) -> Result<Option<Subject>, AppError> {
        Ok(self.lock().subjects.iter().find(|s| s.id == id).cloned())
    }

    async fn subject_in_feature(
        &self,
        subject_id: i64,
        feature_id: i64,
    ) -> Result<bool, AppError> {
        Ok(self
            .lock()
            .subjects
            .iter()
            .any(|s| s.id == subject_id && s.feature_id == feature_id))
    }

    async fn subject_name_taken(
        &self,
        feature_id: i64,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        Ok(self.lock().subjects.iter().any(|s| {
            s.feature_id == feature_id && same_name(&s.name, name) && Some(s.id) != exclude_id
        }))
    }

    async fn insert_subject(&self, fields: SubjectFields) -> Result<Subject, AppError> {
        let mut t = self.lock();
        let id = t.next_id();
        let now = Utc::now();
        let subject = Subject {
            id,
            feature_id: fields.feature_id,
            name: fields.name,
            description: fields.description,
            is_active: fields.is_active,
            created_at: now,
            updated_at: now,
        };
        t.subjects.push(subject.clone());
        Ok(subject)
    }

    async fn update_subject(
        &self,
        id: i64,
        fields: SubjectFields,
    ) -> Result<Option<Subject>, AppError> {
        let mut t = self.lock();
        Ok(t.subjects.iter_mut().find(|s| s.id == id).map(|s| {
            s.feature_id = fields.feature_id;
            s.name = fields.name;
            s.description = fields.description;
            s.is_active = fields.is_active;
            s.updated_at = Utc::now();
            s.clone()
        }))
    }

    async fn delete_subject(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.lock();
        let before = t.subjects.len();
        t.subjects.retain(|s| s.id != id);
        Ok(t.subjects.len() < before)
    }
}

impl CourseRepository for InMemoryStore {
    async fn find_course(&self, id: i64) -> Result<Option<Course>, AppError> {
        Ok(self
            .lock()
            .courses
            .iter()
            .find(|c| c.id == id && c.deleted_at.is_none())
            .cloned())
    }

    async fn list_courses_by_tutor(&self, tutor_id: i64) -> Result<Vec<Course>, AppError> {
        Ok(self
            .lock()
            .courses
            .iter()
            .filter(|c| c.tutor_id == tutor_id && c.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn list_active_courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(self
            .lock()
            .courses
            .iter()
            .filter(|c| c.is_active && c.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn course_name_taken_for_tutor(
        &self,
        name: &str,
        tutor_id: i64,
    ) -> Result<bool, AppError> {
        Ok(self.lock().courses.iter().any(|c| {
            c.deleted_at.is_none() && c.tutor_id == tutor_id && same_name(&c.name, name)
        }))
    }

    async fn course_name_taken_in_subject(
        &self,
        name: &str,
        feature_id: i64,
        subject_id: i64,
        exclude_id: i64,
    ) -> Result<bool, AppError> {
        Ok(self.lock().courses.iter().any(|c| {
            c.deleted_at.is_none()
                && c.id != exclude_id
                && c.feature_id == feature_id
                && c.subject_id == subject_id
                && same_name(&c.name, name)
        }))
    }

    async fn insert_course(&self, course: NewCourse) -> Result<Course, AppError> {
        let mut t = self.lock();
        let id = t.next_id();
        let now = Utc::now();
        let course = Course {
            id,
            tutor_id: course.tutor_id,
            feature_id: course.feature_id,
            subject_id: course.subject_id,
            name: course.name,
            description: course.description,
            price: course.price,
            capacity: course.capacity,
            thumbnail: course.thumbnail,
            is_active: course.is_active,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        t.courses.push(course.clone());
        Ok(course)
    }

    async fn update_course(
        &self,
        id: i64,
        changes: CourseChanges,
    ) -> Result<Option<Course>, AppError> {
        let mut t = self.lock();
        Ok(t
            .courses
            .iter_mut()
            .find(|c| c.id == id && c.deleted_at.is_none())
            .map(|c| {
                c.feature_id = changes.feature_id;
                c.subject_id = changes.subject_id;
                c.name = changes.name;
                c.description = changes.description;
                c.price = changes.price;
                c.capacity = changes.capacity;
                c.thumbnail = changes.thumbnail;
                c.is_active = changes.is_active;
                c.updated_at = Utc::now();
                c.clone()
            }))
    }

    async fn soft_delete_course(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.lock();
        match t
            .courses
            .iter_mut()
            .find(|c| c.id == id && c.deleted_at.is_none())
        {
            Some(course) => {
                course.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// File storage that keeps files in a map and can be told to fail.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_saves: Arc<Mutex<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn files(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.files().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.files().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files().is_empty()
    }

    pub fn fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap_or_else(|p| p.into_inner()) = fail;
    }
}

impl FileStorage for MemoryStorage {
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String> {
        Box::pin(async move {
            if *self.fail_saves.lock().unwrap_or_else(|p| p.into_inner()) {
                return Err(StorageError::Io(std::io::Error::other("disk full")));
            }
            self.files().insert(key.to_string(), content.to_vec());
            Ok(key.to_string())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            self.files().remove(key);
            Ok(())
        })
    }

    fn get_url(&self, key: &str) -> Result<String, StorageError> {
        Ok(format!("http://files.test/uploads/{key}"))
    }
}
