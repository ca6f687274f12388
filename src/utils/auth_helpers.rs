use tutorhub_auth::Identity;
use tutorhub_core::{AppError, DomainError, UserRole};
use tutorhub_models::Course;

use crate::modules::users::repository::UserRepository;

/// What the caller wants to do with an existing course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseAccess {
    Read,
    Modify,
}

/// The tutor id linked to the caller's account.
///
/// Fails with `NotATutor` when the account has no tutor record.
pub async fn caller_tutor_id<R: UserRepository>(
    repo: &R,
    caller: &Identity,
) -> Result<i64, AppError> {
    repo.find_linked_identity(caller.user_id)
        .await?
        .and_then(|user| user.tutor_id)
        .ok_or_else(|| DomainError::NotATutor.into())
}

/// Decide whether `caller` may act on `course`.
///
/// Admins always may. Tutors only on courses they own. Participants may read
/// but never modify.
pub async fn authorize_course_access<R: UserRepository>(
    repo: &R,
    caller: &Identity,
    course: &Course,
    access: CourseAccess,
) -> Result<(), AppError> {
    match caller.role {
        UserRole::Admin => Ok(()),
        UserRole::Tutor => {
            let tutor_id = caller_tutor_id(repo, caller).await?;
            if tutor_id != course.tutor_id {
                tracing::warn!(
                    user_id = caller.user_id,
                    course_id = course.id,
                    "tutor attempted to access another tutor's course"
                );
                return Err(DomainError::NotOwner.into());
            }
            Ok(())
        }
        UserRole::Participant => match access {
            CourseAccess::Read => Ok(()),
            CourseAccess::Modify => Err(DomainError::Forbidden(
                "only the owning tutor or an admin can change a course".to_string(),
            )
            .into()),
        },
    }
}
