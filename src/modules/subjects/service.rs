use tracing::instrument;

use tutorhub_auth::Identity;
use tutorhub_core::{AppError, DomainError};
use tutorhub_models::{CreateSubjectDto, Subject, UpdateSubjectDto};

use crate::middleware::role::require_admin;
use crate::modules::features::repository::FeatureRepository;
use crate::modules::subjects::repository::{SubjectFields, SubjectRepository};
use crate::utils::validation::{non_blank, require_name};

pub struct SubjectService;

impl SubjectService {
    /// Active subjects of a feature. An unknown feature simply has none.
    #[instrument(skip(repo))]
    pub async fn list_by_feature<R: SubjectRepository>(
        repo: &R,
        feature_id: i64,
    ) -> Result<Vec<Subject>, AppError> {
        repo.list_subjects_by_feature(feature_id).await
    }

    #[instrument(skip(repo))]
    pub async fn get<R: SubjectRepository>(repo: &R, id: i64) -> Result<Subject, AppError> {
        repo.find_subject(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("subject").into())
    }

    #[instrument(skip(repo))]
    pub async fn create<R>(
        repo: &R,
        caller: &Identity,
        dto: CreateSubjectDto,
    ) -> Result<Subject, AppError>
    where
        R: FeatureRepository + SubjectRepository,
    {
        require_admin(caller)?;

        let fields = SubjectFields {
            feature_id: dto.feature_id,
            name: require_name(&dto.name, 1)?,
            description: non_blank(dto.description),
            is_active: dto.is_active.unwrap_or(true),
        };
        Self::check_placement(repo, &fields, None).await?;

        let subject = repo.insert_subject(fields).await?;

        tracing::info!(subject_id = subject.id, feature_id = subject.feature_id, "subject created");
        Ok(subject)
    }

    #[instrument(skip(repo))]
    pub async fn update<R>(
        repo: &R,
        caller: &Identity,
        id: i64,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError>
    where
        R: FeatureRepository + SubjectRepository,
    {
        require_admin(caller)?;

        let existing = Self::get(repo, id).await?;

        let fields = SubjectFields {
            feature_id: dto.feature_id,
            name: require_name(&dto.name, 1)?,
            description: non_blank(dto.description),
            is_active: dto.is_active.unwrap_or(existing.is_active),
        };
        Self::check_placement(repo, &fields, Some(id)).await?;

        repo.update_subject(id, fields)
            .await?
            .ok_or_else(|| DomainError::NotFound("subject").into())
    }

    #[instrument(skip(repo))]
    pub async fn delete<R: SubjectRepository>(
        repo: &R,
        caller: &Identity,
        id: i64,
    ) -> Result<(), AppError> {
        require_admin(caller)?;

        if !repo.delete_subject(id).await? {
            return Err(DomainError::NotFound("subject").into());
        }

        tracing::info!(subject_id = id, "subject deleted");
        Ok(())
    }

    /// The feature must exist and be active, and the name must be free within it.
    async fn check_placement<R>(
        repo: &R,
        fields: &SubjectFields,
        exclude_id: Option<i64>,
    ) -> Result<(), AppError>
    where
        R: FeatureRepository + SubjectRepository,
    {
        if !repo.feature_is_active(fields.feature_id).await? {
            return Err(DomainError::InvalidFeatureReference.into());
        }

        if repo
            .subject_name_taken(fields.feature_id, &fields.name, exclude_id)
            .await?
        {
            return Err(DomainError::Conflict(
                "subject name already exists in this feature".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
