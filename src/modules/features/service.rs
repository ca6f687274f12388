use tracing::instrument;

use tutorhub_auth::Identity;
use tutorhub_core::{AppError, DomainError, RoleSet};
use tutorhub_models::{CreateFeatureDto, Feature, UpdateFeatureDto};

use crate::middleware::role::require_admin;
use crate::modules::features::repository::FeatureRepository;
use crate::utils::validation::require_name;

const MIN_NAME_CHARS: usize = 3;

pub struct FeatureService;

impl FeatureService {
    /// Active features whose role set contains the caller's role.
    #[instrument(skip(repo))]
    pub async fn list_for_caller<R: FeatureRepository>(
        repo: &R,
        caller: &Identity,
    ) -> Result<Vec<Feature>, AppError> {
        repo.list_features_for_role(caller.role).await
    }

    #[instrument(skip(repo))]
    pub async fn get<R: FeatureRepository>(repo: &R, id: i64) -> Result<Feature, AppError> {
        repo.find_feature(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("feature").into())
    }

    #[instrument(skip(repo))]
    pub async fn create<R: FeatureRepository>(
        repo: &R,
        caller: &Identity,
        dto: CreateFeatureDto,
    ) -> Result<Feature, AppError> {
        require_admin(caller)?;

        let name = require_name(&dto.name, MIN_NAME_CHARS)?;
        require_roles(dto.roles)?;

        if repo.feature_name_taken(&name, None).await? {
            return Err(DomainError::Conflict("feature name already exists".to_string()).into());
        }

        let feature = repo
            .insert_feature(&name, dto.roles, dto.is_active.unwrap_or(true))
            .await?;

        tracing::info!(feature_id = feature.id, "feature created");
        Ok(feature)
    }

    #[instrument(skip(repo))]
    pub async fn update<R: FeatureRepository>(
        repo: &R,
        caller: &Identity,
        id: i64,
        dto: UpdateFeatureDto,
    ) -> Result<Feature, AppError> {
        require_admin(caller)?;

        let existing = Self::get(repo, id).await?;

        let name = require_name(&dto.name, MIN_NAME_CHARS)?;
        require_roles(dto.roles)?;

        if repo.feature_name_taken(&name, Some(id)).await? {
            return Err(DomainError::Conflict("feature name already exists".to_string()).into());
        }

        repo.update_feature(
            id,
            &name,
            dto.roles,
            dto.is_active.unwrap_or(existing.is_active),
        )
        .await?
        .ok_or_else(|| DomainError::NotFound("feature").into())
    }

    /// Hard delete; the feature's subjects go with it.
    #[instrument(skip(repo))]
    pub async fn delete<R: FeatureRepository>(
        repo: &R,
        caller: &Identity,
        id: i64,
    ) -> Result<(), AppError> {
        require_admin(caller)?;

        if !repo.delete_feature(id).await? {
            return Err(DomainError::NotFound("feature").into());
        }

        tracing::info!(feature_id = id, "feature deleted");
        Ok(())
    }
}

fn require_roles(roles: RoleSet) -> Result<(), DomainError> {
    if roles.is_empty() {
        return Err(DomainError::validation("roles is required"));
    }
    Ok(())
}
