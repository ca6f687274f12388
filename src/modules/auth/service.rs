use tracing::instrument;
use validator::ValidateEmail;

use tutorhub_auth::TokenService;
use tutorhub_core::{AppError, DomainError, UserRole, hash_password, verify_password};
use tutorhub_models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User};
use tutorhub_observability::{
    track_jwt_issued, track_login_failure, track_login_success, track_user_registered,
};

use crate::modules::users::repository::UserRepository;

pub struct AuthService;

impl AuthService {
    /// Create an account and sign the new user in.
    ///
    /// Only tutors and participants may self-register.
    #[instrument(skip(repo, tokens, dto), fields(email = %dto.email, role = %dto.role))]
    pub async fn register<R: UserRepository>(
        repo: &R,
        tokens: &TokenService,
        dto: RegisterRequest,
    ) -> Result<AuthResponse, AppError> {
        if dto.role == UserRole::Admin {
            return Err(DomainError::validation("role must be tutor or participant").into());
        }

        let name = dto.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name is required").into());
        }

        let email = dto.email.trim();
        if !email.validate_email() {
            return Err(DomainError::validation("email is invalid").into());
        }

        let password_hash = hash_password(&dto.password)?;

        let user = repo
            .create_user(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                role: dto.role,
            })
            .await?;

        track_user_registered(user.role.as_str());
        tracing::info!(user_id = user.id, "user registered");

        Self::sign_in(tokens, &user)
    }

    #[instrument(skip(repo, tokens, dto), fields(email = %dto.email))]
    pub async fn login<R: UserRepository>(
        repo: &R,
        tokens: &TokenService,
        dto: LoginRequest,
    ) -> Result<AuthResponse, AppError> {
        let Some(user) = repo.find_user_by_email(dto.email.trim()).await? else {
            track_login_failure();
            return Err(DomainError::InvalidCredentials.into());
        };

        let matches = verify_password(&dto.password, &user.password).unwrap_or_else(|err| {
            tracing::warn!(user_id = user.id, error = %err.error, "stored password hash is unreadable");
            false
        });

        if !matches {
            track_login_failure();
            return Err(DomainError::InvalidCredentials.into());
        }

        track_login_success(user.role.as_str());

        Self::sign_in(tokens, &user)
    }

    fn sign_in(tokens: &TokenService, user: &User) -> Result<AuthResponse, AppError> {
        let issued = tokens
            .issue(user.id, user.role, &user.email)
            .map_err(|e| e.into_app_error())?;

        track_jwt_issued();

        Ok(AuthResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user: user.public(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStore;

    fn tokens() -> TokenService {
        TokenService::with_secret(b"auth-service-tests", 24)
    }

    fn register_dto(email: &str, role: UserRole) -> RegisterRequest {
        RegisterRequest {
            name: "A".to_string(),
            email: email.to_string(),
            password: "p".to_string(),
            role,
        }
    }

    fn login_dto(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn registered_user_can_log_in_with_same_role() {
        let store = InMemoryStore::new();
        let tokens = tokens();

        let registered = AuthService::register(&store, &tokens, register_dto("a@x.com", UserRole::Tutor))
            .await
            .unwrap();
        assert!(!registered.token.is_empty());
        assert_eq!(registered.user.role, UserRole::Tutor);

        let logged_in = AuthService::login(&store, &tokens, login_dto("a@x.com", "p"))
            .await
            .unwrap();
        let identity = tokens.verify(&logged_in.token).unwrap();
        assert_eq!(identity.role, UserRole::Tutor);
        assert_eq!(identity.user_id, registered.user.id);
    }

    #[tokio::test]
    async fn registration_links_role_record() {
        let store = InMemoryStore::new();
        let tokens = tokens();

        AuthService::register(&store, &tokens, register_dto("p@x.com", UserRole::Participant))
            .await
            .unwrap();

        let user = store.find_user_by_email("p@x.com").await.unwrap().unwrap();
        assert!(user.participant_id.is_some());
        assert!(user.tutor_id.is_none());
        assert_ne!(user.password, "p");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_second_row() {
        let store = InMemoryStore::new();
        let tokens = tokens();

        AuthService::register(&store, &tokens, register_dto("a@x.com", UserRole::Tutor))
            .await
            .unwrap();
        let err = AuthService::register(&store, &tokens, register_dto("a@x.com", UserRole::Participant))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(&DomainError::DuplicateEmail));
        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn email_is_trimmed_before_format_check() {
        let store = InMemoryStore::new();
        let tokens = tokens();

        let registered =
            AuthService::register(&store, &tokens, register_dto("  a@x.com ", UserRole::Tutor))
                .await
                .unwrap();
        assert_eq!(registered.user.email, "a@x.com");

        let err = AuthService::register(&store, &tokens, register_dto("a@", UserRole::Tutor))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(err.public_message(), "email is invalid");
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn malformed_login_email_is_a_credential_failure() {
        let store = InMemoryStore::new();
        let err = AuthService::login(&store, &tokens(), login_dto("not-an-email", "p"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(&DomainError::InvalidCredentials));
        assert_eq!(err.status.as_u16(), 401);
    }

    #[tokio::test]
    async fn admin_cannot_self_register() {
        let store = InMemoryStore::new();
        let err = AuthService::register(&store, &tokens(), register_dto("a@x.com", UserRole::Admin))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(store.user_count(), 0);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let store = InMemoryStore::new();
        let tokens = tokens();
        let registered = AuthService::register(&store, &tokens, register_dto("a@x.com", UserRole::Tutor))
            .await
            .unwrap();

        let wrong_password = AuthService::login(&store, &tokens, login_dto("a@x.com", "nope"))
            .await
            .unwrap_err();
        let unknown_email = AuthService::login(&store, &tokens, login_dto("b@x.com", "p"))
            .await
            .unwrap_err();

        store.deactivate_user(registered.user.id);
        let inactive = AuthService::login(&store, &tokens, login_dto("a@x.com", "p"))
            .await
            .unwrap_err();

        for err in [wrong_password, unknown_email, inactive] {
            assert_eq!(err.kind(), Some(&DomainError::InvalidCredentials));
            assert_eq!(err.status.as_u16(), 401);
            assert_eq!(err.public_message(), "invalid email or password");
        }
    }

    #[tokio::test]
    async fn unreadable_hash_is_a_credential_failure() {
        let store = InMemoryStore::new();
        store.seed_user(UserRole::Tutor, "seeded@x.com");

        let err = AuthService::login(&store, &tokens(), login_dto("seeded@x.com", ""))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(&DomainError::InvalidCredentials));
    }
}
