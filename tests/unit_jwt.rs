use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use tutorhub_auth::{Claims, TokenError, TokenService};
use tutorhub_config::JwtConfig;
use tutorhub_core::UserRole;

const SECRET: &str = "test_secret_key_for_testing_purposes";

fn service() -> TokenService {
    TokenService::new(&JwtConfig {
        secret: SECRET.to_string(),
        expiry_hours: 24,
    })
}

fn claims(role: UserRole, exp_offset_secs: i64) -> Claims {
    let now = Utc::now().timestamp();
    Claims {
        sub: "42".to_string(),
        email: "test@example.com".to_string(),
        role,
        exp: now + exp_offset_secs,
        iat: now,
    }
}

#[test]
fn test_issue_and_verify_all_roles() {
    let tokens = service();

    for role in UserRole::ALL {
        let issued = tokens.issue(7, role, "test@example.com").unwrap();
        assert!(!issued.token.is_empty());

        let identity = tokens.verify(&issued.token).unwrap();
        assert_eq!(identity.user_id, 7);
        assert_eq!(identity.role, role);
    }
}

#[test]
fn test_default_lifetime_is_a_day() {
    let issued = service().issue(1, UserRole::Tutor, "t@x.com").unwrap();
    let minutes = (issued.expires_at - Utc::now()).num_minutes();
    assert!((23 * 60..=24 * 60).contains(&minutes));
}

#[test]
fn test_expired_token_is_rejected() {
    let tokens = service();
    let issued = tokens
        .issue_for(1, UserRole::Tutor, "t@x.com", Duration::seconds(-1))
        .unwrap();
    assert_eq!(tokens.verify(&issued.token), Err(TokenError::Expired));
}

#[test]
fn test_token_from_other_secret_is_rejected() {
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims(UserRole::Admin, 600),
        &EncodingKey::from_secret(b"attacker-secret"),
    )
    .unwrap();

    assert_eq!(service().verify(&token), Err(TokenError::InvalidSignature));
}

#[test]
fn test_hs512_with_right_secret_is_accepted() {
    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims(UserRole::Participant, 600),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let identity = service().verify(&token).unwrap();
    assert_eq!(identity.user_id, 42);
    assert_eq!(identity.role, UserRole::Participant);
}

#[test]
fn test_garbage_is_malformed() {
    assert_eq!(service().verify("abc.def.ghi"), Err(TokenError::Malformed));
}

/// `{"alg":"none","typ":"JWT"}` and `{"alg":"RS256","typ":"JWT"}`, base64url-encoded.
const NONE_HEADER: &str = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0";
const RS256_HEADER: &str = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9";

#[test]
fn test_non_hmac_algorithm_is_rejected() {
    let tokens = service();
    let issued = tokens.issue(42, UserRole::Admin, "test@example.com").unwrap();
    let mut parts = issued.token.split('.');
    let (_, payload, signature) = (
        parts.next().unwrap(),
        parts.next().unwrap(),
        parts.next().unwrap(),
    );

    let unsigned = format!("{NONE_HEADER}.{payload}.");
    assert_eq!(tokens.verify(&unsigned), Err(TokenError::Malformed));

    let substituted = format!("{RS256_HEADER}.{payload}.{signature}");
    assert_eq!(tokens.verify(&substituted), Err(TokenError::InvalidSignature));
}

#[test]
fn test_oversized_lifetime_never_panics() {
    let config = JwtConfig::from_lookup(|key| {
        (key == "JWT_EXP_HOURS").then(|| "3000000000".to_string())
    });
    let issued = TokenService::new(&config)
        .issue(1, UserRole::Tutor, "t@x.com")
        .unwrap();
    let minutes = (issued.expires_at - Utc::now()).num_minutes();
    assert!((23 * 60..=24 * 60).contains(&minutes));
}
