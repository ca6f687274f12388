use crate::{env_lookup, parsed};

pub const DEFAULT_EXPIRY_HOURS: i64 = 24;

/// One year.
pub const MAX_EXPIRY_HOURS: i64 = 24 * 365;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let secret = lookup("JWT_SECRET").filter(|s| !s.is_empty()).unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET is not set, using the development secret");
            "your-secret-key-change-in-production".to_string()
        });

        let expiry_hours = parsed::<i64, _>(&lookup, "JWT_EXP_HOURS")
            .filter(|hours| (1..=MAX_EXPIRY_HOURS).contains(hours))
            .unwrap_or(DEFAULT_EXPIRY_HOURS);

        Self {
            secret,
            expiry_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_lookup;

    #[test]
    fn expiry_defaults_to_24_hours() {
        for raw in [None, Some("abc"), Some("0"), Some("-5"), Some("")] {
            let pairs: Vec<(&str, &str)> = raw.map(|v| ("JWT_EXP_HOURS", v)).into_iter().collect();
            let config = JwtConfig::from_lookup(map_lookup(&pairs));
            assert_eq!(config.expiry_hours, DEFAULT_EXPIRY_HOURS, "input {raw:?}");
        }
    }

    #[test]
    fn oversized_expiry_falls_back_to_default() {
        for raw in ["8761", "3000000000", "9000000000000", "99999999999999999999"] {
            let config = JwtConfig::from_lookup(map_lookup(&[("JWT_EXP_HOURS", raw)]));
            assert_eq!(config.expiry_hours, DEFAULT_EXPIRY_HOURS, "input {raw}");
        }

        let config = JwtConfig::from_lookup(map_lookup(&[("JWT_EXP_HOURS", "8760")]));
        assert_eq!(config.expiry_hours, MAX_EXPIRY_HOURS);
    }

    #[test]
    fn reads_secret_and_expiry() {
        let config = JwtConfig::from_lookup(map_lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXP_HOURS", " 6 "),
        ]));
        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.expiry_hours, 6);
    }
}
