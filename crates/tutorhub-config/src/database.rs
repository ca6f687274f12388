use crate::{env_lookup, parsed};

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    /// A full connection string overrides the individual parts.
    pub url_override: Option<String>,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parsed(&lookup, "DB_PORT").unwrap_or(5432),
            user: lookup("DB_USER").unwrap_or_else(|| "postgres".to_string()),
            password: lookup("DB_PASS").unwrap_or_default(),
            name: lookup("DB_NAME").unwrap_or_else(|| "tutorhub".to_string()),
            max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(10),
            url_override: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
        }
    }

    pub fn url(&self) -> String {
        match &self.url_override {
            Some(url) => url.clone(),
            None if self.password.is_empty() => format!(
                "postgres://{}@{}:{}/{}",
                self.user, self.host, self.port, self.name
            ),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.name
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_lookup;

    #[test]
    fn builds_url_from_parts() {
        let config = DatabaseConfig::from_lookup(map_lookup(&[
            ("DB_HOST", "db"),
            ("DB_PORT", "6543"),
            ("DB_USER", "app"),
            ("DB_PASS", "pw"),
            ("DB_NAME", "courses"),
        ]));
        assert_eq!(config.url(), "postgres://app:pw@db:6543/courses");
    }

    #[test]
    fn database_url_wins() {
        let config = DatabaseConfig::from_lookup(map_lookup(&[
            ("DB_HOST", "db"),
            ("DATABASE_URL", "postgres://x@y/z"),
        ]));
        assert_eq!(config.url(), "postgres://x@y/z");
    }

    #[test]
    fn defaults_without_password() {
        let config = DatabaseConfig::from_lookup(map_lookup(&[("DB_PORT", "not-a-port")]));
        assert_eq!(config.url(), "postgres://postgres@localhost:5432/tutorhub");
        assert_eq!(config.max_connections, 10);
    }
}
