//! User service configuration.

use std::env;

use common::{DatabaseConfig, ServiceConfig};

/// Service name reported in logs
pub const SERVICE_NAME: &str = "user-service";

/// User service configuration.
///
/// Without a database URL the service runs against the in-memory store.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub service: ServiceConfig,
    pub database: Option<DatabaseConfig>,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let log_level = env::var("USER_SERVICE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let database = env::var("USER_SERVICE_DATABASE_URL")
            .or_else(|_| env::var("DATABASE_URL"))
            .ok()
            .map(|url| {
                let defaults = DatabaseConfig::default();
                DatabaseConfig {
                    url,
                    max_connections: env::var("USER_SERVICE_DB_MAX_CONNECTIONS")
                        .ok()
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(defaults.max_connections),
                    min_connections: env::var("USER_SERVICE_DB_MIN_CONNECTIONS")
                        .ok()
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(defaults.min_connections),
                }
            });

        Self {
            service: ServiceConfig {
                service_name: SERVICE_NAME.to_string(),
                log_level,
            },
            database,
        }
    }

    /// Point the service at a database, keeping any configured pool sizes.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        let mut database = self.database.take().unwrap_or_default();
        database.url = url.into();
        self.database = Some(database);
        self
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: SERVICE_NAME.to_string(),
                log_level: "info".to_string(),
            },
            database: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_in_memory_store() {
        let config = UserServiceConfig::default();

        assert!(config.database.is_none());
        assert_eq!(config.service.service_name, SERVICE_NAME);
    }

    #[test]
    fn test_with_database_url() {
        let config = UserServiceConfig::default().with_database_url("postgres://db/users");
        let database = config.database.unwrap();

        assert_eq!(database.url, "postgres://db/users");
        assert_eq!(database.max_connections, DatabaseConfig::default().max_connections);
    }
}
