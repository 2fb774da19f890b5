//! User Service Library
//!
//! This crate provides the user management service layer: input validation,
//! username uniqueness, password stripping, and delegation to a repository.
//! It ships an in-memory and a SeaORM repository and a small operator CLI.

pub mod cli;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::DbErr;
use tracing::{info, warn};

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::{InMemoryUserRepository, UserRepository, UserStore};
use crate::service::{UserManager, UserService};

/// Build the user service against the configured repository.
///
/// Connects and pings the database when one is configured, otherwise falls
/// back to an empty in-memory store.
pub async fn build_service(config: &UserServiceConfig) -> Result<Arc<dyn UserService>, DbErr> {
    let service_name = config.service.service_name.as_str();

    let repo: Arc<dyn UserRepository> = match &config.database {
        Some(database) => {
            let db = Database::connect(database).await?;
            db.ping().await?;
            info!(service = service_name, "Using database user store");
            Arc::new(UserStore::new(db.get_connection()))
        }
        None => {
            warn!(
                service = service_name,
                "No database configured, users are kept in memory only"
            );
            Arc::new(InMemoryUserRepository::new())
        }
    };

    Ok(Arc::new(UserManager::new(repo)))
}
