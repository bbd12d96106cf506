//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and cloned for each request through
//! Axum's state extraction. Every field is cheap to clone: the database connection is a
//! pool handle and everything else sits behind an `Arc`.

use ed25519_dalek::VerifyingKey;
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;

use crate::server::{
    config::Config,
    model::role_sync::RoleSyncLimits,
    service::role_store::{RoleStore, SyncSession},
};

/// Runtime tunables taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSettings {
    /// Per-call timeout for Discord REST calls made outside the role store.
    pub api_timeout_ms: u64,
    pub role_sync_limits: RoleSyncLimits,
    /// Extra role granted to every verified participant.
    pub verified_role_name: Option<String>,
    pub registration_url: String,
}

impl BotSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_timeout_ms: config.api_timeout_ms,
            role_sync_limits: RoleSyncLimits {
                max_role_operations: config.max_role_operations,
                assign_concurrency: config.role_assign_concurrency,
            },
            verified_role_name: config.verified_role_name.clone(),
            registration_url: config.registration_url.clone(),
        }
    }
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            api_timeout_ms: 7000,
            role_sync_limits: RoleSyncLimits::default(),
            verified_role_name: None,
            registration_url: "mcgillaerohacks.com".to_string(),
        }
    }
}

/// Application state containing shared resources and dependencies.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for the registrations table.
    pub db: DatabaseConnection,

    /// Discord HTTP client, used to edit deferred interaction responses.
    pub discord_http: Arc<Http>,

    /// Role store used by role synchronisation passes.
    pub role_store: Arc<dyn RoleStore>,

    /// Bot identity cache shared by every synchronisation pass.
    pub sync_session: Arc<SyncSession>,

    /// Application public key verifying interaction signatures.
    pub verifying_key: VerifyingKey,

    pub settings: Arc<BotSettings>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `discord_http` - Discord HTTP client carrying the bot token and application ID
    /// - `role_store` - Role store for synchronisation passes
    /// - `verifying_key` - Application public key
    /// - `settings` - Runtime tunables
    ///
    /// # Returns
    /// - `AppState` - Initialized application state with a fresh sync session
    pub fn new(
        db: DatabaseConnection,
        discord_http: Arc<Http>,
        role_store: Arc<dyn RoleStore>,
        verifying_key: VerifyingKey,
        settings: BotSettings,
    ) -> Self {
        Self {
            db,
            discord_http,
            role_store,
            sync_session: Arc::new(SyncSession::new()),
            verifying_key,
            settings: Arc::new(settings),
        }
    }
}
