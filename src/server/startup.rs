use dioxus_logger::tracing;
use serenity::{all::ApplicationId, http::Http};
use std::sync::Arc;

use crate::server::{
    config::Config,
    error::AppError,
    middleware::signature::parse_public_key,
    service::role_store::DiscordRoleStore,
    state::{AppState, BotSettings},
};

/// Connects to the registration database.
///
/// The `registrations` table is owned by the registration site, so no migrations are run;
/// the connection is only checked with a ping.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database
/// - `Err(AppError::DbErr)` - Failed to connect to the database
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;
    db.ping().await?;

    Ok(db)
}

/// Creates the Discord HTTP client used for REST calls.
///
/// The application ID is required to edit deferred interaction responses.
pub fn setup_discord_http(config: &Config) -> Arc<Http> {
    let http = Http::new(&config.discord_token);
    http.set_application_id(ApplicationId::new(config.discord_application_id));

    Arc::new(http)
}

/// Builds the application state from configuration and connected resources.
///
/// # Returns
/// - `Ok(AppState)` - State ready to be handed to the router
/// - `Err(AppError::ConfigErr)` - The configured public key is not a valid ed25519 key
pub fn build_state(
    config: &Config,
    db: sea_orm::DatabaseConnection,
    discord_http: Arc<Http>,
) -> Result<AppState, AppError> {
    let verifying_key = parse_public_key(&config.discord_public_key)?;

    let role_store = Arc::new(DiscordRoleStore::new(
        discord_http.clone(),
        config.api_timeout_ms,
    ));

    tracing::info!(
        "Role sync limits: {} operations per pass, {} concurrent assignments, {} ms timeout",
        config.max_role_operations,
        config.role_assign_concurrency,
        config.api_timeout_ms
    );

    Ok(AppState::new(
        db,
        discord_http,
        role_store,
        verifying_key,
        BotSettings::from_config(config),
    ))
}
