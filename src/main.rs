mod model;
mod server;

use dioxus_logger::tracing::{self, Level};

use crate::server::{config::Config, error::AppError, router, startup};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let discord_http = startup::setup_discord_http(&config);
    let state = startup::build_state(&config, db, discord_http)?;

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening for interactions on {}", config.bind_address);

    axum::serve(listener, router::router(state)).await?;

    Ok(())
}
