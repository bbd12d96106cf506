use axum::{middleware, routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::server::{
    controller::interaction::handle_interaction, middleware::signature::require_discord_signature,
    state::AppState,
};

/// Builds the application router.
///
/// Every route requires a valid Discord request signature.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/interactions", post(handle_interaction))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_discord_signature,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
