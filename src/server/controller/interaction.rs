use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use dioxus_logger::tracing;

use crate::{
    model::interaction::{
        InteractionDto, InteractionResponseDto, INTERACTION_TYPE_APPLICATION_COMMAND,
        INTERACTION_TYPE_PING,
    },
    server::{
        bot::command::{self, UNSUPPORTED_COMMAND_MESSAGE},
        error::AppError,
        state::AppState,
    },
};

/// POST /api/interactions - Discord interactions webhook
///
/// Receives every slash command invocation and Discord's endpoint validation pings. The
/// request signature has already been verified by middleware when this handler runs.
///
/// # Returns
/// - `200 OK`: `{"type":1}` for pings, otherwise an ephemeral or deferred reply
/// - `400 Bad Request`: Body is not valid interaction JSON
/// - `401 Unauthorized`: Missing or invalid signature (from middleware)
pub async fn handle_interaction(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let interaction: InteractionDto = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Rejected interaction body: {}", e);
        AppError::BadRequest("Invalid JSON body".to_string())
    })?;

    let response = match interaction.kind {
        INTERACTION_TYPE_PING => InteractionResponseDto::pong(),
        INTERACTION_TYPE_APPLICATION_COMMAND => command::dispatch(&state, interaction).await,
        other => {
            tracing::debug!("Received unsupported interaction type {}", other);
            InteractionResponseDto::ephemeral(UNSUPPORTED_COMMAND_MESSAGE)
        }
    };

    Ok((StatusCode::OK, Json(response)))
}
