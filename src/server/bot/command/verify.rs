//! `/verify [email]`: link a Discord account to a registration and sync roles.
//!
//! Verification plus role synchronisation can take longer than Discord's three-second
//! response window, so the handler acknowledges with a deferred reply and finishes the
//! work in a background task that edits the original response.

use dioxus_logger::tracing;
use serde_json::json;
use std::time::Duration;

use crate::{
    model::interaction::{InteractionDto, InteractionResponseDto},
    server::{
        bot::command::{Invoker, INTERNAL_ERROR_MESSAGE},
        model::registration::Registration,
        service::{
            role_sync::RoleSyncService,
            verification::{VerificationService, VerifyOutcome},
        },
        state::AppState,
        util::parse::parse_u64_from_string,
    },
};

pub const COMMAND_NAME: &str = "verify";
pub const EMAIL_OPTION: &str = "email";

pub const NEEDS_EMAIL_MESSAGE: &str = "I couldn't automatically verify your Discord account. Please run /verify email:<your registration email>.";
pub const DISCORD_LINKED_ELSEWHERE_MESSAGE: &str =
    "❌ This Discord account is already linked to a registration. Contact staff if this is a mistake.";
pub const REGISTRATION_LINKED_TO_OTHER_MESSAGE: &str =
    "❌ That registration is already linked to a different Discord account. Contact staff for help.";
pub const ROLES_INCOMPLETE_MESSAGE: &str =
    "⚠️ Some roles could not be assigned right now. Run /verify again later or contact staff.";

/// Acknowledges the command and continues verification in the background.
pub fn handle(
    state: &AppState,
    interaction: &InteractionDto,
    invoker: Invoker,
) -> InteractionResponseDto {
    let state = state.clone();
    let token = interaction.token.clone();
    let email = interaction
        .string_option(EMAIL_OPTION)
        .map(str::to_string);
    let guild_id = interaction
        .guild_id
        .as_deref()
        .and_then(|id| parse_u64_from_string(id).ok());

    tokio::spawn(async move {
        let content = run(&state, &invoker, guild_id, email.as_deref()).await;
        edit_original_response(&state, &token, &content).await;
    });

    InteractionResponseDto::deferred_ephemeral()
}

/// Verifies the invoker and, when verified inside a guild, synchronises their roles.
///
/// # Returns
/// - `String` - Final reply text; internal errors are reduced to a generic message
pub async fn run(
    state: &AppState,
    invoker: &Invoker,
    guild_id: Option<u64>,
    email: Option<&str>,
) -> String {
    let outcome = match VerificationService::new(&state.db)
        .verify(invoker.user_id, invoker.username.as_deref(), email)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Verification failed for user {}: {}", invoker.user_id, e);
            return INTERNAL_ERROR_MESSAGE.to_string();
        }
    };

    let roles_complete = match (&outcome, guild_id) {
        (VerifyOutcome::Verified { registration, .. }, Some(guild_id)) => {
            sync_roles(state, guild_id, invoker.user_id, registration).await
        }
        _ => true,
    };

    verify_reply(&outcome, roles_complete, &state.settings.registration_url)
}

/// Runs one role synchronisation pass, returning whether every role was handled.
async fn sync_roles(
    state: &AppState,
    guild_id: u64,
    user_id: u64,
    registration: &Registration,
) -> bool {
    let extra_roles: Vec<String> = state.settings.verified_role_name.iter().cloned().collect();

    let result = RoleSyncService::new(
        state.role_store.as_ref(),
        &state.sync_session,
        state.settings.role_sync_limits,
    )
    .sync_member_roles_with(guild_id, user_id, &registration.role_fields, &extra_roles)
    .await;

    match result {
        Ok(outcome) => {
            if outcome.has_failures() {
                tracing::warn!(
                    "Roles {:?} could not be assigned to user {} in guild {}",
                    outcome.failed_role_names,
                    user_id,
                    guild_id
                );
            }
            !outcome.has_failures()
        }
        Err(e) => {
            tracing::error!(
                "Role sync failed for user {} in guild {}: {}",
                user_id,
                guild_id,
                e
            );
            false
        }
    }
}

async fn edit_original_response(state: &AppState, token: &str, content: &str) {
    let timeout = Duration::from_millis(state.settings.api_timeout_ms);
    let body = json!({ "content": content });
    let edit = state
        .discord_http
        .edit_original_interaction_response(token, &body, vec![]);

    match tokio::time::timeout(timeout, edit).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => tracing::error!("Failed to edit verify response: {}", e),
        Err(_) => tracing::error!(
            "Editing verify response exceeded {} ms timeout",
            timeout.as_millis()
        ),
    }
}

/// Builds the final `/verify` reply.
///
/// # Arguments
/// - `outcome` - Verification outcome
/// - `roles_complete` - False when role synchronisation failed or left roles unassigned
/// - `registration_url` - Where unregistered users should sign up
pub fn verify_reply(outcome: &VerifyOutcome, roles_complete: bool, registration_url: &str) -> String {
    match outcome {
        VerifyOutcome::Verified { registration, .. } => {
            let verified = format!("✅ Verified: {}", registration.display_name());
            if roles_complete {
                verified
            } else {
                format!("{}\n{}", verified, ROLES_INCOMPLETE_MESSAGE)
            }
        }
        VerifyOutcome::NeedsEmail => NEEDS_EMAIL_MESSAGE.to_string(),
        VerifyOutcome::NotFound => format!(
            "❌ Could not verify registration for that email. If you already registered, contact staff. Otherwise register at {}.",
            registration_url
        ),
        VerifyOutcome::DiscordLinkedElsewhere => DISCORD_LINKED_ELSEWHERE_MESSAGE.to_string(),
        VerifyOutcome::RegistrationLinkedToOther => {
            REGISTRATION_LINKED_TO_OTHER_MESSAGE.to_string()
        }
    }
}
