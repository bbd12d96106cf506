//! Slash command handlers.
//!
//! Each command module exposes a handler taking the application state and the parsed
//! interaction, plus pure reply builders that turn domain results into message text.
//! Every reply is ephemeral.

pub mod find_teammates;
pub mod help;
pub mod status;
pub mod verify;

use dioxus_logger::tracing;

use crate::{
    model::interaction::{InteractionDto, InteractionResponseDto},
    server::{state::AppState, util::parse::parse_u64_from_string},
};

/// Reply for commands the bot does not handle.
pub const UNSUPPORTED_COMMAND_MESSAGE: &str = "Unsupported command.";
/// Reply when the interaction does not identify the invoking user.
pub const MISSING_USER_MESSAGE: &str = "Could not read your Discord account information.";
/// Reply for any failure whose details must not reach the user.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred. Please try again later.";

/// The Discord user invoking a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoker {
    pub user_id: u64,
    pub username: Option<String>,
}

impl Invoker {
    /// Reads the invoking user from an interaction, `None` if absent or unparsable.
    pub fn from_interaction(interaction: &InteractionDto) -> Option<Self> {
        let user = interaction.invoking_user()?;
        let user_id = match parse_u64_from_string(&user.id) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Interaction carried an invalid user ID: {}", e);
                return None;
            }
        };

        Some(Self {
            user_id,
            username: user.username.clone(),
        })
    }
}

/// Routes an application command interaction to its handler.
///
/// Never fails: handler errors are logged and answered with a generic message so the
/// interaction always receives a response.
///
/// # Arguments
/// - `state` - Application state
/// - `interaction` - Parsed application command interaction
///
/// # Returns
/// - `InteractionResponseDto` - Immediate or deferred ephemeral reply
pub async fn dispatch(state: &AppState, interaction: InteractionDto) -> InteractionResponseDto {
    let Some(command) = interaction.command_name().map(str::to_string) else {
        return InteractionResponseDto::ephemeral(UNSUPPORTED_COMMAND_MESSAGE);
    };

    if command == help::COMMAND_NAME {
        return help::handle();
    }

    if !matches!(
        command.as_str(),
        verify::COMMAND_NAME | status::COMMAND_NAME | find_teammates::COMMAND_NAME
    ) {
        tracing::debug!("Received unsupported command '{}'", command);
        return InteractionResponseDto::ephemeral(UNSUPPORTED_COMMAND_MESSAGE);
    }

    let Some(invoker) = Invoker::from_interaction(&interaction) else {
        return InteractionResponseDto::ephemeral(MISSING_USER_MESSAGE);
    };

    match command.as_str() {
        verify::COMMAND_NAME => verify::handle(state, &interaction, invoker),
        status::COMMAND_NAME => status::handle(state, invoker).await,
        _ => find_teammates::handle(state, &interaction, invoker).await,
    }
}
