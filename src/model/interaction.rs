//! Discord interaction payloads.
//!
//! Only the parts of the interaction object the bot reads are modelled; unknown fields
//! are ignored during deserialization.

use serde::{Deserialize, Serialize};

/// Interaction type sent by Discord to validate the endpoint.
pub const INTERACTION_TYPE_PING: u8 = 1;
/// Interaction type for slash command invocations.
pub const INTERACTION_TYPE_APPLICATION_COMMAND: u8 = 2;

/// Response type acknowledging a ping.
pub const RESPONSE_TYPE_PONG: u8 = 1;
/// Response type replying with a message immediately.
pub const RESPONSE_TYPE_CHANNEL_MESSAGE: u8 = 4;
/// Response type acknowledging now and editing the reply later.
pub const RESPONSE_TYPE_DEFERRED_CHANNEL_MESSAGE: u8 = 5;

/// Message flag making a reply visible only to the invoking user.
pub const FLAG_EPHEMERAL: u64 = 1 << 6;

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionDto {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub token: String,
    pub guild_id: Option<String>,
    pub data: Option<CommandDataDto>,
    pub member: Option<InteractionMemberDto>,
    pub user: Option<DiscordUserDto>,
}

impl InteractionDto {
    /// The invoking user: `member.user` inside guilds, `user` in DMs.
    pub fn invoking_user(&self) -> Option<&DiscordUserDto> {
        self.member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())
    }

    pub fn command_name(&self) -> Option<&str> {
        self.data.as_ref().and_then(|data| data.name.as_deref())
    }

    /// Returns a string option value by name, `None` if absent or not a string.
    pub fn string_option(&self, name: &str) -> Option<&str> {
        self.data
            .as_ref()?
            .options
            .iter()
            .find(|option| option.name == name)?
            .value
            .as_ref()?
            .as_str()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandDataDto {
    pub name: Option<String>,
    #[serde(default)]
    pub options: Vec<CommandOptionDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandOptionDto {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub value: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionMemberDto {
    pub user: Option<DiscordUserDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscordUserDto {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionResponseDto {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionResponseDataDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionResponseDataDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub flags: u64,
}

impl InteractionResponseDto {
    pub fn pong() -> Self {
        Self {
            kind: RESPONSE_TYPE_PONG,
            data: None,
        }
    }

    /// Immediate reply visible only to the invoking user.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            kind: RESPONSE_TYPE_CHANNEL_MESSAGE,
            data: Some(InteractionResponseDataDto {
                content: Some(content.into()),
                flags: FLAG_EPHEMERAL,
            }),
        }
    }

    /// Deferred reply; the content is filled in later by editing the original response.
    pub fn deferred_ephemeral() -> Self {
        Self {
            kind: RESPONSE_TYPE_DEFERRED_CHANNEL_MESSAGE,
            data: Some(InteractionResponseDataDto {
                content: None,
                flags: FLAG_EPHEMERAL,
            }),
        }
    }
}
