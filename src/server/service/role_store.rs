//! Role-store access over Discord's REST API.
//!
//! The [`RoleStore`] trait is the seam between role synchronisation and Discord: the
//! production [`DiscordRoleStore`] talks to Discord through serenity's `Http` client, and
//! tests substitute an in-memory store. Every production call is bounded by the
//! configured per-call timeout so no operation is ever left pending.

use dioxus_logger::tracing;
use serde::Serialize;
use serenity::all::{GuildId, RoleId, UserId};
use serenity::async_trait;
use serenity::http::Http;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::server::{
    error::discord::DiscordApiError,
    model::discord::{GuildMember, GuildRole},
};

/// Read and write operations on a guild's roles and member role assignments.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Lists every role in the guild.
    async fn list_roles(&self, guild_id: u64) -> Result<Vec<GuildRole>, DiscordApiError>;

    /// Creates a role with no permissions, not hoisted and not mentionable.
    async fn create_role(&self, guild_id: u64, name: &str) -> Result<GuildRole, DiscordApiError>;

    /// Fetches a guild member with their current role IDs.
    async fn get_member(&self, guild_id: u64, user_id: u64)
        -> Result<GuildMember, DiscordApiError>;

    /// Grants a role to a member. Granting a role the member already holds succeeds.
    async fn assign_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), DiscordApiError>;

    /// Returns the user ID of the bot account the store authenticates as.
    async fn current_user_id(&self) -> Result<u64, DiscordApiError>;
}

#[derive(Serialize)]
struct CreateRoleBody<'a> {
    name: &'a str,
    permissions: &'static str,
    hoist: bool,
    mentionable: bool,
}

/// Production role store backed by serenity's HTTP client.
pub struct DiscordRoleStore {
    http: Arc<Http>,
    timeout: Duration,
}

impl DiscordRoleStore {
    /// Creates a new DiscordRoleStore.
    ///
    /// # Arguments
    /// - `http` - Arc-wrapped Discord HTTP client carrying the bot token
    /// - `timeout_ms` - Per-call timeout in milliseconds
    ///
    /// # Returns
    /// - `DiscordRoleStore` - New store instance
    pub fn new(http: Arc<Http>, timeout_ms: u64) -> Self {
        Self {
            http,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, DiscordApiError>
    where
        F: Future<Output = serenity::Result<T>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(DiscordApiError::request(operation, e)),
            Err(_) => {
                tracing::warn!(
                    "Discord API {} exceeded {} ms timeout",
                    operation,
                    self.timeout.as_millis()
                );
                Err(DiscordApiError::Timeout {
                    operation,
                    timeout_ms: self.timeout.as_millis() as u64,
                })
            }
        }
    }
}

#[async_trait]
impl RoleStore for DiscordRoleStore {
    async fn list_roles(&self, guild_id: u64) -> Result<Vec<GuildRole>, DiscordApiError> {
        let roles = self
            .bounded(
                "get_guild_roles",
                self.http.get_guild_roles(GuildId::new(guild_id)),
            )
            .await?;

        Ok(roles.iter().map(GuildRole::from_serenity).collect())
    }

    async fn create_role(&self, guild_id: u64, name: &str) -> Result<GuildRole, DiscordApiError> {
        let body = CreateRoleBody {
            name,
            permissions: "0",
            hoist: false,
            mentionable: false,
        };

        let role = self
            .bounded(
                "create_role",
                self.http
                    .create_role(GuildId::new(guild_id), &body, Some("Registration role sync")),
            )
            .await?;

        Ok(GuildRole::from_serenity(&role))
    }

    async fn get_member(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<GuildMember, DiscordApiError> {
        let member = self
            .bounded(
                "get_member",
                self.http
                    .get_member(GuildId::new(guild_id), UserId::new(user_id)),
            )
            .await?;

        Ok(GuildMember::from_serenity(&member))
    }

    async fn assign_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), DiscordApiError> {
        self.bounded(
            "add_member_role",
            self.http.add_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                Some("Registration role sync"),
            ),
        )
        .await
    }

    async fn current_user_id(&self) -> Result<u64, DiscordApiError> {
        let user = self
            .bounded("get_current_user", self.http.get_current_user())
            .await?;

        Ok(user.id.get())
    }
}

/// Per-process state shared by synchronisation passes.
///
/// Holds the bot's own user ID, fetched once on first use and cached for the lifetime of
/// the session since it never changes. Tests create a fresh session per case.
#[derive(Default)]
pub struct SyncSession {
    bot_user_id: OnceCell<u64>,
}

impl SyncSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with the bot identity already known.
    pub fn with_bot_user_id(bot_user_id: u64) -> Self {
        Self {
            bot_user_id: OnceCell::new_with(Some(bot_user_id)),
        }
    }

    /// Returns the bot's user ID, asking the store only on first use.
    ///
    /// A failed lookup is not cached; the next pass retries.
    pub async fn bot_user_id<S>(&self, store: &S) -> Result<u64, DiscordApiError>
    where
        S: RoleStore + ?Sized,
    {
        self.bot_user_id
            .get_or_try_init(|| store.current_user_id())
            .await
            .copied()
    }
}
