//! Snapshot of a guild's roles and the two members involved in a synchronisation pass.

use dioxus_logger::tracing;
use std::collections::HashMap;

use crate::server::{
    error::discord::DiscordApiError,
    model::discord::{GuildMember, GuildRole},
    service::role_store::{RoleStore, SyncSession},
};

/// Read-through view of one guild for the duration of a single pass.
///
/// Populated from exactly one role listing and two member reads. Roles created during the
/// pass are registered into the snapshot; it is never shared across passes.
#[derive(Debug, Clone)]
pub struct GuildRoleDirectory {
    roles_by_id: HashMap<u64, GuildRole>,
    role_ids_by_lower_name: HashMap<String, u64>,
    member: GuildMember,
    bot_member: GuildMember,
}

impl GuildRoleDirectory {
    /// Builds a directory from already-fetched snapshots.
    ///
    /// When the guild holds several roles with the same case-insensitive name, the first
    /// one listed wins name lookups.
    pub fn new(roles: Vec<GuildRole>, member: GuildMember, bot_member: GuildMember) -> Self {
        let mut directory = Self {
            roles_by_id: HashMap::with_capacity(roles.len()),
            role_ids_by_lower_name: HashMap::with_capacity(roles.len()),
            member,
            bot_member,
        };

        for role in roles {
            directory
                .role_ids_by_lower_name
                .entry(role.name.to_lowercase())
                .or_insert(role.id);
            directory.roles_by_id.insert(role.id, role);
        }

        directory
    }

    /// Populates the directory from the role store.
    ///
    /// Lists the guild's roles, then reads the target member and the bot's own member
    /// record concurrently. Any failed read fails the whole load; a partially populated
    /// directory is never returned.
    ///
    /// # Arguments
    /// - `store` - Role store to read from
    /// - `session` - Session caching the bot's user ID
    /// - `guild_id` - Guild being synchronised
    /// - `user_id` - Member whose roles are being synchronised
    ///
    /// # Returns
    /// - `Ok(GuildRoleDirectory)` - Fully populated directory
    /// - `Err(DiscordApiError)` - One of the reads failed or timed out
    pub async fn load<S>(
        store: &S,
        session: &SyncSession,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Self, DiscordApiError>
    where
        S: RoleStore + ?Sized,
    {
        let roles = store.list_roles(guild_id).await?;
        let bot_user_id = session.bot_user_id(store).await?;

        let (member, bot_member) = tokio::try_join!(
            store.get_member(guild_id, user_id),
            store.get_member(guild_id, bot_user_id),
        )?;

        tracing::debug!(
            "Loaded {} roles for guild {}; member {} holds {} roles, bot holds {}",
            roles.len(),
            guild_id,
            user_id,
            member.role_ids.len(),
            bot_member.role_ids.len()
        );

        Ok(Self::new(roles, member, bot_member))
    }

    /// Case-insensitive exact lookup by role name.
    pub fn lookup_by_name(&self, name: &str) -> Option<&GuildRole> {
        self.role_ids_by_lower_name
            .get(&name.to_lowercase())
            .and_then(|id| self.roles_by_id.get(id))
    }

    pub fn lookup_by_id(&self, id: u64) -> Option<&GuildRole> {
        self.roles_by_id.get(&id)
    }

    /// Adds a role created during this pass to both indexes.
    pub fn register(&mut self, role: GuildRole) {
        self.role_ids_by_lower_name
            .insert(role.name.to_lowercase(), role.id);
        self.roles_by_id.insert(role.id, role);
    }

    pub fn member(&self) -> &GuildMember {
        &self.member
    }

    /// Highest position among the given role IDs.
    ///
    /// IDs that no longer resolve in the directory are ignored. With no resolvable role
    /// the position is 0, the lowest rank.
    fn top_role_position<'a, I>(&self, role_ids: I) -> i64
    where
        I: IntoIterator<Item = &'a u64>,
    {
        role_ids
            .into_iter()
            .filter_map(|id| self.lookup_by_id(*id))
            .map(|role| role.position)
            .fold(0, i64::max)
    }

    /// Highest position among the bot's own roles.
    pub fn bot_top_role_position(&self) -> i64 {
        self.top_role_position(&self.bot_member.role_ids)
    }
}
