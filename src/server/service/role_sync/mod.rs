//! Registration-driven Discord role synchronisation.
//!
//! One pass takes a guild, a member and a registration snapshot and converges the
//! member's roles towards the registration:
//!
//! 1. [`mapper`] computes the desired role names.
//! 2. [`directory`] loads the guild's roles, the member and the bot's own member record.
//! 3. [`reconciler`] creates missing roles and classifies every desired name.
//! 4. [`assigner`] grants the remaining roles under the operation cap.
//!
//! Only the initial reads can fail the pass. Per-role creation and assignment failures
//! are folded into the returned [`RoleAssignmentOutcome`].
//!
//! Concurrent passes for the same guild are not serialised; two passes that both need a
//! new role may each create it, leaving duplicate same-named roles. Later passes resolve
//! the first listed duplicate.

pub mod assigner;
pub mod directory;
pub mod mapper;
pub mod reconciler;

#[cfg(test)]
mod test;

use dioxus_logger::tracing;
use std::collections::BTreeSet;

use crate::server::{
    error::discord::DiscordApiError,
    model::{
        registration::RegistrationRoleFields,
        role_sync::{RoleAssignmentOutcome, RoleSyncLimits},
    },
    service::role_store::{RoleStore, SyncSession},
    util::normalize::normalize_role_name,
};

use self::{
    assigner::BulkAssigner, directory::GuildRoleDirectory, mapper::build_desired_role_names,
    reconciler::RoleReconciler,
};

pub struct RoleSyncService<'a, S: ?Sized> {
    store: &'a S,
    session: &'a SyncSession,
    limits: RoleSyncLimits,
}

impl<'a, S> RoleSyncService<'a, S>
where
    S: RoleStore + ?Sized,
{
    /// Creates a new RoleSyncService.
    ///
    /// # Arguments
    /// - `store` - Role store to read from and write to
    /// - `session` - Session caching the bot identity across passes
    /// - `limits` - Operation cap and assignment concurrency
    pub fn new(store: &'a S, session: &'a SyncSession, limits: RoleSyncLimits) -> Self {
        Self {
            store,
            session,
            limits,
        }
    }

    /// Synchronises a member's roles with their registration.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the member belongs to
    /// - `user_id` - Member to synchronise
    /// - `registration` - Registration attributes
    ///
    /// # Returns
    /// - `Ok(RoleAssignmentOutcome)` - Pass completed; per-role failures are inside
    /// - `Err(DiscordApiError)` - Loading the guild directory failed
    pub async fn sync_member_roles(
        &self,
        guild_id: u64,
        user_id: u64,
        registration: &RegistrationRoleFields,
    ) -> Result<RoleAssignmentOutcome, DiscordApiError> {
        self.sync_member_roles_with(guild_id, user_id, registration, &[])
            .await
    }

    /// Synchronises a member's roles with their registration plus fixed extra roles.
    ///
    /// Extra role names are normalized and merged into the desired set; empty ones are
    /// dropped. If the desired set is empty no Discord call is made.
    pub async fn sync_member_roles_with(
        &self,
        guild_id: u64,
        user_id: u64,
        registration: &RegistrationRoleFields,
        extra_role_names: &[String],
    ) -> Result<RoleAssignmentOutcome, DiscordApiError> {
        let mut desired = build_desired_role_names(registration);
        desired.extend(
            extra_role_names
                .iter()
                .map(|name| normalize_role_name(name))
                .filter(|name| !name.is_empty()),
        );

        self.sync_desired_roles(guild_id, user_id, &desired).await
    }

    async fn sync_desired_roles(
        &self,
        guild_id: u64,
        user_id: u64,
        desired: &BTreeSet<String>,
    ) -> Result<RoleAssignmentOutcome, DiscordApiError> {
        if desired.is_empty() {
            tracing::debug!("No roles to sync for user {} in guild {}", user_id, guild_id);
            return Ok(RoleAssignmentOutcome::default());
        }

        let mut directory =
            GuildRoleDirectory::load(self.store, self.session, guild_id, user_id).await?;

        let reconciliation = RoleReconciler::new(self.store, guild_id)
            .reconcile(desired, &mut directory)
            .await;

        let assignment = BulkAssigner::new(
            self.store,
            guild_id,
            user_id,
            self.limits.assign_concurrency,
        )
        .assign(reconciliation.to_assign, self.limits.max_role_operations)
        .await;

        let mut failed_role_names = reconciliation.creation_failed;
        failed_role_names.extend(assignment.failed);

        let outcome = RoleAssignmentOutcome {
            assigned_role_names: assignment.assigned,
            skipped_existing_role_names: reconciliation.already_assigned,
            skipped_hierarchy_role_names: reconciliation.hierarchy_blocked,
            failed_role_names,
        };

        tracing::info!(
            "Role sync for user {} in guild {}: {} assigned, {} existing, {} hierarchy-blocked, {} failed",
            user_id,
            guild_id,
            outcome.assigned_role_names.len(),
            outcome.skipped_existing_role_names.len(),
            outcome.skipped_hierarchy_role_names.len(),
            outcome.failed_role_names.len()
        );

        Ok(outcome)
    }
}
