//! Bounded, failure-isolated role assignment.

use dioxus_logger::tracing;
use futures::stream::{self, StreamExt};

use crate::server::{
    error::discord::DiscordApiError,
    service::{role_store::RoleStore, role_sync::reconciler::RoleAssignment},
};

/// Names assigned and failed by one bulk assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentResult {
    pub assigned: Vec<String>,
    pub failed: Vec<String>,
}

/// Applies role grants for one member with a cap and a small worker pool.
pub struct BulkAssigner<'a, S: ?Sized> {
    store: &'a S,
    guild_id: u64,
    user_id: u64,
    concurrency: usize,
}

impl<'a, S> BulkAssigner<'a, S>
where
    S: RoleStore + ?Sized,
{
    /// Creates a new BulkAssigner.
    ///
    /// # Arguments
    /// - `store` - Role store receiving the grants
    /// - `guild_id` - Guild the member belongs to
    /// - `user_id` - Member receiving the roles
    /// - `concurrency` - Grants allowed in flight at once (values below 1 are treated as 1)
    pub fn new(store: &'a S, guild_id: u64, user_id: u64, concurrency: usize) -> Self {
        Self {
            store,
            guild_id,
            user_id,
            concurrency: concurrency.max(1),
        }
    }

    /// Performs at most `cap` grants.
    ///
    /// Grants beyond the first `cap` are reported as failed without calling Discord. The
    /// remaining grants run through the worker pool; each settles independently, so a
    /// failed or timed-out grant never cancels grants already in flight. Results are
    /// collected in input order regardless of completion order.
    ///
    /// # Arguments
    /// - `to_assign` - Grants in reconciliation order
    /// - `cap` - Maximum number of grant calls for this pass
    ///
    /// # Returns
    /// - `AssignmentResult` - Every name of every grant in exactly one bucket
    pub async fn assign(&self, mut to_assign: Vec<RoleAssignment>, cap: usize) -> AssignmentResult {
        let mut result = AssignmentResult::default();

        if to_assign.len() > cap {
            for skipped in to_assign.split_off(cap) {
                tracing::warn!(
                    "Skipping role assignment {:?} for user {}: exceeds cap of {} operations",
                    skipped.role_names,
                    self.user_id,
                    cap
                );
                result.failed.extend(skipped.role_names);
            }
        }

        let settled: Vec<(RoleAssignment, Result<(), DiscordApiError>)> = stream::iter(to_assign)
            .map(|assignment| async move {
                let outcome = self
                    .store
                    .assign_role(self.guild_id, self.user_id, assignment.role_id)
                    .await;
                (assignment, outcome)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        for (assignment, outcome) in settled {
            match outcome {
                Ok(()) => result.assigned.extend(assignment.role_names),
                Err(e) => {
                    tracing::error!(
                        "Failed to assign role {:?} ({}) to user {}: {}",
                        assignment.role_names,
                        assignment.role_id,
                        self.user_id,
                        e
                    );
                    result.failed.extend(assignment.role_names);
                }
            }
        }

        result
    }
}
