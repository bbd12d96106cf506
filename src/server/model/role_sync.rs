//! Role synchronisation limits and outcome.

use serde::Serialize;

/// Bounds applied to the external write operations of one synchronisation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSyncLimits {
    /// Maximum number of role assignment calls per pass; excess is reported as failed.
    pub max_role_operations: usize,
    /// Number of assignment calls allowed in flight at once.
    pub assign_concurrency: usize,
}

impl Default for RoleSyncLimits {
    fn default() -> Self {
        Self {
            max_role_operations: 24,
            assign_concurrency: 8,
        }
    }
}

/// Result of one reconciliation and assignment pass.
///
/// Every desired role name with non-zero normalized length lands in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignmentOutcome {
    /// Roles newly assigned to the member during this pass.
    pub assigned_role_names: Vec<String>,
    /// Roles the member already held.
    pub skipped_existing_role_names: Vec<String>,
    /// Roles at or above the bot's highest role, which the bot may not grant.
    pub skipped_hierarchy_role_names: Vec<String>,
    /// Roles whose creation or assignment failed, or that exceeded the operation cap.
    pub failed_role_names: Vec<String>,
}

impl RoleAssignmentOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failed_role_names.is_empty()
    }

    /// Total number of role names accounted for across all buckets.
    pub fn total(&self) -> usize {
        self.assigned_role_names.len()
            + self.skipped_existing_role_names.len()
            + self.skipped_hierarchy_role_names.len()
            + self.failed_role_names.len()
    }
}
