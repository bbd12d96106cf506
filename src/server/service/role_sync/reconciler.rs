//! Diffing desired role names against a guild directory.

use dioxus_logger::tracing;
use futures::future::join_all;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::server::service::{role_sync::directory::GuildRoleDirectory, role_store::RoleStore};

/// One role grant to perform, covering every desired name that resolved to the role.
///
/// Desired names that differ only by case resolve to the same guild role; grouping them
/// keeps the grant to a single API call while still accounting for each name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub role_id: u64,
    pub role_names: Vec<String>,
}

/// Classification of every desired role name after missing roles were created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Names that had no guild role at the start of the pass.
    pub to_create: Vec<String>,
    /// Names whose role creation failed; excluded from every other bucket.
    pub creation_failed: Vec<String>,
    /// Names whose role the member already holds.
    pub already_assigned: Vec<String>,
    /// Names whose role sits at or above the bot's highest role.
    pub hierarchy_blocked: Vec<String>,
    /// Grants to perform, in the order the names were classified.
    pub to_assign: Vec<RoleAssignment>,
}

impl Reconciliation {
    /// Number of desired names queued for assignment.
    pub fn pending_names(&self) -> usize {
        self.to_assign.iter().map(|a| a.role_names.len()).sum()
    }
}

/// Creates missing roles and classifies desired names for one guild member.
pub struct RoleReconciler<'a, S: ?Sized> {
    store: &'a S,
    guild_id: u64,
}

impl<'a, S> RoleReconciler<'a, S>
where
    S: RoleStore + ?Sized,
{
    pub fn new(store: &'a S, guild_id: u64) -> Self {
        Self { store, guild_id }
    }

    /// Reconciles desired role names against the directory.
    ///
    /// Missing roles are created concurrently, one call per case-insensitive name, and
    /// each creation is isolated: a failure only affects the names that needed that role.
    /// All creations settle before any name is classified. A role at a position greater
    /// than or equal to the bot's top role is hierarchy-blocked, since Discord forbids
    /// granting a role ranked at the actor's own top rank.
    ///
    /// # Arguments
    /// - `desired` - Normalized desired role names
    /// - `directory` - Directory for the pass; created roles are registered into it
    ///
    /// # Returns
    /// - `Reconciliation` - Every desired name in exactly one of `creation_failed`,
    ///   `already_assigned`, `hierarchy_blocked` or `to_assign`
    pub async fn reconcile(
        &self,
        desired: &BTreeSet<String>,
        directory: &mut GuildRoleDirectory,
    ) -> Reconciliation {
        let mut reconciliation = Reconciliation::default();

        let mut missing: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for name in desired {
            if directory.lookup_by_name(name).is_none() {
                reconciliation.to_create.push(name.clone());
                missing.entry(name.to_lowercase()).or_default().push(name.clone());
            }
        }

        let created_ids = self
            .create_missing(missing, directory, &mut reconciliation.creation_failed)
            .await;

        let bot_top_position = directory.bot_top_role_position();
        let mut queued: HashMap<u64, usize> = HashMap::new();

        for name in desired {
            let role = directory.lookup_by_name(name).or_else(|| {
                created_ids
                    .get(&name.to_lowercase())
                    .and_then(|id| directory.lookup_by_id(*id))
            });
            let Some(role) = role else {
                continue;
            };

            if directory.member().has_role(role.id) {
                reconciliation.already_assigned.push(name.clone());
                continue;
            }

            if role.position >= bot_top_position {
                tracing::debug!(
                    "Role '{}' at position {} is not below bot top position {}",
                    role.name,
                    role.position,
                    bot_top_position
                );
                reconciliation.hierarchy_blocked.push(name.clone());
                continue;
            }

            match queued.get(&role.id) {
                Some(index) => reconciliation.to_assign[*index]
                    .role_names
                    .push(name.clone()),
                None => {
                    queued.insert(role.id, reconciliation.to_assign.len());
                    reconciliation.to_assign.push(RoleAssignment {
                        role_id: role.id,
                        role_names: vec![name.clone()],
                    });
                }
            }
        }

        reconciliation
    }

    /// Creates one role per missing case-insensitive name.
    ///
    /// Returns the created role IDs keyed by lowercased requested name, so names still
    /// resolve if Discord adjusted the stored role name.
    async fn create_missing(
        &self,
        missing: BTreeMap<String, Vec<String>>,
        directory: &mut GuildRoleDirectory,
        failed: &mut Vec<String>,
    ) -> HashMap<String, u64> {
        let creations = join_all(missing.into_iter().map(|(key, names)| async move {
            let result = self.store.create_role(self.guild_id, &names[0]).await;
            (key, names, result)
        }))
        .await;

        let mut created_ids = HashMap::new();
        for (key, names, result) in creations {
            match result {
                Ok(role) => {
                    tracing::info!(
                        "Created role '{}' ({}) in guild {}",
                        role.name,
                        role.id,
                        self.guild_id
                    );
                    created_ids.insert(key, role.id);
                    directory.register(role);
                }
                Err(e) => {
                    tracing::error!("Failed to create role '{}': {}", names[0], e);
                    failed.extend(names);
                }
            }
        }

        created_ids
    }
}
