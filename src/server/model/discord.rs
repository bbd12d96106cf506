//! Discord guild snapshot models used during role synchronisation.

use serenity::all::{Member, Role};
use std::collections::HashSet;

/// A guild role as observed at the start of a synchronisation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildRole {
    /// Discord role ID as a u64.
    pub id: u64,
    /// Role display name.
    pub name: String,
    /// Role position in the guild's role hierarchy (higher = more important).
    pub position: i64,
}

impl GuildRole {
    pub fn from_serenity(role: &Role) -> Self {
        Self {
            id: role.id.get(),
            name: role.name.clone(),
            position: i64::from(role.position),
        }
    }
}

/// A guild member and the roles they currently hold.
///
/// The member's top role position is derived from a role directory, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMember {
    /// Discord user ID as a u64.
    pub user_id: u64,
    /// IDs of the roles held, excluding the implicit @everyone role.
    pub role_ids: HashSet<u64>,
}

impl GuildMember {
    pub fn from_serenity(member: &Member) -> Self {
        Self {
            user_id: member.user.id.get(),
            role_ids: member.roles.iter().map(|role_id| role_id.get()).collect(),
        }
    }

    pub fn has_role(&self, role_id: u64) -> bool {
        self.role_ids.contains(&role_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::serenity::{create_test_member, create_test_role};

    #[test]
    fn converts_serenity_role() {
        let role = GuildRole::from_serenity(&create_test_role(111, "Interest: AI", 4));

        assert_eq!(
            role,
            GuildRole {
                id: 111,
                name: "Interest: AI".to_string(),
                position: 4,
            }
        );
    }

    #[test]
    fn converts_serenity_member_roles() {
        let member = GuildMember::from_serenity(&create_test_member(1000, 42, "ada", &[7, 8]));

        assert_eq!(member.user_id, 42);
        assert!(member.has_role(7));
        assert!(member.has_role(8));
        assert!(!member.has_role(9));
    }
}
