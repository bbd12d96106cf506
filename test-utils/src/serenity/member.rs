//! Test factory for creating Serenity Member objects.

use serenity::all::Member;

/// Creates a test Serenity guild Member holding the given roles.
///
/// # Arguments
/// - `guild_id` - Guild the member belongs to
/// - `user_id` - Discord user ID of the member
/// - `username` - Account username
/// - `role_ids` - IDs of the roles the member holds
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// let member = create_test_member(1000, 42, "ada", &[7, 8]);
/// assert_eq!(member.roles.len(), 2);
/// ```
pub fn create_test_member(guild_id: u64, user_id: u64, username: &str, role_ids: &[u64]) -> Member {
    let roles: Vec<String> = role_ids.iter().map(|id| id.to_string()).collect();

    serde_json::from_value(serde_json::json!({
        "guild_id": guild_id.to_string(),
        "user": {
            "id": user_id.to_string(),
            "username": username,
            "discriminator": "0",
            "global_name": null,
            "avatar": null,
            "bot": false,
        },
        "nick": null,
        "avatar": null,
        "roles": roles,
        "joined_at": "2025-01-01T00:00:00.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
        "communication_disabled_until": null,
    }))
    .expect("Failed to create test member - invalid JSON structure")
}
