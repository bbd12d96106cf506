/// Maximum length of a Discord role name, in characters.
pub const MAX_ROLE_NAME_LEN: usize = 100;

/// Normalizes a free-form value into a role-name-safe string.
///
/// Collapses every run of whitespace into a single space, trims both ends and caps the
/// result at [`MAX_ROLE_NAME_LEN`] characters. Truncation happens on character
/// boundaries, and a trailing space left by the cut is trimmed.
///
/// # Arguments
/// - `value` - Raw registration value
///
/// # Returns
/// - `String` - Normalized value, empty if `value` held only whitespace
pub fn normalize_role_name(value: &str) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= MAX_ROLE_NAME_LEN {
        return collapsed;
    }

    collapsed
        .chars()
        .take(MAX_ROLE_NAME_LEN)
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Normalizes an email for case-insensitive registration lookups.
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}
