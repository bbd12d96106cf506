use crate::server::error::{internal::InternalError, AppError};

/// Parses a Discord snowflake from its string form.
///
/// Discord serializes every snowflake (guild, user, role, application IDs) as a string
/// in JSON payloads.
///
/// # Arguments
/// - `value` - The string to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed snowflake
/// - `Err(AppError::InternalErr(ParseStringId))` - The string was not a valid u64
pub fn parse_u64_from_string(value: &str) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId {
            value: value.to_string(),
            source: e,
        })?;

    Ok(result)
}
