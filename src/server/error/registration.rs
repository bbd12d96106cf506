use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrationError {
    /// More than one registration matched an email case-insensitively.
    ///
    /// Emails are expected to be unique; staff must resolve the duplicate by hand.
    #[error("Multiple registrations matched email '{0}'; expected a single row")]
    AmbiguousEmail(String),

    /// Linking failed because another registration already carries the Discord ID.
    ///
    /// Raised when the database unique constraint on `discord_user_id` rejects an update
    /// that raced past the earlier linked-elsewhere check.
    #[error("Discord user {0} is already linked to another registration")]
    DiscordAlreadyLinked(u64),
}
