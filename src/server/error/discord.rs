use thiserror::Error;

/// Failure of a single Discord REST call made by the bot.
///
/// Carries the operation name so per-role failures can be logged meaningfully once they
/// are folded into a role assignment outcome.
#[derive(Error, Debug)]
pub enum DiscordApiError {
    /// The call did not complete within the configured per-call timeout.
    #[error("Discord API {operation} timed out after {timeout_ms} ms")]
    Timeout {
        /// Name of the REST operation, e.g. `create_role`
        operation: &'static str,
        /// Configured timeout that elapsed
        timeout_ms: u64,
    },

    /// Discord answered with a non-success response, or the response could not be read.
    ///
    /// Boxed due to the size of `serenity::Error`.
    #[error("Discord API {operation} failed: {source}")]
    Request {
        /// Name of the REST operation, e.g. `add_member_role`
        operation: &'static str,
        #[source]
        source: Box<serenity::Error>,
    },
}

impl DiscordApiError {
    pub fn request(operation: &'static str, source: serenity::Error) -> Self {
        Self::Request {
            operation,
            source: Box::new(source),
        }
    }
}
