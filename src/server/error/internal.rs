use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase or with data we expected to be well-formed
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse a snowflake id from String
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },
}
