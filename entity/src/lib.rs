//! SeaORM entities for tables read and written by the bot.
//!
//! The `registrations` table is owned by the hackathon registration site; the bot only
//! reads registration attributes and writes the Discord link columns.

pub mod prelude;
pub mod registration;
