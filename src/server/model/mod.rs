//! Domain models used by the service layer.
//!
//! These types are decoupled from both the SeaORM entities and the serenity API objects;
//! conversions happen at the repository and role-store boundaries.

pub mod discord;
pub mod registration;
pub mod role_sync;
pub mod teammate;
