//! Wire-level DTOs exchanged with Discord and returned by the HTTP layer.

pub mod api;
pub mod interaction;
