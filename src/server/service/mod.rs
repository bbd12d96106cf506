//! Service layer for business logic and orchestration.
//!
//! Services sit between the bot's command handlers and the data layer:
//!
//! - **Verification** (`verification`) - Linking Discord accounts to registrations
//! - **Role store** (`role_store`) - Discord REST access behind a trait seam
//! - **Role synchronisation** (`role_sync/`) - Mapping, reconciling and assigning roles
//! - **Teammate matching** (`teammate`) - Ranking free agents by shared interests

pub mod role_store;
pub mod role_sync;
pub mod teammate;
pub mod verification;
