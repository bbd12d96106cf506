//! Factory methods for creating test data.
//!
//! Each factory inserts a row with sensible defaults and exposes builder methods for the
//! columns a test cares about.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Unlinked registration with defaults
//! let registration = factory::create_registration(&db).await?;
//!
//! // Linked free agent
//! let registration = factory::registration::RegistrationFactory::new(&db)
//!     .discord_user_id("123456789")
//!     .team_mode("free_agent")
//!     .interests(serde_json::json!(["AI", "Robotics"]))
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `registration` - Create registration rows
//! - `helpers` - Shared ID generation

pub mod helpers;
pub mod registration;

pub use registration::{create_linked_registration, create_registration};
