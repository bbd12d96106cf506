//! Test factories for creating Serenity API objects.
//!
//! These factories build valid Serenity structs by deserializing JSON shaped like
//! Discord's API responses, so conversions from Serenity types can be tested without a
//! live connection.
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_member, create_test_role};
//!
//! let role = create_test_role(111111111, "Interest: AI", 3);
//! let member = create_test_member(1000, 222222222, "ada", &[111111111]);
//! ```
//!
//! # Available Factories
//!
//! - `role::create_test_role` - Create Serenity Role objects
//! - `member::create_test_member` - Create Serenity Member objects

pub mod member;
pub mod role;

pub use member::create_test_member;
pub use role::create_test_role;
