//! Hackbot Test Utils
//!
//! Provides shared testing utilities for the hackbot crate: a builder for test contexts
//! backed by in-memory SQLite databases, factories for registration rows, and factories
//! for serenity API objects.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Registration row factories
//! - **serenity**: Serenity `Role` and `Member` factories
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory::registration::RegistrationFactory};
//!
//! #[tokio::test]
//! async fn finds_registration() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_registration_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     RegistrationFactory::new(db).email("ada@example.com").build().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
