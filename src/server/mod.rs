//! Interactions backend and role synchronisation.
//!
//! The backend receives Discord slash command interactions over HTTP, links Discord
//! accounts to hackathon registrations and keeps each participant's guild roles in line
//! with their registration. Axum serves the webhook, SeaORM reads the registration
//! database and serenity's HTTP client talks to Discord.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - The interactions webhook handler
//! - **Bot** (`bot/`) - Slash command dispatch and reply rendering
//! - **Service Layer** (`service/`) - Verification, role synchronisation and teammate matching
//! - **Data Layer** (`data/`) - Registration queries and entity-to-domain conversion
//! - **Model Layer** (`model/`) - Domain models shared by services
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Interaction signature verification
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, Discord client, role store)
//! - **Startup** (`startup`) - Initialization of database, Discord client and state
//! - **Router** (`router`) - Axum route configuration
//!
//! # Request Flow
//!
//! 1. **Router** receives the webhook request
//! 2. **Middleware** verifies the ed25519 signature over the raw body
//! 3. **Controller** parses the interaction and answers pings
//! 4. **Bot** dispatches the slash command to its handler
//! 5. **Service** runs verification, role synchronisation or matching
//! 6. **Data** queries the registration table and converts rows to domain models
//! 7. **Bot** renders the ephemeral reply, editing a deferred response for `/verify`

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
