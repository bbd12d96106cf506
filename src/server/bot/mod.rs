//! Discord bot behaviour driven by slash command interactions.
//!
//! Discord delivers interactions to the HTTP webhook rather than over a gateway
//! connection; the controller hands application commands to [`command::dispatch`]. The
//! bot reuses one serenity `Http` client for every REST call: role reads and writes go
//! through the role store, and deferred `/verify` replies are completed by editing the
//! original interaction response.

pub mod command;
