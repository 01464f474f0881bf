//! User record management: save-or-update, lookup, filtered/paginated
//! listing and soft-delete over a single `users` table.

// === PUBLIC CONTRACT ===
pub mod contract;

pub use contract::model::{UpsertOutcome, UpsertUser, User};

// === INTERNAL MODULES ===
// Exposed for the composition root and for tests; external consumers
// should stick to the `contract` types and the `Service` API.
pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

pub use domain::service::{Service, ServiceConfig};
