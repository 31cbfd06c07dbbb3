//! Shared types for the storefront
//!
//! Domain models and the unified error system used by the server and by
//! anything that talks to its JSON API.

pub mod error;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
