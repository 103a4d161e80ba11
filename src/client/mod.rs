//! Veracode API client
//!
//! The API surface is split into sub-traits in [`api`]; [`VeracodeClient`]
//! implements them over HTTPS and [`mock::MockVeracodeClient`] in memory.

pub mod api;
#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod signing;
pub mod veracode;

pub use api::{ApplicationApi, CredentialsApi, VeracodeApi, WorkspaceApi};
#[cfg(test)]
pub use mock::MockVeracodeClient;
pub use veracode::VeracodeClient;
