//! API trait definitions split by responsibility
//!
//! This module organizes the Veracode API surface into focused sub-traits:
//! - [`CredentialsApi`] - Identity service (credential metadata)
//! - [`ApplicationApi`] - Application profiles
//! - [`WorkspaceApi`] - SCA workspaces and their team assignments
//!
//! The [`VeracodeApi`] super-trait combines all three.

mod applications;
mod credentials;
mod workspaces;

pub use applications::ApplicationApi;
pub use credentials::CredentialsApi;
pub use workspaces::WorkspaceApi;

/// Everything a provisioning run needs from the Veracode platform
pub trait VeracodeApi: CredentialsApi + ApplicationApi + WorkspaceApi {}

impl<T: CredentialsApi + ApplicationApi + WorkspaceApi> VeracodeApi for T {}
