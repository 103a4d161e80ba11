//! Workspace provisioning: naming rules, credential checks and reconciliation

pub mod credentials;
pub mod naming;
pub mod reconcile;

pub use credentials::check_credential_expiry;
pub use reconcile::{cleanup_workspaces, create_workspaces_for_all, provision_single_app};
