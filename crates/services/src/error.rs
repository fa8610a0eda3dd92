//! Shared error types for the services crate.

use thiserror::Error;

use graphguard_core::graph::GraphError;
use graphguard_core::model::SettingsError;

/// Errors emitted by `SettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsServiceError {
    #[error(transparent)]
    Invalid(#[from] SettingsError),
}

/// Errors emitted while preparing dashboard content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DashboardError {
    #[error("graph engine unavailable: {0}")]
    GraphUnavailable(#[source] GraphError),
}
