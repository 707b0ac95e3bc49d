//! Data orchestration for the Light Pollution Guardian dashboard.
//!
//! Probes the analysis service, loads the city catalog and per-city
//! analyses with a bundled offline fallback, and keeps the view state the
//! presentation layer renders.

pub mod classify;
pub mod clients;
pub mod config;
pub mod connectivity;
pub mod controller;
pub mod domain;
pub mod errors;
pub mod fallback;
pub mod monitor;
pub mod services;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use clients::{ApiClient, RemoteService};
pub use config::AppConfig;
pub use controller::{Commit, Dashboard, ViewModel, ViewState};
pub use errors::{DashboardError, FetchError};
pub use fallback::FallbackStore;
