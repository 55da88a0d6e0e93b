//! lgs-client: Backend access for the LGS score dashboard.
//!
//! Implements the `DashboardApi` trait over HTTP, plus the configuration
//! that points it at a server and a mock for tests.

pub mod config;
pub mod error;
pub mod http;
pub mod mock;

pub use config::{load_config_from, ClientConfig};
pub use error::ClientError;
pub use http::HttpDashboardClient;
