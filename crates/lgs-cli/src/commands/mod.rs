pub mod analytics;
pub mod calculate;
pub mod init;
pub mod login;
pub mod recommend;
pub mod validate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use lgs_client::{load_config_from, HttpDashboardClient};
use lgs_core::notice::Notice;

/// Build the HTTP client from the resolved config.
pub(crate) fn connect(config_path: Option<PathBuf>) -> Result<Arc<HttpDashboardClient>> {
    let config = load_config_from(config_path.as_deref())?;
    tracing::debug!(?config, "loaded config");
    Ok(Arc::new(HttpDashboardClient::from_config(&config)?))
}

/// Print a notice to stderr.
pub(crate) fn print_notice(notice: &Notice) {
    eprintln!("{notice}");
}
