//! The `lgs login` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use toml_edit::DocumentMut;

use lgs_client::{ClientConfig, HttpDashboardClient};

pub async fn execute(username: String, password: String, config: Option<PathBuf>) -> Result<()> {
    let path = config.unwrap_or_else(|| PathBuf::from("lgs.toml"));

    let content = if path.exists() {
        std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config: {}", path.display()))?
    } else {
        String::new()
    };

    // Read the file as written, without env overrides baked in.
    let file_config = toml::from_str::<ClientConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    let mut doc = content
        .parse::<DocumentMut>()
        .with_context(|| format!("failed to parse config: {}", path.display()))?;

    let base_url =
        std::env::var("LGS_BASE_URL").unwrap_or_else(|_| file_config.base_url.clone());
    let client = HttpDashboardClient::new(&base_url, None, file_config.timeout_secs)?;
    let cookie = client.login(&username, &password).await?;

    // Only the cookie changes; comments and layout stay as the user left them.
    doc["session_cookie"] = toml_edit::value(cookie);
    std::fs::write(&path, doc.to_string())
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("Logged in as {username}; session saved to {}", path.display());
    Ok(())
}
