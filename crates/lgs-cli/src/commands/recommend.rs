//! The `lgs recommend` command.

use std::path::PathBuf;

use anyhow::{bail, Result};

use lgs_core::api::RecommendationType;
use lgs_core::dashboard::{Dashboard, RecommendationPanel};
use lgs_core::notice::MSG_RECOMMENDATION_FAILED;

use super::connect;

pub async fn execute(
    kind: RecommendationType,
    html: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let client = connect(config_path)?;
    let dashboard = Dashboard::new(client);

    eprintln!("AI önerisi hazırlanıyor...");
    let panel = dashboard.recommendation(kind).await;

    if let Some(path) = &html {
        let page = lgs_report::render_page(
            kind.title(),
            &[lgs_report::render_recommendation(&panel)],
        );
        lgs_report::write_html(path, &page)?;
        eprintln!("HTML report written to {}", path.display());
    }

    match panel {
        RecommendationPanel::Ready {
            kind,
            text,
            generated_at,
        } => {
            println!("{}\n", kind.title());
            println!("{text}");
            println!(
                "\n{} tarihinde oluşturuldu",
                generated_at.format("%d.%m.%Y %H:%M:%S")
            );
            Ok(())
        }
        RecommendationPanel::Warning(message) => {
            eprintln!("[warning] {message}");
            Ok(())
        }
        RecommendationPanel::Failed => bail!("{MSG_RECOMMENDATION_FAILED}"),
    }
}
