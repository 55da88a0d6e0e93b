//! The `lgs analytics` command.

use std::path::PathBuf;

use anyhow::{bail, Result};
use comfy_table::Table;

use lgs_core::charts::{ScoreTrendChart, SubjectRadarChart};
use lgs_core::dashboard::Dashboard;

use super::connect;

pub async fn execute(html: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let client = connect(config_path)?;
    let mut dashboard = Dashboard::new(client);

    if !dashboard.load_analytics().await {
        bail!("failed to load analytics");
    }

    match dashboard.summary() {
        Some(summary) => println!(
            "Deneme: {}  En Yüksek: {:.2}  Ortalama: {:.2}",
            summary.attempts, summary.best, summary.average
        ),
        None => println!("No attempts yet."),
    }

    if let Some(chart) = dashboard.score_chart().current() {
        println!("\n{}", ScoreTrendChart::TITLE);
        let mut table = Table::new();
        table.set_header(vec!["Tarih", "Puan"]);
        for (label, score) in chart.labels.iter().zip(&chart.scores) {
            table.add_row(vec![label.clone(), format!("{score:.2}")]);
        }
        println!("{table}");
    }

    if let Some(chart) = dashboard.subject_chart().current() {
        println!("\n{}", SubjectRadarChart::TITLE);
        let mut table = Table::new();
        table.set_header(vec!["Ders", "Başarı", ""]);
        for (label, value) in chart.labels.iter().zip(&chart.values) {
            table.add_row(vec![label.clone(), format!("{value:.1}%"), bar(*value)]);
        }
        println!("{table}");
    }

    if let Some(trend) = dashboard.improvement_trend() {
        println!(
            "\nToplam gelişim: {:+.2}  Deneme başına: {:+.2}",
            trend.total_improvement, trend.average_per_attempt
        );
    }

    if let Some(path) = html {
        let mut sections = Vec::new();
        if let Some(summary) = dashboard.summary() {
            sections.push(lgs_report::render_summary(summary));
        }
        if let Some(chart) = dashboard.subject_chart().current() {
            sections.push(format!("<h2>{}</h2>\n", SubjectRadarChart::TITLE));
            sections.push(lgs_report::render_subject_chart(chart));
        }
        let page = lgs_report::render_page("LGS Analiz", &sections);
        lgs_report::write_html(&path, &page)?;
        println!("\nHTML report written to {}", path.display());
    }

    Ok(())
}

/// Twenty-cell bar for a percentage.
fn bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 100.0) / 5.0).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(20 - filled))
}
