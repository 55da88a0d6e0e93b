//! HTML panel rendering.
//!
//! Produces fragments for the result and recommendation panels, and a
//! self-contained page with the CSS inlined.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, TimeZone};

use lgs_core::api::ScoreResult;
use lgs_core::charts::SubjectRadarChart;
use lgs_core::dashboard::RecommendationPanel;
use lgs_core::notice::MSG_RECOMMENDATION_FAILED;
use lgs_core::stats::{progress_percent, ScoreSummary};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Turkish locale timestamp, e.g. `05.06.2024 14:03:09`.
fn format_tr<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%d.%m.%Y %H:%M:%S").to_string()
}

/// Render the result panel: total score, percentile, progress, and nets.
pub fn render_results(result: &ScoreResult) -> String {
    let mut html = String::new();

    html.push_str("<section id=\"results\" class=\"results\">\n");
    html.push_str(&format!(
        "<div class=\"result-card\"><span class=\"label\">Toplam Puan</span><span id=\"totalScore\" class=\"value\">{:.2}</span></div>\n",
        result.total_score
    ));
    html.push_str(&format!(
        "<div class=\"result-card\"><span class=\"label\">Yüzdelik Dilim</span><span id=\"percentileValue\" class=\"value\">{:.2}%</span></div>\n",
        result.percentile
    ));
    html.push_str(&format!(
        "<div class=\"progress\"><div id=\"scoreProgress\" class=\"progress-bar\" style=\"width: {:.2}%\"></div></div>\n",
        progress_percent(result.total_score)
    ));

    html.push_str("<table class=\"nets\">\n");
    html.push_str("<thead><tr><th>Ders</th><th>Net</th></tr></thead>\n<tbody>\n");
    for (subject, net) in &result.nets {
        html.push_str(&format!(
            "<tr><td>{}</td><td id=\"{}Net\">{:.2}</td></tr>\n",
            html_escape(subject.display_name()),
            subject.id(),
            net
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");
    html
}

/// Render the statistics row: attempts, best, and average.
pub fn render_summary(summary: &ScoreSummary) -> String {
    format!(
        "<section class=\"stats\">\n<div class=\"stat-card\"><span class=\"label\">Deneme</span><span id=\"totalAttempts\">{}</span></div>\n<div class=\"stat-card\"><span class=\"label\">En Yüksek</span><span id=\"bestScore\">{:.2}</span></div>\n<div class=\"stat-card\"><span class=\"label\">Ortalama</span><span id=\"averageScore\">{:.2}</span></div>\n</section>\n",
        summary.attempts, summary.best, summary.average
    )
}

/// Render the recommendation panel.
///
/// The text is escaped before newlines become `<br>`.
pub fn render_recommendation(panel: &RecommendationPanel) -> String {
    match panel {
        RecommendationPanel::Ready {
            kind,
            text,
            generated_at,
        } => {
            let body = html_escape(text).replace('\n', "<br>");
            format!(
                "<div class=\"ai-recommendation\">\n<h5><i class=\"{} me-2\"></i>{}</h5>\n<div class=\"recommendation-content\">{}</div>\n<small class=\"text-muted mt-2 d-block\"><i class=\"fas fa-clock me-1\"></i>{} tarihinde oluşturuldu</small>\n</div>\n",
                kind.icon(),
                html_escape(kind.title()),
                body,
                format_tr(generated_at)
            )
        }
        RecommendationPanel::Warning(message) => format!(
            "<div class=\"alert alert-warning\"><i class=\"fas fa-exclamation-triangle me-2\"></i>{}</div>\n",
            html_escape(message)
        ),
        RecommendationPanel::Failed => format!(
            "<div class=\"alert alert-danger\"><i class=\"fas fa-exclamation-circle me-2\"></i>{}</div>\n",
            html_escape(MSG_RECOMMENDATION_FAILED)
        ),
    }
}

/// Horizontal SVG bars for per-subject success rates.
pub fn render_subject_chart(chart: &SubjectRadarChart) -> String {
    let bar_height = 24;
    let max_width = 300;
    let padding = 8;
    let label_width = 120;

    let total_height = chart.labels.len() * (bar_height + padding) + padding;
    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (label, value)) in chart.labels.iter().zip(&chart.values).enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (value.clamp(0.0, 100.0) / 100.0 * max_width as f64) as usize;
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"13\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 8,
            y + bar_height / 2,
            html_escape(label)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#28a745\" rx=\"3\"/>\n",
            label_width, y, width, bar_height
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 6,
            y + bar_height / 2,
            value
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Wrap panel fragments in a standalone page.
pub fn render_page(title: &str, sections: &[String]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"tr\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
    for section in sections {
        html.push_str(section);
    }
    html.push_str("</body>\n</html>");
    html
}

/// Write a page to a file, creating parent directories.
pub fn write_html(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

/// Collapsible raw JSON of a result, for debugging server output.
pub fn render_raw_json(result: &ScoreResult) -> String {
    let mut html = String::from("<details>\n<summary>Ham Veri</summary>\n<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(result).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n</details>\n");
    html
}

const CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; color: #1a1a1a; }
.results, .stats { display: flex; flex-wrap: wrap; gap: 1rem; margin-bottom: 1.5rem; }
.result-card, .stat-card { border: 1px solid #e5e7eb; border-radius: 8px; padding: 1rem; min-width: 160px; }
.label { display: block; color: #6b7280; font-size: 0.85rem; }
.value { font-size: 1.6rem; font-weight: 600; }
.progress { width: 100%; height: 10px; background: #e5e7eb; border-radius: 5px; }
.progress-bar { height: 100%; background: #0066cc; border-radius: 5px; }
table.nets { border-collapse: collapse; width: 100%; }
table.nets td, table.nets th { border-bottom: 1px solid #e5e7eb; padding: 0.4rem 0.6rem; text-align: left; }
.ai-recommendation { border-left: 4px solid #0066cc; padding: 1rem; background: #f5f9ff; }
.alert { padding: 1rem; border-radius: 6px; }
.alert-warning { background: #fff7e6; }
.alert-danger { background: #fde2e2; }
"#;

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{Local, TimeZone, Utc};
    use lgs_core::api::RecommendationType;
    use lgs_core::subject::Subject;

    use super::*;

    fn result() -> ScoreResult {
        let mut nets = BTreeMap::new();
        nets.insert(Subject::Turkce, 16.333);
        nets.insert(Subject::Ingilizce, 9.0);
        ScoreResult {
            total_score: 412.3456,
            percentile: 93.1,
            nets,
        }
    }

    #[test]
    fn escape_special_chars() {
        assert_eq!(html_escape("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#x27;");
    }

    #[test]
    fn results_use_two_decimals() {
        let html = render_results(&result());
        assert!(html.contains(">412.35<"));
        assert!(html.contains(">93.10%<"));
        assert!(html.contains("width: 82.47%"));
        assert!(html.contains("id=\"turkceNet\">16.33<"));
        assert!(html.contains("İngilizce"));
    }

    #[test]
    fn summary_row() {
        let html = render_summary(&ScoreSummary {
            attempts: 4,
            best: 420.0,
            average: 377.126,
        });
        assert!(html.contains("id=\"totalAttempts\">4<"));
        assert!(html.contains("id=\"bestScore\">420.00<"));
        assert!(html.contains("id=\"averageScore\">377.13<"));
    }

    #[test]
    fn recommendation_escapes_then_breaks_lines() {
        let panel = RecommendationPanel::Ready {
            kind: RecommendationType::StudyPlan,
            text: "Pazartesi: <Matematik>\nSalı: Fen".into(),
            generated_at: Local.with_ymd_and_hms(2024, 6, 5, 14, 3, 9).unwrap(),
        };
        let html = render_recommendation(&panel);
        assert!(html.contains("Pazartesi: &lt;Matematik&gt;<br>Salı: Fen"));
        assert!(html.contains("fas fa-calendar-alt"));
        assert!(html.contains("Çalışma Planı"));
        assert!(html.contains("05.06.2024 14:03:09 tarihinde oluşturuldu"));
    }

    #[test]
    fn recommendation_warning_and_failure() {
        let html = render_recommendation(&RecommendationPanel::Warning("Önce <puan>".into()));
        assert!(html.contains("alert-warning"));
        assert!(html.contains("Önce &lt;puan&gt;"));

        let html = render_recommendation(&RecommendationPanel::Failed);
        assert!(html.contains("alert-danger"));
        assert!(html.contains("Lütfen tekrar deneyin."));
    }

    #[test]
    fn timestamp_format() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_tr(&at), "02.01.2025 03:04:05");
    }

    #[test]
    fn subject_chart_bars() {
        let chart = SubjectRadarChart {
            labels: vec!["Fen".into(), "Din".into()],
            values: vec![50.0, 120.0],
        };
        let svg = render_subject_chart(&chart);
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains("width=\"150\""));
        assert!(svg.contains("width=\"300\""));
    }

    #[test]
    fn page_and_write() {
        let page = render_page("LGS <Sonuç>", &[render_results(&result()), render_raw_json(&result())]);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>LGS &lt;Sonuç&gt;</title>"));
        assert!(page.contains("<details>"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("sonuc.html");
        write_html(&path, &page).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), page);
    }
}
