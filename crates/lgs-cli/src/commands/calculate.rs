//! The `lgs calculate` command.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use comfy_table::Table;

use lgs_core::animation::{NumberAnimation, NET_ANIMATION, SCORE_ANIMATION};
use lgs_core::api::ScoreResult;
use lgs_core::dashboard::{Dashboard, SubmitOutcome};
use lgs_core::sheet::AnswerSheet;
use lgs_core::stats::progress_percent;

use super::{connect, print_notice};

const FRAME: Duration = Duration::from_millis(50);

pub async fn execute(
    sheet_path: PathBuf,
    animate: bool,
    html: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let sheet = AnswerSheet::load(&sheet_path)?;
    let client = connect(config_path)?;
    let mut dashboard = Dashboard::with_sheet(client, sheet);

    let outcome = dashboard.submit().await;
    for notice in dashboard.take_notices() {
        print_notice(&notice);
    }

    let (result, celebrate) = match outcome {
        SubmitOutcome::Calculated { result, celebrate } => (result, celebrate),
        SubmitOutcome::Rejected { corrections } => {
            for c in &corrections {
                eprintln!("  {}: {} -> {}", c.field, c.from, c.to);
            }
            bail!("answer sheet exceeds the question counts; run `lgs validate --fix`");
        }
        SubmitOutcome::Declined { message } => bail!("server declined: {message}"),
        SubmitOutcome::Failed => bail!("score calculation failed"),
    };

    if animate {
        count_up("Toplam Puan", NumberAnimation::new(0.0, result.total_score, SCORE_ANIMATION)).await?;
        count_up(
            "Yüzdelik Dilim",
            NumberAnimation::new(0.0, result.percentile, SCORE_ANIMATION).with_suffix("%"),
        )
        .await?;
        for (subject, net) in &result.nets {
            count_up(subject.display_name(), NumberAnimation::new(0.0, *net, NET_ANIMATION)).await?;
        }
        println!();
    }

    print_result(&result);

    if let Some(summary) = dashboard.summary() {
        println!(
            "\nDeneme: {}  En Yüksek: {:.2}  Ortalama: {:.2}",
            summary.attempts, summary.best, summary.average
        );
    }

    if celebrate {
        println!("\nTebrikler! 400 puanın üzerine çıktınız!");
    }

    if let Some(path) = html {
        let mut sections = vec![lgs_report::render_results(&result)];
        if let Some(summary) = dashboard.summary() {
            sections.push(lgs_report::render_summary(summary));
        }
        sections.push(lgs_report::render_raw_json(&result));
        let page = lgs_report::render_page("LGS Puan Sonucu", &sections);
        lgs_report::write_html(&path, &page)?;
        println!("HTML report written to {}", path.display());
    }

    Ok(())
}

/// Redraw one line until the animation reaches its final value.
async fn count_up(label: &str, animation: NumberAnimation) -> Result<()> {
    let mut stdout = std::io::stdout();
    for frame in animation.frames(FRAME) {
        write!(stdout, "\r{label}: {frame}")?;
        stdout.flush()?;
        tokio::time::sleep(FRAME).await;
    }
    writeln!(stdout)?;
    Ok(())
}

fn print_result(result: &ScoreResult) {
    let mut table = Table::new();
    table.set_header(vec!["", "Değer"]);
    table.add_row(vec!["Toplam Puan".to_string(), format!("{:.2}", result.total_score)]);
    table.add_row(vec!["Yüzdelik Dilim".to_string(), format!("{:.2}%", result.percentile)]);
    table.add_row(vec![
        "İlerleme".to_string(),
        format!("{:.2}%", progress_percent(result.total_score)),
    ]);
    for (subject, net) in &result.nets {
        table.add_row(vec![format!("{} Net", subject.display_name()), format!("{net:.2}")]);
    }
    println!("{table}");
}
