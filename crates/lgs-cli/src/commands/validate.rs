//! The `lgs validate` command.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use comfy_table::Table;

use lgs_core::sheet::AnswerSheet;
use lgs_core::subject::{AnswerKind, FieldId};
use lgs_core::validator::InputValidator;

pub fn execute(
    sheet_path: PathBuf,
    focus: Option<String>,
    fix: bool,
    strict: bool,
) -> Result<()> {
    let mut sheet = AnswerSheet::load(&sheet_path)?;
    let focus = focus
        .map(|name| FieldId::parse(&name).ok_or_else(|| anyhow!("unknown field: {name}")))
        .transpose()?;

    let validator = InputValidator::new();
    let corrections = validator.check_all(&mut sheet, focus);

    let mut table = Table::new();
    table.set_header(vec!["Ders", "Doğru", "Yanlış", "Boş", "Soru"]);
    for &(subject, max) in validator.quotas() {
        let correct = sheet.count(subject.field(AnswerKind::Correct));
        let incorrect = sheet.count(subject.field(AnswerKind::Incorrect));
        table.add_row(vec![
            subject.display_name().to_string(),
            correct.to_string(),
            incorrect.to_string(),
            (i64::from(max) - correct - incorrect).to_string(),
            max.to_string(),
        ]);
    }
    println!("{table}");

    if corrections.is_empty() {
        println!("Answer sheet valid");
        return Ok(());
    }

    println!("\n{} value(s) clamped:", corrections.len());
    for c in &corrections {
        println!("  {}: {} -> {}", c.field, c.from, c.to);
    }

    if fix {
        std::fs::write(&sheet_path, sheet.to_toml_string()?)
            .with_context(|| format!("failed to write {}", sheet_path.display()))?;
        println!("Wrote clamped values to {}", sheet_path.display());
    }

    if strict {
        std::process::exit(1);
    }

    Ok(())
}
