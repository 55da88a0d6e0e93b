//! In-memory answer form.
//!
//! An [`AnswerSheet`] holds the raw text of all twelve count fields, just
//! like the dashboard form does, so that non-numeric input survives until
//! validation coerces it.

use std::collections::HashMap;
use std::path::Path;

use crate::api::CalculateRequest;
use crate::error::CoreError;
use crate::subject::{AnswerKind, FieldId, Subject};
use crate::validator::{parse_count, FieldAccess};

/// Raw field values for every subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSheet {
    fields: HashMap<FieldId, String>,
}

impl Default for AnswerSheet {
    fn default() -> Self {
        Self {
            fields: FieldId::all().map(|f| (f, "0".to_string())).collect(),
        }
    }
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn get(&self, field: FieldId) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("0")
    }

    /// Parsed value of a field, non-numeric text reading as 0.
    pub fn count(&self, field: FieldId) -> i64 {
        parse_count(self.get(field))
    }

    /// Put every field back to `0`.
    pub fn reset(&mut self) {
        for value in self.fields.values_mut() {
            *value = "0".to_string();
        }
    }

    /// Integer counts for the `/calculate` request body.
    pub fn counts(&self) -> CalculateRequest {
        CalculateRequest::from_counts(FieldId::all().map(|f| (f, self.count(f))))
    }

    /// Parse a sheet from TOML, one table per subject:
    ///
    /// ```toml
    /// [matematik]
    /// dogru = 15
    /// yanlis = 3
    /// ```
    ///
    /// Subjects that are not listed stay at `0`.
    pub fn from_toml_str(s: &str) -> Result<Self, CoreError> {
        let table: toml::Table = toml::from_str(s)?;
        let mut sheet = AnswerSheet::new();

        for (subject_key, entries) in &table {
            let subject: Subject = subject_key
                .parse()
                .map_err(|_| CoreError::UnknownSubject(subject_key.clone()))?;
            let Some(entries) = entries.as_table() else {
                return Err(CoreError::InvalidValue(subject_key.clone()));
            };

            for (key, value) in entries {
                let kind = match key.as_str() {
                    "dogru" => AnswerKind::Correct,
                    "yanlis" => AnswerKind::Incorrect,
                    _ => {
                        return Err(CoreError::UnknownField {
                            subject: subject_key.clone(),
                            field: key.clone(),
                        })
                    }
                };
                let field = subject.field(kind);
                let raw = match value {
                    toml::Value::Integer(n) => n.to_string(),
                    toml::Value::String(s) => s.clone(),
                    _ => return Err(CoreError::InvalidValue(field.form_key())),
                };
                sheet.set(field, raw);
            }
        }

        Ok(sheet)
    }

    /// Load a sheet from a TOML file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Render the sheet back to TOML.
    ///
    /// Canonical integers are written as integers, anything else as a string,
    /// so that [`from_toml_str`](Self::from_toml_str) reads back the same
    /// sheet. Tables come out in key order.
    pub fn to_toml_string(&self) -> Result<String, CoreError> {
        let mut table = toml::Table::new();
        for subject in Subject::ALL {
            let mut entries = toml::Table::new();
            for kind in [AnswerKind::Correct, AnswerKind::Incorrect] {
                let raw = self.get(subject.field(kind));
                let value = match raw.parse::<i64>() {
                    Ok(n) if n.to_string() == raw => toml::Value::Integer(n),
                    _ => toml::Value::String(raw.to_string()),
                };
                entries.insert(kind.suffix().to_string(), value);
            }
            table.insert(subject.id().to_string(), toml::Value::Table(entries));
        }
        Ok(toml::to_string(&table)?)
    }
}

impl FieldAccess for AnswerSheet {
    fn read(&self, field: FieldId) -> Option<String> {
        self.fields.get(&field).cloned()
    }

    fn write(&mut self, field: FieldId, value: i64) {
        self.fields.insert(field, value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::InputValidator;

    fn field(key: &str) -> FieldId {
        FieldId::parse(key).unwrap()
    }

    #[test]
    fn new_sheet_is_all_zero() {
        let sheet = AnswerSheet::new();
        for f in FieldId::all() {
            assert_eq!(sheet.get(f), "0");
        }
        let counts = sheet.counts();
        assert_eq!(counts.len(), 12);
        assert!(counts.values().all(|&v| v == 0));
    }

    #[test]
    fn counts_coerce_non_numeric_to_zero() {
        let mut sheet = AnswerSheet::new();
        sheet.set(field("fen_dogru"), "14");
        sheet.set(field("fen_yanlis"), "x");
        sheet.set(field("din_dogru"), "");
        let counts = sheet.counts();
        assert_eq!(counts.get(field("fen_dogru")), Some(14));
        assert_eq!(counts.get(field("fen_yanlis")), Some(0));
        assert_eq!(counts.get(field("din_dogru")), Some(0));
    }

    #[test]
    fn reset_zeroes_every_field() {
        let mut sheet = AnswerSheet::new();
        sheet.set(field("turkce_dogru"), "18");
        sheet.set(field("ingilizce_yanlis"), "abc");
        sheet.reset();
        assert_eq!(sheet, AnswerSheet::new());
    }

    #[test]
    fn parse_toml_sheet() {
        let sheet = AnswerSheet::from_toml_str(
            r#"
[turkce]
dogru = 17
yanlis = 2

[ingilizce]
dogru = "9"
"#,
        )
        .unwrap();
        assert_eq!(sheet.count(field("turkce_dogru")), 17);
        assert_eq!(sheet.count(field("turkce_yanlis")), 2);
        assert_eq!(sheet.count(field("ingilizce_dogru")), 9);
        assert_eq!(sheet.count(field("matematik_dogru")), 0);
    }

    #[test]
    fn parse_rejects_unknown_subject_and_field() {
        let err = AnswerSheet::from_toml_str("[tarih]\ndogru = 3\n").unwrap_err();
        assert!(matches!(err, CoreError::UnknownSubject(ref s) if s == "tarih"));

        let err = AnswerSheet::from_toml_str("[fen]\nbos = 3\n").unwrap_err();
        assert!(matches!(err, CoreError::UnknownField { .. }));

        let err = AnswerSheet::from_toml_str("[fen]\ndogru = 1.5\n").unwrap_err();
        assert!(matches!(err, CoreError::InvalidValue(ref k) if k == "fen_dogru"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = AnswerSheet::load(Path::new("/nonexistent/sheet.toml")).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
    }

    #[test]
    fn toml_output_parses_back() {
        let mut sheet = AnswerSheet::new();
        sheet.set(field("matematik_dogru"), "15");
        sheet.set(field("din_yanlis"), "abc");
        let out = sheet.to_toml_string().unwrap();
        assert!(out.contains("[matematik]\ndogru = 15\n"));
        let parsed = AnswerSheet::from_toml_str(&out).unwrap();
        assert_eq!(parsed, sheet);
    }

    #[test]
    fn non_printable_text_survives_toml_output() {
        for raw in ["3\u{200B}", "3\u{7F}", "say \"hi\"\\", "+4", "007"] {
            let mut sheet = AnswerSheet::new();
            sheet.set(field("fen_yanlis"), raw);
            let out = sheet.to_toml_string().unwrap();
            let parsed = AnswerSheet::from_toml_str(&out).unwrap();
            assert_eq!(parsed.get(field("fen_yanlis")), raw);
            assert_eq!(parsed, sheet);
        }
    }

    #[test]
    fn validator_clamps_sheet_in_place() {
        let mut sheet = AnswerSheet::new();
        sheet.set(field("matematik_dogru"), "15");
        sheet.set(field("matematik_yanlis"), "10");
        let validator = InputValidator::new();
        assert!(!validator.on_input(&mut sheet, "matematik_dogru"));
        assert_eq!(sheet.get(field("matematik_yanlis")), "5");
    }
}
