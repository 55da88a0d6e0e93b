//! Real-time clamping of correct/incorrect answer counts.
//!
//! Each subject has a pair of numeric fields. After a validation pass the
//! pair always satisfies `0 <= correct <= max`, `0 <= incorrect <= max` and
//! `correct + incorrect <= max`. Rules are checked in order and each step
//! corrects only the first violated rule; a pass repeats steps until the
//! pair settles, which takes at most three rewrites. When no field is
//! active, the sum rule reduces `incorrect`.
//!
//! The validator never talks to a UI directly. Fields are reached through
//! [`FieldAccess`], and the field the user is currently editing is passed
//! in explicitly as an [`ActiveField`].

use tracing::debug;

use crate::subject::{subject_for_field_name, AnswerKind, FieldId, Subject};

/// Parse a count the way a browser `parseInt` would, falling back to 0.
///
/// Leading whitespace and an optional sign are accepted, then digits up to
/// the first non-digit. Input with no leading digits yields 0.
pub fn parse_count(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    if negative {
        -value
    } else {
        value
    }
}

/// The field of a subject pair that currently has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveField {
    Correct,
    Incorrect,
}

impl From<AnswerKind> for ActiveField {
    fn from(kind: AnswerKind) -> Self {
        match kind {
            AnswerKind::Correct => ActiveField::Correct,
            AnswerKind::Incorrect => ActiveField::Incorrect,
        }
    }
}

/// A single rewrite applied by a validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Correction {
    pub field: FieldId,
    pub from: i64,
    pub to: i64,
}

/// Transient view of one subject's counts, rebuilt for every validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectQuota {
    pub subject: Subject,
    pub max_questions: i64,
    pub correct: i64,
    pub incorrect: i64,
}

impl SubjectQuota {
    pub fn new(subject: Subject, max_questions: u32, correct: i64, incorrect: i64) -> Self {
        Self {
            subject,
            max_questions: i64::from(max_questions),
            correct,
            incorrect,
        }
    }

    pub fn is_valid(&self) -> bool {
        let max = self.max_questions;
        (0..=max).contains(&self.correct)
            && (0..=max).contains(&self.incorrect)
            && self.correct + self.incorrect <= max
    }

    /// Apply the first violated rule, if any, and report what changed.
    ///
    /// With no active field the sum rule reduces `incorrect`.
    pub fn apply_rules(&mut self, active: Option<ActiveField>) -> Option<Correction> {
        let max = self.max_questions;

        if !(0..=max).contains(&self.correct) {
            let from = self.correct;
            self.correct = from.clamp(0, max);
            return Some(self.correction(AnswerKind::Correct, from, self.correct));
        }

        if !(0..=max).contains(&self.incorrect) {
            let from = self.incorrect;
            self.incorrect = from.clamp(0, max);
            return Some(self.correction(AnswerKind::Incorrect, from, self.incorrect));
        }

        if self.correct + self.incorrect > max {
            return Some(match active {
                Some(ActiveField::Incorrect) => {
                    let from = self.correct;
                    self.correct = (max - self.incorrect).max(0);
                    self.correction(AnswerKind::Correct, from, self.correct)
                }
                Some(ActiveField::Correct) | None => {
                    let from = self.incorrect;
                    self.incorrect = (max - self.correct).max(0);
                    self.correction(AnswerKind::Incorrect, from, self.incorrect)
                }
            });
        }

        None
    }

    /// Apply rules until the pair is valid, returning every rewrite in order.
    pub fn settle(&mut self, active: Option<ActiveField>) -> Vec<Correction> {
        let mut corrections = Vec::new();
        while let Some(correction) = self.apply_rules(active) {
            corrections.push(correction);
        }
        corrections
    }

    fn correction(&self, kind: AnswerKind, from: i64, to: i64) -> Correction {
        Correction {
            field: self.subject.field(kind),
            from,
            to,
        }
    }
}

/// Read/write access to the numeric fields of an answer form.
///
/// `read` returns the raw text of a field, or `None` if the form has no
/// such field.
pub trait FieldAccess {
    fn read(&self, field: FieldId) -> Option<String>;
    fn write(&mut self, field: FieldId, value: i64);
}

/// Keeps every subject's answer counts within its quota.
#[derive(Debug, Clone)]
pub struct InputValidator {
    quotas: Vec<(Subject, u32)>,
}

impl Default for InputValidator {
    fn default() -> Self {
        Self {
            quotas: Subject::ALL
                .into_iter()
                .map(|subject| (subject, subject.max_questions()))
                .collect(),
        }
    }
}

impl InputValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quotas(&self) -> &[(Subject, u32)] {
        &self.quotas
    }

    /// Quota for a subject, as configured in this validator's table.
    pub fn quota_for(&self, subject: Subject) -> u32 {
        self.quotas
            .iter()
            .find(|(s, _)| *s == subject)
            .map(|(_, max)| *max)
            .unwrap_or_else(|| subject.max_questions())
    }

    /// Validate one subject, rewriting out-of-bound fields in place.
    ///
    /// Returns `true` only when the counts were already valid. A subject
    /// whose fields are missing from the form counts as valid.
    pub fn validate_subject(
        &self,
        fields: &mut dyn FieldAccess,
        subject: Subject,
        max_questions: u32,
        active: Option<ActiveField>,
    ) -> bool {
        self.check_subject(fields, subject, max_questions, active)
            .is_empty()
    }

    /// Same as [`validate_subject`](Self::validate_subject) but returns the
    /// applied corrections.
    pub fn check_subject(
        &self,
        fields: &mut dyn FieldAccess,
        subject: Subject,
        max_questions: u32,
        active: Option<ActiveField>,
    ) -> Vec<Correction> {
        let correct_field = subject.field(AnswerKind::Correct);
        let incorrect_field = subject.field(AnswerKind::Incorrect);

        let (Some(correct), Some(incorrect)) =
            (fields.read(correct_field), fields.read(incorrect_field))
        else {
            return Vec::new();
        };

        let mut quota = SubjectQuota::new(
            subject,
            max_questions,
            parse_count(&correct),
            parse_count(&incorrect),
        );
        let corrections = quota.settle(active);
        for correction in &corrections {
            fields.write(correction.field, correction.to);
            debug!(
                field = %correction.field,
                from = correction.from,
                to = correction.to,
                "clamped answer count"
            );
        }
        corrections
    }

    /// Validate every subject, returning `true` only if all were valid.
    ///
    /// `focus` is the field being edited, if any; it only affects the
    /// subject it belongs to. Every subject is visited even after a failure.
    pub fn validate_all(&self, fields: &mut dyn FieldAccess, focus: Option<FieldId>) -> bool {
        self.check_all(fields, focus).is_empty()
    }

    /// Validate every subject and collect the corrections applied.
    pub fn check_all(&self, fields: &mut dyn FieldAccess, focus: Option<FieldId>) -> Vec<Correction> {
        self.quotas
            .iter()
            .flat_map(|&(subject, max)| {
                let active = focus
                    .filter(|f| f.subject == subject)
                    .map(|f| ActiveField::from(f.kind));
                self.check_subject(fields, subject, max, active)
            })
            .collect()
    }

    /// Handle an edit of the field named `field_name`.
    ///
    /// The edited field is treated as active. Names outside the subject
    /// table are ignored and report valid.
    pub fn on_input(&self, fields: &mut dyn FieldAccess, field_name: &str) -> bool {
        let Some(subject) = subject_for_field_name(field_name) else {
            debug!(field_name, "input for unknown subject ignored");
            return true;
        };
        let active = FieldId::parse(field_name).map(|f| ActiveField::from(f.kind));
        self.validate_subject(fields, subject, self.quota_for(subject), active)
    }

    /// Handle a field losing focus: revalidate the whole form.
    pub fn on_blur(&self, fields: &mut dyn FieldAccess) -> bool {
        self.validate_all(fields, None)
    }
}
