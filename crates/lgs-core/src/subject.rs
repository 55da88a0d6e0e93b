//! The fixed subject table of the LGS exam.
//!
//! Six subjects, each with a question quota. Every form field is addressed
//! by a [`FieldId`], whose form key (`matematik_dogru`, `fen_yanlis`, ...)
//! is also the JSON key the backend expects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six exam subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Turkce,
    Matematik,
    Fen,
    Inkilap,
    Din,
    Ingilizce,
}

impl Subject {
    /// All subjects in exam order.
    pub const ALL: [Subject; 6] = [
        Subject::Turkce,
        Subject::Matematik,
        Subject::Fen,
        Subject::Inkilap,
        Subject::Din,
        Subject::Ingilizce,
    ];

    /// Wire identifier, also the prefix of the subject's form keys.
    pub fn id(self) -> &'static str {
        match self {
            Subject::Turkce => "turkce",
            Subject::Matematik => "matematik",
            Subject::Fen => "fen",
            Subject::Inkilap => "inkilap",
            Subject::Din => "din",
            Subject::Ingilizce => "ingilizce",
        }
    }

    /// Turkish label shown on charts and result panels.
    pub fn display_name(self) -> &'static str {
        match self {
            Subject::Turkce => "Türkçe",
            Subject::Matematik => "Matematik",
            Subject::Fen => "Fen",
            Subject::Inkilap => "İnkılap",
            Subject::Din => "Din",
            Subject::Ingilizce => "İngilizce",
        }
    }

    /// Major subjects carry 20 questions, the rest 10.
    pub fn is_major(self) -> bool {
        matches!(self, Subject::Turkce | Subject::Matematik | Subject::Fen)
    }

    /// Question quota for this subject.
    pub fn max_questions(self) -> u32 {
        if self.is_major() {
            20
        } else {
            10
        }
    }

    pub fn field(self, kind: AnswerKind) -> FieldId {
        FieldId {
            subject: self,
            kind,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subject::ALL
            .into_iter()
            .find(|subject| subject.id() == s)
            .ok_or_else(|| format!("unknown subject: {s}"))
    }
}

/// Which of a subject's two counts a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKind {
    /// Correct answers (`dogru`).
    Correct,
    /// Incorrect answers (`yanlis`).
    Incorrect,
}

impl AnswerKind {
    pub fn suffix(self) -> &'static str {
        match self {
            AnswerKind::Correct => "dogru",
            AnswerKind::Incorrect => "yanlis",
        }
    }

    fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "dogru" => Some(AnswerKind::Correct),
            "yanlis" => Some(AnswerKind::Incorrect),
            _ => None,
        }
    }
}

/// Semantic address of a single numeric form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId {
    pub subject: Subject,
    pub kind: AnswerKind,
}

impl FieldId {
    /// Form/JSON key, e.g. `turkce_dogru`.
    pub fn form_key(&self) -> String {
        format!("{}_{}", self.subject.id(), self.kind.suffix())
    }

    /// Parse a form key back into a field id.
    pub fn parse(name: &str) -> Option<FieldId> {
        let (subject, suffix) = name.split_once('_')?;
        Some(FieldId {
            subject: subject.parse().ok()?,
            kind: AnswerKind::from_suffix(suffix)?,
        })
    }

    /// Both fields of every subject, in exam order.
    pub fn all() -> impl Iterator<Item = FieldId> {
        Subject::ALL.into_iter().flat_map(|subject| {
            [
                subject.field(AnswerKind::Correct),
                subject.field(AnswerKind::Incorrect),
            ]
        })
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.subject.id(), self.kind.suffix())
    }
}

/// The subject an input name belongs to: the text before its first `_`.
pub fn subject_for_field_name(name: &str) -> Option<Subject> {
    let prefix = name.split('_').next()?;
    prefix.parse().ok()
}
