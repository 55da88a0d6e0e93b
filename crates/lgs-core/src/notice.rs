//! Transient user-facing notices.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(5);

pub const MSG_INVALID_INPUT: &str = "Lütfen geçerli değerler girin";
pub const MSG_CALCULATED: &str = "Puan başarıyla hesaplandı!";
pub const MSG_CALCULATION_FAILED: &str = "Hesaplama sırasında hata oluştu";
pub const MSG_FORM_RESET: &str = "Form sıfırlandı";
pub const MSG_RECOMMENDATION_FAILED: &str =
    "AI önerisi alınırken hata oluştu. Lütfen tekrar deneyin.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Success => write!(f, "success"),
            NoticeLevel::Info => write!(f, "info"),
            NoticeLevel::Warning => write!(f, "warning"),
            NoticeLevel::Danger => write!(f, "danger"),
        }
    }
}

/// A message shown to the user for a limited time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    #[serde(skip)]
    pub duration: Duration,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            duration: DEFAULT_NOTICE_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}
