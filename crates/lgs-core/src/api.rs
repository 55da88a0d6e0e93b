//! HTTP contracts of the scoring backend and the trait that reaches it.
//!
//! The backend owns scoring, percentile estimation, history, and the AI
//! recommendation text. The dashboard only ever sees the JSON shapes below.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::subject::{FieldId, Subject};

// ---------------------------------------------------------------------------
// API trait
// ---------------------------------------------------------------------------

/// The three backend calls the dashboard makes.
///
/// Each call is independent: no retries, no shared state between calls.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `POST /calculate`
    async fn calculate(&self, request: &CalculateRequest) -> anyhow::Result<CalculateResponse>;

    /// `GET /analytics`
    async fn analytics(&self) -> anyhow::Result<Analytics>;

    /// `GET /ai-recommendations?type=...`
    async fn recommendation(
        &self,
        kind: RecommendationType,
    ) -> anyhow::Result<RecommendationResponse>;
}

// ---------------------------------------------------------------------------
// /calculate
// ---------------------------------------------------------------------------

/// Body of `POST /calculate`: a flat map of form keys to integer counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculateRequest(BTreeMap<String, i64>);

impl CalculateRequest {
    pub fn from_counts(counts: impl IntoIterator<Item = (FieldId, i64)>) -> Self {
        Self(
            counts
                .into_iter()
                .map(|(field, count)| (field.form_key(), count))
                .collect(),
        )
    }

    pub fn get(&self, field: FieldId) -> Option<i64> {
        self.0.get(&field.form_key()).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &i64> {
        self.0.values()
    }
}

/// Response of `POST /calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Option<ScoreResult>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Server-computed score for one answer sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total_score: f64,
    pub percentile: f64,
    /// Net per subject (correct minus a third of incorrect, server side).
    #[serde(default)]
    pub nets: BTreeMap<Subject, f64>,
}

// ---------------------------------------------------------------------------
// /analytics
// ---------------------------------------------------------------------------

/// One past calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub date: NaiveDate,
    pub score: f64,
}

/// Change between the first and the latest score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementTrend {
    pub total_improvement: f64,
    pub average_per_attempt: f64,
}

/// Response of `GET /analytics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    #[serde(default)]
    pub score_history: Vec<ScorePoint>,
    /// Success percentage per subject for the latest score.
    #[serde(default)]
    pub subject_performance: BTreeMap<Subject, f64>,
    /// Sent as `[]` until there are two scores.
    #[serde(default, deserialize_with = "deserialize_trend")]
    pub improvement_trend: Option<ImprovementTrend>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TrendField {
    Trend(ImprovementTrend),
    Empty(Vec<serde_json::Value>),
}

fn deserialize_trend<'de, D>(deserializer: D) -> Result<Option<ImprovementTrend>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TrendField>::deserialize(deserializer)? {
        Some(TrendField::Trend(trend)) => Some(trend),
        Some(TrendField::Empty(_)) | None => None,
    })
}

// ---------------------------------------------------------------------------
// /ai-recommendations
// ---------------------------------------------------------------------------

/// Kind of AI-generated advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    StudyPlan,
    Improvement,
    Motivation,
}

impl RecommendationType {
    /// Value of the `type` query parameter.
    pub fn id(self) -> &'static str {
        match self {
            RecommendationType::StudyPlan => "study_plan",
            RecommendationType::Improvement => "improvement",
            RecommendationType::Motivation => "motivation",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            RecommendationType::StudyPlan => "Çalışma Planı",
            RecommendationType::Improvement => "Gelişim Önerileri",
            RecommendationType::Motivation => "Motivasyon Mesajı",
        }
    }

    /// Font Awesome icon class of the panel header.
    pub fn icon(self) -> &'static str {
        match self {
            RecommendationType::StudyPlan => "fas fa-calendar-alt",
            RecommendationType::Improvement => "fas fa-arrow-up",
            RecommendationType::Motivation => "fas fa-heart",
        }
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for RecommendationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "study_plan" | "study-plan" => Ok(RecommendationType::StudyPlan),
            "improvement" => Ok(RecommendationType::Improvement),
            "motivation" => Ok(RecommendationType::Motivation),
            other => Err(format!("unknown recommendation type: {other}")),
        }
    }
}

/// Response of `GET /ai-recommendations`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Some server versions omit this flag on success.
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RecommendationResponse {
    /// The recommendation text, or the server's message when it declined.
    ///
    /// A recommendation counts as delivered when text is present and the
    /// server did not explicitly report `success: false`.
    pub fn into_result(self) -> Result<String, String> {
        match (self.success, self.recommendation) {
            (Some(false), _) | (_, None) => Err(self
                .message
                .unwrap_or_else(|| "AI önerisi alınamadı".to_string())),
            (_, Some(text)) => Ok(text),
        }
    }
}

// ---------------------------------------------------------------------------
// /login
// ---------------------------------------------------------------------------

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Generic `{ success, message }` reply used by the account endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}
