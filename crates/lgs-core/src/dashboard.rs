//! The dashboard controller.
//!
//! Owns the answer form, the validator, both chart holders, the latest
//! result, and the pending notices, and drives the backend through a
//! [`DashboardApi`]. Calls are made one at a time with no retries; a failed
//! call becomes a notice, never an error.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::api::{DashboardApi, ImprovementTrend, RecommendationType, ScoreResult};
use crate::charts::{ChartHolder, ScoreTrendChart, SubjectRadarChart};
use crate::notice::{
    Notice, NoticeLevel, MSG_CALCULATED, MSG_CALCULATION_FAILED, MSG_FORM_RESET,
    MSG_INVALID_INPUT,
};
use crate::sheet::AnswerSheet;
use crate::stats::{is_celebration, ScoreSummary};
use crate::subject::FieldId;
use crate::validator::{Correction, InputValidator};

/// What happened to a form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The form was invalid; it has been clamped and nothing was sent.
    Rejected { corrections: Vec<Correction> },
    /// The server scored the sheet.
    Calculated { result: ScoreResult, celebrate: bool },
    /// The server answered with `success: false`.
    Declined { message: String },
    /// The request did not complete.
    Failed,
}

/// Content of the recommendation panel.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationPanel {
    Ready {
        kind: RecommendationType,
        text: String,
        generated_at: DateTime<Local>,
    },
    /// The server declined, with its message.
    Warning(String),
    /// The request did not complete.
    Failed,
}

pub struct Dashboard {
    api: Arc<dyn DashboardApi>,
    sheet: AnswerSheet,
    validator: InputValidator,
    score_chart: ChartHolder<ScoreTrendChart>,
    subject_chart: ChartHolder<SubjectRadarChart>,
    result: Option<ScoreResult>,
    summary: Option<ScoreSummary>,
    trend: Option<ImprovementTrend>,
    notices: Vec<Notice>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self::with_sheet(api, AnswerSheet::new())
    }

    pub fn with_sheet(api: Arc<dyn DashboardApi>, sheet: AnswerSheet) -> Self {
        Self {
            api,
            sheet,
            validator: InputValidator::new(),
            score_chart: ChartHolder::new(),
            subject_chart: ChartHolder::new(),
            result: None,
            summary: None,
            trend: None,
            notices: Vec::new(),
        }
    }

    pub fn sheet(&self) -> &AnswerSheet {
        &self.sheet
    }

    pub fn result(&self) -> Option<&ScoreResult> {
        self.result.as_ref()
    }

    pub fn summary(&self) -> Option<&ScoreSummary> {
        self.summary.as_ref()
    }

    pub fn improvement_trend(&self) -> Option<&ImprovementTrend> {
        self.trend.as_ref()
    }

    pub fn score_chart(&self) -> &ChartHolder<ScoreTrendChart> {
        &self.score_chart
    }

    pub fn subject_chart(&self) -> &ChartHolder<SubjectRadarChart> {
        &self.subject_chart
    }

    /// Drain pending notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// An edit of one field: store the text, then clamp that subject.
    pub fn input(&mut self, field: FieldId, value: impl Into<String>) -> bool {
        self.sheet.set(field, value);
        self.validator.on_input(&mut self.sheet, &field.form_key())
    }

    /// A field lost focus: clamp the whole form.
    pub fn blur(&mut self) -> bool {
        self.validator.on_blur(&mut self.sheet)
    }

    /// Validate the form and, if valid, ask the server to score it.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let corrections = self.validator.check_all(&mut self.sheet, None);
        if !corrections.is_empty() {
            self.notify(Notice::new(NoticeLevel::Warning, MSG_INVALID_INPUT));
            return SubmitOutcome::Rejected { corrections };
        }

        let request = self.sheet.counts();
        info!("submitting answer sheet");
        match self.api.calculate(&request).await {
            Ok(response) if response.success => {
                let Some(result) = response.result else {
                    warn!("calculate reported success without a result");
                    self.notify(Notice::new(NoticeLevel::Danger, MSG_CALCULATION_FAILED));
                    return SubmitOutcome::Failed;
                };
                self.result = Some(result.clone());
                self.notify(Notice::new(NoticeLevel::Success, MSG_CALCULATED));
                self.refresh_stats().await;
                SubmitOutcome::Calculated {
                    celebrate: is_celebration(result.total_score),
                    result,
                }
            }
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| MSG_CALCULATION_FAILED.to_string());
                self.notify(Notice::new(NoticeLevel::Danger, message.clone()));
                SubmitOutcome::Declined { message }
            }
            Err(e) => {
                warn!("calculate request failed: {e:#}");
                self.notify(Notice::new(NoticeLevel::Danger, MSG_CALCULATION_FAILED));
                SubmitOutcome::Failed
            }
        }
    }

    /// Clear the form and the result panel.
    pub fn reset(&mut self) {
        self.sheet.reset();
        self.result = None;
        self.notify(
            Notice::new(NoticeLevel::Info, MSG_FORM_RESET)
                .with_duration(std::time::Duration::from_secs(2)),
        );
    }

    /// Recompute attempts/best/average from the server history.
    ///
    /// Failures are logged only.
    pub async fn refresh_stats(&mut self) {
        match self.api.analytics().await {
            Ok(analytics) => {
                if let Some(summary) = ScoreSummary::from_history(&analytics.score_history) {
                    self.summary = Some(summary);
                }
            }
            Err(e) => warn!("stats update failed: {e:#}"),
        }
    }

    /// Fetch analytics and re-render both charts.
    ///
    /// Returns `false` if the request failed. Empty data leaves the
    /// current chart in place.
    pub async fn load_analytics(&mut self) -> bool {
        let analytics = match self.api.analytics().await {
            Ok(analytics) => analytics,
            Err(e) => {
                warn!("analytics loading failed: {e:#}");
                return false;
            }
        };

        if let Some(chart) = ScoreTrendChart::from_history(&analytics.score_history) {
            self.score_chart.render(chart);
        }
        if let Some(chart) = SubjectRadarChart::from_performance(&analytics.subject_performance)
        {
            self.subject_chart.render(chart);
        }
        if let Some(summary) = ScoreSummary::from_history(&analytics.score_history) {
            self.summary = Some(summary);
        }
        self.trend = analytics.improvement_trend;
        true
    }

    /// Ask the server for an AI recommendation of the given kind.
    pub async fn recommendation(&self, kind: RecommendationType) -> RecommendationPanel {
        match self.api.recommendation(kind).await {
            Ok(response) => match response.into_result() {
                Ok(text) => RecommendationPanel::Ready {
                    kind,
                    text,
                    generated_at: Local::now(),
                },
                Err(message) => RecommendationPanel::Warning(message),
            },
            Err(e) => {
                warn!(kind = %kind, "recommendation request failed: {e:#}");
                RecommendationPanel::Failed
            }
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::api::{
        Analytics, CalculateRequest, CalculateResponse, RecommendationResponse, ScorePoint,
    };
    use crate::subject::{AnswerKind, Subject};

    #[derive(Default)]
    struct StubApi {
        calculate: Mutex<Option<anyhow::Result<CalculateResponse>>>,
        analytics: Mutex<Option<Analytics>>,
        recommendation: Mutex<Option<RecommendationResponse>>,
        calculate_calls: AtomicU32,
        last_request: Mutex<Option<CalculateRequest>>,
    }

    #[async_trait]
    impl DashboardApi for StubApi {
        async fn calculate(&self, request: &CalculateRequest) -> anyhow::Result<CalculateResponse> {
            self.calculate_calls.fetch_add(1, Ordering::Relaxed);
            *self.last_request.lock().unwrap() = Some(request.clone());
            self.calculate
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(anyhow::anyhow!("connection refused")))
        }

        async fn analytics(&self) -> anyhow::Result<Analytics> {
            self.analytics
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| anyhow::anyhow!("connection refused"))
        }

        async fn recommendation(
            &self,
            _kind: RecommendationType,
        ) -> anyhow::Result<RecommendationResponse> {
            self.recommendation
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| anyhow::anyhow!("connection refused"))
        }
    }

    fn score(total: f64) -> ScoreResult {
        let mut nets = BTreeMap::new();
        nets.insert(Subject::Matematik, 13.67);
        ScoreResult {
            total_score: total,
            percentile: 91.2,
            nets,
        }
    }

    fn history() -> Analytics {
        Analytics {
            score_history: vec![
                ScorePoint {
                    date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                    score: 380.0,
                },
                ScorePoint {
                    date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
                    score: 420.0,
                },
            ],
            subject_performance: [(Subject::Fen, 75.0)].into_iter().collect(),
            improvement_trend: None,
        }
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_without_request() {
        let api = Arc::new(StubApi::default());
        let mut dashboard = Dashboard::new(api.clone());
        dashboard.input(Subject::Din.field(AnswerKind::Correct), "14");

        // The edit itself already clamped the field.
        assert_eq!(dashboard.sheet().count(Subject::Din.field(AnswerKind::Correct)), 10);

        let mut sheet = AnswerSheet::new();
        sheet.set(Subject::Fen.field(AnswerKind::Correct), "25");
        let mut dashboard = Dashboard::with_sheet(api.clone(), sheet);
        let outcome = dashboard.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Rejected { ref corrections } if corrections.len() == 1));
        assert_eq!(api.calculate_calls.load(Ordering::Relaxed), 0);
        let notices = dashboard.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
        assert_eq!(notices[0].message, MSG_INVALID_INPUT);
    }

    #[tokio::test]
    async fn successful_submit_stores_result_and_stats() {
        let api = Arc::new(StubApi::default());
        *api.calculate.lock().unwrap() = Some(Ok(CalculateResponse {
            success: true,
            result: Some(score(430.0)),
            message: None,
        }));
        *api.analytics.lock().unwrap() = Some(history());

        let mut dashboard = Dashboard::new(api.clone());
        dashboard.input(Subject::Matematik.field(AnswerKind::Correct), "15");
        dashboard.input(Subject::Matematik.field(AnswerKind::Incorrect), "4");

        let outcome = dashboard.submit().await;
        match outcome {
            SubmitOutcome::Calculated { result, celebrate } => {
                assert_eq!(result.total_score, 430.0);
                assert!(celebrate);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let sent = api.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(sent.get(Subject::Matematik.field(AnswerKind::Correct)), Some(15));
        assert_eq!(sent.len(), 12);

        let summary = dashboard.summary().unwrap();
        assert_eq!(summary.attempts, 2);
        assert_eq!(summary.best, 420.0);
        assert_eq!(dashboard.take_notices()[0].message, MSG_CALCULATED);
    }

    #[tokio::test]
    async fn declined_submit_shows_server_message() {
        let api = Arc::new(StubApi::default());
        *api.calculate.lock().unwrap() = Some(Ok(CalculateResponse {
            success: false,
            result: None,
            message: Some("Hesaplama hatası".into()),
        }));
        let mut dashboard = Dashboard::new(api);
        let outcome = dashboard.submit().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Declined {
                message: "Hesaplama hatası".into()
            }
        );
        let notices = dashboard.take_notices();
        assert_eq!(notices[0].level, NoticeLevel::Danger);
        assert!(dashboard.result().is_none());
    }

    #[tokio::test]
    async fn transport_failure_is_a_notice() {
        let api = Arc::new(StubApi::default());
        let mut dashboard = Dashboard::new(api.clone());
        assert_eq!(dashboard.submit().await, SubmitOutcome::Failed);
        assert_eq!(api.calculate_calls.load(Ordering::Relaxed), 1);
        let notices = dashboard.take_notices();
        assert_eq!(notices[0].message, MSG_CALCULATION_FAILED);
        assert!(dashboard.take_notices().is_empty());
    }

    #[tokio::test]
    async fn reset_clears_form_and_result() {
        let api = Arc::new(StubApi::default());
        *api.calculate.lock().unwrap() = Some(Ok(CalculateResponse {
            success: true,
            result: Some(score(300.0)),
            message: None,
        }));
        let mut dashboard = Dashboard::new(api);
        dashboard.input(Subject::Turkce.field(AnswerKind::Correct), "12");
        dashboard.submit().await;
        assert!(dashboard.result().is_some());

        dashboard.reset();
        assert!(dashboard.result().is_none());
        assert_eq!(dashboard.sheet(), &AnswerSheet::new());
        let notices = dashboard.take_notices();
        let last = notices.last().unwrap();
        assert_eq!(last.message, MSG_FORM_RESET);
        assert_eq!(last.duration, std::time::Duration::from_secs(2));
    }

    #[tokio::test]
    async fn analytics_rerenders_charts() {
        let api = Arc::new(StubApi::default());
        *api.analytics.lock().unwrap() = Some(history());
        let mut dashboard = Dashboard::new(api.clone());

        assert!(dashboard.load_analytics().await);
        assert!(dashboard.load_analytics().await);
        assert_eq!(dashboard.score_chart().render_count(), 2);
        assert_eq!(dashboard.subject_chart().render_count(), 2);
        assert_eq!(
            dashboard.subject_chart().current().unwrap().labels,
            vec!["Fen"]
        );

        *api.analytics.lock().unwrap() = Some(Analytics::default());
        assert!(dashboard.load_analytics().await);
        assert_eq!(dashboard.score_chart().render_count(), 2);
        assert!(dashboard.score_chart().current().is_some());

        *api.analytics.lock().unwrap() = None;
        assert!(!dashboard.load_analytics().await);
        assert!(dashboard.take_notices().is_empty());
    }

    #[tokio::test]
    async fn recommendation_panels() {
        let api = Arc::new(StubApi::default());
        let dashboard = Dashboard::new(api.clone());
        assert_eq!(
            dashboard.recommendation(RecommendationType::Motivation).await,
            RecommendationPanel::Failed
        );

        *api.recommendation.lock().unwrap() = Some(RecommendationResponse {
            success: Some(false),
            recommendation: None,
            message: Some("Henüz puan yok".into()),
        });
        assert_eq!(
            dashboard.recommendation(RecommendationType::StudyPlan).await,
            RecommendationPanel::Warning("Henüz puan yok".into())
        );

        *api.recommendation.lock().unwrap() = Some(RecommendationResponse {
            success: Some(true),
            recommendation: Some("Her gün 20 soru çöz".into()),
            message: None,
        });
        match dashboard.recommendation(RecommendationType::Improvement).await {
            RecommendationPanel::Ready { kind, text, .. } => {
                assert_eq!(kind, RecommendationType::Improvement);
                assert_eq!(text, "Her gün 20 soru çöz");
            }
            other => panic!("unexpected panel: {other:?}"),
        }
    }
}
