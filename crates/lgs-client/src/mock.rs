//! Mock backend for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use lgs_core::api::{
    Analytics, CalculateRequest, CalculateResponse, DashboardApi, RecommendationResponse,
    RecommendationType,
};

/// An in-process stand-in for the scoring backend.
///
/// Returns fixed responses. Unset responses behave like an unreachable
/// server.
#[derive(Default)]
pub struct MockDashboard {
    calculate: Mutex<Option<CalculateResponse>>,
    analytics: Mutex<Option<Analytics>>,
    recommendation: Mutex<Option<RecommendationResponse>>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last `/calculate` body received.
    last_request: Mutex<Option<CalculateRequest>>,
    /// Last recommendation kind requested.
    last_kind: Mutex<Option<RecommendationType>>,
}

impl MockDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calculate(self, response: CalculateResponse) -> Self {
        *self.calculate.lock().unwrap() = Some(response);
        self
    }

    pub fn with_analytics(self, analytics: Analytics) -> Self {
        *self.analytics.lock().unwrap() = Some(analytics);
        self
    }

    pub fn with_recommendation(self, response: RecommendationResponse) -> Self {
        *self.recommendation.lock().unwrap() = Some(response);
        self
    }

    /// Get the number of calls made to this backend.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last `/calculate` body.
    pub fn last_request(&self) -> Option<CalculateRequest> {
        self.last_request.lock().unwrap().clone()
    }

    pub fn last_kind(&self) -> Option<RecommendationType> {
        *self.last_kind.lock().unwrap()
    }
}

#[async_trait]
impl DashboardApi for MockDashboard {
    async fn calculate(&self, request: &CalculateRequest) -> anyhow::Result<CalculateResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.calculate
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| anyhow::anyhow!("mock backend: /calculate unavailable"))
    }

    async fn analytics(&self) -> anyhow::Result<Analytics> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.analytics
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| anyhow::anyhow!("mock backend: /analytics unavailable"))
    }

    async fn recommendation(
        &self,
        kind: RecommendationType,
    ) -> anyhow::Result<RecommendationResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_kind.lock().unwrap() = Some(kind);
        self.recommendation
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| anyhow::anyhow!("mock backend: /ai-recommendations unavailable"))
    }
}
