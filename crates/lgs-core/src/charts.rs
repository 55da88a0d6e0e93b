//! Chart data and chart ownership.
//!
//! A [`ChartHolder`] owns at most one rendered chart. Rendering a new chart
//! disposes of the previous one first, so the dashboard never keeps stale
//! charts around between analytics loads.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::api::ScorePoint;
use crate::subject::Subject;

/// Score over time, one point per calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreTrendChart {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

impl ScoreTrendChart {
    pub const TITLE: &'static str = "Puan Gelişim Grafiği";

    /// `None` for an empty history: nothing is drawn.
    pub fn from_history(history: &[ScorePoint]) -> Option<Self> {
        if history.is_empty() {
            return None;
        }
        Some(Self {
            labels: history
                .iter()
                .map(|p| p.date.format("%Y-%m-%d").to_string())
                .collect(),
            scores: history.iter().map(|p| p.score).collect(),
        })
    }
}

/// Success rate per subject for the latest calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectRadarChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl SubjectRadarChart {
    pub const TITLE: &'static str = "Ders Bazında Performans";

    pub fn from_performance(performance: &BTreeMap<Subject, f64>) -> Option<Self> {
        if performance.is_empty() {
            return None;
        }
        Some(Self {
            labels: performance
                .keys()
                .map(|s| s.display_name().to_string())
                .collect(),
            values: performance.values().copied().collect(),
        })
    }
}

/// Owner of a single rendered chart.
#[derive(Debug)]
pub struct ChartHolder<C> {
    current: Option<C>,
    renders: u32,
}

impl<C> Default for ChartHolder<C> {
    fn default() -> Self {
        Self {
            current: None,
            renders: 0,
        }
    }
}

impl<C> ChartHolder<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispose of the current chart, if any, then install `chart`.
    ///
    /// Returns the disposed chart.
    pub fn render(&mut self, chart: C) -> Option<C> {
        let previous = self.dispose();
        self.current = Some(chart);
        self.renders += 1;
        previous
    }

    pub fn dispose(&mut self) -> Option<C> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&C> {
        self.current.as_ref()
    }

    pub fn render_count(&self) -> u32 {
        self.renders
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn trend_from_history() {
        let history = vec![
            ScorePoint {
                date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                score: 310.0,
            },
            ScorePoint {
                date: NaiveDate::from_ymd_opt(2024, 4, 8).unwrap(),
                score: 335.5,
            },
        ];
        let chart = ScoreTrendChart::from_history(&history).unwrap();
        assert_eq!(chart.labels, vec!["2024-04-01", "2024-04-08"]);
        assert_eq!(chart.scores, vec![310.0, 335.5]);
        assert!(ScoreTrendChart::from_history(&[]).is_none());
    }

    #[test]
    fn radar_uses_display_names() {
        let mut perf = BTreeMap::new();
        perf.insert(Subject::Inkilap, 70.0);
        perf.insert(Subject::Turkce, 90.0);
        let chart = SubjectRadarChart::from_performance(&perf).unwrap();
        assert_eq!(chart.labels, vec!["Türkçe", "İnkılap"]);
        assert_eq!(chart.values, vec![90.0, 70.0]);
        assert!(SubjectRadarChart::from_performance(&BTreeMap::new()).is_none());
    }

    #[test]
    fn holder_disposes_before_rerender() {
        let mut holder: ChartHolder<&str> = ChartHolder::new();
        assert!(holder.current().is_none());
        assert_eq!(holder.render("first"), None);
        assert_eq!(holder.render("second"), Some("first"));
        assert_eq!(holder.current(), Some(&"second"));
        assert_eq!(holder.render_count(), 2);
        assert_eq!(holder.dispose(), Some("second"));
        assert!(holder.current().is_none());
    }
}
