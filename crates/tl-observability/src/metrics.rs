//! Metrics collection for ThreatLens.
//!
//! The pipeline emits counters and histograms through the `metrics`
//! facade; this module registers their descriptions and provides a small
//! in-process aggregator for end-of-run KPI summaries.

use metrics::{describe_counter, describe_histogram};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key performance indicators for a hunting run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HuntKpis {
    /// Total alerts received.
    pub total_alerts: u64,
    /// Total IOC matches found.
    pub total_matches: u64,
    /// Fraction of alerts that matched a known IOC.
    pub match_rate: f64,
    /// Scored results keyed by threat score.
    pub results_by_severity: HashMap<String, u64>,
}

/// Aggregates per-run pipeline counts into KPI snapshots.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    total_alerts: u64,
    total_matches: u64,
    results_by_severity: HashMap<String, u64>,
}

impl PipelineMetrics {
    /// Creates a collector and registers metric descriptions.
    pub fn new() -> Self {
        Self::register_metrics();
        Self::default()
    }

    fn register_metrics() {
        describe_counter!("tl_alerts_received_total", "Total number of alerts received");
        describe_counter!("tl_ioc_matches_total", "Total number of IOC matches found");
        describe_counter!(
            "tl_results_scored_total",
            "Total number of scored results produced"
        );
        describe_counter!(
            "tl_results_by_severity_total",
            "Scored results by threat score"
        );
        describe_histogram!("tl_hunt_duration_seconds", "Duration of a hunting run");
    }

    /// Records the alert count for a run.
    pub fn record_alerts(&mut self, count: u64) {
        self.total_alerts += count;
    }

    /// Records the match count for a run.
    pub fn record_matches(&mut self, count: u64) {
        self.total_matches += count;
    }

    /// Records one scored result.
    pub fn record_result(&mut self, severity: &str) {
        *self
            .results_by_severity
            .entry(severity.to_string())
            .or_default() += 1;
    }

    /// Produces the current KPI snapshot.
    pub fn kpis(&self) -> HuntKpis {
        let match_rate = if self.total_alerts > 0 {
            self.total_matches as f64 / self.total_alerts as f64
        } else {
            0.0
        };
        HuntKpis {
            total_alerts: self.total_alerts,
            total_matches: self.total_matches,
            match_rate,
            results_by_severity: self.results_by_severity.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpis_from_counts() {
        let mut collector = PipelineMetrics::new();
        collector.record_alerts(4);
        collector.record_matches(2);
        collector.record_result("Critical");
        collector.record_result("Critical");

        let kpis = collector.kpis();
        assert_eq!(kpis.total_alerts, 4);
        assert_eq!(kpis.total_matches, 2);
        assert!((kpis.match_rate - 0.5).abs() < f64::EPSILON);
        assert_eq!(kpis.results_by_severity.get("Critical"), Some(&2));
    }

    #[test]
    fn test_empty_run_has_zero_match_rate() {
        let collector = PipelineMetrics::default();
        let kpis = collector.kpis();
        assert_eq!(kpis.total_alerts, 0);
        assert_eq!(kpis.match_rate, 0.0);
    }

    #[test]
    fn test_kpis_serialization() {
        let mut collector = PipelineMetrics::default();
        collector.record_alerts(1);
        collector.record_matches(1);
        collector.record_result("High");
        let json = serde_json::to_string(&collector.kpis()).unwrap();
        assert!(json.contains("\"total_alerts\":1"));
        assert!(json.contains("High"));
    }
}
