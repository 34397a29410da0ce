//! Hunting pipeline orchestration.
//!
//! Sequences the three hunting stages (match -> map -> score) over a
//! materialized batch of enriched alerts and produces a run report.
//! The pipeline holds no state across runs: identical inputs yield
//! identical results, and a malformed alert aborts the run with no
//! partial output.

use crate::alert::EnrichedAlert;
use crate::error::HuntResult;
use crate::hunting::{assign_threat_scores, map_ttps, search_iocs, ScoredAlert};
use crate::severity::SeverityLattice;
use crate::tables::IntelTables;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, instrument};
use uuid::Uuid;

/// The hunting pipeline: intel tables plus the severity lattice.
///
/// Both inputs are explicit immutable configuration; there are no
/// process-wide tables, so tests can inject whatever feed they need.
#[derive(Debug, Clone, Default)]
pub struct HuntPipeline {
    /// Threat-intelligence tables for this run.
    pub tables: IntelTables,
    /// Severity lattice used by the scoring stage.
    pub lattice: SeverityLattice,
}

impl HuntPipeline {
    /// Creates a pipeline over the given tables with the default lattice.
    pub fn new(tables: IntelTables) -> Self {
        Self {
            tables,
            lattice: SeverityLattice::default(),
        }
    }

    /// Replaces the severity lattice.
    pub fn with_lattice(mut self, lattice: SeverityLattice) -> Self {
        self.lattice = lattice;
        self
    }

    /// Runs match -> map -> score over the alert batch.
    ///
    /// Synchronous and single-threaded; the only error is a malformed
    /// alert, which fails the whole batch immediately.
    #[instrument(skip_all, fields(alerts = alerts.len()))]
    pub fn run(&self, alerts: &[EnrichedAlert]) -> HuntResult<HuntReport> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        metrics::counter!("tl_alerts_received_total").increment(alerts.len() as u64);

        let matches = search_iocs(alerts, &self.tables.indicators)?;
        info!(run_id = %run_id, matches = matches.len(), "IOC search complete");
        metrics::counter!("tl_ioc_matches_total").increment(matches.len() as u64);

        let mapped = map_ttps(matches, &self.tables.techniques, &self.tables.ai_threats);
        let results = assign_threat_scores(mapped, &self.lattice);
        metrics::counter!("tl_results_scored_total").increment(results.len() as u64);
        for result in &results {
            metrics::counter!(
                "tl_results_by_severity_total",
                "severity" => result.threat_score.to_string()
            )
            .increment(1);
        }

        let completed_at = Utc::now();
        metrics::histogram!("tl_hunt_duration_seconds")
            .record((completed_at - started_at).num_milliseconds() as f64 / 1000.0);
        info!(
            run_id = %run_id,
            alerts = alerts.len(),
            results = results.len(),
            "hunt run complete"
        );

        Ok(HuntReport::new(
            run_id,
            started_at,
            completed_at,
            alerts.len(),
            results,
        ))
    }
}

/// Outcome of a single hunting run.
///
/// The `results` array is the downstream contract (recommendation and
/// visualization stages consume it); the surrounding metadata exists for
/// operational logging and is excluded from the idempotence guarantee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuntReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run completed.
    pub completed_at: DateTime<Utc>,
    /// Number of alerts in the input batch.
    pub alerts_seen: usize,
    /// Scored results, in input alert order.
    pub results: Vec<ScoredAlert>,
    /// Result counts keyed by threat score.
    pub distribution: HashMap<String, u64>,
}

impl HuntReport {
    fn new(
        run_id: Uuid,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        alerts_seen: usize,
        results: Vec<ScoredAlert>,
    ) -> Self {
        let mut distribution: HashMap<String, u64> = HashMap::new();
        for result in &results {
            *distribution
                .entry(result.threat_score.to_string())
                .or_default() += 1;
        }
        Self {
            run_id,
            started_at,
            completed_at,
            alerts_seen,
            results,
            distribution,
        }
    }

    /// Writes the scored results as a pretty-printed JSON snapshot.
    ///
    /// Only the results array is persisted, matching the snapshot format
    /// the recommendation and visualization stages consume.
    pub fn write_snapshot(&self, path: &Path) -> HuntResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.results)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Reads a batch of enriched alerts from a JSON array file.
pub fn read_alerts(path: &Path) -> HuntResult<Vec<EnrichedAlert>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Reads a scored-results snapshot back from disk.
pub fn read_snapshot(path: &Path) -> HuntResult<Vec<ScoredAlert>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;
    use crate::tables::{AiThreatTable, IndicatorTable, TechniqueTable};

    fn mock_tables() -> IntelTables {
        IntelTables {
            indicators: [
                ("192.168.1.1", "Brute Force Attack"),
                ("192.168.1.2", "Credential Stuffing"),
                ("10.0.0.5", "Malware C2 Communication"),
            ]
            .into_iter()
            .collect::<IndicatorTable>(),
            techniques: [
                ("192.168.1.1", "TA0001: Initial Access"),
                ("192.168.1.2", "TA0003: Execution"),
                ("10.0.0.5", "TA0011: Command and Control"),
            ]
            .into_iter()
            .collect::<TechniqueTable>(),
            ai_threats: [
                ("192.168.1.1", "Model Theft: Inversion"),
                ("192.168.1.2", "Data Poisoning"),
                ("10.0.0.5", "Model Backdoor"),
            ]
            .into_iter()
            .collect::<AiThreatTable>(),
        }
    }

    #[test]
    fn test_full_run_over_mock_feed() {
        let pipeline = HuntPipeline::new(mock_tables());
        let alerts = vec![
            EnrichedAlert::new("1", "192.168.1.1"),
            EnrichedAlert::new("2", "10.0.0.5"),
            EnrichedAlert::new("3", "172.16.0.1"),
        ];
        let report = pipeline.run(&alerts).unwrap();

        assert_eq!(report.alerts_seen, 3);
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].threat_score, Severity::Critical);
        // TA0011 is not in the default lattice: technique default Medium.
        assert_eq!(report.results[1].threat_score, Severity::Medium);
    }

    #[test]
    fn test_distribution_counts() {
        let pipeline = HuntPipeline::new(mock_tables());
        let alerts = vec![
            EnrichedAlert::new("1", "192.168.1.1"),
            EnrichedAlert::new("2", "192.168.1.1"),
            EnrichedAlert::new("3", "192.168.1.2"),
        ];
        let report = pipeline.run(&alerts).unwrap();
        assert_eq!(report.distribution.get("Critical"), Some(&2));
        assert_eq!(report.distribution.get("High"), Some(&1));
        assert_eq!(report.distribution.get("Low"), None);
    }

    #[test]
    fn test_empty_batch() {
        let pipeline = HuntPipeline::new(mock_tables());
        let report = pipeline.run(&[]).unwrap();
        assert_eq!(report.alerts_seen, 0);
        assert!(report.results.is_empty());
        assert!(report.distribution.is_empty());
    }

    #[test]
    fn test_malformed_alert_aborts_run() {
        let pipeline = HuntPipeline::new(mock_tables());
        let alerts = vec![EnrichedAlert::new("1", "")];
        assert!(pipeline.run(&alerts).is_err());
    }

    #[test]
    fn test_reruns_are_deterministic() {
        let pipeline = HuntPipeline::new(mock_tables());
        let alerts = vec![
            EnrichedAlert::new("1", "192.168.1.1"),
            EnrichedAlert::new("2", "192.168.1.2"),
        ];
        let first = pipeline.run(&alerts).unwrap();
        let second = pipeline.run(&alerts).unwrap();
        assert_eq!(
            serde_json::to_string(&first.results).unwrap(),
            serde_json::to_string(&second.results).unwrap()
        );
    }
}
