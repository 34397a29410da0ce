//! Threat scoring stage.
//!
//! Reduces the two taxonomy labels on a mapped match into one ordinal
//! threat score via the severity lattice: each label resolves to a
//! severity (with per-side defaults) and the higher of the two wins.

use crate::hunting::mapper::MappedMatch;
use crate::severity::{Severity, SeverityLattice};
use serde::{Deserialize, Serialize};

/// Final output record of the hunting pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredAlert {
    /// Identifier of the matched alert.
    pub alert_id: String,
    /// The source identifier that matched.
    pub source_ip: String,
    /// Indicator description from the intel table.
    pub ioc: String,
    /// Fixed match annotation.
    pub description: String,
    /// ATT&CK technique label (or sentinel).
    pub technique: String,
    /// ATLAS AI-threat label (or sentinel).
    pub ai_threat: String,
    /// Combined ordinal threat score.
    pub threat_score: Severity,
}

impl ScoredAlert {
    fn from_mapped(m: MappedMatch, lattice: &SeverityLattice) -> Self {
        let technique_severity = lattice.technique_severity(&m.technique);
        let ai_severity = lattice.ai_threat_severity(&m.ai_threat);
        let threat_score = lattice.combine(technique_severity, ai_severity);
        Self {
            alert_id: m.alert_id,
            source_ip: m.source_ip,
            ioc: m.ioc,
            description: m.description,
            technique: m.technique,
            ai_threat: m.ai_threat,
            threat_score,
        }
    }
}

/// Scores mapped matches against the severity lattice.
///
/// Pure and total: exactly one [`ScoredAlert`] per input, in input order,
/// with `threat_score` a function of `(technique, ai_threat)` alone.
pub fn assign_threat_scores(
    mapped: Vec<MappedMatch>,
    lattice: &SeverityLattice,
) -> Vec<ScoredAlert> {
    mapped
        .into_iter()
        .map(|m| ScoredAlert::from_mapped(m, lattice))
        .collect()
}
