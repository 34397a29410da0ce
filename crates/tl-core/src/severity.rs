//! Severity lattice for threat scoring.
//!
//! This module defines the ordinal [`Severity`] scale and the
//! [`SeverityLattice`] that reconciles two independent taxonomy signals
//! (an ATT&CK technique label and an ATLAS AI-threat label) into a single
//! threat score.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordinal threat severity.
///
/// Variants are declared in ascending order so the derived `Ord` gives the
/// lattice's total order: `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// No meaningful threat signal.
    Low,
    /// Unmapped or ambiguous activity that warrants review.
    Medium,
    /// Known hostile technique - requires attention.
    High,
    /// Confirmed high-impact technique - immediate response required.
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "Low"),
            Severity::Medium => write!(f, "Medium"),
            Severity::High => write!(f, "High"),
            Severity::Critical => write!(f, "Critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("Invalid severity: {}", s)),
        }
    }
}

/// Maps taxonomy labels to severities with asymmetric defaults.
///
/// The two lookup sides deliberately fall back to different severities
/// when a label is not listed: an unmapped technique scores [`Severity::Medium`]
/// (unknown attacker behavior is still suspicious) while an unmapped
/// AI-threat label scores [`Severity::Low`]. The lattice is explicit injected
/// configuration, never process-wide state, so tests and callers can swap it
/// wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityLattice {
    /// Label -> severity entries.
    #[serde(default)]
    pub entries: HashMap<String, Severity>,
    /// Severity assigned to technique labels absent from `entries`.
    #[serde(default = "default_technique_severity")]
    pub technique_default: Severity,
    /// Severity assigned to AI-threat labels absent from `entries`.
    #[serde(default = "default_ai_severity")]
    pub ai_threat_default: Severity,
}

fn default_technique_severity() -> Severity {
    Severity::Medium
}

fn default_ai_severity() -> Severity {
    Severity::Low
}

impl Default for SeverityLattice {
    fn default() -> Self {
        let mut entries = HashMap::new();
        entries.insert("TA0001: Initial Access".to_string(), Severity::Critical);
        entries.insert("TA0003: Execution".to_string(), Severity::High);
        entries.insert("Unknown TTP".to_string(), Severity::Medium);
        entries.insert("No AI-specific threat".to_string(), Severity::Low);
        Self {
            entries,
            technique_default: default_technique_severity(),
            ai_threat_default: default_ai_severity(),
        }
    }
}

impl SeverityLattice {
    /// Resolves a technique label, defaulting to `technique_default`.
    pub fn technique_severity(&self, label: &str) -> Severity {
        self.entries
            .get(label)
            .copied()
            .unwrap_or(self.technique_default)
    }

    /// Resolves an AI-threat label, defaulting to `ai_threat_default`.
    pub fn ai_threat_severity(&self, label: &str) -> Severity {
        self.entries
            .get(label)
            .copied()
            .unwrap_or(self.ai_threat_default)
    }

    /// Combines the two signals: the higher severity wins under the total order.
    pub fn combine(&self, technique: Severity, ai_threat: Severity) -> Severity {
        technique.max(ai_threat)
    }
}
