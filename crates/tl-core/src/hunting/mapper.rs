//! TTP mapping stage.
//!
//! Annotates each IOC match with a MITRE ATT&CK technique label and a
//! MITRE ATLAS AI-threat label. Both lookups are keyed by the match's
//! source IP (the conflated key space documented in `tables.rs`), and
//! each falls back to its own sentinel when the key is absent.

use crate::hunting::matcher::IocMatch;
use crate::tables::{AiThreatTable, TechniqueTable};
use serde::{Deserialize, Serialize};

/// Sentinel technique label when the ATT&CK lookup misses.
pub const UNKNOWN_TTP: &str = "Unknown TTP";

/// Sentinel AI-threat label when the ATLAS lookup misses.
pub const NO_AI_THREAT: &str = "No AI-specific threat";

/// An IOC match annotated with taxonomy labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MappedMatch {
    /// Identifier of the matched alert.
    pub alert_id: String,
    /// The source identifier that matched.
    pub source_ip: String,
    /// Indicator description from the intel table.
    pub ioc: String,
    /// Fixed match annotation.
    pub description: String,
    /// ATT&CK technique label, or [`UNKNOWN_TTP`].
    pub technique: String,
    /// ATLAS AI-threat label, or [`NO_AI_THREAT`].
    pub ai_threat: String,
}

impl MappedMatch {
    fn from_match(m: IocMatch, techniques: &TechniqueTable, ai_threats: &AiThreatTable) -> Self {
        let technique = techniques
            .get(&m.source_ip)
            .unwrap_or(UNKNOWN_TTP)
            .to_string();
        let ai_threat = ai_threats
            .get(&m.source_ip)
            .unwrap_or(NO_AI_THREAT)
            .to_string();
        Self {
            alert_id: m.alert_id,
            source_ip: m.source_ip,
            ioc: m.ioc,
            description: m.description,
            technique,
            ai_threat,
        }
    }
}

/// Annotates matches with technique and AI-threat labels.
///
/// Exactly one [`MappedMatch`] per input match, in input order; lookup
/// misses resolve to sentinels, never errors.
pub fn map_ttps(
    matches: Vec<IocMatch>,
    techniques: &TechniqueTable,
    ai_threats: &AiThreatTable,
) -> Vec<MappedMatch> {
    matches
        .into_iter()
        .map(|m| MappedMatch::from_match(m, techniques, ai_threats))
        .collect()
}
