//! Mitigation recommendations for scored alerts.
//!
//! The response stage maps each scored alert to a static mitigation
//! action, tiered by threat score: a firewall block (plus host isolation
//! at Critical) for hostile scores, watchlist or audit-log handling for
//! Medium/Low results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tl_core::{ScoredAlert, Severity};
use tracing::debug;
use uuid::Uuid;

/// Static mitigation action tiers, keyed by threat score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MitigationAction {
    /// Record the match for audit purposes only.
    LogOnly,
    /// Add the source to a watchlist and monitor subsequent activity.
    Monitor,
    /// Block the source IP on the perimeter firewall.
    BlockIp,
    /// Block the source IP and isolate affected hosts.
    BlockAndIsolate,
}

impl MitigationAction {
    /// Selects the action tier for a threat score.
    pub fn for_score(score: Severity) -> Self {
        match score {
            Severity::Critical => MitigationAction::BlockAndIsolate,
            Severity::High => MitigationAction::BlockIp,
            Severity::Medium => MitigationAction::Monitor,
            Severity::Low => MitigationAction::LogOnly,
        }
    }

    /// Renders the action as an analyst-facing instruction.
    pub fn instruction(&self, source_ip: &str) -> String {
        match self {
            MitigationAction::LogOnly => {
                format!("Log activity from {} for audit", source_ip)
            }
            MitigationAction::Monitor => {
                format!("Add {} to the watchlist and monitor", source_ip)
            }
            MitigationAction::BlockIp => {
                format!("Block IP {} on the firewall", source_ip)
            }
            MitigationAction::BlockAndIsolate => format!(
                "Block IP {} on the firewall and isolate affected hosts",
                source_ip
            ),
        }
    }
}

impl std::fmt::Display for MitigationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MitigationAction::LogOnly => write!(f, "Log Only"),
            MitigationAction::Monitor => write!(f, "Monitor"),
            MitigationAction::BlockIp => write!(f, "Block IP"),
            MitigationAction::BlockAndIsolate => write!(f, "Block & Isolate"),
        }
    }
}

impl FromStr for MitigationAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log_only" | "log" => Ok(MitigationAction::LogOnly),
            "monitor" | "watch" => Ok(MitigationAction::Monitor),
            "block_ip" | "block" => Ok(MitigationAction::BlockIp),
            "block_and_isolate" | "isolate" => Ok(MitigationAction::BlockAndIsolate),
            _ => Err(format!("Invalid mitigation action: {}", s)),
        }
    }
}

/// A proposed response to one scored alert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseRecommendation {
    /// Unique identifier for this recommendation.
    pub id: Uuid,
    /// The alert being responded to.
    pub alert_id: String,
    /// Selected action tier.
    pub action: MitigationAction,
    /// Analyst-facing instruction.
    pub instruction: String,
    /// Why this action was proposed.
    pub description: String,
    /// Threat score that drove the tier selection.
    pub threat_score: Severity,
    /// When the recommendation was generated.
    pub created_at: DateTime<Utc>,
}

impl ResponseRecommendation {
    /// Builds a recommendation for one scored alert.
    pub fn for_alert(scored: &ScoredAlert) -> Self {
        let action = MitigationAction::for_score(scored.threat_score);
        debug!(
            alert_id = %scored.alert_id,
            action = %action,
            score = %scored.threat_score,
            "recommendation generated"
        );
        Self {
            id: Uuid::new_v4(),
            alert_id: scored.alert_id.clone(),
            action,
            instruction: action.instruction(&scored.source_ip),
            description: format!(
                "Response to {} linked to TTP: {}",
                scored.ioc, scored.technique
            ),
            threat_score: scored.threat_score,
            created_at: Utc::now(),
        }
    }
}

/// Generates one recommendation per scored alert, in input order.
pub fn generate_recommendations(scored: &[ScoredAlert]) -> Vec<ResponseRecommendation> {
    scored.iter().map(ResponseRecommendation::for_alert).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(alert_id: &str, score: Severity) -> ScoredAlert {
        ScoredAlert {
            alert_id: alert_id.to_string(),
            source_ip: "192.168.1.1".to_string(),
            ioc: "Brute Force Attack".to_string(),
            description: "Matched known IOC".to_string(),
            technique: "TA0001: Initial Access".to_string(),
            ai_threat: "Model Theft: Inversion".to_string(),
            threat_score: score,
        }
    }

    #[test]
    fn test_action_tiers() {
        assert_eq!(
            MitigationAction::for_score(Severity::Critical),
            MitigationAction::BlockAndIsolate
        );
        assert_eq!(
            MitigationAction::for_score(Severity::High),
            MitigationAction::BlockIp
        );
        assert_eq!(
            MitigationAction::for_score(Severity::Medium),
            MitigationAction::Monitor
        );
        assert_eq!(
            MitigationAction::for_score(Severity::Low),
            MitigationAction::LogOnly
        );
    }

    #[test]
    fn test_instruction_references_source_ip() {
        let rec = ResponseRecommendation::for_alert(&scored("1", Severity::High));
        assert_eq!(rec.instruction, "Block IP 192.168.1.1 on the firewall");
    }

    #[test]
    fn test_description_format() {
        let rec = ResponseRecommendation::for_alert(&scored("1", Severity::Critical));
        assert_eq!(
            rec.description,
            "Response to Brute Force Attack linked to TTP: TA0001: Initial Access"
        );
    }

    #[test]
    fn test_one_recommendation_per_alert_in_order() {
        let batch = vec![
            scored("a", Severity::Critical),
            scored("b", Severity::Low),
            scored("c", Severity::Medium),
        ];
        let recs = generate_recommendations(&batch);
        assert_eq!(recs.len(), 3);
        let ids: Vec<_> = recs.iter().map(|r| r.alert_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(recs[1].action, MitigationAction::LogOnly);
    }

    #[test]
    fn test_empty_input() {
        assert!(generate_recommendations(&[]).is_empty());
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!(
            "block".parse::<MitigationAction>().unwrap(),
            MitigationAction::BlockIp
        );
        assert_eq!(
            "isolate".parse::<MitigationAction>().unwrap(),
            MitigationAction::BlockAndIsolate
        );
        assert!("nuke".parse::<MitigationAction>().is_err());
    }

    #[test]
    fn test_recommendation_serialization() {
        let rec = ResponseRecommendation::for_alert(&scored("1", Severity::High));
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["action"], "block_ip");
        assert_eq!(json["threat_score"], "High");
        assert_eq!(json["alert_id"], "1");
    }
}
