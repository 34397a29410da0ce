//! Alert data model for ThreatLens.
//!
//! Alerts arrive already enriched by the upstream triage stage and are
//! immutable within the hunting pipeline.

use crate::error::HuntError;
use serde::{Deserialize, Serialize};

/// A security alert after upstream enrichment.
///
/// Only `alert_id` and `source_ip` participate in hunting; the enrichment
/// commentary and any additional fields from the source system are carried
/// through opaquely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedAlert {
    /// Unique identifier for this alert.
    #[serde(default)]
    pub alert_id: String,
    /// Source identifier the alert was raised for (typically a
    /// dotted-quad IP, but any identifier works).
    #[serde(default)]
    pub source_ip: String,
    /// Free-text enrichment commentary from the upstream LLM stage.
    /// Consumed as an opaque string; never parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<String>,
    /// Any other fields present on the source record.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EnrichedAlert {
    /// Creates an alert with just the required identity fields.
    pub fn new(alert_id: impl Into<String>, source_ip: impl Into<String>) -> Self {
        Self {
            alert_id: alert_id.into(),
            source_ip: source_ip.into(),
            enrichment: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Fails fast when a required field is absent or empty.
    ///
    /// `index` is the alert's position in the input batch and is carried
    /// into the error so the caller can point at the offending record.
    pub fn validate(&self, index: usize) -> Result<(), HuntError> {
        if self.alert_id.is_empty() {
            return Err(HuntError::MissingField {
                index,
                field: "alert_id",
            });
        }
        if self.source_ip.is_empty() {
            return Err(HuntError::MissingField {
                index,
                field: "source_ip",
            });
        }
        Ok(())
    }
}
