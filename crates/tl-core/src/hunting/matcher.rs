//! IOC matching stage.
//!
//! Tests each alert's source identifier against the indicator table and
//! emits a match record on a hit. Misses are silently skipped; a missing
//! required field on any alert fails the whole batch.

use crate::alert::EnrichedAlert;
use crate::error::HuntResult;
use crate::tables::IndicatorTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fixed annotation carried on every match.
pub const IOC_MATCH_DESCRIPTION: &str = "Matched known IOC";

/// An alert whose source identifier hit a known-bad indicator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IocMatch {
    /// Identifier of the matched alert.
    pub alert_id: String,
    /// The source identifier that matched.
    pub source_ip: String,
    /// Indicator description from the intel table.
    pub ioc: String,
    /// Fixed match annotation ([`IOC_MATCH_DESCRIPTION`]).
    pub description: String,
}

/// Matches alerts against the indicator table.
///
/// Output order follows input order, skipping non-matches. Pure over its
/// two inputs; the only error condition is a malformed alert, which aborts
/// the batch.
pub fn search_iocs(
    alerts: &[EnrichedAlert],
    indicators: &IndicatorTable,
) -> HuntResult<Vec<IocMatch>> {
    let mut matches = Vec::new();
    for (index, alert) in alerts.iter().enumerate() {
        alert.validate(index)?;
        if let Some(ioc) = indicators.get(&alert.source_ip) {
            debug!(
                alert_id = %alert.alert_id,
                source_ip = %alert.source_ip,
                ioc,
                "IOC hit"
            );
            matches.push(IocMatch {
                alert_id: alert.alert_id.clone(),
                source_ip: alert.source_ip.clone(),
                ioc: ioc.to_string(),
                description: IOC_MATCH_DESCRIPTION.to_string(),
            });
        }
    }
    Ok(matches)
}
