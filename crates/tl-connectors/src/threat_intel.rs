//! Threat-intelligence table providers.
//!
//! Two implementations ship: a static provider that serves tables handed
//! to it (inline config or a JSON file), and a mock provider carrying a
//! small builtin feed for tests and demos. A real feed connector would
//! slot in behind the same trait.

use crate::traits::{
    AlertEnricher, ConnectorError, ConnectorHealth, ConnectorResult, ThreatIntelProvider,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tl_core::{EnrichedAlert, IntelTables};
use tracing::debug;

/// Serves a fixed set of tables supplied at construction time.
#[derive(Debug)]
pub struct StaticThreatIntel {
    tables: IntelTables,
}

impl StaticThreatIntel {
    /// Wraps already-materialized tables.
    pub fn new(tables: IntelTables) -> Self {
        Self { tables }
    }

    /// Loads tables from a JSON file with `indicators` / `techniques` /
    /// `ai_threats` sections (missing sections default to empty).
    pub fn from_file(path: &Path) -> ConnectorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConnectorError::ConfigError(format!("Failed to read intel file {}: {e}", path.display()))
        })?;
        let tables: IntelTables = serde_json::from_str(&contents).map_err(|e| {
            ConnectorError::InvalidResponse(format!(
                "Failed to parse intel file {}: {e}",
                path.display()
            ))
        })?;
        Ok(Self::new(tables))
    }
}

#[async_trait]
impl ThreatIntelProvider for StaticThreatIntel {
    fn name(&self) -> &str {
        "static"
    }

    async fn load_tables(&self) -> ConnectorResult<IntelTables> {
        debug!(
            indicators = self.tables.indicators.len(),
            techniques = self.tables.techniques.len(),
            ai_threats = self.tables.ai_threats.len(),
            "serving static intel tables"
        );
        Ok(self.tables.clone())
    }

    async fn health(&self) -> ConnectorHealth {
        ConnectorHealth::Healthy
    }
}

/// Mock provider carrying a small builtin intel feed.
///
/// The three tables share the same identifier key space (raw source IPs),
/// which is what makes the conflated taxonomy lookup in the mapper work
/// at all on this feed.
pub struct MockThreatIntel {
    tables: IntelTables,
    unhealthy: Option<String>,
}

impl MockThreatIntel {
    /// Creates the provider with the builtin feed preloaded.
    pub fn new() -> Self {
        let tables = IntelTables {
            indicators: [
                ("192.168.1.1", "Brute Force Attack"),
                ("192.168.1.2", "Credential Stuffing"),
                ("10.0.0.5", "Malware C2 Communication"),
            ]
            .into_iter()
            .collect(),
            techniques: [
                ("192.168.1.1", "TA0001: Initial Access"),
                ("192.168.1.2", "TA0003: Execution"),
                ("10.0.0.5", "TA0011: Command and Control"),
            ]
            .into_iter()
            .collect(),
            ai_threats: [
                ("192.168.1.1", "Model Theft: Inversion"),
                ("192.168.1.2", "Data Poisoning"),
                ("10.0.0.5", "Model Backdoor"),
            ]
            .into_iter()
            .collect(),
        };
        Self {
            tables,
            unhealthy: None,
        }
    }

    /// Marks the provider unhealthy for failure-path tests.
    pub fn with_unhealthy(mut self, reason: impl Into<String>) -> Self {
        self.unhealthy = Some(reason.into());
        self
    }
}

impl Default for MockThreatIntel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ThreatIntelProvider for MockThreatIntel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn load_tables(&self) -> ConnectorResult<IntelTables> {
        if let Some(reason) = &self.unhealthy {
            return Err(ConnectorError::ConnectionFailed(reason.clone()));
        }
        Ok(self.tables.clone())
    }

    async fn health(&self) -> ConnectorHealth {
        match &self.unhealthy {
            Some(reason) => ConnectorHealth::Unhealthy(reason.clone()),
            None => ConnectorHealth::Healthy,
        }
    }
}

/// Resolves the intel source for a run: a JSON file when one is
/// configured, otherwise the builtin mock feed.
pub fn provider_for(intel_path: Option<&PathBuf>) -> ConnectorResult<Box<dyn ThreatIntelProvider>> {
    match intel_path {
        Some(path) => Ok(Box::new(StaticThreatIntel::from_file(path)?)),
        None => Ok(Box::new(MockThreatIntel::new())),
    }
}

/// Mock enrichment stage that stamps canned commentary.
///
/// Stands in for the LLM-backed triage stage so the pipeline can run end
/// to end without network access. Alerts that already carry enrichment
/// keep it untouched.
pub struct MockEnricher;

#[async_trait]
impl AlertEnricher for MockEnricher {
    fn name(&self) -> &str {
        "mock-enricher"
    }

    async fn enrich(&self, alerts: Vec<EnrichedAlert>) -> ConnectorResult<Vec<EnrichedAlert>> {
        Ok(alerts
            .into_iter()
            .map(|mut alert| {
                if alert.enrichment.is_none() {
                    alert.enrichment = Some(format!(
                        "Automated triage note: activity from {} requires review.",
                        alert.source_ip
                    ));
                }
                alert
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_serves_builtin_feed() {
        let provider = MockThreatIntel::new();
        let tables = provider.load_tables().await.unwrap();
        assert_eq!(
            tables.indicators.get("192.168.1.1"),
            Some("Brute Force Attack")
        );
        assert_eq!(
            tables.techniques.get("10.0.0.5"),
            Some("TA0011: Command and Control")
        );
        assert_eq!(tables.ai_threats.get("192.168.1.2"), Some("Data Poisoning"));
        assert_eq!(provider.health().await, ConnectorHealth::Healthy);
    }

    #[tokio::test]
    async fn test_unhealthy_mock_fails_loads() {
        let provider = MockThreatIntel::new().with_unhealthy("feed offline");
        assert!(provider.load_tables().await.is_err());
        assert_eq!(
            provider.health().await,
            ConnectorHealth::Unhealthy("feed offline".to_string())
        );
    }

    #[tokio::test]
    async fn test_static_provider_round_trip() {
        let tables = IntelTables {
            indicators: [("203.0.113.9", "Scanner")].into_iter().collect(),
            ..IntelTables::default()
        };
        let provider = StaticThreatIntel::new(tables.clone());
        assert_eq!(provider.load_tables().await.unwrap(), tables);
    }

    #[tokio::test]
    async fn test_static_provider_from_file() {
        let dir = std::env::temp_dir().join("threatlens-connector-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("intel.json");
        std::fs::write(
            &path,
            r#"{"indicators": {"192.0.2.1": "Port Scan"}, "techniques": {}}"#,
        )
        .unwrap();

        let provider = StaticThreatIntel::from_file(&path).unwrap();
        let tables = provider.load_tables().await.unwrap();
        assert_eq!(tables.indicators.get("192.0.2.1"), Some("Port Scan"));
        assert!(tables.ai_threats.is_empty());

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_static_provider_missing_file() {
        let err = StaticThreatIntel::from_file(Path::new("/nonexistent/intel.json")).unwrap_err();
        assert!(matches!(err, ConnectorError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_mock_enricher_fills_missing_commentary() {
        let alerts = vec![
            EnrichedAlert::new("1", "192.168.1.1"),
            EnrichedAlert {
                enrichment: Some("analyst note".to_string()),
                ..EnrichedAlert::new("2", "10.0.0.5")
            },
        ];
        let enriched = MockEnricher.enrich(alerts).await.unwrap();
        assert!(enriched[0]
            .enrichment
            .as_deref()
            .unwrap()
            .contains("192.168.1.1"));
        assert_eq!(enriched[1].enrichment.as_deref(), Some("analyst note"));
    }
}
