//! Connector trait definitions for ThreatLens.
//!
//! These interfaces mark the pipeline's external-collaborator boundaries:
//! the threat-intelligence feed that supplies the lookup tables and the
//! upstream enrichment stage that annotates raw alerts. The core pipeline
//! only ever sees their fully materialized outputs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tl_core::{EnrichedAlert, IntelTables};

/// Errors that can occur in connectors.
#[derive(Error, Debug, Clone)]
pub enum ConnectorError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Timeout: {0}")]
    Timeout(String),
}

/// Result type for connector operations.
pub type ConnectorResult<T> = Result<T, ConnectorError>;

/// Health status of a connector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorHealth {
    /// Connector is healthy and operational.
    Healthy,
    /// Connector is degraded but still functional.
    Degraded(String),
    /// Connector is unhealthy and not operational.
    Unhealthy(String),
}

/// Supplies the threat-intelligence tables a hunt runs against.
///
/// The contract tolerates arbitrary table sizes and missing keys; absence
/// of a key is resolved downstream via sentinel defaults, never here.
#[async_trait]
pub trait ThreatIntelProvider: Send + Sync {
    /// Connector name for logging.
    fn name(&self) -> &str;

    /// Loads the indicator, technique, and AI-threat tables.
    async fn load_tables(&self) -> ConnectorResult<IntelTables>;

    /// Checks connector health.
    async fn health(&self) -> ConnectorHealth;
}

/// Annotates raw alerts with free-text enrichment commentary.
///
/// The production implementation calls an external language model; the
/// pipeline consumes its output as an opaque string and never depends on
/// its structure.
#[async_trait]
pub trait AlertEnricher: Send + Sync {
    /// Connector name for logging.
    fn name(&self) -> &str;

    /// Returns the alerts with their `enrichment` field populated.
    async fn enrich(&self, alerts: Vec<EnrichedAlert>) -> ConnectorResult<Vec<EnrichedAlert>>;
}
