//! # tl-connectors
//!
//! External-collaborator boundaries for ThreatLens.
//!
//! This crate defines the interfaces to the systems the hunting pipeline
//! treats as collaborators - the threat-intelligence feed and the upstream
//! alert-enrichment stage - together with static and mock implementations.

pub mod threat_intel;
pub mod traits;

pub use threat_intel::{provider_for, MockEnricher, MockThreatIntel, StaticThreatIntel};
pub use traits::{
    AlertEnricher, ConnectorError, ConnectorHealth, ConnectorResult, ThreatIntelProvider,
};
