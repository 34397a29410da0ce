//! # tl-core
//!
//! Core hunting pipeline and data models for ThreatLens.
//!
//! This crate provides the hunting-and-scoring stage of the alert
//! pipeline: IOC matching against an indicator table, TTP mapping against
//! ATT&CK/ATLAS taxonomy tables, and threat scoring via an ordinal
//! severity lattice, plus the report/snapshot plumbing around a run.

pub mod alert;
pub mod error;
pub mod hunting;
pub mod pipeline;
pub mod severity;
pub mod tables;

pub use alert::EnrichedAlert;
pub use error::{HuntError, HuntResult};
pub use hunting::{
    assign_threat_scores, map_ttps, search_iocs, IocMatch, MappedMatch, ScoredAlert,
    IOC_MATCH_DESCRIPTION, NO_AI_THREAT, UNKNOWN_TTP,
};
pub use pipeline::{read_alerts, read_snapshot, HuntPipeline, HuntReport};
pub use severity::{Severity, SeverityLattice};
pub use tables::{AiThreatTable, IndicatorTable, IntelTables, TechniqueTable};
