//! Hunting pipeline stages.
//!
//! Three pure, stateless transformations run in sequence over a batch of
//! enriched alerts: IOC matching, TTP mapping, and threat scoring. None of
//! the stages hold state across invocations, so reruns over identical input
//! are fully deterministic.

mod mapper;
mod matcher;
mod scorer;

pub use mapper::{map_ttps, MappedMatch, NO_AI_THREAT, UNKNOWN_TTP};
pub use matcher::{search_iocs, IocMatch, IOC_MATCH_DESCRIPTION};
pub use scorer::{assign_threat_scores, ScoredAlert};
