//! # tl-actions
//!
//! Response stage for ThreatLens: maps scored alerts to static mitigation
//! recommendations for downstream ticketing or analyst review.

pub mod recommend;

pub use recommend::{generate_recommendations, MitigationAction, ResponseRecommendation};
