//! Threat-intelligence lookup tables.
//!
//! Three static mappings feed the hunting pipeline: known-bad indicators,
//! MITRE ATT&CK technique labels, and MITRE ATLAS AI-threat labels. All
//! three are keyed by the alert's source identifier.
//!
//! Note on the key space: technique and AI-threat lookups are keyed by
//! the raw source IP as well, conflating indicator identity with
//! technique identity. This matches the upstream feed contract and is
//! kept for snapshot compatibility; a redesign would key the taxonomy
//! lookups off the matched indicator (or alert category) rather than the
//! IP itself.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

macro_rules! lookup_table {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
        #[serde(transparent)]
        pub struct $name(pub HashMap<String, String>);

        impl $name {
            /// Creates an empty table.
            pub fn new() -> Self {
                Self(HashMap::new())
            }

            /// Looks up a label by identifier.
            pub fn get(&self, key: &str) -> Option<&str> {
                self.0.get(key).map(String::as_str)
            }

            /// Returns true when the identifier is present.
            pub fn contains(&self, key: &str) -> bool {
                self.0.contains_key(key)
            }

            /// Number of entries.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Returns true when the table holds no entries.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for $name {
            fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                Self(
                    iter.into_iter()
                        .map(|(k, v)| (k.into(), v.into()))
                        .collect(),
                )
            }
        }
    };
}

lookup_table! {
    /// Known-bad indicators: identifier -> indicator description
    /// (e.g. `"192.168.1.1" -> "Brute Force Attack"`).
    IndicatorTable
}

lookup_table! {
    /// MITRE ATT&CK mapping: identifier -> technique label
    /// (e.g. `"192.168.1.1" -> "TA0001: Initial Access"`).
    TechniqueTable
}

lookup_table! {
    /// MITRE ATLAS mapping: identifier -> AI/ML-specific threat label
    /// (e.g. `"192.168.1.1" -> "Model Theft: Inversion"`).
    AiThreatTable
}

/// The full set of threat-intelligence tables a hunt runs against.
///
/// Supplied by an external threat-intel collaborator; immutable for the
/// duration of a pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IntelTables {
    /// Known-bad indicator descriptions.
    #[serde(default)]
    pub indicators: IndicatorTable,
    /// ATT&CK technique labels.
    #[serde(default)]
    pub techniques: TechniqueTable,
    /// ATLAS AI-threat labels.
    #[serde(default)]
    pub ai_threats: AiThreatTable,
}
