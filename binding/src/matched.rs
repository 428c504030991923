//! Binding records: what matched what, and how strongly.

use std::collections::HashMap;

/// Where a resource-side token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// A token of a fixed path segment.
    PathSegment,
    /// The declared type name of a body definition.
    BodyType,
}

/// One similarity match between a resource-side token and a table.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedInfo {
    /// The resource-side token that matched.
    pub input: String,
    /// The table name it matched.
    pub matched: String,
    pub similarity: f64,
    pub source: MatchSource,
    /// Index of the token within its source (segment position, or 0).
    pub position: usize,
}

/// A candidate table+column for one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
    pub score: f64,
}

/// Binding of one declared parameter to candidate columns. Ties are all
/// kept; consumers pick randomly among the best.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamToTable {
    Simple {
        param: String,
        candidates: Vec<ColumnRef>,
    },
    /// A body object, each field resolving independently.
    Body {
        param: String,
        fields: HashMap<String, Vec<ColumnRef>>,
    },
}

impl ParamToTable {
    pub fn param(&self) -> &str {
        match self {
            ParamToTable::Simple { param, .. } | ParamToTable::Body { param, .. } => param,
        }
    }
}

/// Per-resource binding record: which tables this resource is associated
/// with, how each association was derived, and which of them have been
/// confirmed by execution evidence.
#[derive(Debug, Clone, Default)]
pub struct ResourceToTable {
    /// Table name -> similarity matches supporting the association.
    pub derived_map: HashMap<String, Vec<MatchedInfo>>,
    /// Parameter name -> candidate columns.
    pub param_to_table: HashMap<String, ParamToTable>,
    /// Table name -> whether execution evidence has confirmed it.
    pub confirmed: HashMap<String, bool>,
}

impl ResourceToTable {
    /// Record one match, skipping exact duplicates so that re-running
    /// derivation without new evidence changes nothing.
    pub fn record_match(&mut self, info: MatchedInfo) {
        let entries = self.derived_map.entry(info.matched.clone()).or_default();
        if !entries.contains(&info) {
            entries.push(info);
        }
        self.confirmed.entry(entries[0].matched.clone()).or_insert(false);
    }

    /// Promote a table association to confirmed, creating it if execution
    /// evidence names a table derivation never saw.
    pub fn confirm(&mut self, table: &str) {
        self.confirmed.insert(table.to_string(), true);
        self.derived_map.entry(table.to_string()).or_default();
    }

    pub fn is_confirmed(&self, table: &str) -> bool {
        self.confirmed.get(table).copied().unwrap_or(false)
    }

    /// All tables this resource is associated with.
    pub fn candidate_tables(&self) -> Vec<&str> {
        self.derived_map.keys().map(String::as_str).collect()
    }

    pub fn confirmed_tables(&self) -> Vec<&str> {
        self.confirmed
            .iter()
            .filter(|(_, c)| **c)
            .map(|(t, _)| t.as_str())
            .collect()
    }

    pub fn is_bound_to(&self, table: &str) -> bool {
        self.derived_map
            .keys()
            .any(|t| t.eq_ignore_ascii_case(table))
    }
}
