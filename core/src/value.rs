//! Column value holders.
//!
//! A [`Gene`] carries one concrete value for one column of a database action.
//! Randomization strategies live outside this workspace; here we only model
//! what the insertion builder and the binding engine need: a printable value,
//! a mutability flag, and enough identity to let foreign-key genes point at
//! the primary key of an earlier action.

/// A single column value.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
}

impl GeneValue {
    /// Render the value as a SQL literal. `quote` reflects the column data
    /// type (text-like types are printed in single quotes).
    pub fn as_sql_literal(&self, quote: bool) -> String {
        match self {
            GeneValue::Null => "NULL".to_string(),
            GeneValue::Bool(b) => b.to_string(),
            GeneValue::Int(i) => i.to_string(),
            GeneValue::Double(d) => d.to_string(),
            GeneValue::Text(s) => {
                if quote {
                    format!("'{}'", s.replace('\'', "''"))
                } else {
                    s.clone()
                }
            }
        }
    }
}

/// What role a gene plays inside its owning action.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneKind {
    /// Plain value, free to be randomized by the search.
    Mutable,
    /// Value chosen by the database; the gene only reserves the slot so that
    /// foreign keys of later actions can still point at it.
    AutoIncrement,
    /// Primary-key value, tagged with the unique id of the owning action.
    PrimaryKey { action_id: u64 },
    /// Reference to the primary key of another action inserting into
    /// `target_table`. `bound_to` is the id of that action once resolved.
    ForeignKeyRef {
        target_table: String,
        bound_to: Option<u64>,
    },
    /// Snapshot of data already present in the database; never mutated.
    ImmutableData,
}

/// One concrete column value inside a database action.
#[derive(Debug, Clone, PartialEq)]
pub struct Gene {
    pub name: String,
    pub kind: GeneKind,
    pub value: GeneValue,
    /// Whether the value must be printed in quotes in generated SQL.
    pub quote: bool,
}

impl Gene {
    pub fn mutable(name: impl Into<String>, value: GeneValue, quote: bool) -> Self {
        Self {
            name: name.into(),
            kind: GeneKind::Mutable,
            value,
            quote,
        }
    }

    pub fn auto_increment(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: GeneKind::AutoIncrement,
            value: GeneValue::Null,
            quote: false,
        }
    }

    pub fn primary_key(
        name: impl Into<String>,
        action_id: u64,
        value: GeneValue,
        quote: bool,
    ) -> Self {
        Self {
            name: name.into(),
            kind: GeneKind::PrimaryKey { action_id },
            value,
            quote,
        }
    }

    pub fn foreign_key(name: impl Into<String>, target_table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: GeneKind::ForeignKeyRef {
                target_table: target_table.into(),
                bound_to: None,
            },
            value: GeneValue::Null,
            quote: false,
        }
    }

    pub fn immutable(name: impl Into<String>, value: GeneValue, quote: bool) -> Self {
        Self {
            name: name.into(),
            kind: GeneKind::ImmutableData,
            value,
            quote,
        }
    }

    /// Whether the search may overwrite this gene's value.
    pub fn is_mutable(&self) -> bool {
        matches!(self.kind, GeneKind::Mutable)
    }

    /// Point a foreign-key gene at the action with id `action_id`.
    /// Returns false if this gene is not a foreign-key reference.
    pub fn bind_foreign_key(&mut self, action_id: u64) -> bool {
        match &mut self.kind {
            GeneKind::ForeignKeyRef { bound_to, .. } => {
                *bound_to = Some(action_id);
                true
            }
            _ => false,
        }
    }

    /// Target table of a foreign-key gene, if any.
    pub fn foreign_key_target(&self) -> Option<&str> {
        match &self.kind {
            GeneKind::ForeignKeyRef { target_table, .. } => Some(target_table),
            _ => None,
        }
    }
}
