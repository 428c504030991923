//! Weighted, evidence-backed relations between resources.

/// What kind of relationship a [`Relation`] asserts.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationKind {
    /// Several resources tied together because they refer to the same
    /// tables.
    Mutual {
        targets: Vec<String>,
        referred_tables: Vec<String>,
    },
    /// A resource related to itself (e.g. hierarchical paths).
    SelfLoop { resource: String },
    /// One resource depending on a list of target resources.
    Pair {
        source: String,
        targets: Vec<String>,
    },
}

/// One probabilistic relation. The probability is monotonically
/// non-decreasing over a run and the provenance text only accumulates.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub kind: RelationKind,
    pub probability: f64,
    pub provenance: String,
}

impl Relation {
    pub fn mutual(
        members: Vec<String>,
        table: impl Into<String>,
        probability: f64,
        provenance: impl Into<String>,
    ) -> Self {
        let mut targets = members;
        targets.sort();
        targets.dedup();
        Self {
            kind: RelationKind::Mutual {
                targets,
                referred_tables: vec![table.into()],
            },
            probability,
            provenance: provenance.into(),
        }
    }

    pub fn self_loop(resource: impl Into<String>, probability: f64) -> Self {
        let resource = resource.into();
        Self {
            kind: RelationKind::SelfLoop {
                resource: resource.clone(),
            },
            probability,
            provenance: resource,
        }
    }

    pub fn pair(
        source: impl Into<String>,
        targets: Vec<String>,
        probability: f64,
        provenance: impl Into<String>,
    ) -> Self {
        Self {
            kind: RelationKind::Pair {
                source: source.into(),
                targets,
            },
            probability,
            provenance: provenance.into(),
        }
    }

    /// Resources this relation points at.
    pub fn targets(&self) -> &[String] {
        match &self.kind {
            RelationKind::Mutual { targets, .. } | RelationKind::Pair { targets, .. } => targets,
            RelationKind::SelfLoop { resource } => std::slice::from_ref(resource),
        }
    }

    pub fn involves(&self, resource: &str) -> bool {
        self.targets().iter().any(|t| t == resource)
    }

    /// Tables a mutual relation is grounded on, empty for other kinds.
    pub fn referred_tables(&self) -> &[String] {
        match &self.kind {
            RelationKind::Mutual {
                referred_tables, ..
            } => referred_tables,
            _ => &[],
        }
    }

    /// The one merge rule for corroborating evidence: probability takes the
    /// max, provenance is semicolon-joined deduplicated, and mutual
    /// relations union their member and table sets.
    pub fn absorb(&mut self, other: &Relation) {
        self.probability = self.probability.max(other.probability);
        for piece in other.provenance.split(';') {
            if !piece.is_empty() && !self.provenance.split(';').any(|p| p == piece) {
                if !self.provenance.is_empty() {
                    self.provenance.push(';');
                }
                self.provenance.push_str(piece);
            }
        }
        if let (
            RelationKind::Mutual {
                targets,
                referred_tables,
            },
            RelationKind::Mutual {
                targets: other_targets,
                referred_tables: other_tables,
            },
        ) = (&mut self.kind, &other.kind)
        {
            for t in other_targets {
                if !targets.contains(t) {
                    targets.push(t.clone());
                }
            }
            targets.sort();
            for t in other_tables {
                if !referred_tables.contains(t) {
                    referred_tables.push(t.clone());
                }
            }
            referred_tables.sort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absorb_is_monotonic_and_dedupes_provenance() {
        let mut relation = Relation::pair("/a", vec!["/b".to_string()], 0.6, "token:user");
        relation.absorb(&Relation::pair("/a", vec!["/b".to_string()], 0.4, "token:user"));
        assert_eq!(relation.probability, 0.6);
        assert_eq!(relation.provenance, "token:user");

        relation.absorb(&Relation::pair("/a", vec!["/b".to_string()], 0.9, "runtime"));
        assert_eq!(relation.probability, 0.9);
        assert_eq!(relation.provenance, "token:user;runtime");
    }

    #[test]
    fn mutual_absorb_unions_members_and_tables() {
        let mut relation = Relation::mutual(
            vec!["/users".to_string(), "/users/{id}".to_string()],
            "USER",
            0.6,
            "USER",
        );
        relation.absorb(&Relation::mutual(
            vec!["/users".to_string(), "/admins".to_string()],
            "ACCOUNT",
            0.7,
            "ACCOUNT",
        ));

        assert_eq!(
            relation.targets(),
            &["/admins", "/users", "/users/{id}"]
        );
        assert_eq!(relation.referred_tables(), &["ACCOUNT", "USER"]);
        assert_eq!(relation.probability, 0.7);
    }
}
