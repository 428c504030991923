//! Parsing of SQL check-expression strings into column constraints.
//!
//! The grammar accepted here covers the shapes databases commonly emit for
//! simple column checks: comparisons against a literal, BETWEEN ranges, and
//! IN-lists of string literals. Anything else is ignored rather than
//! rejected; an unparsed check constraint just means the column keeps its
//! type-level defaults.

use regex_lite::Regex;

/// A constraint extracted from one check expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraint {
    LowerBound { column: String, value: i64 },
    UpperBound { column: String, value: i64 },
    Range { column: String, min: i64, max: i64 },
    Enum { column: String, values: Vec<String> },
}

impl TableConstraint {
    pub fn column(&self) -> &str {
        match self {
            TableConstraint::LowerBound { column, .. }
            | TableConstraint::UpperBound { column, .. }
            | TableConstraint::Range { column, .. }
            | TableConstraint::Enum { column, .. } => column,
        }
    }
}

/// Parse one check expression. Returns `None` when the expression does not
/// match any supported shape.
pub fn parse_check_expression(expr: &str) -> Option<TableConstraint> {
    let expr = expr.trim();

    let between =
        Regex::new(r#"(?i)^\(?\s*"?(\w+)"?\s+BETWEEN\s+(-?\d+)\s+AND\s+(-?\d+)\s*\)?$"#).ok()?;
    if let Some(cap) = between.captures(expr) {
        return Some(TableConstraint::Range {
            column: cap[1].to_string(),
            min: cap[2].parse().ok()?,
            max: cap[3].parse().ok()?,
        });
    }

    let comparison = Regex::new(r#"^\(?\s*"?(\w+)"?\s*(>=|<=|>|<)\s*(-?\d+)\s*\)?$"#).ok()?;
    if let Some(cap) = comparison.captures(expr) {
        let column = cap[1].to_string();
        let value: i64 = cap[3].parse().ok()?;
        return Some(match &cap[2] {
            ">=" => TableConstraint::LowerBound { column, value },
            ">" => TableConstraint::LowerBound {
                column,
                value: value + 1,
            },
            "<=" => TableConstraint::UpperBound { column, value },
            _ => TableConstraint::UpperBound {
                column,
                value: value - 1,
            },
        });
    }

    let in_list = Regex::new(r#"(?i)^\(?\s*"?(\w+)"?\s+IN\s*\(([^)]*)\)\s*\)?$"#).ok()?;
    if let Some(cap) = in_list.captures(expr) {
        let values: Vec<String> = cap[2]
            .split(',')
            .map(|v| v.trim().trim_matches('\'').to_string())
            .filter(|v| !v.is_empty())
            .collect();
        if !values.is_empty() {
            return Some(TableConstraint::Enum {
                column: cap[1].to_string(),
                values,
            });
        }
    }

    None
}

fn range_for<'a>(constraints: &'a [TableConstraint], column: &str) -> Option<&'a TableConstraint> {
    constraints.iter().find(
        |c| matches!(c, TableConstraint::Range { .. }) && c.column().eq_ignore_ascii_case(column),
    )
}

/// Effective lower bound for `column`. A range constraint wins over plain
/// lower bounds; multiple lower bounds take the maximum.
pub fn lower_bound_for(constraints: &[TableConstraint], column: &str) -> Option<i64> {
    if let Some(TableConstraint::Range { min, .. }) = range_for(constraints, column) {
        return Some(*min);
    }
    constraints
        .iter()
        .filter_map(|c| match c {
            TableConstraint::LowerBound { column: col, value }
                if col.eq_ignore_ascii_case(column) =>
            {
                Some(*value)
            }
            _ => None,
        })
        .max()
}

/// Effective upper bound for `column`. A range constraint wins over plain
/// upper bounds; multiple upper bounds take the minimum.
pub fn upper_bound_for(constraints: &[TableConstraint], column: &str) -> Option<i64> {
    if let Some(TableConstraint::Range { max, .. }) = range_for(constraints, column) {
        return Some(*max);
    }
    constraints
        .iter()
        .filter_map(|c| match c {
            TableConstraint::UpperBound { column: col, value }
                if col.eq_ignore_ascii_case(column) =>
            {
                Some(*value)
            }
            _ => None,
        })
        .min()
}

/// First enum constraint matching `column`, if any.
pub fn enum_values_for(constraints: &[TableConstraint], column: &str) -> Option<Vec<String>> {
    constraints.iter().find_map(|c| match c {
        TableConstraint::Enum {
            column: col,
            values,
        } if col.eq_ignore_ascii_case(column) => Some(values.clone()),
        _ => None,
    })
}
