//! Immutable database schema model.
//!
//! A [`DbSchema`] is built once from a [`SchemaDto`] (the structured schema
//! description supplied by the driver) and validated on construction; after
//! that, tables, columns and foreign keys never change. Check-expression
//! strings are parsed into range/enum/bound constraints and attached to the
//! columns they mention.

mod column;
mod constraint;
mod dto;
mod error;
mod table;

pub use column::{Column, ColumnDataType};
pub use constraint::{parse_check_expression, TableConstraint};
pub use dto::{CheckExpressionDto, ColumnDto, ForeignKeyDto, SchemaDto, TableDto};
pub use error::{SchemaError, SchemaResult};
pub use table::{DbSchema, ForeignKey, Table};
