//! SQL action construction: insertion chains with foreign-key precursors,
//! extraction of existing database rows, and repair of action lists.

mod action;
mod error;
mod executor;
mod insert;
pub mod repair;

pub use action::DbAction;
pub use error::{SqlError, SqlResult};
pub use executor::{DataRow, DatabaseExecutor, QueryResult};
pub use insert::{SqlInsertBuilder, ALL_COLUMNS};
