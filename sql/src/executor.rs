//! Access to a live database through the instrumented driver.

use serde::Deserialize;

/// One row of a query result, column values rendered as strings by the
/// driver.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DataRow {
    pub column_data: Vec<String>,
}

/// Result of one SELECT issued through the driver.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryResult {
    pub rows: Vec<DataRow>,
}

/// Abstraction over the remote driver that can run read-only queries
/// against the system under test's database.
///
/// Returning `None` signals a transient failure (driver unreachable, query
/// refused); callers treat it as "no data" rather than a fatal error.
pub trait DatabaseExecutor {
    fn execute_query(&mut self, select: &str) -> Option<QueryResult>;
}
