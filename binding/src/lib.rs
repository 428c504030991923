//! Resource-to-table binding engine.
//!
//! Associates REST resources and their declared parameters with database
//! tables and columns by normalized name similarity, keeping every tie in
//! the derived data. Bindings start as heuristic ("derived") and are
//! promoted to confirmed only by observed execution evidence.

mod bind_map;
mod derive;
mod matched;
mod similarity;
mod store;

pub use bind_map::{select_bindings, ParamBindMap};
pub use derive::{derive_all, derive_params_to_table, derive_resource_to_table};
pub use matched::{ColumnRef, MatchSource, MatchedInfo, ParamToTable, ResourceToTable};
pub use similarity::{is_similar, similarity, SIMILARITY_THRESHOLD};
pub use store::BindingStore;
