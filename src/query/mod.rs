//! SQL text for the warehouse queries a redraw needs.

mod request;
mod sql;
mod table;

pub use request::{QueryKey, QueryRequest, DEFAULT_ROW_LIMIT, ROW_LIMITS};
pub use sql::{quote_literal, state_capitals_sql, tag_values_sql};
pub use table::GeometryTable;
