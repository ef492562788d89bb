//! Row sources standing in for the geospatial SQL warehouse.

mod cached;
mod envelope;
mod io;
mod mem;

use anyhow::Result;

use crate::feature::Record;
use crate::query::{GeometryTable, QueryRequest};

pub use cached::CachedSource;
pub use io::{read_csv_bytes, read_geojson_rows, read_rows};
pub use mem::MemSource;

/// Anything that can answer the viewport and tag-frequency queries.
///
/// Returned records carry `geojson`, `name` and the requested column, the
/// shape the warehouse query selects.
pub trait RowSource: Send + Sync {
    fn fetch(&self, request: &QueryRequest) -> Result<Vec<Record>>;

    /// Distinct values of `column`, most frequent first.
    fn tag_values(&self, table: GeometryTable, column: &str) -> Result<Vec<String>>;
}

impl<S: RowSource + ?Sized> RowSource for &S {
    fn fetch(&self, request: &QueryRequest) -> Result<Vec<Record>> { (**self).fetch(request) }

    fn tag_values(&self, table: GeometryTable, column: &str) -> Result<Vec<String>> {
        (**self).tag_values(table, column)
    }
}
