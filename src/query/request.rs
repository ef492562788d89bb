use serde::{Deserialize, Serialize};

use crate::error::OsmViewError;
use crate::viewport::BoundingBox;
use super::sql::{quote_ident, quote_literal};
use super::GeometryTable;

/// Row limits offered by the "maximum number of rows" slider.
pub const ROW_LIMITS: [usize; 4] = [100, 1_000, 10_000, 100_000];

pub const DEFAULT_ROW_LIMIT: usize = 1_000;

/// Everything that determines the rows of one viewport query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub table: GeometryTable,
    pub column: String,
    pub tags: Vec<String>,
    pub limit: usize,
    pub bbox: BoundingBox,
}

/// Exact, hashable identity of a [`QueryRequest`]. Tag order and duplicates
/// do not affect the rows returned, so tags are sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    bbox: [u64; 4],
    table: GeometryTable,
    column: String,
    tags: Vec<String>,
    limit: usize,
}

impl QueryRequest {
    pub fn new(
        table: GeometryTable,
        column: impl Into<String>,
        tags: Vec<String>,
        limit: usize,
        bbox: BoundingBox,
    ) -> Result<Self, OsmViewError> {
        let column = column.into();
        table.check_column(&column)?;
        if !ROW_LIMITS.contains(&limit) {
            return Err(OsmViewError::invalid(format!(
                "row limit {limit} is not one of {ROW_LIMITS:?}"
            )));
        }
        Ok(Self { table, column, tags, limit, bbox })
    }

    pub fn key(&self) -> QueryKey {
        let mut tags = self.tags.clone();
        tags.sort();
        tags.dedup();
        QueryKey {
            bbox: self.bbox.key_bits(),
            table: self.table,
            column: self.column.clone(),
            tags,
            limit: self.limit,
        }
    }

    /// Rows whose geometry intersects the bounding box and whose column is set
    /// (and, with tags, equal to one of them).
    pub fn to_sql(&self) -> String {
        let col = quote_ident(&self.column);
        let mut sql = format!(
            "SELECT ST_ASGEOJSON(way) AS geojson, name, {col} FROM {} \
             WHERE ST_INTERSECTS(TO_GEOGRAPHY('{}'), way) AND {col} IS NOT NULL",
            self.table.table_name(),
            self.bbox.to_wkt(),
        );
        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|t| quote_literal(t)).collect();
            sql.push_str(&format!(" AND {col} IN ({})", tags.join(", ")));
        }
        sql.push_str(&format!(" LIMIT {}", self.limit));
        sql
    }
}
