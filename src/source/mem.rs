use ahash::{AHashMap, AHashSet};
use anyhow::Result;
use rstar::{RTree, AABB};
use serde_json::Value;

use crate::feature::{category, Record};
use crate::query::{GeometryTable, QueryRequest};
use crate::viewport::BoundingBox;
use super::envelope::Envelope;
use super::RowSource;

/// Field holding the geometry in stored and returned records.
const GEOMETRY_FIELD: &str = "geojson";

struct TableRows {
    records: Vec<Record>,
    tree: RTree<Envelope>,
}

impl TableRows {
    fn new(records: Vec<Record>) -> Self {
        let envelopes = records.iter().enumerate()
            .filter_map(|(idx, r)| Envelope::from_geojson(idx, r.get(GEOMETRY_FIELD)?))
            .collect();
        Self { records, tree: RTree::bulk_load(envelopes) }
    }

    /// Indices of records whose geometry intersects `bbox`, in load order.
    fn query_indices(&self, bbox: &BoundingBox) -> Vec<usize> {
        let [x1, y1, x2, y2] = bbox.to_array();
        let envelope = AABB::from_corners([x1, y1], [x2, y2]);
        let rect = bbox.to_rect();
        let mut indices: Vec<usize> = self.tree.locate_in_envelope_intersecting(&envelope)
            .filter(|e| e.intersects(&rect))
            .map(|e| e.idx())
            .collect();
        indices.sort_unstable();
        indices
    }
}

/// In-memory rows per geometry table, spatially indexed by geometry envelope.
///
/// Records are expected to hold the geometry as a GeoJSON object under
/// `geojson`, plus `name` and any tag columns.
#[derive(Default)]
pub struct MemSource {
    tables: AHashMap<GeometryTable, TableRows>,
}

impl MemSource {
    pub fn new() -> Self { Self::default() }

    /// Replace the rows of `table`.
    pub fn insert_table(&mut self, table: GeometryTable, records: Vec<Record>) {
        self.tables.insert(table, TableRows::new(records));
    }

    pub fn with_table(mut self, table: GeometryTable, records: Vec<Record>) -> Self {
        self.insert_table(table, records);
        self
    }

    pub fn num_rows(&self, table: GeometryTable) -> usize {
        self.tables.get(&table).map_or(0, |t| t.records.len())
    }
}

impl RowSource for MemSource {
    fn fetch(&self, request: &QueryRequest) -> Result<Vec<Record>> {
        let Some(rows) = self.tables.get(&request.table) else { return Ok(Vec::new()) };
        let tags: AHashSet<&str> = request.tags.iter().map(String::as_str).collect();

        let mut out = Vec::new();
        for idx in rows.query_indices(&request.bbox) {
            if out.len() >= request.limit { break }
            let record = &rows.records[idx];
            let Some(value) = category(record.get(&request.column)) else { continue };
            if !tags.is_empty() && !tags.contains(value.as_str()) { continue }

            let mut row = Record::new();
            row.insert(GEOMETRY_FIELD.to_string(), record[GEOMETRY_FIELD].clone());
            row.insert("name".to_string(), record.get("name").cloned().unwrap_or(Value::Null));
            row.insert(request.column.clone(), Value::String(value));
            out.push(row);
        }
        Ok(out)
    }

    fn tag_values(&self, table: GeometryTable, column: &str) -> Result<Vec<String>> {
        table.check_column(column)?;
        let Some(rows) = self.tables.get(&table) else { return Ok(Vec::new()) };

        let mut counts: AHashMap<String, usize> = AHashMap::new();
        for record in &rows.records {
            if let Some(value) = category(record.get(column)) {
                *counts.entry(value).or_default() += 1;
            }
        }

        // Same order as the warehouse query: count descending, then value.
        let mut values: Vec<(String, usize)> = counts.into_iter().collect();
        values.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(values.into_iter().map(|(v, _)| v).collect())
    }
}
