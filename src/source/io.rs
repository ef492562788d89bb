//! Loading query-result exports into records.

use std::{io::Cursor, path::Path};

use anyhow::{bail, Context, Result};
use polars::{io::SerReader, prelude::{CsvReadOptions, CsvReader}};
use serde_json::Value;

use crate::feature::Record;

/// Geometry column of exported rows, holding GeoJSON text.
const GEOMETRY_COLUMN: &str = "geojson";

/// Records from a GeoJSON FeatureCollection: each feature's properties plus
/// its geometry under `geojson`.
pub fn read_geojson_rows(text: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(text).context("[source::io] Failed to parse GeoJSON")?;
    let Some(features) = value.get("features").and_then(Value::as_array) else {
        bail!("[source::io] GeoJSON has no features array");
    };

    let mut records = Vec::with_capacity(features.len());
    for feature in features {
        let mut record = feature.get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        record.insert(
            GEOMETRY_COLUMN.to_string(),
            feature.get("geometry").cloned().unwrap_or(Value::Null),
        );
        records.push(record);
    }
    Ok(records)
}

/// Records from CSV bytes, e.g. a warehouse export with `GEOJSON`, `NAME` and
/// tag columns. Column names are lowercased; every cell is read as text and
/// empty cells become null. The geometry column is decoded from GeoJSON text.
pub fn read_csv_bytes(bytes: &[u8]) -> Result<Vec<Record>> {
    let options = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0));
    let df = CsvReader::new(Cursor::new(bytes))
        .with_options(options)
        .finish()
        .context("[source::io] Failed to read CSV from bytes")?;

    let mut records = vec![Record::new(); df.height()];
    for col in df.get_columns() {
        let name = col.name().to_lowercase();
        let values = col.str()
            .with_context(|| format!("[source::io] Column {name} is not text"))?;
        for (idx, record) in records.iter_mut().enumerate() {
            let cell = match values.get(idx) {
                None | Some("") => Value::Null,
                Some(text) if name == GEOMETRY_COLUMN => serde_json::from_str(text)
                    .with_context(|| format!("[source::io] Row {idx}: invalid GeoJSON geometry"))?,
                Some(text) => Value::String(text.to_string()),
            };
            record.insert(name.clone(), cell);
        }
    }
    Ok(records)
}

/// Load records from a `.csv` export or a GeoJSON file, chosen by extension.
pub fn read_rows(path: &Path) -> Result<Vec<Record>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("[source::io] Failed to read {}", path.display()))?;
    let is_csv = path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        read_csv_bytes(&bytes)
    } else {
        let text = std::str::from_utf8(&bytes)
            .with_context(|| format!("[source::io] {} is not UTF-8", path.display()))?;
        read_geojson_rows(text)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    #[test]
    fn geojson_properties_become_columns() {
        let records = read_geojson_rows(r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 2]},
                 "properties": {"name": "Cafe", "amenity": "cafe"}},
                {"type": "Feature", "geometry": null, "properties": null}
            ]
        }"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["amenity"], json!("cafe"));
        assert_eq!(records[0]["geojson"], json!({"type": "Point", "coordinates": [1, 2]}));
        assert_eq!(records[1]["geojson"], Value::Null);
    }

    #[test]
    fn geojson_without_features_fails() {
        assert!(read_geojson_rows(r#"{"type": "Point", "coordinates": [0, 0]}"#).is_err());
    }

    #[test]
    fn csv_columns_are_lowercased_and_geometry_decoded() {
        let csv = "GEOJSON,NAME,AMENITY\n\
                   \"{\"\"type\"\":\"\"Point\"\",\"\"coordinates\"\":[1.5,2.5]}\",Corner Cafe,cafe\n\
                   \"{\"\"type\"\":\"\"Point\"\",\"\"coordinates\"\":[3,4]}\",,\n";
        let records = read_csv_bytes(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["geojson"], json!({"type": "Point", "coordinates": [1.5, 2.5]}));
        assert_eq!(records[0]["name"], json!("Corner Cafe"));
        assert_eq!(records[1]["amenity"], Value::Null);
    }

    #[test]
    fn read_rows_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "name,amenity").unwrap();
        writeln!(file, "Bank,bank").unwrap();
        let records = read_rows(file.path()).unwrap();
        assert_eq!(records[0]["amenity"], json!("bank"));
    }
}
