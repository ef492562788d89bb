use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::{palette_slots, DEFAULT_PALETTE};
use crate::error::OsmViewError;
use super::{Feature, FeatureCollection};

/// One row of a query result, keyed by column name.
pub type Record = Map<String, Value>;

/// Which record fields hold the geometry, the display name and the
/// categorical attribute driving color.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    pub geometry: &'a str,
    pub name: &'a str,
    pub attribute: &'a str,
}

impl<'a> Fields<'a> {
    /// Field names produced by the viewport query: `geojson`, `name` and the selected column.
    pub fn for_column(attribute: &'a str) -> Self {
        Self { geometry: "geojson", name: "name", attribute }
    }

    /// The name, attribute and color properties must have distinct keys.
    fn check_keys(&self) -> Result<(), OsmViewError> {
        if self.name == self.attribute {
            return Err(OsmViewError::invalid(format!(
                "name and attribute fields are both '{}'", self.name
            )));
        }
        if let Some(field) = [self.name, self.attribute].into_iter().find(|f| *f == COLOR_KEY) {
            return Err(OsmViewError::invalid(format!("field '{field}' collides with the color property")));
        }
        Ok(())
    }
}

/// Whether distinct attribute values are collected before or after tag filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBasis {
    /// Only rows that survive the tag filter take part in color assignment.
    #[default]
    Filtered,
    /// Every row takes part, so a value keeps its color whatever the tag filter.
    AllRows,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssembleOptions {
    pub palette: Vec<String>,
    pub color_basis: ColorBasis,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(ToString::to_string).collect(),
            color_basis: ColorBasis::default(),
        }
    }
}

/// Property key the assigned color is emitted under.
pub const COLOR_KEY: &str = "color";

/// Categorical value of a JSON cell: strings as-is, scalars via their JSON text.
pub(crate) fn category(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Geometry cells may arrive as a GeoJSON object or as GeoJSON text.
fn geometry(record: &Record, field: &str, row: usize) -> Result<Value, OsmViewError> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(Value::Null),
        Some(Value::String(text)) => serde_json::from_str(text).map_err(|e| {
            OsmViewError::invalid(format!("row {row}: {field} is not valid GeoJSON: {e}"))
        }),
        Some(value) => Ok(value.clone()),
    }
}

/// Build a colored FeatureCollection from query rows.
///
/// When `tags` is non-empty, rows whose attribute is not one of the tags are
/// dropped; surviving rows keep their relative order. Each feature carries
/// the display name, the attribute under its own field name, and `color`.
/// Rows without the attribute share one color category of their own, apart
/// from any real value including the empty string.
pub fn assemble(
    rows: &[Record],
    fields: &Fields<'_>,
    tags: &[String],
    options: &AssembleOptions,
) -> Result<FeatureCollection, OsmViewError> {
    if options.palette.is_empty() {
        return Err(OsmViewError::invalid("palette is empty"));
    }
    fields.check_keys()?;
    if rows.is_empty() { return Ok(FeatureCollection::default()) }

    let allowed: AHashSet<&str> = tags.iter().map(String::as_str).collect();
    let categories: Vec<Option<String>> = rows.iter()
        .map(|r| category(r.get(fields.attribute)))
        .collect();
    let keep: Vec<bool> = categories.iter()
        .map(|c| allowed.is_empty() || c.as_deref().is_some_and(|c| allowed.contains(c)))
        .collect();

    let basis = categories.iter().zip(&keep)
        .filter(|(_, kept)| options.color_basis == ColorBasis::AllRows || **kept)
        .map(|(c, _)| c.as_deref());
    let slots = palette_slots(basis, options.palette.len());

    let mut features = Vec::with_capacity(keep.iter().filter(|k| **k).count());
    for (idx, record) in rows.iter().enumerate() {
        if !keep[idx] { continue }
        let value = categories[idx].as_deref();

        let mut properties = Map::new();
        properties.insert(
            fields.name.to_string(),
            record.get(fields.name).cloned().unwrap_or(Value::Null),
        );
        properties.insert(
            fields.attribute.to_string(),
            value.map_or(Value::Null, |v| Value::String(v.to_string())),
        );
        let color = slots.get(&value).map_or(Value::Null, |&i| Value::String(options.palette[i].clone()));
        properties.insert(COLOR_KEY.to_string(), color);

        features.push(Feature::new(geometry(record, fields.geometry, idx)?, properties));
    }

    Ok(FeatureCollection::new(features))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(name: &str, amenity: Option<&str>, x: f64) -> Record {
        let value = json!({
            "geojson": format!(r#"{{"type":"Point","coordinates":[{x},1.5]}}"#),
            "name": name,
            "amenity": amenity,
        });
        value.as_object().cloned().unwrap()
    }

    fn palette(colors: &[&str]) -> AssembleOptions {
        AssembleOptions {
            palette: colors.iter().map(|c| c.to_string()).collect(),
            ..AssembleOptions::default()
        }
    }

    const FIELDS: Fields<'static> = Fields { geometry: "geojson", name: "name", attribute: "amenity" };

    #[test]
    fn empty_rows_give_empty_collection() {
        let fc = assemble(&[], &FIELDS, &[], &AssembleOptions::default()).unwrap();
        assert!(fc.is_empty());
    }

    #[test]
    fn tag_filter_keeps_order() {
        let rows = vec![row("one", Some("X"), 1.0), row("two", Some("Y"), 2.0), row("three", Some("X"), 3.0)];
        let fc = assemble(&rows, &FIELDS, &["X".to_string()], &AssembleOptions::default()).unwrap();
        let names: Vec<_> = fc.iter().map(|f| f.property_str("name").unwrap()).collect();
        assert_eq!(names, vec!["one", "three"]);
        assert!(fc.iter().all(|f| f.property_str("amenity") == Some("X")));
    }

    #[test]
    fn colors_follow_first_seen_order() {
        let rows = vec![row("a", Some("cafe"), 0.0), row("b", Some("bank"), 0.0), row("c", Some("pub"), 0.0)];
        let fc = assemble(&rows, &FIELDS, &[], &palette(&["red", "blue"])).unwrap();
        let colors: Vec<_> = fc.iter().map(|f| f.property_str("color").unwrap()).collect();
        assert_eq!(colors, vec!["red", "blue", "red"]);
    }

    #[test]
    fn color_basis_changes_aliasing() {
        let rows = vec![row("a", Some("Y"), 0.0), row("b", Some("X"), 0.0)];
        let tags = ["X".to_string()];

        let filtered = assemble(&rows, &FIELDS, &tags, &palette(&["red", "blue"])).unwrap();
        assert_eq!(filtered.features[0].property_str("color"), Some("red"));

        let mut all = palette(&["red", "blue"]);
        all.color_basis = ColorBasis::AllRows;
        let unfiltered = assemble(&rows, &FIELDS, &tags, &all).unwrap();
        assert_eq!(unfiltered.features[0].property_str("color"), Some("blue"));
    }

    #[test]
    fn geometry_text_is_decoded() {
        let fc = assemble(&[row("a", Some("cafe"), 2.25)], &FIELDS, &[], &AssembleOptions::default()).unwrap();
        assert_eq!(fc.features[0].geometry, json!({"type": "Point", "coordinates": [2.25, 1.5]}));
    }

    #[test]
    fn missing_attribute_is_null_and_colored() {
        let fc = assemble(&[row("a", None, 0.0)], &FIELDS, &[], &palette(&["red"])).unwrap();
        let f = &fc.features[0];
        assert_eq!(f.properties["amenity"], Value::Null);
        assert_eq!(f.property_str("color"), Some("red"));
    }

    #[test]
    fn missing_attribute_is_not_the_empty_string() {
        let mut empty = row("b", None, 0.0);
        empty.insert("amenity".into(), json!(""));
        let rows = vec![row("a", None, 0.0), empty];
        let fc = assemble(&rows, &FIELDS, &[], &palette(&["red", "blue"])).unwrap();
        assert_eq!(fc.features[0].property_str("color"), Some("red"));
        assert_eq!(fc.features[1].property_str("color"), Some("blue"));
        assert_eq!(fc.features[1].property_str("amenity"), Some(""));
    }

    #[test]
    fn colliding_property_keys_are_invalid() {
        let rows = vec![row("a", Some("cafe"), 0.0)];
        let same = Fields { attribute: "name", ..FIELDS };
        let color = Fields { attribute: COLOR_KEY, ..FIELDS };
        let named_color = Fields { name: COLOR_KEY, ..FIELDS };
        for fields in [same, color, named_color] {
            let err = assemble(&rows, &fields, &[], &AssembleOptions::default()).unwrap_err();
            assert!(matches!(err, OsmViewError::InvalidInput(_)), "{fields:?}");
        }
    }

    #[test]
    fn missing_attribute_never_matches_tags() {
        let fc = assemble(&[row("a", None, 0.0)], &FIELDS, &["X".to_string()], &AssembleOptions::default()).unwrap();
        assert!(fc.is_empty());
    }

    #[test]
    fn numeric_attribute_is_stringified() {
        let mut r = row("a", None, 0.0);
        r.insert("amenity".into(), json!(3));
        let fc = assemble(&[r], &FIELDS, &["3".to_string()], &AssembleOptions::default()).unwrap();
        assert_eq!(fc.features[0].property_str("amenity"), Some("3"));
    }

    #[test]
    fn bad_geometry_text_is_invalid() {
        let mut r = row("a", Some("cafe"), 0.0);
        r.insert("geojson".into(), json!("{not json"));
        let err = assemble(&[r], &FIELDS, &[], &AssembleOptions::default()).unwrap_err();
        assert!(matches!(err, OsmViewError::InvalidInput(_)));
    }

    #[test]
    fn empty_palette_is_invalid() {
        let options = AssembleOptions { palette: vec![], ..AssembleOptions::default() };
        assert!(assemble(&[], &FIELDS, &[], &options).is_err());
    }

    #[test]
    fn survives_encode_decode() {
        let rows = vec![row("a", Some("cafe"), 0.1 + 0.2), row("b", Some("bank"), -122.41941550000001)];
        let fc = assemble(&rows, &FIELDS, &[], &AssembleOptions::default()).unwrap();
        let decoded = FeatureCollection::from_json_str(&fc.to_json_string().unwrap()).unwrap();
        assert_eq!(decoded, fc);
    }
}
