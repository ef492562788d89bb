use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
enum FeatureTag {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
enum CollectionTag {
    #[default]
    FeatureCollection,
}

/// A GeoJSON feature. The geometry is carried verbatim from the source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    tag: FeatureTag,
    pub geometry: Value,
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Value, properties: Map<String, Value>) -> Self {
        Self { tag: FeatureTag::Feature, geometry, properties }
    }

    /// The GeoJSON `type` of the geometry, if it has one.
    pub fn geometry_type(&self) -> Option<&str> {
        self.geometry.get("type").and_then(Value::as_str)
    }

    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

/// An ordered GeoJSON feature collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    tag: CollectionTag,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { tag: CollectionTag::FeatureCollection, features }
    }

    pub fn len(&self) -> usize { self.features.len() }

    pub fn is_empty(&self) -> bool { self.features.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> + '_ { self.features.iter() }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).context("[feature::to_value] Failed to encode FeatureCollection")
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).context("[feature::to_json_string] Failed to encode FeatureCollection")
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("[feature::from_json_str] Failed to parse FeatureCollection")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn encodes_standard_shape() {
        let mut props = Map::new();
        props.insert("name".into(), json!("Cafe"));
        let fc = FeatureCollection::new(vec![
            Feature::new(json!({"type": "Point", "coordinates": [1.0, 2.0]}), props),
        ]);
        assert_eq!(fc.to_value().unwrap(), json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
                "properties": {"name": "Cafe"},
            }],
        }));
    }

    #[test]
    fn rejects_wrong_type_tag() {
        let text = r#"{"type": "Feature", "features": []}"#;
        assert!(FeatureCollection::from_json_str(text).is_err());
    }

    #[test]
    fn geometry_type_reads_nested_tag() {
        let f = Feature::new(json!({"type": "LineString", "coordinates": []}), Map::new());
        assert_eq!(f.geometry_type(), Some("LineString"));
        assert_eq!(Feature::new(Value::Null, Map::new()).geometry_type(), None);
    }
}
