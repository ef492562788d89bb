//! Per-feature style directives for the map widget.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::feature::{Feature, FeatureCollection, COLOR_KEY};

/// Color used when a feature carries no `color` property.
pub const FALLBACK_COLOR: &str = "#808080";

const POINT_WEIGHT: f64 = 10.0;
const DEFAULT_WEIGHT: f64 = 3.0;
const FILL_OPACITY: f64 = 0.5;

/// Leaflet-style path options for one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDirective {
    pub color: String,
    pub fill_color: String,
    pub weight: f64,
    pub fill_opacity: f64,
}

/// Points are drawn as markers, so they get a much wider stroke to stay visible.
pub fn style_for(feature: &Feature) -> StyleDirective {
    let color = feature.property_str(COLOR_KEY).unwrap_or(FALLBACK_COLOR).to_string();
    let weight = match feature.geometry_type() {
        Some("Point" | "MultiPoint") => POINT_WEIGHT,
        _ => DEFAULT_WEIGHT,
    };
    StyleDirective { fill_color: color.clone(), color, weight, fill_opacity: FILL_OPACITY }
}

/// Attach each feature's style directive under `properties.style`.
pub fn styled_collection(mut collection: FeatureCollection) -> FeatureCollection {
    for feature in collection.features.iter_mut() {
        let style = style_for(feature);
        // StyleDirective holds only strings and finite floats
        let value = serde_json::to_value(&style).unwrap_or(Value::Null);
        feature.properties.insert("style".to_string(), value);
    }
    collection
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::*;

    fn feature(geometry: Value, color: Option<&str>) -> Feature {
        let mut props = Map::new();
        if let Some(c) = color { props.insert("color".into(), json!(c)); }
        Feature::new(geometry, props)
    }

    #[test]
    fn points_get_wide_stroke() {
        let style = style_for(&feature(json!({"type": "Point", "coordinates": [0, 0]}), Some("#ff0000")));
        assert_eq!(style.weight, 10.0);
        assert_eq!(style.color, "#ff0000");
        assert_eq!(style.fill_color, "#ff0000");
    }

    #[test]
    fn lines_use_default_weight_and_fallback_color() {
        let style = style_for(&feature(json!({"type": "LineString", "coordinates": []}), None));
        assert_eq!(style.weight, 3.0);
        assert_eq!(style.color, FALLBACK_COLOR);
    }

    #[test]
    fn styled_collection_embeds_directive() {
        let fc = styled_collection(FeatureCollection::new(vec![
            feature(json!({"type": "Polygon", "coordinates": []}), Some("#00ff00")),
        ]));
        assert_eq!(fc.features[0].properties["style"], json!({
            "color": "#00ff00", "fillColor": "#00ff00", "weight": 3.0, "fillOpacity": 0.5,
        }));
    }
}
