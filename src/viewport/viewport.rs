use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::OsmViewError;

/// A point in geographic degrees, keyed the way the map widget reports it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self { Self { lat, lng } }

    /// Parse `{lat, lng}` from a JSON object, rejecting missing or non-numeric fields.
    pub(crate) fn from_json(value: &Value, what: &str) -> Result<Self, OsmViewError> {
        let field = |key: &str| {
            value.get(key)
                .ok_or_else(|| OsmViewError::invalid(format!("{what}.{key} is missing")))?
                .as_f64()
                .ok_or_else(|| OsmViewError::invalid(format!("{what}.{key} is not a number")))
        };
        Ok(Self { lat: field("lat")?, lng: field("lng")? })
    }

    fn is_finite(&self) -> bool { self.lat.is_finite() && self.lng.is_finite() }
}

/// The rectangular region currently visible on the map.
///
/// `south_west` is expected to be below and left of `north_east`, but this is
/// not enforced here; the normalizer pads outward from whatever it is given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    #[serde(alias = "_southWest")]
    pub south_west: LatLng,
    #[serde(alias = "_northEast")]
    pub north_east: LatLng,
}

impl Viewport {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self { south_west, north_east }
    }

    /// The initial view over North America used before the widget reports bounds.
    pub fn north_america() -> Self {
        Self::new(
            LatLng::new(10.31491928581316, -140.09765625000003),
            LatLng::new(58.17070248348609, -52.20703125000001),
        )
    }

    /// Read a viewport from the widget's bounds object.
    ///
    /// Both the widget's `_southWest`/`_northEast` keys and the plain
    /// `southWest`/`northEast` spelling are accepted.
    pub fn from_json(value: &Value) -> Result<Self, OsmViewError> {
        if !value.is_object() {
            return Err(OsmViewError::invalid("viewport must be an object"));
        }
        let corner = |keys: [&str; 2]| {
            keys.iter()
                .find_map(|k| value.get(*k).filter(|v| !v.is_null()).map(|v| (*k, v)))
                .ok_or_else(|| OsmViewError::invalid(format!("viewport.{} is missing", keys[1])))
                .and_then(|(k, v)| LatLng::from_json(v, k))
        };
        let viewport = Self {
            south_west: corner(["_southWest", "southWest"])?,
            north_east: corner(["_northEast", "northEast"])?,
        };
        viewport.validate()?;
        Ok(viewport)
    }

    /// Parse a viewport from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, OsmViewError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| OsmViewError::invalid(format!("viewport is not valid JSON: {e}")))?;
        Self::from_json(&value)
    }

    pub(crate) fn validate(&self) -> Result<(), OsmViewError> {
        if !self.south_west.is_finite() || !self.north_east.is_finite() {
            return Err(OsmViewError::invalid("viewport corners must be finite"));
        }
        Ok(())
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_widget_keys() {
        let vp = Viewport::from_json(&json!({
            "_southWest": {"lat": 10.0, "lng": -100.0},
            "_northEast": {"lat": 20.0, "lng": -90.0},
        })).unwrap();
        assert_eq!(vp.south_west, LatLng::new(10.0, -100.0));
        assert_eq!(vp.north_east, LatLng::new(20.0, -90.0));
    }

    #[test]
    fn parses_plain_keys() {
        let vp = Viewport::from_json_str(
            r#"{"southWest": {"lat": 1, "lng": 2}, "northEast": {"lat": 3, "lng": 4}}"#,
        ).unwrap();
        assert_eq!(vp.north_east, LatLng::new(3.0, 4.0));
    }

    #[test]
    fn missing_corner_is_invalid() {
        let err = Viewport::from_json(&json!({"_northEast": {"lat": 20.0, "lng": -90.0}})).unwrap_err();
        assert!(matches!(err, OsmViewError::InvalidInput(_)));
    }

    #[test]
    fn non_numeric_field_is_invalid() {
        let err = Viewport::from_json(&json!({
            "_southWest": {"lat": "ten", "lng": -100.0},
            "_northEast": {"lat": 20.0, "lng": -90.0},
        })).unwrap_err();
        assert_eq!(err, OsmViewError::invalid("_southWest.lat is not a number"));
    }

    #[test]
    fn null_bounds_are_invalid() {
        assert!(Viewport::from_json(&Value::Null).is_err());
    }

    #[test]
    fn serde_accepts_widget_aliases() {
        let vp: Viewport = serde_json::from_value(json!({
            "_southWest": {"lat": 1.0, "lng": 2.0},
            "_northEast": {"lat": 3.0, "lng": 4.0},
        })).unwrap();
        assert_eq!(vp.center(), LatLng::new(2.0, 3.0));
    }
}
