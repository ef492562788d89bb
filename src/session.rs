//! Map view state carried explicitly between redraw cycles.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::OsmViewError;
use crate::feature::Record;
use crate::viewport::{LatLng, Viewport};

pub const DEFAULT_ZOOM: u8 = 4;

/// Zoom level used when jumping to a state capital.
pub const CAPITAL_ZOOM: u8 = 12;

/// A state capital offered by the "zoom map to capital" picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capital {
    pub name: String,
    pub location: LatLng,
}

impl Capital {
    /// Read a row of the capitals query (`name`, `lat`, `lng`). Coordinates
    /// may be numbers or numeric text, as CSV exports produce.
    pub fn from_record(record: &Record) -> Result<Self, OsmViewError> {
        let number = |key: &str| {
            let value = match record.get(key) {
                Some(Value::Number(n)) => n.as_f64(),
                Some(Value::String(s)) => s.trim().parse().ok(),
                _ => None,
            };
            value.ok_or_else(|| OsmViewError::invalid(format!("capital {key} is missing or not a number")))
        };

        let name = record.get("name").and_then(Value::as_str)
            .ok_or_else(|| OsmViewError::invalid("capital name is missing"))?;
        Ok(Self { name: name.to_string(), location: LatLng::new(number("lat")?, number("lng")?) })
    }
}

/// Center, zoom and last reported bounds of the map widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub center: LatLng,
    pub zoom: u8,
    /// `None` until the widget has reported bounds (first render).
    pub bounds: Option<Viewport>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { center: LatLng::new(37.97, -96.12), zoom: DEFAULT_ZOOM, bounds: None }
    }
}

impl ViewState {
    /// Centered on `capital` at [`CAPITAL_ZOOM`]. Bounds are cleared so the next
    /// redraw waits for the widget to report the new viewport.
    pub fn at_capital(capital: &Capital) -> Self {
        Self { center: capital.location, zoom: CAPITAL_ZOOM, bounds: None }
    }

    /// Merge the state the widget reports after an interaction. Missing or
    /// malformed pieces keep their previous values; malformed bounds clear.
    pub fn update_from_widget(&mut self, reported: &Value) {
        if let Some(zoom) = reported.get("zoom").and_then(Value::as_u64) {
            self.zoom = zoom.min(u8::MAX as u64) as u8;
        }
        if let Some(center) = reported.get("center").and_then(|c| LatLng::from_json(c, "center").ok()) {
            self.center = center;
        }
        if let Some(bounds) = reported.get("bounds") {
            self.bounds = Viewport::from_json(bounds).ok();
        }
    }

    /// Bounds to query: the reported ones, or the North America default on first render.
    pub fn query_bounds(&self) -> Viewport {
        self.bounds.unwrap_or_else(Viewport::north_america)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn default_view_is_continental() {
        let view = ViewState::default();
        assert_eq!(view.zoom, 4);
        assert_eq!(view.center, LatLng::new(37.97, -96.12));
        assert!(view.bounds.is_none());
        assert_eq!(view.query_bounds(), Viewport::north_america());
    }

    #[test]
    fn widget_report_updates_state() {
        let mut view = ViewState::default();
        view.update_from_widget(&json!({
            "zoom": 9,
            "center": {"lat": 41.88, "lng": -87.63},
            "bounds": {
                "_southWest": {"lat": 41.5, "lng": -88.0},
                "_northEast": {"lat": 42.2, "lng": -87.2},
            },
        }));
        assert_eq!(view.zoom, 9);
        assert_eq!(view.center, LatLng::new(41.88, -87.63));
        assert_eq!(view.query_bounds().south_west, LatLng::new(41.5, -88.0));
    }

    #[test]
    fn partial_report_keeps_previous_values() {
        let mut view = ViewState::default();
        view.update_from_widget(&json!({"zoom": 6, "center": null}));
        assert_eq!(view.zoom, 6);
        assert_eq!(view.center, LatLng::new(37.97, -96.12));
        assert!(view.bounds.is_none());
    }

    #[test]
    fn capital_from_csv_style_record() {
        let record = json!({"name": "Springfield", "lat": "39.80", "lng": -89.65})
            .as_object().cloned().unwrap();
        let capital = Capital::from_record(&record).unwrap();
        let view = ViewState::at_capital(&capital);
        assert_eq!(view.center, LatLng::new(39.80, -89.65));
        assert_eq!(view.zoom, CAPITAL_ZOOM);
        assert!(view.bounds.is_none());
    }

    #[test]
    fn capital_without_coordinates_is_invalid() {
        let record = json!({"name": "Nowhere"}).as_object().cloned().unwrap();
        assert!(Capital::from_record(&record).is_err());
    }
}
