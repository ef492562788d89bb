use geo::{coord, Rect};
use serde::{Deserialize, Serialize};

use crate::error::OsmViewError;
use super::Viewport;

/// Decimal places viewport corners are rounded to unless configured otherwise.
pub const DEFAULT_ROUND_TO: u32 = 1;

/// Beyond this, rounding no longer reduces query churn and `10^n` loses precision.
pub const MAX_ROUND_TO: u32 = 10;

/// A padded, rounded rectangle `(x1, y1, x2, y2)` in lng/lat degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self { Self { x1, y1, x2, y2 } }

    /// Closed WKT ring, counter-clockwise from the south-west corner.
    pub fn to_wkt(&self) -> String {
        let Self { x1, y1, x2, y2 } = *self;
        format!("POLYGON(({x1} {y1}, {x2} {y1}, {x2} {y2}, {x1} {y2}, {x1} {y1}))")
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(coord! { x: self.x1, y: self.y1 }, coord! { x: self.x2, y: self.y2 })
    }

    /// `[min_lon, min_lat, max_lon, max_lat]`
    pub fn to_array(&self) -> [f64; 4] { [self.x1, self.y1, self.x2, self.y2] }

    /// Bit patterns of the four corners, usable as an exact hash key.
    pub(crate) fn key_bits(&self) -> [u64; 4] {
        self.to_array().map(f64::to_bits)
    }
}

/// Exact ties round to even, matching the dashboard's decimal rounding.
fn round_digits(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round_ties_even() / scale
}

/// Pad the viewport outward by `10^-round_to` and round every corner to
/// `round_to` decimal places.
pub fn normalize(viewport: &Viewport, round_to: u32) -> Result<BoundingBox, OsmViewError> {
    normalize_with_pad(viewport, round_to, round_to)
}

/// Like [`normalize`], but the pad is `10^-pad_digits` instead of following `round_to`.
///
/// Padding keeps a collapsed (single point) viewport from producing a
/// zero-area polygon; rounding keeps sub-pixel pans from changing the query.
/// The pad must be at least one rounding step (`pad_digits <= round_to`),
/// otherwise rounding can erase it and pull an edge inside the viewport.
pub fn normalize_with_pad(viewport: &Viewport, round_to: u32, pad_digits: u32) -> Result<BoundingBox, OsmViewError> {
    if round_to > MAX_ROUND_TO || pad_digits > MAX_ROUND_TO {
        return Err(OsmViewError::invalid(format!(
            "round_to and pad digits must be at most {MAX_ROUND_TO}, got {round_to} and {pad_digits}"
        )));
    }
    if pad_digits > round_to {
        return Err(OsmViewError::invalid(format!(
            "pad digits ({pad_digits}) must not exceed round_to ({round_to})"
        )));
    }
    viewport.validate()?;

    let pad = 10f64.powi(-(pad_digits as i32));
    let Viewport { south_west: sw, north_east: ne } = *viewport;
    Ok(BoundingBox {
        x1: round_digits(sw.lng - pad, round_to),
        y1: round_digits(sw.lat - pad, round_to),
        x2: round_digits(ne.lng + pad, round_to),
        y2: round_digits(ne.lat + pad, round_to),
    })
}
