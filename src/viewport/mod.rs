mod bbox;
mod viewport;

pub use bbox::{normalize, normalize_with_pad, BoundingBox, DEFAULT_ROUND_TO, MAX_ROUND_TO};
pub use viewport::{LatLng, Viewport};
