//! Categorical coloring for map features.

mod palette;
mod rgb;

pub(crate) use palette::palette_slots;
pub use palette::{assign_colors, distinct_values, golden_angle_palette, CategoryColorMap, DEFAULT_PALETTE};
pub use rgb::{Hsl, Rgb};
