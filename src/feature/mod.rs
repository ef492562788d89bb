//! GeoJSON features assembled from warehouse query rows.

mod assemble;
mod collection;

pub(crate) use assemble::category;
pub use assemble::{assemble, AssembleOptions, ColorBasis, Fields, Record, COLOR_KEY};
pub use collection::{Feature, FeatureCollection};
