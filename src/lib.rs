#![doc = "OsmView public API: viewport normalization, categorical coloring and GeoJSON assembly for OpenStreetMap queries"]
mod cache;
mod color;
mod config;
mod error;
mod explorer;
mod feature;
mod query;
mod session;
mod source;
mod style;
mod viewport;

#[doc(inline)]
pub use cache::QueryCache;

#[doc(inline)]
pub use color::{assign_colors, distinct_values, golden_angle_palette, CategoryColorMap, Hsl, Rgb, DEFAULT_PALETTE};

#[doc(inline)]
pub use config::Config;

#[doc(inline)]
pub use error::OsmViewError;

#[doc(inline)]
pub use explorer::{Explorer, Redraw, Selection};

#[doc(inline)]
pub use feature::{assemble, AssembleOptions, ColorBasis, Feature, FeatureCollection, Fields, Record, COLOR_KEY};

#[doc(inline)]
pub use query::{quote_literal, state_capitals_sql, tag_values_sql, GeometryTable, QueryKey, QueryRequest, DEFAULT_ROW_LIMIT, ROW_LIMITS};

#[doc(inline)]
pub use session::{Capital, ViewState, CAPITAL_ZOOM, DEFAULT_ZOOM};

#[doc(inline)]
pub use source::{read_csv_bytes, read_geojson_rows, read_rows, CachedSource, MemSource, RowSource};

#[doc(inline)]
pub use style::{style_for, styled_collection, StyleDirective, FALLBACK_COLOR};

#[doc(inline)]
pub use viewport::{normalize, normalize_with_pad, BoundingBox, LatLng, Viewport, DEFAULT_ROUND_TO, MAX_ROUND_TO};
