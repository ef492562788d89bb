use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::OsmViewError;

/// The three OpenStreetMap geometry tables a user can browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryTable {
    Point,
    Line,
    Polygon,
}

impl GeometryTable {
    pub const ALL: [GeometryTable; 3] = [Self::Point, Self::Line, Self::Polygon];

    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::Polygon => "polygon",
        }
    }

    /// Warehouse table holding this geometry type.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Point => "planet_osm_point",
            Self::Line => "planet_osm_line",
            Self::Polygon => "planet_osm_polygon",
        }
    }

    /// Columns offered for coloring and tag filtering.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Point => &[
                "amenity", "shop", "tourism", "leisure", "historic", "man_made",
                "natural", "place", "power", "railway", "sport",
            ],
            Self::Line => &[
                "highway", "railway", "waterway", "power", "route", "barrier",
                "aeroway", "bridge", "tunnel",
            ],
            Self::Polygon => &[
                "building", "landuse", "leisure", "natural", "amenity", "boundary",
                "water", "wetland", "tourism",
            ],
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns().contains(&column)
    }

    pub(crate) fn check_column(&self, column: &str) -> Result<(), OsmViewError> {
        if self.has_column(column) { return Ok(()) }
        Err(OsmViewError::invalid(format!(
            "column {column:?} is not available for {} geometries", self.to_str()
        )))
    }
}

impl fmt::Display for GeometryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for GeometryTable {
    type Err = OsmViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter()
            .find(|t| t.to_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| OsmViewError::invalid(format!("unknown geometry table {s:?}")))
    }
}
