use geo::{
    BoundingRect, Coord, Geometry, GeometryCollection, Intersects, LineString, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon, Rect,
};
use rstar::{RTreeObject, AABB};
use serde_json::Value;

/// A record's geometry in an R-tree, associated with the record by index.
///
/// The tree is searched by bounding rectangle; [`Envelope::intersects`] then
/// tests the geometry itself, so a diagonal line whose envelope overlaps a
/// box without the line crossing it is not a match.
#[derive(Debug, Clone)]
pub(super) struct Envelope {
    idx: usize, // Index of corresponding record in rows
    bbox: Rect<f64>,
    shape: Geometry<f64>,
}

impl Envelope {
    /// `None` when the GeoJSON is not a geometry with at least one position.
    pub(super) fn from_geojson(idx: usize, geometry: &Value) -> Option<Self> {
        let shape = parse_geometry(geometry)?;
        let bbox = shape.bounding_rect()?;
        Some(Self { idx, bbox, shape })
    }

    pub(super) fn idx(&self) -> usize { self.idx }

    pub(super) fn intersects(&self, rect: &Rect<f64>) -> bool {
        self.shape.intersects(rect)
    }
}

impl RTreeObject for Envelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

fn parse_coord(value: &Value) -> Option<Coord<f64>> {
    let pair = value.as_array()?;
    let x = pair.first()?.as_f64()?;
    let y = pair.get(1)?.as_f64()?;
    (x.is_finite() && y.is_finite()).then_some(Coord { x, y })
}

fn parse_line(value: &Value) -> Option<LineString<f64>> {
    value.as_array()?.iter().map(parse_coord).collect::<Option<Vec<_>>>().map(LineString::new)
}

fn parse_polygon(value: &Value) -> Option<Polygon<f64>> {
    let rings = value.as_array()?;
    let exterior = parse_line(rings.first()?)?;
    let interiors = rings[1..].iter().map(parse_line).collect::<Option<Vec<_>>>()?;
    Some(Polygon::new(exterior, interiors))
}

fn parse_many<T>(value: &Value, parse: fn(&Value) -> Option<T>) -> Option<Vec<T>> {
    value.as_array()?.iter().map(parse).collect()
}

/// Convert a GeoJSON geometry object into a `geo::Geometry`.
fn parse_geometry(geometry: &Value) -> Option<Geometry<f64>> {
    let coords = geometry.get("coordinates");
    Some(match geometry.get("type")?.as_str()? {
        "Point" => Geometry::Point(Point(parse_coord(coords?)?)),
        "MultiPoint" => Geometry::MultiPoint(MultiPoint::new(
            parse_many(coords?, parse_coord)?.into_iter().map(Point).collect(),
        )),
        "LineString" => Geometry::LineString(parse_line(coords?)?),
        "MultiLineString" => Geometry::MultiLineString(MultiLineString::new(parse_many(coords?, parse_line)?)),
        "Polygon" => Geometry::Polygon(parse_polygon(coords?)?),
        "MultiPolygon" => Geometry::MultiPolygon(MultiPolygon::new(parse_many(coords?, parse_polygon)?)),
        "GeometryCollection" => Geometry::GeometryCollection(GeometryCollection(
            parse_many(geometry.get("geometries")?, parse_geometry)?,
        )),
        _ => return None,
    })
}
