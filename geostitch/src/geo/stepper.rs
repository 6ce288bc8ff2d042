//! Stateless WGS84 geodesic stepping engine.
//!
//! Wraps the `geo` crate's Karney geodesic solver in lat/lon terms. Both the
//! direct problem (point + bearing + distance -> point) and the inverse
//! problem (point + point -> distance) run on the full WGS84 ellipsoid;
//! a flat-earth approximation would accumulate visible drift over the many
//! small steps a mosaic traversal takes.
//!
//! All traversal state lives in the caller; these functions are pure.

use geo::{GeodesicDestination, GeodesicDistance, Point};

use super::GeoPoint;

/// Bearing due north, in degrees clockwise from north.
pub const BEARING_NORTH: f64 = 0.0;
/// Bearing due east.
pub const BEARING_EAST: f64 = 90.0;
/// Bearing southeast, used to offset from a rectangle corner to the first
/// tile center.
pub const BEARING_SOUTHEAST: f64 = 135.0;
/// Bearing due south.
pub const BEARING_SOUTH: f64 = 180.0;
/// Bearing due west.
pub const BEARING_WEST: f64 = 270.0;

/// Solve the geodesic direct problem: the point reached by travelling
/// `distance_m` meters from `origin` along the initial bearing
/// `bearing_deg` (degrees clockwise from north).
///
/// # Example
///
/// ```
/// use geostitch::geo::stepper::{geodesic_destination, BEARING_NORTH};
/// use geostitch::geo::GeoPoint;
///
/// let origin = GeoPoint::new(50.0, 20.0).unwrap();
/// let north = geodesic_destination(origin, BEARING_NORTH, 1000.0);
/// assert!(north.lat() > origin.lat());
/// ```
#[inline]
pub fn geodesic_destination(origin: GeoPoint, bearing_deg: f64, distance_m: f64) -> GeoPoint {
    // geo::Point is (x, y) = (lon, lat)
    let start = Point::new(origin.lon(), origin.lat());
    let end = start.geodesic_destination(bearing_deg, distance_m);
    GeoPoint::from_raw(end.y(), end.x())
}

/// Solve the geodesic inverse problem: the ellipsoidal distance in meters
/// between two points.
#[inline]
pub fn geodesic_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let pa = Point::new(a.lon(), a.lat());
    let pb = Point::new(b.lon(), b.lat());
    pa.geodesic_distance(&pb)
}
