//! Geographic primitives
//!
//! Provides validated latitude/longitude points, the rectangular map area a
//! mosaic is requested for, and the WGS84 geodesic stepping engine used to
//! derive tile-center coordinates.

pub mod stepper;

use std::fmt;

use thiserror::Error;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;
/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;
/// Maximum supported zoom level (the Google imagery ceiling).
pub const MAX_ZOOM: u8 = 22;

/// Errors from constructing geographic primitives.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude outside [-90, 90].
    #[error("invalid latitude {0} (must be within [-90, 90])")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180].
    #[error("invalid longitude {0} (must be within [-180, 180])")]
    InvalidLongitude(f64),

    /// Zoom level beyond the supported maximum.
    #[error("invalid zoom level {0} (max {MAX_ZOOM})")]
    InvalidZoom(u8),

    /// The two corners do not span a non-empty rectangle.
    #[error(
        "degenerate area: bottom-right corner ({br_lat}, {br_lon}) must lie strictly south and \
         east of upper-left corner ({ul_lat}, {ul_lon})"
    )]
    DegenerateArea {
        ul_lat: f64,
        ul_lon: f64,
        br_lat: f64,
        br_lon: f64,
    },
}

/// A geographic point in decimal degrees on the WGS84 datum.
///
/// Immutable once constructed; `new` rejects out-of-range coordinates so a
/// `GeoPoint` held anywhere in the pipeline is always valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Create a validated geographic point.
    ///
    /// # Arguments
    ///
    /// * `lat` - Latitude in degrees (-90.0 to 90.0)
    /// * `lon` - Longitude in degrees (-180.0 to 180.0)
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordError> {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(CoordError::InvalidLongitude(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Construct without range checks.
    ///
    /// For results of geodesic computations, which stay in range by
    /// construction (the solver normalizes longitude and latitude).
    pub(crate) fn from_raw(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// The rectangular geographic area a mosaic is requested for.
///
/// Owned by the caller for the whole run. The invariant checked at
/// construction: the bottom-right corner lies strictly south and strictly
/// east of the upper-left corner, so the rectangle is non-degenerate and
/// never crosses the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapArea {
    upper_left: GeoPoint,
    bottom_right: GeoPoint,
    zoom: u8,
}

impl MapArea {
    /// Create a validated map area.
    ///
    /// # Errors
    ///
    /// `CoordError::DegenerateArea` if the corners do not span a rectangle,
    /// `CoordError::InvalidZoom` if `zoom` exceeds [`MAX_ZOOM`].
    pub fn new(upper_left: GeoPoint, bottom_right: GeoPoint, zoom: u8) -> Result<Self, CoordError> {
        if bottom_right.lat() >= upper_left.lat() || bottom_right.lon() <= upper_left.lon() {
            return Err(CoordError::DegenerateArea {
                ul_lat: upper_left.lat(),
                ul_lon: upper_left.lon(),
                br_lat: bottom_right.lat(),
                br_lon: bottom_right.lon(),
            });
        }
        if zoom > MAX_ZOOM {
            return Err(CoordError::InvalidZoom(zoom));
        }
        Ok(Self {
            upper_left,
            bottom_right,
            zoom,
        })
    }

    /// The upper-left (northwest) corner.
    pub fn upper_left(&self) -> GeoPoint {
        self.upper_left
    }

    /// The bottom-right (southeast) corner.
    pub fn bottom_right(&self) -> GeoPoint {
        self.bottom_right
    }

    /// The requested zoom level.
    pub fn zoom(&self) -> u8 {
        self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_accepts_valid_coordinates() {
        let p = GeoPoint::new(50.070309, 20.148801).unwrap();
        assert_eq!(p.lat(), 50.070309);
        assert_eq!(p.lon(), 20.148801);
    }

    #[test]
    fn test_geo_point_accepts_boundaries() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_geo_point_rejects_bad_latitude() {
        let result = GeoPoint::new(90.01, 0.0);
        assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
    }

    #[test]
    fn test_geo_point_rejects_bad_longitude() {
        let result = GeoPoint::new(0.0, -180.5);
        assert!(matches!(result, Err(CoordError::InvalidLongitude(_))));
    }

    #[test]
    fn test_geo_point_display_is_lat_comma_lon() {
        let p = GeoPoint::new(52.050808, -0.555724).unwrap();
        assert_eq!(p.to_string(), "52.050808,-0.555724");
    }

    #[test]
    fn test_map_area_valid_rectangle() {
        let ul = GeoPoint::new(50.070309, 20.148801).unwrap();
        let br = GeoPoint::new(50.066805, 20.152602).unwrap();
        let area = MapArea::new(ul, br, 17).unwrap();
        assert_eq!(area.zoom(), 17);
        assert_eq!(area.upper_left(), ul);
        assert_eq!(area.bottom_right(), br);
    }

    #[test]
    fn test_map_area_rejects_swapped_latitudes() {
        let ul = GeoPoint::new(50.0, 20.0).unwrap();
        let br = GeoPoint::new(51.0, 21.0).unwrap();
        assert!(matches!(
            MapArea::new(ul, br, 17),
            Err(CoordError::DegenerateArea { .. })
        ));
    }

    #[test]
    fn test_map_area_rejects_swapped_longitudes() {
        let ul = GeoPoint::new(51.0, 21.0).unwrap();
        let br = GeoPoint::new(50.0, 20.0).unwrap();
        assert!(matches!(
            MapArea::new(ul, br, 17),
            Err(CoordError::DegenerateArea { .. })
        ));
    }

    #[test]
    fn test_map_area_rejects_zero_extent() {
        let p = GeoPoint::new(50.0, 20.0).unwrap();
        assert!(matches!(
            MapArea::new(p, p, 17),
            Err(CoordError::DegenerateArea { .. })
        ));
    }

    #[test]
    fn test_map_area_rejects_excessive_zoom() {
        let ul = GeoPoint::new(51.0, 20.0).unwrap();
        let br = GeoPoint::new(50.0, 21.0).unwrap();
        assert!(matches!(
            MapArea::new(ul, br, MAX_ZOOM + 1),
            Err(CoordError::InvalidZoom(_))
        ));
    }

    #[test]
    fn test_map_area_accepts_max_zoom() {
        let ul = GeoPoint::new(51.0, 20.0).unwrap();
        let br = GeoPoint::new(50.0, 21.0).unwrap();
        assert!(MapArea::new(ul, br, MAX_ZOOM).is_ok());
    }
}
