//! Tile-grid planning
//!
//! Converts a [`MapArea`] into everything the assembler needs before the
//! first fetch: the meters-per-pixel resolution at the requested zoom, the
//! real-world extent of the rectangle, the pixel canvas size, the tile
//! counts in each direction, and the fixed geodesic step distances the
//! traversal uses.
//!
//! All of it is derived once, up front, and captured in an immutable
//! [`GridPlan`].

use thiserror::Error;
use tracing::debug;

use crate::config::StitchConfig;
use crate::geo::{stepper, GeoPoint, MapArea, MAX_ZOOM};

/// Errors from grid planning.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    /// Zoom level beyond the supported maximum.
    #[error("invalid zoom level {0} (max {MAX_ZOOM})")]
    InvalidZoom(u8),

    /// The requested rectangle has no positive extent.
    #[error("degenerate area: width {width_m:.1} m, height {height_m:.1} m (both must be positive)")]
    DegenerateArea { width_m: f64, height_m: f64 },

    /// The zoom/area combination would need more tiles than allowed.
    #[error("grid of {tiles_x}x{tiles_y} tiles exceeds the configured maximum of {max}")]
    GridTooLarge { tiles_x: u32, tiles_y: u32, max: u32 },
}

/// Everything derived from a [`MapArea`] before assembly starts.
///
/// Read-only after creation. The pixel fields are at least 1 and the
/// distance fields strictly positive for any plan this module returns.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlan {
    /// Ground meters represented by one pixel at the mosaic's zoom and
    /// reference latitude.
    pub meter_per_pixel: f64,

    /// Output canvas width in pixels.
    pub canvas_width_px: u32,

    /// Output canvas height in pixels.
    pub canvas_height_px: u32,

    /// Number of tile columns.
    pub tiles_x: u32,

    /// Number of tile rows.
    pub tiles_y: u32,

    /// Tile edge length in pixels.
    pub tile_size_px: u32,

    /// Ground distance one tile spans along one axis, in meters.
    pub step_distance_m: f64,

    /// Half the tile diagonal in meters; offsets the rectangle's upper-left
    /// corner to the center of the first tile. Always the fixed half
    /// diagonal regardless of the rectangle's aspect ratio, which leaves a
    /// small uncorrected bias for areas much larger than one tile in a
    /// single axis.
    pub diagonal_distance_m: f64,
}

impl GridPlan {
    /// Total number of tiles in the grid.
    pub fn tile_count(&self) -> u32 {
        self.tiles_x * self.tiles_y
    }
}

/// Meters per pixel at `zoom` and `reference_lat_deg` under a
/// Web-Mercator-style projection.
///
/// `base_resolution` is the provider's documented meters-per-pixel at zoom 0
/// on the equator. The value halves with every zoom step and shrinks with
/// the cosine of latitude; it is computed once at the mosaic's upper-left
/// latitude and treated as constant for the whole grid.
pub fn resolution(base_resolution: f64, zoom: u8, reference_lat_deg: f64) -> Result<f64, GridError> {
    if zoom > MAX_ZOOM {
        return Err(GridError::InvalidZoom(zoom));
    }
    Ok(base_resolution * reference_lat_deg.to_radians().cos() / 2_f64.powi(zoom as i32))
}

/// Real-world extent of the area in meters, as (width, height).
///
/// Both are ellipsoidal geodesic inverse distances: width from the
/// upper-left corner to the point due east of it on the bottom-right
/// longitude, height from the upper-left corner to the point due south of
/// it on the bottom-right latitude. A planar approximation is not good
/// enough here; it skews the canvas size at high latitudes and over longer
/// spans.
pub fn area_size(area: &MapArea) -> Result<(f64, f64), GridError> {
    let ul = area.upper_left();
    let br = area.bottom_right();

    let east_corner = GeoPoint::from_raw(ul.lat(), br.lon());
    let south_corner = GeoPoint::from_raw(br.lat(), ul.lon());

    let width_m = stepper::geodesic_distance(ul, east_corner);
    let height_m = stepper::geodesic_distance(ul, south_corner);

    if width_m <= 0.0 || height_m <= 0.0 {
        return Err(GridError::DegenerateArea { width_m, height_m });
    }
    Ok((width_m, height_m))
}

/// Plan the full tile grid for `area`.
///
/// # Errors
///
/// * [`GridError::InvalidZoom`] - zoom beyond [`MAX_ZOOM`]
/// * [`GridError::DegenerateArea`] - rectangle with no positive extent
/// * [`GridError::GridTooLarge`] - more tiles than `config.max_tile_count`
pub fn plan(area: &MapArea, config: &StitchConfig) -> Result<GridPlan, GridError> {
    let meter_per_pixel = resolution(config.base_resolution, area.zoom(), area.upper_left().lat())?;
    let (width_m, height_m) = area_size(area)?;

    let canvas_width_px = (width_m / meter_per_pixel).ceil() as u32;
    let canvas_height_px = (height_m / meter_per_pixel).ceil() as u32;

    let tile_size_px = config.tile_size_px;
    let tiles_x = canvas_width_px.div_ceil(tile_size_px);
    let tiles_y = canvas_height_px.div_ceil(tile_size_px);

    if tiles_x as u64 * tiles_y as u64 > config.max_tile_count as u64 {
        return Err(GridError::GridTooLarge {
            tiles_x,
            tiles_y,
            max: config.max_tile_count,
        });
    }

    let step_distance_m = tile_size_px as f64 * meter_per_pixel;
    let diagonal_distance_m = std::f64::consts::SQRT_2 * tile_size_px as f64 * meter_per_pixel / 2.0;

    debug!(
        zoom = area.zoom(),
        meter_per_pixel,
        width_m,
        height_m,
        canvas_width_px,
        canvas_height_px,
        tiles_x,
        tiles_y,
        step_distance_m,
        "planned mosaic grid"
    );

    Ok(GridPlan {
        meter_per_pixel,
        canvas_width_px,
        canvas_height_px,
        tiles_x,
        tiles_y,
        tile_size_px,
        step_distance_m,
        diagonal_distance_m,
    })
}
