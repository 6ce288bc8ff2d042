//! Mosaic assembly
//!
//! Drives the whole pipeline for one mosaic: plan the grid, walk it in
//! row-major order, fetch one tile per cell through the [`TileProvider`],
//! decode it, and paste it at its precomputed pixel offset. Strictly
//! sequential with a politeness delay between fetches; the first failure of
//! any tile aborts the run with no partial output.

mod traversal;

pub use traversal::{GridTraversal, TilePlacement};

use std::io::Cursor;
use std::thread;

use image::ImageReader;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::canvas::{CanvasError, MosaicCanvas};
use crate::config::StitchConfig;
use crate::geo::{CoordError, MapArea};
use crate::grid::{self, GridError};
use crate::provider::{ProviderError, TileProvider};

/// Errors from assembling a mosaic, identifying the stage that failed.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// Invalid geographic input.
    #[error("coordinate error: {0}")]
    Coord(#[from] CoordError),

    /// Grid planning failed (zoom, area extent, or tile budget).
    #[error("grid planning failed: {0}")]
    Grid(#[from] GridError),

    /// A tile fetch failed; the mosaic is abandoned.
    #[error("failed to fetch tile {index} of {total} centered at ({lat}, {lon}): {source}")]
    TileFetch {
        index: u32,
        total: u32,
        lat: f64,
        lon: f64,
        source: ProviderError,
    },

    /// A fetched tile could not be decoded as an image.
    #[error("failed to decode tile {index} of {total}: {reason}")]
    TileDecode {
        index: u32,
        total: u32,
        reason: String,
    },

    /// A canvas paste landed outside the canvas.
    #[error("canvas write failed: {0}")]
    Canvas(#[from] CanvasError),
}

/// Assembles mosaics by fetching and pasting one tile per grid cell.
///
/// Owns its provider and configuration for the lifetime of the run; the
/// canvas is created per call and handed back to the caller, which decides
/// separately whether and where to save it.
///
/// # Example
///
/// ```no_run
/// use geostitch::assembler::MosaicAssembler;
/// use geostitch::config::StitchConfig;
/// use geostitch::geo::{GeoPoint, MapArea};
/// use geostitch::provider::{GoogleStaticMapsProvider, ReqwestClient};
///
/// let area = MapArea::new(
///     GeoPoint::new(50.070309, 20.148801).unwrap(),
///     GeoPoint::new(50.066805, 20.152602).unwrap(),
///     17,
/// )
/// .unwrap();
///
/// let client = ReqwestClient::new().unwrap();
/// let provider = GoogleStaticMapsProvider::new(client, "API_KEY".to_string());
/// let assembler = MosaicAssembler::new(provider, StitchConfig::default());
///
/// let canvas = assembler.assemble(&area).unwrap();
/// canvas.save("mosaic.png").unwrap();
/// ```
pub struct MosaicAssembler<P: TileProvider> {
    provider: P,
    config: StitchConfig,
}

impl<P: TileProvider> MosaicAssembler<P> {
    /// Create an assembler from a provider and configuration.
    pub fn new(provider: P, config: StitchConfig) -> Self {
        if provider.tile_size_px() != config.tile_size_px {
            warn!(
                provider_tile_px = provider.tile_size_px(),
                config_tile_px = config.tile_size_px,
                "provider and config disagree on tile size; the grid is planned with the config value"
            );
        }
        Self { provider, config }
    }

    /// Borrow the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetch and assemble the full mosaic for `area`.
    ///
    /// Tiles are fetched and pasted in strict row-major order, one at a
    /// time, sleeping the configured politeness delay before each fetch
    /// after the first. Any failure aborts immediately; no partial canvas
    /// is ever returned.
    pub fn assemble(&self, area: &MapArea) -> Result<MosaicCanvas, AssemblyError> {
        let plan = grid::plan(area, &self.config)?;
        let total = plan.tile_count();

        info!(
            zoom = area.zoom(),
            meter_per_pixel = plan.meter_per_pixel,
            canvas_width_px = plan.canvas_width_px,
            canvas_height_px = plan.canvas_height_px,
            tiles_x = plan.tiles_x,
            tiles_y = plan.tiles_y,
            provider = self.provider.name(),
            "assembling mosaic"
        );

        let mut canvas = MosaicCanvas::new(plan.canvas_width_px, plan.canvas_height_px);

        for (i, placement) in GridTraversal::new(area.upper_left(), &plan).enumerate() {
            let index = i as u32 + 1;

            if i > 0 && !self.config.fetch_delay.is_zero() {
                thread::sleep(self.config.fetch_delay);
            }

            debug!(
                index,
                total,
                lat = placement.center.lat(),
                lon = placement.center.lon(),
                offset_x = placement.offset_x,
                offset_y = placement.offset_y,
                "fetching tile"
            );

            let bytes = self
                .provider
                .fetch_tile(placement.center, area.zoom())
                .map_err(|source| AssemblyError::TileFetch {
                    index,
                    total,
                    lat: placement.center.lat(),
                    lon: placement.center.lon(),
                    source,
                })?;

            let tile = ImageReader::new(Cursor::new(&bytes))
                .with_guessed_format()
                .map_err(|e| AssemblyError::TileDecode {
                    index,
                    total,
                    reason: e.to_string(),
                })?
                .decode()
                .map_err(|e| AssemblyError::TileDecode {
                    index,
                    total,
                    reason: e.to_string(),
                })?
                .to_rgb8();

            canvas.paste(&tile, placement.offset_x, placement.offset_y)?;
        }

        info!(tiles = total, "mosaic assembly complete");
        Ok(canvas)
    }
}

/// Deterministic output filename for an area: the upper-left corner plus
/// the zoom level.
pub fn default_output_name(area: &MapArea) -> String {
    format!(
        "map_{}_{}_z{}.png",
        area.upper_left().lat(),
        area.upper_left().lon(),
        area.zoom()
    )
}
