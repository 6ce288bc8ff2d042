//! Mosaic stitching configuration.
//!
//! `StitchConfig` gathers every tunable the planner and assembler need so
//! callers pass one explicit, immutable value instead of relying on
//! module-level constants.

use std::time::Duration;

/// Meters per pixel at zoom level 0 on the equator for Web-Mercator-style
/// satellite tile providers (2 * pi * 6378137 / 256).
pub const DEFAULT_BASE_RESOLUTION: f64 = 156_543.033_92;

/// Default tile edge length in pixels.
///
/// 640 is the largest square size the Google Static Maps API serves per
/// request without premium scaling.
pub const DEFAULT_TILE_SIZE_PX: u32 = 640;

/// Default ceiling on tiles fetched for a single mosaic.
///
/// A 32x32 grid covers roughly 20 km x 20 km at zoom 17 and takes about
/// nine minutes at the default fetch delay. Anything larger is almost
/// certainly a mistyped zoom level or corner coordinate.
pub const DEFAULT_MAX_TILE_COUNT: u32 = 1024;

/// Default politeness delay between consecutive tile fetches.
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(500);

/// Configuration for planning and assembling one mosaic.
#[derive(Clone, Debug)]
pub struct StitchConfig {
    /// Provider meters-per-pixel at zoom 0 on the equator.
    pub base_resolution: f64,

    /// Tile edge length in pixels (tiles are square).
    pub tile_size_px: u32,

    /// Maximum tiles_x * tiles_y allowed for one mosaic.
    pub max_tile_count: u32,

    /// Delay slept between one tile fetch and the next.
    pub fetch_delay: Duration,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            base_resolution: DEFAULT_BASE_RESOLUTION,
            tile_size_px: DEFAULT_TILE_SIZE_PX,
            max_tile_count: DEFAULT_MAX_TILE_COUNT,
            fetch_delay: DEFAULT_FETCH_DELAY,
        }
    }
}

impl StitchConfig {
    /// Create a config with the default provider constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base resolution (meters per pixel at zoom 0, equator).
    pub fn with_base_resolution(mut self, meters_per_pixel: f64) -> Self {
        self.base_resolution = meters_per_pixel;
        self
    }

    /// Set the tile edge length in pixels.
    pub fn with_tile_size_px(mut self, tile_size_px: u32) -> Self {
        self.tile_size_px = tile_size_px;
        self
    }

    /// Set the maximum allowed tile count.
    pub fn with_max_tile_count(mut self, max_tile_count: u32) -> Self {
        self.max_tile_count = max_tile_count;
        self
    }

    /// Set the politeness delay between tile fetches.
    pub fn with_fetch_delay(mut self, fetch_delay: Duration) -> Self {
        self.fetch_delay = fetch_delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_provider_constants() {
        let config = StitchConfig::default();
        assert_eq!(config.base_resolution, DEFAULT_BASE_RESOLUTION);
        assert_eq!(config.tile_size_px, 640);
        assert_eq!(config.max_tile_count, DEFAULT_MAX_TILE_COUNT);
        assert_eq!(config.fetch_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_builder_overrides() {
        let config = StitchConfig::new()
            .with_tile_size_px(256)
            .with_max_tile_count(16)
            .with_fetch_delay(Duration::ZERO);
        assert_eq!(config.tile_size_px, 256);
        assert_eq!(config.max_tile_count, 16);
        assert!(config.fetch_delay.is_zero());
        // Untouched fields keep their defaults
        assert_eq!(config.base_resolution, DEFAULT_BASE_RESOLUTION);
    }
}
