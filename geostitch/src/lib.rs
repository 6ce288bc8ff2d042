//! GeoStitch - satellite mosaic stitching for geographic rectangles
//!
//! This library turns two corner coordinates and a zoom level into one
//! composite satellite image. It plans a pixel-accurate tile grid from
//! ellipsoidal geodesic distances, walks the grid by geodesic stepping, and
//! pastes one provider tile per cell into an output canvas.
//!
//! # Pipeline
//!
//! ```text
//! MapArea ──► grid::plan ──► GridPlan ──► MosaicAssembler
//!                                          │  GridTraversal (geodesic stepping)
//!                                          │  TileProvider  (one fetch per tile)
//!                                          ▼
//!                                     MosaicCanvas
//! ```
//!
//! # Example
//!
//! ```no_run
//! use geostitch::assembler::MosaicAssembler;
//! use geostitch::config::StitchConfig;
//! use geostitch::geo::{GeoPoint, MapArea};
//! use geostitch::provider::{GoogleStaticMapsProvider, ReqwestClient};
//!
//! let area = MapArea::new(
//!     GeoPoint::new(50.070309, 20.148801)?,
//!     GeoPoint::new(50.066805, 20.152602)?,
//!     17,
//! )?;
//!
//! let client = ReqwestClient::new()?;
//! let provider = GoogleStaticMapsProvider::new(client, "API_KEY".to_string());
//! let assembler = MosaicAssembler::new(provider, StitchConfig::default());
//!
//! let canvas = assembler.assemble(&area)?;
//! canvas.save("mosaic.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assembler;
pub mod canvas;
pub mod config;
pub mod geo;
pub mod grid;
pub mod provider;

/// Crate version, as reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version_is_not_empty() {
        assert!(!super::VERSION.is_empty());
    }
}
