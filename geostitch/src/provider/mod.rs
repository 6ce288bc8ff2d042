//! Map tile provider abstraction
//!
//! This module provides the trait and implementations for fetching square
//! satellite tiles addressed by center coordinate and zoom level, plus the
//! HTTP seam that lets tests inject canned responses.

mod google;
mod http;

use std::fmt;

use crate::geo::GeoPoint;

pub use google::GoogleStaticMapsProvider;
pub use http::{HttpClient, ReqwestClient};

#[cfg(test)]
pub use http::tests::MockHttpClient;

/// Errors that can occur while fetching a tile from a provider.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// HTTP request failed
    HttpError(String),
    /// Zoom level not supported by this provider
    UnsupportedZoom(u8),
    /// Response body was not a usable tile image
    InvalidResponse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::UnsupportedZoom(zoom) => {
                write!(f, "Zoom level {} not supported by provider", zoom)
            }
            ProviderError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Trait for satellite tile providers.
///
/// Implementors return one square tile image centered on the given
/// geographic coordinate at the given zoom level. Retry and backoff, if
/// wanted, belong behind this boundary; the assembly core never retries.
pub trait TileProvider: Send + Sync {
    /// Fetch one tile image centered at `center`.
    ///
    /// # Returns
    ///
    /// Raw encoded image data (typically PNG or JPEG) spanning
    /// `tile_size_px` x `tile_size_px` pixels, or an error.
    fn fetch_tile(&self, center: GeoPoint, zoom: u8) -> Result<Vec<u8>, ProviderError>;

    /// The provider's name for logging and identification.
    fn name(&self) -> &str;

    /// Edge length in pixels of the square tiles this provider serves.
    fn tile_size_px(&self) -> u32;

    /// The minimum supported zoom level.
    fn min_zoom(&self) -> u8;

    /// The maximum supported zoom level.
    fn max_zoom(&self) -> u8;

    /// Whether this provider supports the given zoom level.
    fn supports_zoom(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom() && zoom <= self.max_zoom()
    }
}
