//! Google Static Maps satellite imagery provider.
//!
//! Fetches square satellite tiles addressed by center coordinate and zoom
//! level from the Maps Static API:
//!
//! `https://maps.googleapis.com/maps/api/staticmap?center={lat},{lon}&zoom={z}&size={s}x{s}&maptype=satellite&key={API_KEY}`
//!
//! Requires a Google Maps Platform API key with the Maps Static API
//! enabled. Unlike XYZ tile endpoints, the Static Maps API renders a tile
//! around any requested center point, which is what the geodesic grid
//! traversal needs: tile centers land on geodesically stepped coordinates,
//! not on a fixed Web Mercator grid.

use crate::geo::GeoPoint;
use crate::provider::{HttpClient, ProviderError, TileProvider};

/// Largest square size the Static Maps API serves per request.
const MAX_STATIC_MAP_SIZE_PX: u32 = 640;

/// Google Static Maps satellite imagery provider.
///
/// # Example
///
/// ```no_run
/// use geostitch::provider::{GoogleStaticMapsProvider, ReqwestClient};
///
/// let client = ReqwestClient::new().unwrap();
/// let provider = GoogleStaticMapsProvider::new(client, "YOUR_API_KEY".to_string());
/// ```
pub struct GoogleStaticMapsProvider<C: HttpClient> {
    http_client: C,
    api_key: String,
    maptype: String,
    tile_size_px: u32,
}

impl<C: HttpClient> GoogleStaticMapsProvider<C> {
    /// Creates a new provider serving 640x640 satellite tiles.
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client for making requests
    /// * `api_key` - Valid Google Maps Platform API key
    pub fn new(http_client: C, api_key: String) -> Self {
        Self {
            http_client,
            api_key,
            maptype: "satellite".to_string(),
            tile_size_px: MAX_STATIC_MAP_SIZE_PX,
        }
    }

    /// Use a smaller tile edge length (capped at the API maximum of 640).
    pub fn with_tile_size(mut self, tile_size_px: u32) -> Self {
        self.tile_size_px = tile_size_px.min(MAX_STATIC_MAP_SIZE_PX);
        self
    }

    /// Builds the Static Maps URL for a tile centered at `center`.
    fn build_url(&self, center: GeoPoint, zoom: u8) -> String {
        format!(
            "https://maps.googleapis.com/maps/api/staticmap?center={}&zoom={}&size={}x{}&maptype={}&key={}",
            center, zoom, self.tile_size_px, self.tile_size_px, self.maptype, self.api_key
        )
    }
}

impl<C: HttpClient> TileProvider for GoogleStaticMapsProvider<C> {
    fn fetch_tile(&self, center: GeoPoint, zoom: u8) -> Result<Vec<u8>, ProviderError> {
        if !self.supports_zoom(zoom) {
            return Err(ProviderError::UnsupportedZoom(zoom));
        }

        let url = self.build_url(center, zoom);
        let body = self.http_client.get(&url)?;
        if body.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "empty tile response body".to_string(),
            ));
        }
        Ok(body)
    }

    fn name(&self) -> &str {
        "Google Static Maps"
    }

    fn tile_size_px(&self) -> u32 {
        self.tile_size_px
    }

    fn min_zoom(&self) -> u8 {
        0
    }

    fn max_zoom(&self) -> u8 {
        22
    }
}
