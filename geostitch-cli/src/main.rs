//! GeoStitch CLI - Command-line interface
//!
//! Stitches a satellite mosaic for a geographic rectangle and writes it to
//! disk. All the interesting work happens in the `geostitch` library; this
//! binary parses arguments, bootstraps logging, reports progress, and saves
//! the result.

use std::process;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use geostitch::assembler::{default_output_name, MosaicAssembler};
use geostitch::config::StitchConfig;
use geostitch::geo::{GeoPoint, MapArea};
use geostitch::grid;
use geostitch::provider::{
    GoogleStaticMapsProvider, ProviderError, ReqwestClient, TileProvider,
};

#[derive(Parser)]
#[command(name = "geostitch")]
#[command(version = geostitch::VERSION)]
#[command(about = "Stitch a satellite mosaic covering a geographic rectangle", long_about = None)]
struct Args {
    /// Upper-left corner latitude in decimal degrees
    #[arg(long)]
    ul_lat: f64,

    /// Upper-left corner longitude in decimal degrees
    #[arg(long)]
    ul_lon: f64,

    /// Bottom-right corner latitude in decimal degrees
    #[arg(long)]
    br_lat: f64,

    /// Bottom-right corner longitude in decimal degrees
    #[arg(long)]
    br_lon: f64,

    /// Zoom level (0-22)
    #[arg(long, default_value = "17")]
    zoom: u8,

    /// Output file path (derived from the upper-left corner if omitted)
    #[arg(long)]
    output: Option<String>,

    /// Google Maps Platform API key with the Maps Static API enabled
    #[arg(long)]
    google_api_key: String,

    /// Tile edge length in pixels (max 640)
    #[arg(long, default_value = "640")]
    tile_size: u32,

    /// Maximum number of tiles to fetch for one mosaic
    #[arg(long, default_value = "1024")]
    max_tiles: u32,

    /// Politeness delay between tile fetches in milliseconds
    #[arg(long, default_value = "500")]
    delay_ms: u64,
}

/// Provider decorator ticking a progress bar after every fetched tile.
struct ProgressProvider<P> {
    inner: P,
    bar: ProgressBar,
}

impl<P: TileProvider> TileProvider for ProgressProvider<P> {
    fn fetch_tile(&self, center: GeoPoint, zoom: u8) -> Result<Vec<u8>, ProviderError> {
        let result = self.inner.fetch_tile(center, zoom);
        if result.is_ok() {
            self.bar.inc(1);
        }
        result
    }
    fn name(&self) -> &str {
        self.inner.name()
    }
    fn tile_size_px(&self) -> u32 {
        self.inner.tile_size_px()
    }
    fn min_zoom(&self) -> u8 {
        self.inner.min_zoom()
    }
    fn max_zoom(&self) -> u8 {
        self.inner.max_zoom()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let upper_left = match GeoPoint::new(args.ul_lat, args.ul_lon) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: invalid upper-left corner: {}", e);
            process::exit(1);
        }
    };
    let bottom_right = match GeoPoint::new(args.br_lat, args.br_lon) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: invalid bottom-right corner: {}", e);
            process::exit(1);
        }
    };
    let area = match MapArea::new(upper_left, bottom_right, args.zoom) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!(
                "The upper-left corner must lie north and west of the bottom-right corner."
            );
            process::exit(1);
        }
    };

    let http_client = match ReqwestClient::new() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error creating HTTP client: {}", e);
            process::exit(1);
        }
    };
    let provider = GoogleStaticMapsProvider::new(http_client, args.google_api_key)
        .with_tile_size(args.tile_size);

    // The provider caps the tile size at the API maximum; plan the grid
    // with whatever it will actually serve
    let config = StitchConfig::new()
        .with_tile_size_px(provider.tile_size_px())
        .with_max_tile_count(args.max_tiles)
        .with_fetch_delay(Duration::from_millis(args.delay_ms));

    // Plan up front so the user sees the cost before the first fetch
    let plan = match grid::plan(&area, &config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Try reducing the zoom level or shrinking the area.");
            process::exit(1);
        }
    };

    println!("GeoStitch v{}", geostitch::VERSION);
    println!("  Area:       {} -> {}", area.upper_left(), area.bottom_right());
    println!("  Zoom:       {}", area.zoom());
    println!(
        "  Resolution: {:.4} m/pixel",
        plan.meter_per_pixel
    );
    println!(
        "  Canvas:     {}x{} pixels",
        plan.canvas_width_px, plan.canvas_height_px
    );
    println!(
        "  Tiles:      {} ({}x{})",
        plan.tile_count(),
        plan.tiles_x,
        plan.tiles_y
    );
    println!();

    let bar = ProgressBar::new(plan.tile_count() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} tiles ({eta})")
            .expect("valid progress bar template"),
    );

    let assembler = MosaicAssembler::new(
        ProgressProvider {
            inner: provider,
            bar: bar.clone(),
        },
        config,
    );

    let canvas = match assembler.assemble(&area) {
        Ok(canvas) => {
            bar.finish();
            canvas
        }
        Err(e) => {
            bar.abandon();
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let output = args.output.unwrap_or_else(|| default_output_name(&area));
    if let Err(e) = canvas.save(&output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    println!("Mosaic saved to {}", output);
}
