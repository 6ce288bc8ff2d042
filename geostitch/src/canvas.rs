//! Mosaic canvas primitive.
//!
//! A plain RGB pixel buffer the assembler pastes decoded tiles into. Tiles
//! overhanging the right or bottom edge are clipped, which is expected for
//! the last row and column whenever the canvas size is not an exact
//! multiple of the tile size; a paste whose origin lies outside the canvas
//! means the grid math is broken and is reported as an error instead.

use std::path::Path;

use image::{imageops, RgbImage};
use thiserror::Error;

/// Errors that can occur when writing to or saving the canvas.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Paste origin outside the canvas. Grid planning guarantees every
    /// placement origin is inside, so this is an internal invariant
    /// violation rather than a user input problem.
    #[error("paste origin ({x}, {y}) outside canvas bounds {width}x{height}")]
    PasteOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Encoding or writing the output image failed.
    #[error("failed to write mosaic image: {0}")]
    Write(#[from] image::ImageError),
}

/// An RGB pixel buffer holding the assembled mosaic.
///
/// Created blank (black) at the planned canvas size and owned exclusively
/// by the assembler during a run. Uncovered margin keeps the initial fill;
/// no resizing or cropping ever happens.
pub struct MosaicCanvas {
    image: RgbImage,
}

impl MosaicCanvas {
    /// Create a blank canvas of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Paste a decoded tile with its top-left corner at `(x, y)`.
    ///
    /// The region beyond the right/bottom canvas edge, if any, is clipped.
    ///
    /// # Errors
    ///
    /// [`CanvasError::PasteOutOfBounds`] if the origin itself is outside
    /// the canvas.
    pub fn paste(&mut self, tile: &RgbImage, x: u32, y: u32) -> Result<(), CanvasError> {
        if x >= self.image.width() || y >= self.image.height() {
            return Err(CanvasError::PasteOutOfBounds {
                x,
                y,
                width: self.image.width(),
                height: self.image.height(),
            });
        }
        imageops::replace(&mut self.image, tile, i64::from(x), i64::from(y));
        Ok(())
    }

    /// Encode and write the mosaic to `path`; format follows the file
    /// extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CanvasError> {
        self.image.save(path)?;
        Ok(())
    }

    /// Borrow the underlying pixel buffer.
    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    /// Consume the canvas and return the pixel buffer.
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid_tile(size: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(size, size, Rgb(color))
    }

    #[test]
    fn test_new_canvas_is_black() {
        let canvas = MosaicCanvas::new(4, 4);
        assert_eq!(canvas.width(), 4);
        assert_eq!(canvas.height(), 4);
        assert_eq!(*canvas.as_image().get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*canvas.as_image().get_pixel(3, 3), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_paste_writes_disjoint_regions() {
        let mut canvas = MosaicCanvas::new(8, 4);
        canvas.paste(&solid_tile(4, [255, 0, 0]), 0, 0).unwrap();
        canvas.paste(&solid_tile(4, [0, 255, 0]), 4, 0).unwrap();

        assert_eq!(*canvas.as_image().get_pixel(0, 0), Rgb([255, 0, 0]));
        assert_eq!(*canvas.as_image().get_pixel(3, 3), Rgb([255, 0, 0]));
        assert_eq!(*canvas.as_image().get_pixel(4, 0), Rgb([0, 255, 0]));
        assert_eq!(*canvas.as_image().get_pixel(7, 3), Rgb([0, 255, 0]));
    }

    #[test]
    fn test_paste_clips_right_and_bottom_overhang() {
        let mut canvas = MosaicCanvas::new(6, 6);
        // Origin inside, tile extends 2 px past both edges
        canvas.paste(&solid_tile(4, [1, 2, 3]), 4, 4).unwrap();

        assert_eq!(*canvas.as_image().get_pixel(5, 5), Rgb([1, 2, 3]));
        // Pixels outside the pasted region untouched
        assert_eq!(*canvas.as_image().get_pixel(3, 3), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_paste_rejects_origin_outside_canvas() {
        let mut canvas = MosaicCanvas::new(6, 6);
        let result = canvas.paste(&solid_tile(4, [9, 9, 9]), 6, 0);
        assert!(matches!(
            result,
            Err(CanvasError::PasteOutOfBounds { x: 6, y: 0, .. })
        ));

        let result = canvas.paste(&solid_tile(4, [9, 9, 9]), 0, 100);
        assert!(matches!(result, Err(CanvasError::PasteOutOfBounds { .. })));
    }

    #[test]
    fn test_uncovered_margin_keeps_default_fill() {
        let mut canvas = MosaicCanvas::new(10, 10);
        canvas.paste(&solid_tile(4, [200, 200, 200]), 0, 0).unwrap();
        // Margin beyond the tile stays black
        assert_eq!(*canvas.as_image().get_pixel(9, 9), Rgb([0, 0, 0]));
        assert_eq!(*canvas.as_image().get_pixel(5, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_save_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mosaic.png");

        let mut canvas = MosaicCanvas::new(4, 4);
        canvas.paste(&solid_tile(4, [10, 20, 30]), 0, 0).unwrap();
        canvas.save(&path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reloaded.dimensions(), (4, 4));
        assert_eq!(*reloaded.get_pixel(2, 2), Rgb([10, 20, 30]));
    }
}
