//! Pixel buffer seam between the paint core and its host surface.

use image::{Rgb, RgbImage};
use thiserror::Error;

use crate::geometry::{CanvasBounds, Color};

pub type CanvasResult<T> = std::result::Result<T, CanvasError>;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("canvas dimensions must be non-zero, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },
}

/// Point read/write access the paint core consumes from the host surface.
///
/// Coordinates are pre-clipped by the core; implementations may assume
/// `x < width` and `y < height`.
pub trait PixelBuffer {
    fn bounds(&self) -> CanvasBounds;

    fn pixel(&self, x: u32, y: u32) -> Color;

    fn set_pixel(&mut self, x: u32, y: u32, color: Color);
}

/// Owned RGB canvas backed by an [`image::RgbImage`], so hosts that upload
/// textures from an `image` buffer can use it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasImage {
    image: RgbImage,
}

impl CanvasImage {
    pub fn new(width: u32, height: u32, background: Color) -> CanvasResult<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::EmptyCanvas { width, height });
        }

        let (r, g, b) = background.rgb();
        Ok(Self {
            image: RgbImage::from_pixel(width, height, Rgb([r, g, b])),
        })
    }

    pub fn from_image(image: RgbImage) -> CanvasResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(CanvasError::EmptyCanvas {
                width: image.width(),
                height: image.height(),
            });
        }
        Ok(Self { image })
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

impl PixelBuffer for CanvasImage {
    fn bounds(&self) -> CanvasBounds {
        CanvasBounds::new(self.image.width(), self.image.height())
    }

    fn pixel(&self, x: u32, y: u32) -> Color {
        let Rgb([r, g, b]) = *self.image.get_pixel(x, y);
        Color::new(r, g, b)
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let (r, g, b) = color.rgb();
        self.image.put_pixel(x, y, Rgb([r, g, b]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_starts_filled_with_background_color() {
        let canvas = CanvasImage::new(4, 3, Color::WHITE).expect("canvas should build");
        assert_eq!(canvas.bounds(), CanvasBounds::new(4, 3));
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(canvas.pixel(x, y), Color::WHITE);
            }
        }
    }

    #[test]
    fn set_pixel_round_trips_through_the_backing_image() {
        let mut canvas = CanvasImage::new(4, 4, Color::WHITE).expect("canvas should build");
        canvas.set_pixel(2, 1, Color::new(10, 20, 30));

        assert_eq!(canvas.pixel(2, 1), Color::new(10, 20, 30));
        assert_eq!(canvas.as_image().get_pixel(2, 1), &Rgb([10, 20, 30]));
        assert_eq!(canvas.pixel(1, 2), Color::WHITE);
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        let err = CanvasImage::new(0, 5, Color::WHITE).expect_err("zero width should fail");
        assert!(matches!(err, CanvasError::EmptyCanvas { width: 0, height: 5 }));

        let err = CanvasImage::new(5, 0, Color::WHITE).expect_err("zero height should fail");
        assert!(matches!(err, CanvasError::EmptyCanvas { width: 5, height: 0 }));
    }

    #[test]
    fn from_image_adopts_existing_pixels() {
        let mut image = RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]));
        image.put_pixel(1, 1, Rgb([9, 8, 7]));

        let canvas = CanvasImage::from_image(image).expect("non-empty image should adopt");
        assert_eq!(canvas.pixel(0, 0), Color::new(1, 2, 3));
        assert_eq!(canvas.pixel(1, 1), Color::new(9, 8, 7));

        let err = CanvasImage::from_image(RgbImage::new(0, 0)).expect_err("empty image");
        assert!(matches!(err, CanvasError::EmptyCanvas { .. }));
    }
}
