//! Coordinate-addressed RGBA pixel surfaces.

use image::RgbaImage;
use thiserror::Error;

use crate::geometry::{PixelPoint, Rgba, SurfaceSize};

const CHANNELS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("coordinate ({x}, {y}) lies outside {width}x{height} surface")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
    #[error("surface dimensions mismatch: expected {expected:?}, found {actual:?}")]
    DimensionMismatch {
        expected: SurfaceSize,
        actual: SurfaceSize,
    },
    #[error("pixel buffer holds {actual} bytes, {width}x{height} RGBA needs {expected}")]
    BufferLength {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("{width}x{height} RGBA surface does not fit in memory")]
    TooLarge { width: u32, height: u32 },
}

pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

/// Row-major RGBA8 pixel grid with the origin at the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    image: RgbaImage,
}

impl Default for PixelSurface {
    fn default() -> Self {
        Self::empty()
    }
}

impl PixelSurface {
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn from_raw(width: u32, height: u32, bytes: Vec<u8>) -> SurfaceResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .ok_or(SurfaceError::TooLarge { width, height })?;
        let actual = bytes.len();
        RgbaImage::from_raw(width, height, bytes)
            .filter(|_| actual == expected)
            .map(Self::from_image)
            .ok_or(SurfaceError::BufferLength {
                width,
                height,
                expected,
                actual,
            })
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.image.width(), self.image.height())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.size().contains(x, y)
    }

    fn check_bounds(&self, x: u32, y: u32) -> SurfaceResult<()> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(self.out_of_bounds(i64::from(x), i64::from(y)))
        }
    }

    pub(crate) fn out_of_bounds(&self, x: i64, y: i64) -> SurfaceError {
        SurfaceError::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        }
    }

    pub fn ensure_size(&self, expected: SurfaceSize) -> SurfaceResult<()> {
        let actual = self.size();
        if actual == expected {
            Ok(())
        } else {
            Err(SurfaceError::DimensionMismatch { expected, actual })
        }
    }

    pub fn read_pixel(&self, x: u32, y: u32) -> SurfaceResult<Rgba> {
        self.check_bounds(x, y)?;
        Ok(Rgba::from(*self.image.get_pixel(x, y)))
    }

    pub fn write_pixel(&mut self, x: u32, y: u32, color: Rgba) -> SurfaceResult<()> {
        self.check_bounds(x, y)?;
        self.image.put_pixel(x, y, color.into());
        Ok(())
    }

    /// Fills a rectangle; rejected whole if any part of it leaves the surface.
    pub fn write_rect(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: Rgba,
    ) -> SurfaceResult<()> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        let right = u64::from(x) + u64::from(width) - 1;
        let bottom = u64::from(y) + u64::from(height) - 1;
        if right >= u64::from(self.width()) || bottom >= u64::from(self.height()) {
            return Err(self.out_of_bounds(right as i64, bottom as i64));
        }

        let pixel = image::Rgba::from(color);
        for row in y..y + height {
            for column in x..x + width {
                self.image.put_pixel(column, row, pixel);
            }
        }
        Ok(())
    }

    /// Writes without a bounds error; callers have already clipped or validated.
    pub(crate) fn put(&mut self, point: PixelPoint, color: Rgba) {
        if let Some(pixel) = self.image.get_pixel_mut_checked(point.x, point.y) {
            *pixel = color.into();
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        let pixel = image::Rgba::from(color);
        for target in self.image.pixels_mut() {
            *target = pixel;
        }
    }

    pub fn clear(&mut self) {
        self.fill(Rgba::TRANSPARENT);
    }

    /// Whether every pixel is fully transparent black.
    pub fn is_clear(&self) -> bool {
        self.image.as_raw().iter().all(|&byte| byte == 0)
    }

    pub fn snapshot(&self) -> PixelSnapshot<'_> {
        PixelSnapshot {
            size: self.size(),
            bytes: self.image.as_raw(),
        }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Borrowed bulk view over a surface's raw buffer, taken once per fill.
#[derive(Debug, Clone, Copy)]
pub struct PixelSnapshot<'a> {
    size: SurfaceSize,
    bytes: &'a [u8],
}

impl PixelSnapshot<'_> {
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }

    /// Caller guarantees `(x, y)` lies within `size()`.
    pub(crate) fn color_at(&self, x: u32, y: u32) -> Rgba {
        let offset = self.index(x, y) * CHANNELS;
        Rgba::new(
            self.bytes[offset],
            self.bytes[offset + 1],
            self.bytes[offset + 2],
            self.bytes[offset + 3],
        )
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.size.contains(x, y).then(|| self.color_at(x, y))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes
    }
}
