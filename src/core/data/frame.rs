use crate::core::data::colour::Rgb565;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "frame expects {} pixels but {} were supplied",
                    expected, actual
                )
            }
        }
    }
}

impl Error for FrameError {}

/// A finished image in raster order, one RGB565 value per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Rgb565>,
}

impl Frame {
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb565>) -> Result<Self, FrameError> {
        let expected = width as usize * height as usize;

        if pixels.len() != expected {
            return Err(FrameError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// For pixel lists produced by walking the raster, so the length is
    /// right by construction.
    pub(crate) fn from_raster(width: u32, height: u32, pixels: Vec<Rgb565>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);

        Self {
            width,
            height,
            pixels,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb565> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Pixels with their raster coordinates, row by row.
    pub fn enumerate(&self) -> impl Iterator<Item = (u32, u32, Rgb565)> + '_ {
        let width = self.width.max(1);

        self.pixels.iter().enumerate().map(move |(i, &colour)| {
            let i = i as u32;
            (i % width, i / width, colour)
        })
    }
}
