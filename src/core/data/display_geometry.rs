use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

/// Resolution and placement reported by the framebuffer controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayGeometry {
    pub width: u32,
    pub height: u32,
    /// Word address of the top-left pixel pair.
    pub base_address: u32,
}

impl DisplayGeometry {
    #[must_use]
    pub const fn new(width: u32, height: u32, base_address: u32) -> Self {
        Self {
            width,
            height,
            base_address,
        }
    }

    #[must_use]
    pub const fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Words needed to hold every pixel at two pixels per word.
    #[must_use]
    pub const fn word_count(&self) -> u64 {
        self.pixel_count().div_ceil(2)
    }
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, 0)
    }
}
