use crate::core::data::fixed::Fixed;

/// Raster position together with its world coordinate.
///
/// Raster y grows downward while world y grows upward, so each new row
/// subtracts one step from the world y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelCursor {
    pub x: u32,
    pub y: u32,
    pub world_x: Fixed,
    pub world_y: Fixed,
    row_start_x: Fixed,
}

impl PixelCursor {
    #[must_use]
    pub const fn new(top_left_x: Fixed, top_left_y: Fixed) -> Self {
        Self {
            x: 0,
            y: 0,
            world_x: top_left_x,
            world_y: top_left_y,
            row_start_x: top_left_x,
        }
    }

    /// Linear raster-order index of the current pixel.
    #[must_use]
    pub const fn index(&self, width: u32) -> u64 {
        self.y as u64 * width as u64 + self.x as u64
    }

    /// Moves one pixel along the raster. Returns `false` once the last
    /// pixel of the frame has been passed.
    pub fn advance(&mut self, step: Fixed, width: u32, height: u32) -> bool {
        self.x += 1;
        self.world_x = self.world_x + step;

        if self.x < width {
            return true;
        }

        self.x = 0;
        self.world_x = self.row_start_x;
        self.y += 1;
        self.world_y = self.world_y - step;

        self.y < height
    }
}
