use crate::core::data::colour::Rgb565;
use crate::core::data::frame_write::{ByteEnable, FrameWrite};

/// Packs horizontally adjacent pixels two to a 32-bit word.
///
/// The first pixel of a word goes in bytes 0-1 and the second in bytes
/// 2-3. The word address only moves on once the high half has been
/// committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPacker {
    address: u32,
    high_half: bool,
    low_colour: Rgb565,
}

impl PixelPacker {
    #[must_use]
    pub const fn new(base_address: u32) -> Self {
        Self {
            address: base_address,
            high_half: false,
            low_colour: Rgb565::BLACK,
        }
    }

    /// Builds the write for the next pixel. The high-half write carries
    /// both pixels of the word.
    pub fn pack(&mut self, colour: Rgb565) -> FrameWrite {
        let colour_bits = u32::from(colour.raw());

        if self.high_half {
            FrameWrite {
                address: self.address,
                byte_enable: ByteEnable::HIGH_HALF,
                data: (colour_bits << 16) | u32::from(self.low_colour.raw()),
            }
        } else {
            self.low_colour = colour;

            FrameWrite {
                address: self.address,
                byte_enable: ByteEnable::LOW_HALF,
                data: colour_bits,
            }
        }
    }

    /// Called once the packed write has been acknowledged.
    pub fn commit(&mut self) {
        if self.high_half {
            self.address = self.address.wrapping_add(1);
        }

        self.high_half = !self.high_half;
    }

    #[must_use]
    pub const fn address(&self) -> u32 {
        self.address
    }
}
