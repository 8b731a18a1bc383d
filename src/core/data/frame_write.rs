use std::fmt;

/// Four-bit byte-enable mask; bit `n` enables byte `n` of the data word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteEnable(u8);

impl ByteEnable {
    pub const LOW_HALF: Self = Self(0b0011);
    pub const HIGH_HALF: Self = Self(0b1100);
    pub const ALL: Self = Self(0b1111);

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The 32-bit mask covering every enabled byte.
    #[must_use]
    pub const fn word_mask(self) -> u32 {
        let mut mask = 0u32;
        let mut byte = 0;

        while byte < 4 {
            if self.0 & (1 << byte) != 0 {
                mask |= 0xFF << (byte * 8);
            }
            byte += 1;
        }

        mask
    }
}

/// A write presented to the framebuffer controller. It stays unchanged
/// on the bus until the controller acknowledges it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameWrite {
    pub address: u32,
    pub byte_enable: ByteEnable,
    pub data: u32,
}

impl FrameWrite {
    /// The read/not-write line; this engine only ever writes.
    #[must_use]
    pub const fn read_not_write(&self) -> bool {
        false
    }

    /// Merges this write into an existing memory word.
    #[must_use]
    pub const fn apply_to(&self, word: u32) -> u32 {
        let mask = self.byte_enable.word_mask();

        (word & !mask) | (self.data & mask)
    }
}

impl fmt::Display for FrameWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:#010x}] <= {:#010x} (be {:04b})",
            self.address,
            self.data,
            self.byte_enable.bits()
        )
    }
}
