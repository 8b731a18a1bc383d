use std::fmt;

/// A 16-bit RGB565 colour: red in bits 15..11, green in 10..5, blue in 4..0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb565(u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    /// Mid grey, used to mark framebuffer words nothing has written.
    pub const GREY: Self = Self(0x7BEF);

    pub const RED_MAX: u8 = 0x1F;
    pub const GREEN_MAX: u8 = 0x3F;
    pub const BLUE_MAX: u8 = 0x1F;

    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Packs channels, masking each to its field width.
    #[must_use]
    pub const fn from_channels(red: u8, green: u8, blue: u8) -> Self {
        let r = (red & Self::RED_MAX) as u16;
        let g = (green & Self::GREEN_MAX) as u16;
        let b = (blue & Self::BLUE_MAX) as u16;

        Self((r << 11) | (g << 5) | b)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn red(self) -> u8 {
        ((self.0 >> 11) & 0x1F) as u8
    }

    #[must_use]
    pub const fn green(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    #[must_use]
    pub const fn blue(self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    /// Widens to 8 bits per channel by left shift, without replicating low bits.
    #[must_use]
    pub const fn to_rgb888(self) -> [u8; 3] {
        [self.red() << 3, self.green() << 2, self.blue() << 3]
    }
}

impl fmt::Display for Rgb565 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

impl From<u16> for Rgb565 {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_extraction() {
        let colour = Rgb565::from_raw(0b10101_110011_01110);

        assert_eq!(colour.red(), 0b10101);
        assert_eq!(colour.green(), 0b110011);
        assert_eq!(colour.blue(), 0b01110);
    }

    #[test]
    fn test_from_channels_masks_out_of_range_values() {
        let colour = Rgb565::from_channels(0xFF, 0xFF, 0xFF);

        assert_eq!(colour, Rgb565::WHITE);
    }

    #[test]
    fn test_to_rgb888_shifts_channels() {
        assert_eq!(Rgb565::WHITE.to_rgb888(), [0xF8, 0xFC, 0xF8]);
        assert_eq!(Rgb565::BLACK.to_rgb888(), [0, 0, 0]);
    }

    #[test]
    fn test_grey_marker_channels() {
        assert_eq!(Rgb565::GREY.red(), 0x0F);
        assert_eq!(Rgb565::GREY.green(), 0x1F);
        assert_eq!(Rgb565::GREY.blue(), 0x0F);
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(Rgb565::from_raw(0xF800).to_string(), "0xf800");
    }
}
