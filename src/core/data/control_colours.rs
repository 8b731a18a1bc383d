use crate::core::data::colour::Rgb565;

pub const CONTROL_COLOUR_COUNT: usize = 6;
pub const SEGMENT_COUNT: usize = CONTROL_COLOUR_COUNT - 1;
pub const COLOUR_WORD_COUNT: usize = CONTROL_COLOUR_COUNT / 2;

/// The six gradient control points supplied with every render request.
///
/// Segment `i` runs from colour `i` to colour `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlColours([Rgb565; CONTROL_COLOUR_COUNT]);

impl ControlColours {
    #[must_use]
    pub const fn new(colours: [Rgb565; CONTROL_COLOUR_COUNT]) -> Self {
        Self(colours)
    }

    #[must_use]
    pub const fn uniform(colour: Rgb565) -> Self {
        Self([colour; CONTROL_COLOUR_COUNT])
    }

    /// Unpacks the three command words; each carries its first colour in
    /// the low half and its second in the high half.
    #[must_use]
    pub fn from_words(words: [u32; COLOUR_WORD_COUNT]) -> Self {
        let mut colours = [Rgb565::BLACK; CONTROL_COLOUR_COUNT];

        for (pair, word) in colours.chunks_exact_mut(2).zip(words) {
            pair[0] = Rgb565::from_raw(word as u16);
            pair[1] = Rgb565::from_raw((word >> 16) as u16);
        }

        Self(colours)
    }

    #[must_use]
    pub fn to_words(&self) -> [u32; COLOUR_WORD_COUNT] {
        let mut words = [0; COLOUR_WORD_COUNT];

        for (word, pair) in words.iter_mut().zip(self.0.chunks_exact(2)) {
            *word = u32::from(pair[0].raw()) | (u32::from(pair[1].raw()) << 16);
        }

        words
    }

    #[must_use]
    pub const fn colours(&self) -> &[Rgb565; CONTROL_COLOUR_COUNT] {
        &self.0
    }

    /// Start and end colour of every interpolation segment, in order.
    pub fn segments(&self) -> impl Iterator<Item = (Rgb565, Rgb565)> + '_ {
        self.0.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

impl Default for ControlColours {
    /// Black through blue, cyan, yellow and red to white.
    fn default() -> Self {
        Self([
            Rgb565::from_raw(0x0000),
            Rgb565::from_raw(0x001F),
            Rgb565::from_raw(0x07FF),
            Rgb565::from_raw(0xFFE0),
            Rgb565::from_raw(0xF800),
            Rgb565::from_raw(0xFFFF),
        ])
    }
}
