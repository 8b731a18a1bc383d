use crate::core::data::colour::Rgb565;
use crate::core::data::display_geometry::DisplayGeometry;
use crate::core::data::frame::Frame;
use crate::core::data::frame_write::FrameWrite;
use crate::core::engine::ports::framebuffer::FramebufferPort;
use tracing::warn;

/// Word-addressed display memory standing in for the framebuffer
/// controller.
///
/// Unwritten words keep the fill colour (grey by default) in both halves,
/// so gaps in a render stay visible.
#[derive(Debug, Clone)]
pub struct MemoryFramebuffer {
    geometry: DisplayGeometry,
    words: Vec<u32>,
    fill: Rgb565,
    ack_latency: u32,
    waited: u32,
    writes: u64,
    log: Option<Vec<FrameWrite>>,
}

fn fill_word(fill: Rgb565) -> u32 {
    let half = u32::from(fill.raw());
    (half << 16) | half
}

impl MemoryFramebuffer {
    #[must_use]
    pub fn new(geometry: DisplayGeometry) -> Self {
        let fill = Rgb565::GREY;

        Self {
            geometry,
            words: vec![fill_word(fill); geometry.word_count() as usize],
            fill,
            ack_latency: 0,
            waited: 0,
            writes: 0,
            log: None,
        }
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Rgb565) -> Self {
        self.fill = fill;
        self.words.fill(fill_word(fill));
        self
    }

    /// Number of ticks a write is held before it is acknowledged.
    #[must_use]
    pub fn with_ack_latency(mut self, ticks: u32) -> Self {
        self.ack_latency = ticks;
        self
    }

    /// Keeps every acknowledged write for later inspection.
    #[must_use]
    pub fn with_write_log(mut self) -> Self {
        self.log = Some(Vec::new());
        self
    }

    #[must_use]
    pub fn writes(&self) -> u64 {
        self.writes
    }

    #[must_use]
    pub fn write_log(&self) -> &[FrameWrite] {
        self.log.as_deref().unwrap_or(&[])
    }

    #[must_use]
    pub fn word(&self, address: u32) -> Option<u32> {
        let offset = address.checked_sub(self.geometry.base_address)?;
        self.words.get(offset as usize).copied()
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb565> {
        if x >= self.geometry.width || y >= self.geometry.height {
            return None;
        }

        let index = y as usize * self.geometry.width as usize + x as usize;
        let word = self.words.get(index / 2)?;
        let half = if index % 2 == 0 { *word } else { *word >> 16 };

        Some(Rgb565::from_raw(half as u16))
    }

    /// Snapshot of the display in raster order.
    #[must_use]
    pub fn frame(&self) -> Frame {
        let pixels = (0..self.geometry.height)
            .flat_map(|y| (0..self.geometry.width).map(move |x| (x, y)))
            .map(|(x, y)| self.pixel(x, y).unwrap_or(self.fill))
            .collect();

        Frame::from_raster(self.geometry.width, self.geometry.height, pixels)
    }
}

impl FramebufferPort for MemoryFramebuffer {
    fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    fn write(&mut self, write: &FrameWrite) -> bool {
        if self.waited < self.ack_latency {
            self.waited += 1;
            return false;
        }

        self.waited = 0;

        let slot = write
            .address
            .checked_sub(self.geometry.base_address)
            .and_then(|offset| self.words.get_mut(offset as usize));

        match slot {
            Some(word) => *word = write.apply_to(*word),
            None => warn!("write outside display memory: {}", write),
        }

        self.writes += 1;

        if let Some(log) = self.log.as_mut() {
            log.push(*write);
        }

        true
    }
}
