use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::frame::Frame;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one `x y 0xNNNN` line per pixel in raster order, the format the
/// golden framebuffer dumps use.
#[derive(Default)]
pub struct FramebufferDumpPresenter {}

impl FramebufferDumpPresenter {
    pub fn new() -> Self {
        Self {}
    }
}

impl FilePresenterPort for FramebufferDumpPresenter {
    fn present(&self, frame: &Frame, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        let file = std::fs::File::create(filepath)?;
        let mut writer = BufWriter::new(file);

        for (x, y, colour) in frame.enumerate() {
            writeln!(writer, "{} {} {}", x, y, colour)?;
        }

        writer.flush()
    }
}
