use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::frame::Frame;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes frames as binary PPM, widening each RGB565 pixel to 8 bits per
/// channel.
pub struct PpmFilePresenter {}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, frame: &Frame, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        let file = std::fs::File::create(filepath)?;
        let mut writer = BufWriter::new(file);

        // P6 is binary RGB, followed by width, height and max channel value
        writeln!(writer, "P6")?;
        writeln!(writer, "{} {}", frame.width(), frame.height())?;
        writeln!(writer, "255")?;

        for pixel in frame.pixels() {
            writer.write_all(&pixel.to_rgb888())?;
        }

        writer.flush()
    }
}

impl Default for PpmFilePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl PpmFilePresenter {
    pub fn new() -> Self {
        Self {}
    }
}
