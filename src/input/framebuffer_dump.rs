use crate::core::data::colour::Rgb565;
use crate::core::data::frame::Frame;
use std::error::Error;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpParseError {
    Malformed { line: usize, text: String },
    OutOfBounds { line: usize, x: u32, y: u32 },
    Missing { x: u32, y: u32 },
}

impl fmt::Display for DumpParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { line, text } => {
                write!(f, "line {}: expected `x y 0xNNNN`, found {:?}", line, text)
            }
            Self::OutOfBounds { line, x, y } => {
                write!(f, "line {}: pixel ({}, {}) is outside the frame", line, x, y)
            }
            Self::Missing { x, y } => write!(f, "no value for pixel ({}, {})", x, y),
        }
    }
}

impl Error for DumpParseError {}

#[derive(Debug)]
pub enum DumpFileError {
    Io(std::io::Error),
    Parse(DumpParseError),
}

impl fmt::Display for DumpFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read framebuffer dump: {}", err),
            Self::Parse(err) => write!(f, "invalid framebuffer dump: {}", err),
        }
    }
}

impl Error for DumpFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for DumpFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<DumpParseError> for DumpFileError {
    fn from(err: DumpParseError) -> Self {
        Self::Parse(err)
    }
}

fn parse_entry(text: &str) -> Option<(u32, u32, Rgb565)> {
    let mut fields = text.split_whitespace();
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    let value = fields.next()?;
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    let colour = u16::from_str_radix(digits, 16).ok()?;

    if fields.next().is_some() {
        return None;
    }

    Some((x, y, Rgb565::from_raw(colour)))
}

/// Rebuilds a `width` x `height` frame from a dump. Lines may come in any
/// order; a later line for the same pixel wins. Every pixel must be present.
pub fn parse_framebuffer_dump(text: &str, width: u32, height: u32) -> Result<Frame, DumpParseError> {
    let mut pixels: Vec<Option<Rgb565>> = vec![None; width as usize * height as usize];

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            continue;
        }

        let (x, y, colour) = parse_entry(trimmed).ok_or_else(|| DumpParseError::Malformed {
            line,
            text: trimmed.to_string(),
        })?;

        if x >= width || y >= height {
            return Err(DumpParseError::OutOfBounds { line, x, y });
        }

        pixels[y as usize * width as usize + x as usize] = Some(colour);
    }

    let pixels = pixels
        .into_iter()
        .enumerate()
        .map(|(i, pixel)| {
            pixel.ok_or(DumpParseError::Missing {
                x: i as u32 % width,
                y: i as u32 / width,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Frame::from_raster(width, height, pixels))
}

pub fn read_framebuffer_dump(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
) -> Result<Frame, DumpFileError> {
    let text = std::fs::read_to_string(path)?;

    Ok(parse_framebuffer_dump(&text, width, height)?)
}
