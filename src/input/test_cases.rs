//! Host-side render scripts: one render request per line.
//!
//! ```text
//! centre_x centre_y zoom max_iterations c1 c2 c3 c4 c5 c6 [ignored]
//! ```
//!
//! Centres and colours are hexadecimal; zoom and the iteration cap are
//! decimal. Blank lines and lines starting with `#` are skipped.

use crate::core::data::colour::Rgb565;
use crate::core::data::control_colours::{CONTROL_COLOUR_COUNT, ControlColours};
use crate::core::data::fixed::Fixed;
use crate::core::data::render_request::RenderRequest;
use std::error::Error;
use std::fmt;
use std::path::Path;

const COLOUR_FIELDS: [&str; CONTROL_COLOUR_COUNT] =
    ["colour_1", "colour_2", "colour_3", "colour_4", "colour_5", "colour_6"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestCaseParseErrorKind {
    MissingField(&'static str),
    InvalidHex { field: &'static str, value: String },
    InvalidDecimal { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseParseError {
    pub line: usize,
    pub kind: TestCaseParseErrorKind,
}

impl fmt::Display for TestCaseParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TestCaseParseErrorKind::MissingField(field) => {
                write!(f, "line {}: missing field {}", self.line, field)
            }
            TestCaseParseErrorKind::InvalidHex { field, value } => {
                write!(f, "line {}: {} is not hexadecimal: {:?}", self.line, field, value)
            }
            TestCaseParseErrorKind::InvalidDecimal { field, value } => {
                write!(f, "line {}: {} is not a decimal integer: {:?}", self.line, field, value)
            }
        }
    }
}

impl Error for TestCaseParseError {}

#[derive(Debug)]
pub enum TestCaseFileError {
    Io(std::io::Error),
    Parse(TestCaseParseError),
}

impl fmt::Display for TestCaseFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read test cases: {}", err),
            Self::Parse(err) => write!(f, "invalid test case: {}", err),
        }
    }
}

impl Error for TestCaseFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for TestCaseFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<TestCaseParseError> for TestCaseFileError {
    fn from(err: TestCaseParseError) -> Self {
        Self::Parse(err)
    }
}

/// One render from a script, numbered in file order from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCase {
    pub index: usize,
    pub line: usize,
    pub request: RenderRequest,
}

fn split_hex(value: &str) -> (bool, &str) {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);

    (negative, digits)
}

/// Reads a hex coordinate and keeps its low 32 bits as a signed register.
fn parse_coordinate(value: &str) -> Option<Fixed> {
    let (negative, digits) = split_hex(value);
    let magnitude = u64::from_str_radix(digits, 16).ok()?;
    let wide = if negative {
        (magnitude as i64).wrapping_neg()
    } else {
        magnitude as i64
    };

    Some(Fixed::from_raw(wide as i32))
}

fn parse_colour(value: &str) -> Option<Rgb565> {
    let (negative, digits) = split_hex(value);

    if negative {
        return None;
    }

    u16::from_str_radix(digits, 16).ok().map(Rgb565::from_raw)
}

/// Negative or oversized values become 0, which the request then clamps.
fn parse_register(value: &str) -> Option<u32> {
    let number: i64 = value.parse().ok()?;

    Some(u32::try_from(number).unwrap_or(0))
}

fn parse_line(line: usize, text: &str) -> Result<RenderRequest, TestCaseParseError> {
    let mut fields = text.split_whitespace();
    let error = |kind| TestCaseParseError { line, kind };

    let mut next = |field: &'static str| {
        fields
            .next()
            .ok_or_else(|| error(TestCaseParseErrorKind::MissingField(field)))
    };
    let hex_error = |field: &'static str, value: &str| {
        error(TestCaseParseErrorKind::InvalidHex {
            field,
            value: value.to_string(),
        })
    };
    let decimal_error = |field: &'static str, value: &str| {
        error(TestCaseParseErrorKind::InvalidDecimal {
            field,
            value: value.to_string(),
        })
    };

    let centre_x = next("centre_x")?;
    let centre_x = parse_coordinate(centre_x).ok_or_else(|| hex_error("centre_x", centre_x))?;
    let centre_y = next("centre_y")?;
    let centre_y = parse_coordinate(centre_y).ok_or_else(|| hex_error("centre_y", centre_y))?;
    let zoom = next("zoom")?;
    let zoom = parse_register(zoom).ok_or_else(|| decimal_error("zoom", zoom))?;
    let max_iterations = next("max_iterations")?;
    let max_iterations =
        parse_register(max_iterations).ok_or_else(|| decimal_error("max_iterations", max_iterations))?;

    let mut colours = [Rgb565::BLACK; CONTROL_COLOUR_COUNT];
    for (colour, field) in colours.iter_mut().zip(COLOUR_FIELDS) {
        let value = next(field)?;
        *colour = parse_colour(value).ok_or_else(|| hex_error(field, value))?;
    }

    Ok(RenderRequest::new(
        centre_x,
        centre_y,
        zoom,
        max_iterations,
        ControlColours::new(colours),
    ))
}

pub fn parse_test_cases(input: &str) -> Result<Vec<RenderCase>, TestCaseParseError> {
    input
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty() && !text.starts_with('#'))
        .enumerate()
        .map(|(index, (line, text))| {
            Ok(RenderCase {
                index,
                line,
                request: parse_line(line, text)?,
            })
        })
        .collect()
}

pub fn read_test_cases(path: impl AsRef<Path>) -> Result<Vec<RenderCase>, TestCaseFileError> {
    let text = std::fs::read_to_string(path)?;

    Ok(parse_test_cases(&text)?)
}
