use crate::core::data::colour::Rgb565;
use crate::core::data::frame::Frame;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareFramesError {
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

impl fmt::Display for CompareFramesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "expected a {}x{} frame but got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
        }
    }
}

impl Error for CompareFramesError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelMismatch {
    pub x: u32,
    pub y: u32,
    pub expected: Rgb565,
    pub actual: Rgb565,
}

impl fmt::Display for PixelMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) expected {} got {}",
            self.x, self.y, self.expected, self.actual
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameComparison {
    pub total: u64,
    pub mismatches: Vec<PixelMismatch>,
}

impl FrameComparison {
    #[must_use]
    pub fn matches(&self) -> bool {
        self.mismatches.is_empty()
    }

    #[must_use]
    pub fn matching(&self) -> u64 {
        self.total - self.mismatches.len() as u64
    }
}

/// Pixel-by-pixel comparison of a rendered frame against a reference.
pub fn compare_frames(expected: &Frame, actual: &Frame) -> Result<FrameComparison, CompareFramesError> {
    if expected.width() != actual.width() || expected.height() != actual.height() {
        return Err(CompareFramesError::DimensionMismatch {
            expected: (expected.width(), expected.height()),
            actual: (actual.width(), actual.height()),
        });
    }

    let mismatches = expected
        .enumerate()
        .zip(actual.pixels())
        .filter(|((_, _, want), got)| want != *got)
        .map(|((x, y, want), &got)| PixelMismatch {
            x,
            y,
            expected: want,
            actual: got,
        })
        .collect();

    Ok(FrameComparison {
        total: expected.pixels().len() as u64,
        mismatches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(raw: &[u16]) -> Frame {
        Frame::from_pixels(2, 2, raw.iter().copied().map(Rgb565::from_raw).collect()).unwrap()
    }

    #[test]
    fn test_identical_frames_match() {
        let a = frame(&[1, 2, 3, 4]);
        let result = compare_frames(&a, &a.clone()).unwrap();

        assert!(result.matches());
        assert_eq!(result.matching(), 4);
    }

    #[test]
    fn test_reports_each_mismatch() {
        let result = compare_frames(&frame(&[1, 2, 3, 4]), &frame(&[1, 9, 3, 8])).unwrap();

        assert_eq!(result.matching(), 2);
        assert_eq!(
            result.mismatches,
            vec![
                PixelMismatch {
                    x: 1,
                    y: 0,
                    expected: Rgb565::from_raw(2),
                    actual: Rgb565::from_raw(9)
                },
                PixelMismatch {
                    x: 1,
                    y: 1,
                    expected: Rgb565::from_raw(4),
                    actual: Rgb565::from_raw(8)
                },
            ]
        );
        assert_eq!(result.mismatches[0].to_string(), "(1, 0) expected 0x0002 got 0x0009");
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let wide = Frame::from_pixels(4, 1, vec![Rgb565::BLACK; 4]).unwrap();
        let err = compare_frames(&frame(&[0, 0, 0, 0]), &wide).unwrap_err();

        assert_eq!(err.to_string(), "expected a 2x2 frame but got 4x1");
    }
}
