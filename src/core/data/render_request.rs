use crate::core::data::control_colours::{COLOUR_WORD_COUNT, ControlColours};
use crate::core::data::fixed::Fixed;

pub const MAX_ZOOM: u32 = 10;
pub const MIN_ITERATIONS: u32 = 1;
pub const MAX_ITERATIONS: u32 = 1023;

/// Out-of-range zoom falls back to level 0, the widest view.
#[must_use]
pub const fn clamp_zoom(zoom: u32) -> u32 {
    if zoom > MAX_ZOOM { 0 } else { zoom }
}

/// Out-of-range iteration caps are forced to 1.
#[must_use]
pub const fn clamp_max_iterations(max_iterations: u32) -> u32 {
    if max_iterations < MIN_ITERATIONS || max_iterations > MAX_ITERATIONS {
        MIN_ITERATIONS
    } else {
        max_iterations
    }
}

/// A validated render request. Fields are clamped on construction and
/// never change for the duration of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    centre_x: Fixed,
    centre_y: Fixed,
    zoom: u32,
    max_iterations: u32,
    controls: ControlColours,
}

impl RenderRequest {
    #[must_use]
    pub fn new(
        centre_x: Fixed,
        centre_y: Fixed,
        zoom: u32,
        max_iterations: u32,
        controls: ControlColours,
    ) -> Self {
        Self {
            centre_x,
            centre_y,
            zoom: clamp_zoom(zoom),
            max_iterations: clamp_max_iterations(max_iterations),
            controls,
        }
    }

    #[must_use]
    pub fn centre_x(&self) -> Fixed {
        self.centre_x
    }

    #[must_use]
    pub fn centre_y(&self) -> Fixed {
        self.centre_y
    }

    #[must_use]
    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn controls(&self) -> &ControlColours {
        &self.controls
    }
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self::new(
            Fixed::from_f64(-0.5),
            Fixed::ZERO,
            0,
            256,
            ControlColours::default(),
        )
    }
}

/// The raw register contents a host writes to start a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCommand {
    pub centre_x: i32,
    pub centre_y: i32,
    pub zoom: u32,
    pub max_iterations: u32,
    pub colour_words: [u32; COLOUR_WORD_COUNT],
}

impl RenderCommand {
    #[must_use]
    pub fn decode(&self) -> RenderRequest {
        RenderRequest::new(
            Fixed::from_raw(self.centre_x),
            Fixed::from_raw(self.centre_y),
            self.zoom,
            self.max_iterations,
            ControlColours::from_words(self.colour_words),
        )
    }
}

impl From<RenderCommand> for RenderRequest {
    fn from(command: RenderCommand) -> Self {
        command.decode()
    }
}

impl From<&RenderRequest> for RenderCommand {
    fn from(request: &RenderRequest) -> Self {
        Self {
            centre_x: request.centre_x.raw(),
            centre_y: request.centre_y.raw(),
            zoom: request.zoom,
            max_iterations: request.max_iterations,
            colour_words: request.controls.to_words(),
        }
    }
}
