use crate::core::data::render_request::RenderRequest;
use crate::core::engine::events::{EngineEvent, RenderSummary};
use crate::core::engine::ports::framebuffer::FramebufferPort;
use crate::core::engine::raster_engine::RasterEngine;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveError {
    TickBudgetExceeded { budget: u64 },
}

impl fmt::Display for DriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TickBudgetExceeded { budget } => {
                write!(f, "render did not complete within {} ticks", budget)
            }
        }
    }
}

impl Error for DriveError {}

/// Submits `request` and clocks the engine until that render completes.
///
/// A render already in progress is allowed to finish first. If the budget
/// runs out the engine is reset, abandoning the render.
pub fn render_frame<F: FramebufferPort + ?Sized>(
    engine: &mut RasterEngine,
    framebuffer: &mut F,
    request: RenderRequest,
    tick_budget: u64,
) -> Result<RenderSummary, DriveError> {
    engine.request(request);

    let mut accepted = false;

    for _ in 0..tick_budget {
        match engine.step(framebuffer) {
            Some(EngineEvent::Accepted) => accepted = true,
            Some(EngineEvent::Completed(summary)) if accepted => return Ok(summary),
            _ => {}
        }
    }

    engine.reset();
    engine.withdraw_request();

    Err(DriveError::TickBudgetExceeded {
        budget: tick_budget,
    })
}
