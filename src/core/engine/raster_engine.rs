use crate::core::data::colour::Rgb565;
use crate::core::data::colour_table::ColourTable;
use crate::core::data::display_geometry::DisplayGeometry;
use crate::core::data::fixed::Fixed;
use crate::core::data::frame_write::FrameWrite;
use crate::core::data::pixel_cursor::PixelCursor;
use crate::core::data::render_request::{RenderCommand, RenderRequest};
use crate::core::engine::events::{EngineEvent, EnginePhase, RenderSummary};
use crate::core::engine::pixel_packer::PixelPacker;
use crate::core::engine::ports::framebuffer::FramebufferPort;
use crate::core::fractals::mandelbrot::colour_table_builder::build_colour_table;
use crate::core::fractals::mandelbrot::point_iterator::PointIterator;
use crate::core::fractals::mandelbrot::spread::spread_colour_index;
use crate::core::fractals::mandelbrot::view::{step_size, top_left};
use tracing::{debug, trace, warn};

/// Colour used for points that never escape.
pub const BACKGROUND: Rgb565 = Rgb565::BLACK;

#[derive(Debug)]
enum Phase {
    Setup,
    BuildColours,
    StoreColours(ColourTable),
    ComputePoint(PointIterator),
    FetchColour(u32),
    PackPixel(Rgb565),
    WritePixel(FrameWrite),
    Advance,
}

impl Phase {
    fn kind(&self) -> EnginePhase {
        match self {
            Self::Setup => EnginePhase::Setup,
            Self::BuildColours => EnginePhase::BuildColours,
            Self::StoreColours(_) => EnginePhase::StoreColours,
            Self::ComputePoint(_) => EnginePhase::ComputePoint,
            Self::FetchColour(_) => EnginePhase::FetchColour,
            Self::PackPixel(_) => EnginePhase::PackPixel,
            Self::WritePixel(_) => EnginePhase::WritePixel,
            Self::Advance => EnginePhase::Advance,
        }
    }
}

/// Everything owned by one render. Dropped as a whole on completion or
/// reset.
#[derive(Debug)]
struct Render {
    request: RenderRequest,
    geometry: DisplayGeometry,
    step: Fixed,
    cursor: PixelCursor,
    colours: Option<ColourTable>,
    packer: PixelPacker,
    writes: u64,
    accepted_at: u64,
    phase: Phase,
}

impl Render {
    fn new(request: RenderRequest, geometry: DisplayGeometry, accepted_at: u64) -> Self {
        Self {
            request,
            geometry,
            step: step_size(request.zoom()),
            cursor: PixelCursor::new(Fixed::ZERO, Fixed::ZERO),
            colours: None,
            packer: PixelPacker::new(geometry.base_address),
            writes: 0,
            accepted_at,
            phase: Phase::Setup,
        }
    }

    /// Advances one phase. Returns the summary on the tick the render
    /// completes.
    fn tick<F: FramebufferPort + ?Sized>(&mut self, framebuffer: &mut F, now: u64) -> Option<RenderSummary> {
        let phase = std::mem::replace(&mut self.phase, Phase::Advance);

        self.phase = match phase {
            Phase::Setup => {
                let (x, y) = top_left(
                    self.request.centre_x(),
                    self.request.centre_y(),
                    self.step,
                    &self.geometry,
                );
                self.cursor = PixelCursor::new(x, y);
                Phase::BuildColours
            }
            Phase::BuildColours => Phase::StoreColours(build_colour_table(
                self.request.controls(),
                self.request.max_iterations(),
            )),
            Phase::StoreColours(table) => {
                self.colours = Some(table);

                if self.geometry.pixel_count() == 0 {
                    return Some(self.finish(now));
                }

                self.start_point()
            }
            Phase::ComputePoint(mut iterator) => match iterator.step() {
                Some(iterations) => Phase::FetchColour(iterations),
                None => Phase::ComputePoint(iterator),
            },
            Phase::FetchColour(iterations) => Phase::PackPixel(self.colour_for(iterations)),
            Phase::PackPixel(colour) => Phase::WritePixel(self.packer.pack(colour)),
            Phase::WritePixel(write) => {
                if framebuffer.write(&write) {
                    self.writes += 1;
                    Phase::Advance
                } else {
                    Phase::WritePixel(write)
                }
            }
            Phase::Advance => {
                self.packer.commit();

                if !self.cursor.advance(self.step, self.geometry.width, self.geometry.height) {
                    return Some(self.finish(now));
                }

                if self.cursor.x == 0 {
                    trace!(
                        row = self.cursor.y,
                        pixel = self.cursor.index(self.geometry.width),
                        address = self.packer.address(),
                        "starting row"
                    );
                }

                self.start_point()
            }
        };

        None
    }

    fn start_point(&self) -> Phase {
        Phase::ComputePoint(PointIterator::new(
            self.cursor.world_x,
            self.cursor.world_y,
            self.request.max_iterations(),
        ))
    }

    fn colour_for(&self, iterations: u32) -> Rgb565 {
        let max_iterations = self.request.max_iterations();

        if iterations >= max_iterations {
            return BACKGROUND;
        }

        let index = spread_colour_index(iterations, max_iterations);

        self.colours
            .as_ref()
            .map_or(BACKGROUND, |table| table.get(index))
    }

    fn finish(&mut self, now: u64) -> RenderSummary {
        self.colours = None;

        RenderSummary {
            pixels: self.geometry.pixel_count(),
            writes: self.writes,
            ticks: now - self.accepted_at + 1,
        }
    }
}

#[derive(Debug, Default)]
enum EngineState {
    #[default]
    Idle,
    Rendering(Box<Render>),
}

/// The drawing engine: a single sequential state machine advanced one
/// tick per [`RasterEngine::step`] call.
///
/// A request is held pending until the engine is idle, then acknowledged
/// with a one-tick [`EngineEvent::Accepted`]. The render walks every
/// pixel of the latched geometry and ends with a one-tick
/// [`EngineEvent::Completed`].
#[derive(Debug, Default)]
pub struct RasterEngine {
    state: EngineState,
    pending: Option<RenderRequest>,
    ticks: u64,
}

impl RasterEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the request line. An earlier request that has not been
    /// acknowledged yet is replaced.
    pub fn request(&mut self, request: RenderRequest) {
        self.pending = Some(request);
    }

    pub fn request_command(&mut self, command: &RenderCommand) {
        self.request(command.decode());
    }

    /// Drops the request line without it having been acknowledged.
    pub fn withdraw_request(&mut self) -> Option<RenderRequest> {
        self.pending.take()
    }

    #[must_use]
    pub fn has_pending_request(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn busy(&self) -> bool {
        matches!(self.state, EngineState::Rendering(_))
    }

    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        match &self.state {
            EngineState::Idle => EnginePhase::Idle,
            EngineState::Rendering(render) => render.phase.kind(),
        }
    }

    /// Ticks elapsed since the engine was created.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The request being rendered, if any.
    #[must_use]
    pub fn active_request(&self) -> Option<&RenderRequest> {
        match &self.state {
            EngineState::Idle => None,
            EngineState::Rendering(render) => Some(&render.request),
        }
    }

    #[must_use]
    pub fn colour_table(&self) -> Option<&ColourTable> {
        match &self.state {
            EngineState::Idle => None,
            EngineState::Rendering(render) => render.colours.as_ref(),
        }
    }

    #[must_use]
    pub fn cursor(&self) -> Option<PixelCursor> {
        match &self.state {
            EngineState::Idle => None,
            EngineState::Rendering(render) => Some(render.cursor),
        }
    }

    /// Advances the engine by one tick.
    pub fn step<F: FramebufferPort + ?Sized>(&mut self, framebuffer: &mut F) -> Option<EngineEvent> {
        self.ticks += 1;

        let summary = match &mut self.state {
            EngineState::Idle => return self.accept(framebuffer),
            EngineState::Rendering(render) => render.tick(framebuffer, self.ticks)?,
        };

        self.state = EngineState::Idle;
        debug!(
            pixels = summary.pixels,
            writes = summary.writes,
            ticks = summary.ticks,
            "render complete"
        );

        Some(EngineEvent::Completed(summary))
    }

    /// Aborts any render immediately. Nothing in flight is finished or
    /// flushed. A pending request stays pending.
    pub fn reset(&mut self) {
        if let EngineState::Rendering(render) = &self.state {
            warn!(
                x = render.cursor.x,
                y = render.cursor.y,
                phase = ?render.phase.kind(),
                "render aborted by reset"
            );
        }

        self.state = EngineState::Idle;
    }

    fn accept<F: FramebufferPort + ?Sized>(&mut self, framebuffer: &F) -> Option<EngineEvent> {
        let request = self.pending.take()?;
        let geometry = framebuffer.geometry();

        debug!(
            centre_x = %request.centre_x(),
            centre_y = %request.centre_y(),
            zoom = request.zoom(),
            max_iterations = request.max_iterations(),
            width = geometry.width,
            height = geometry.height,
            "render accepted"
        );

        self.state = EngineState::Rendering(Box::new(Render::new(request, geometry, self.ticks)));

        Some(EngineEvent::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::framebuffer::memory::MemoryFramebuffer;
    use crate::core::data::control_colours::ControlColours;
    use crate::core::data::frame_write::ByteEnable;
    use crate::core::fractals::mandelbrot::point_iterator::iterate;

    fn run_until_complete(engine: &mut RasterEngine, memory: &mut MemoryFramebuffer) -> RenderSummary {
        for _ in 0..10_000_000 {
            if let Some(EngineEvent::Completed(summary)) = engine.step(memory) {
                return summary;
            }
        }
        panic!("render did not complete");
    }

    fn small_request(max_iterations: u32) -> RenderRequest {
        RenderRequest::new(Fixed::from_f64(-0.5), Fixed::ZERO, 0, max_iterations, ControlColours::default())
    }

    #[test]
    fn test_idle_engine_without_request_stays_idle() {
        let mut engine = RasterEngine::new();
        let mut memory = MemoryFramebuffer::new(DisplayGeometry::new(4, 4, 0));

        assert_eq!(engine.step(&mut memory), None);
        assert!(!engine.busy());
        assert_eq!(engine.phase(), EnginePhase::Idle);
    }

    #[test]
    fn test_accept_pulses_once_and_raises_busy() {
        let mut engine = RasterEngine::new();
        let mut memory = MemoryFramebuffer::new(DisplayGeometry::new(4, 4, 0));

        engine.request(small_request(8));

        assert_eq!(engine.step(&mut memory), Some(EngineEvent::Accepted));
        assert!(engine.busy());
        assert!(!engine.has_pending_request());
        assert_eq!(engine.step(&mut memory), None);
        assert_eq!(engine.phase(), EnginePhase::BuildColours);
    }

    #[test]
    fn test_phase_sequence_for_first_pixel() {
        let mut engine = RasterEngine::new();
        let mut memory = MemoryFramebuffer::new(DisplayGeometry::new(2, 1, 0));

        // far outside the set, so the iterator finishes on its second tick
        engine.request(RenderRequest::new(Fixed::from_f64(3.5), Fixed::ZERO, 10, 8, ControlColours::default()));

        let mut phases = vec![];
        for _ in 0..10 {
            engine.step(&mut memory);
            phases.push(engine.phase());
        }

        assert_eq!(
            phases,
            vec![
                EnginePhase::Setup,
                EnginePhase::BuildColours,
                EnginePhase::StoreColours,
                EnginePhase::ComputePoint,
                EnginePhase::ComputePoint,
                EnginePhase::FetchColour,
                EnginePhase::PackPixel,
                EnginePhase::WritePixel,
                EnginePhase::Advance,
                EnginePhase::ComputePoint,
            ]
        );
    }

    #[test]
    fn test_completion_pulses_once_and_returns_to_idle() {
        let mut engine = RasterEngine::new();
        let mut memory = MemoryFramebuffer::new(DisplayGeometry::new(6, 4, 0));

        engine.request(small_request(16));
        let summary = run_until_complete(&mut engine, &mut memory);

        assert_eq!(summary.pixels, 24);
        assert_eq!(summary.writes, 24);
        assert!(!engine.busy());
        assert!(engine.colour_table().is_none());
        assert!(engine.cursor().is_none());
        assert_eq!(engine.step(&mut memory), None);
    }

    #[test]
    fn test_every_pixel_written_once_in_raster_order() {
        let geometry = DisplayGeometry::new(5, 3, 0x200);
        let mut engine = RasterEngine::new();
        let mut memory = MemoryFramebuffer::new(geometry).with_write_log();

        engine.request(small_request(32));
        run_until_complete(&mut engine, &mut memory);

        let log = memory.write_log();
        assert_eq!(log.len(), 15);

        let mut last_address = geometry.base_address;
        for (pixel, write) in log.iter().enumerate() {
            let expected_address = geometry.base_address + (pixel / 2) as u32;
            let expected_enable = if pixel % 2 == 0 {
                ByteEnable::LOW_HALF
            } else {
                ByteEnable::HIGH_HALF
            };

            assert_eq!(write.address, expected_address);
            assert_eq!(write.byte_enable, expected_enable);
            assert!(write.address >= last_address);
            if write.address > last_address {
                // moved on only after the previous word's high half
                assert_eq!(pixel % 2, 0);
            }
            last_address = write.address;
        }

        assert!(memory.frame().pixels().iter().all(|&p| p != Rgb565::GREY));
    }

    #[test]
    fn test_pixels_match_reference_computation() {
        let geometry = DisplayGeometry::new(8, 6, 0);
        let request = RenderRequest::new(Fixed::from_f64(-0.75), Fixed::from_f64(0.1), 2, 64, ControlColours::default());
        let mut engine = RasterEngine::new();
        let mut memory = MemoryFramebuffer::new(geometry);

        engine.request(request);
        run_until_complete(&mut engine, &mut memory);

        let step = step_size(2);
        let (left, top) = top_left(request.centre_x(), request.centre_y(), step, &geometry);
        let table = build_colour_table(request.controls(), 64);

        for y in 0..geometry.height {
            for x in 0..geometry.width {
                let world_x = left + step.scale(x as i32);
                let world_y = top - step.scale(y as i32);
                let iterations = iterate(world_x, world_y, 64);
                let expected = if iterations < 64 {
                    table.get(spread_colour_index(iterations, 64))
                } else {
                    BACKGROUND
                };

                assert_eq!(memory.pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_escape_counts_match_drawing_loop_colours() {
        // c = 1 escapes on iteration 4 and its right neighbour on 3; with
        // cap 100 the spread factor is 2 and the default table has stride 2
        let geometry = DisplayGeometry::new(16, 12, 0);
        let mut engine = RasterEngine::new();
        let mut memory = MemoryFramebuffer::new(geometry);

        engine.request(RenderRequest::new(Fixed::ONE, Fixed::ZERO, 10, 100, ControlColours::default()));
        run_until_complete(&mut engine, &mut memory);

        assert_eq!(spread_colour_index(4, 100), 8);
        assert_eq!(memory.pixel(8, 6), Some(Rgb565::from_raw(0x0010)));
        assert_eq!(memory.pixel(9, 6), Some(Rgb565::from_raw(0x000C)));
    }

    #[test]
    fn test_single_iteration_cap_paints_everything_background() {
        // straddles x = 2, but one iteration only ever sees z = 0
        let geometry = DisplayGeometry::new(16, 12, 0);
        let controls = ControlColours::uniform(Rgb565::from_raw(0xF800));
        let request = RenderRequest::new(Fixed::from_f64(2.0), Fixed::ZERO, 0, 1, controls);
        let mut engine = RasterEngine::new();
        let mut memory = MemoryFramebuffer::new(geometry);

        engine.request(request);
        run_until_complete(&mut engine, &mut memory);

        assert!(memory.frame().pixels().iter().all(|&p| p == BACKGROUND));
    }

    #[test]
    fn test_request_while_busy_waits_for_completion() {
        let mut engine = RasterEngine::new();
        let mut memory = MemoryFramebuffer::new(DisplayGeometry::new(4, 2, 0));
        let second = RenderRequest::new(Fixed::ZERO, Fixed::ZERO, 5, 10, ControlColours::default());

        engine.request(small_request(8));
        assert_eq!(engine.step(&mut memory), Some(EngineEvent::Accepted));

        engine.request(second);

        let mut accepted = 0;
        let mut completed = false;
        for _ in 0..1_000_000 {
            match engine.step(&mut memory) {
                Some(EngineEvent::Accepted) => {
                    assert!(completed, "second request acknowledged while busy");
                    accepted += 1;
                    break;
                }
                Some(EngineEvent::Completed(_)) => completed = true,
                None => assert!(engine.has_pending_request() || completed),
            }
        }

        assert_eq!(accepted, 1);
        assert_eq!(engine.active_request(), Some(&second));
    }

    #[test]
    fn test_write_waits_for_acknowledge() {
        let mut engine = RasterEngine::new();
        let mut memory = MemoryFramebuffer::new(DisplayGeometry::new(2, 1, 0)).with_ack_latency(3);

        engine.request(RenderRequest::new(Fixed::from_f64(3.5), Fixed::ZERO, 10, 8, ControlColours::default()));
        while engine.phase() != EnginePhase::WritePixel {
            engine.step(&mut memory);
        }

        for _ in 0..3 {
            engine.step(&mut memory);
            assert_eq!(engine.phase(), EnginePhase::WritePixel);
            assert_eq!(memory.writes(), 0);
        }

        engine.step(&mut memory);
        assert_eq!(engine.phase(), EnginePhase::Advance);
        assert_eq!(memory.writes(), 1);
    }

    #[test]
    fn test_ack_latency_does_not_change_image() {
        let geometry = DisplayGeometry::new(6, 4, 0);
        let mut fast = MemoryFramebuffer::new(geometry);
        let mut slow = MemoryFramebuffer::new(geometry).with_ack_latency(2);

        let mut engine = RasterEngine::new();
        engine.request(small_request(20));
        let fast_summary = run_until_complete(&mut engine, &mut fast);
        engine.request(small_request(20));
        let slow_summary = run_until_complete(&mut engine, &mut slow);

        assert_eq!(fast.frame(), slow.frame());
        assert_eq!(slow_summary.ticks, fast_summary.ticks + 2 * 24);
    }

    #[test]
    fn test_reset_aborts_immediately_without_flushing() {
        let mut engine = RasterEngine::new();
        let mut memory = MemoryFramebuffer::new(DisplayGeometry::new(4, 4, 0));

        engine.request(small_request(50));
        for _ in 0..40 {
            engine.step(&mut memory);
        }
        let writes_before = memory.writes();
        assert!(engine.busy());

        engine.reset();

        assert!(!engine.busy());
        assert_eq!(engine.phase(), EnginePhase::Idle);
        assert!(engine.colour_table().is_none());
        assert_eq!(engine.step(&mut memory), None);
        assert_eq!(memory.writes(), writes_before);
    }

    #[test]
    fn test_reset_keeps_unacknowledged_request() {
        let mut engine = RasterEngine::new();
        let mut memory = MemoryFramebuffer::new(DisplayGeometry::new(4, 4, 0));

        engine.request(small_request(8));
        engine.step(&mut memory);
        engine.request(small_request(9));
        engine.reset();

        assert_eq!(engine.step(&mut memory), Some(EngineEvent::Accepted));
        assert_eq!(engine.active_request().map(|r| r.max_iterations()), Some(9));
    }

    #[test]
    fn test_empty_geometry_completes_without_writes() {
        let mut engine = RasterEngine::new();
        let mut memory = MemoryFramebuffer::new(DisplayGeometry::new(0, 0, 0));

        engine.request(small_request(8));
        let summary = run_until_complete(&mut engine, &mut memory);

        assert_eq!(summary.pixels, 0);
        assert_eq!(summary.writes, 0);
    }

    #[test]
    fn test_command_is_decoded_and_clamped() {
        let mut engine = RasterEngine::new();
        let mut memory = MemoryFramebuffer::new(DisplayGeometry::new(2, 2, 0));

        engine.request_command(&RenderCommand {
            centre_x: 0,
            centre_y: 0,
            zoom: 99,
            max_iterations: 0,
            colour_words: [0; 3],
        });
        engine.step(&mut memory);

        let active = engine.active_request().copied();
        assert_eq!(active.map(|r| r.zoom()), Some(0));
        assert_eq!(active.map(|r| r.max_iterations()), Some(1));
    }
}
