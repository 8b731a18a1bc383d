/// Single-tick pulses raised by the engine.
///
/// Each event is reported only by the `step` call on which it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// A pending request was taken; `busy` goes high on this tick.
    Accepted,
    /// The last pixel was written; `busy` drops on this tick.
    Completed(RenderSummary),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub pixels: u64,
    pub writes: u64,
    /// Ticks from acceptance to completion, inclusive.
    pub ticks: u64,
}

/// Observable phase of the engine, without its per-phase payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnginePhase {
    Idle,
    Setup,
    BuildColours,
    StoreColours,
    ComputePoint,
    FetchColour,
    PackPixel,
    WritePixel,
    Advance,
}
