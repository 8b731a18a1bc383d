use crate::core::data::fixed::{Fixed, WideFixed, exceeds_escape_threshold};

/// Escape-time iterator for a single start point, advanced one
/// recurrence step at a time.
///
/// Each step reads only the previous iterate: it takes the squared
/// modulus of `z`, then forms the next `z`, then counts the iteration.
/// The loop stops once a step has seen a modulus above 4.0 or the count
/// has reached the cap, so an escaping point reports the step that
/// observed the escape.
#[derive(Debug, Clone)]
pub struct PointIterator {
    x0: WideFixed,
    y0: WideFixed,
    zr: WideFixed,
    zi: WideFixed,
    modulus_sq: WideFixed,
    iterations: u32,
    max_iterations: u32,
    outcome: Option<u32>,
}

impl PointIterator {
    #[must_use]
    pub fn new(x0: Fixed, y0: Fixed, max_iterations: u32) -> Self {
        Self {
            x0: x0.widen(),
            y0: y0.widen(),
            zr: WideFixed::ZERO,
            zi: WideFixed::ZERO,
            modulus_sq: WideFixed::ZERO,
            iterations: 0,
            max_iterations,
            outcome: (max_iterations == 0).then_some(0),
        }
    }

    /// Runs one iteration:
    ///
    /// ```text
    /// modulus_sq' = zr·zr + zi·zi
    /// zi'         = (zr·zi << 1) + y0
    /// zr'         = zr·zr − zi·zi + x0
    /// ```
    ///
    /// Returns the final count once the loop condition fails; further
    /// calls keep returning it without doing more work.
    pub fn step(&mut self) -> Option<u32> {
        if self.outcome.is_some() {
            return self.outcome;
        }

        let zr_sq = self.zr.mul(self.zr);
        let zi_sq = self.zi.mul(self.zi);
        let cross = self.zr.mul(self.zi);

        self.modulus_sq = zr_sq + zi_sq;
        self.zi = (cross << 1) + self.y0;
        self.zr = zr_sq - zi_sq + self.x0;
        self.iterations += 1;

        if exceeds_escape_threshold(self.modulus_sq) || self.iterations >= self.max_iterations {
            self.outcome = Some(self.iterations);
        }

        self.outcome
    }

    /// Iterations run so far.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    #[must_use]
    pub fn outcome(&self) -> Option<u32> {
        self.outcome
    }
}

/// Runs the escape-time recurrence for `(x0, y0)` to completion.
///
/// The result is the iteration on which a modulus above 2 was seen, or
/// `max_iterations` if none was seen within the cap. It never exceeds the
/// cap, so a cap of 1 reports every point as bounded.
#[must_use]
pub fn iterate(x0: Fixed, y0: Fixed, max_iterations: u32) -> u32 {
    let mut iterator = PointIterator::new(x0, y0, max_iterations);

    loop {
        if let Some(result) = iterator.step() {
            return result;
        }
    }
}
