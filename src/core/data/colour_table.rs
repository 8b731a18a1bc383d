use crate::core::data::colour::Rgb565;

/// The per-render colour lookup table, exactly `max_iterations` entries long.
///
/// Only the colour-table builder constructs one; it is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourTable {
    entries: Box<[Rgb565]>,
}

impl ColourTable {
    pub(crate) fn from_entries(entries: Vec<Rgb565>) -> Self {
        debug_assert!(!entries.is_empty(), "colour table must not be empty");

        Self {
            entries: entries.into_boxed_slice(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry; out-of-range indices resolve to the last entry.
    #[must_use]
    pub fn get(&self, index: usize) -> Rgb565 {
        let last = self.entries.len().saturating_sub(1);

        self.entries
            .get(index.min(last))
            .copied()
            .unwrap_or(Rgb565::BLACK)
    }

    #[must_use]
    pub fn entries(&self) -> &[Rgb565] {
        &self.entries
    }
}
