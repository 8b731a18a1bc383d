/// Tables shorter than this are indexed by the raw iteration count.
pub const SPREAD_MIN_ITERATIONS: u32 = 16;

/// Multiplier applied to the iteration count for a given cap.
///
/// Kept as the exact truncating-shift expression so rendered output
/// matches reference frames bit for bit.
#[must_use]
pub const fn spread_factor(max_iterations: u32) -> i64 {
    let m = max_iterations as i64;

    (m >> 4) - (m >> 5) - (m >> 6) - (m >> 10)
}

/// Maps an escape count to a colour-table index, stretching low counts
/// across more of the table.
#[must_use]
pub const fn spread_colour_index(iterations: u32, max_iterations: u32) -> usize {
    if max_iterations < SPREAD_MIN_ITERATIONS {
        return iterations as usize;
    }

    let spread = iterations as i64 * spread_factor(max_iterations);
    let last = max_iterations as i64 - 1;

    if spread < last {
        if spread < 0 { 0 } else { spread as usize }
    } else {
        last as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_caps_use_raw_count() {
        assert_eq!(spread_colour_index(0, 1), 0);
        assert_eq!(spread_colour_index(7, 15), 7);
    }

    #[test]
    fn test_factor_uses_truncating_shifts() {
        assert_eq!(spread_factor(16), 1);
        assert_eq!(spread_factor(48), 2);
        assert_eq!(spread_factor(64), 1);
        // 63 - 31 - 15 - 0
        assert_eq!(spread_factor(1023), 17);
        // 16 - 8 - 4 - 0
        assert_eq!(spread_factor(256), 4);
    }

    #[test]
    fn test_index_is_clamped_to_last_entry() {
        assert_eq!(spread_colour_index(10, 256), 40);
        assert_eq!(spread_colour_index(63, 256), 252);
        assert_eq!(spread_colour_index(64, 256), 255);
        assert_eq!(spread_colour_index(255, 256), 255);
    }

    #[test]
    fn test_index_always_within_table() {
        for max_iterations in 1..=1023 {
            for iterations in 0..max_iterations {
                assert!(spread_colour_index(iterations, max_iterations) < max_iterations as usize);
            }
        }
    }
}
