use crate::core::data::colour::Rgb565;
use crate::core::data::colour_table::ColourTable;
use crate::core::data::control_colours::ControlColours;

/// Expands the control colours into every distinct colour along the
/// gradient.
///
/// Each segment contributes its start colour followed by one colour per
/// step, where every channel that has not yet reached the segment end
/// moves one unit toward it. The segment end itself is included. A
/// segment with identical endpoints contributes only its start.
#[must_use]
pub fn unique_colours(controls: &ControlColours) -> Vec<Rgb565> {
    let mut colours = Vec::new();

    for (start, end) in controls.segments() {
        let target = [end.red(), end.green(), end.blue()];
        let mut channels = [start.red(), start.green(), start.blue()];
        let directions = [0, 1, 2].map(|i| target[i].cmp(&channels[i]));

        colours.push(start);

        while channels != target {
            for ((channel, goal), direction) in channels.iter_mut().zip(target).zip(directions) {
                if *channel != goal {
                    match direction {
                        std::cmp::Ordering::Greater => *channel += 1,
                        std::cmp::Ordering::Less => *channel -= 1,
                        std::cmp::Ordering::Equal => {}
                    }
                }
            }

            colours.push(Rgb565::from_channels(channels[0], channels[1], channels[2]));
        }
    }

    colours
}

/// Resamples `source` to exactly `target_length` entries.
///
/// A longer source is subsampled with a fixed integer stride; a shorter
/// one has each colour repeated `ceil(target / source)` times. Any slot
/// past the end of the source reuses its last colour.
#[must_use]
pub fn resample(source: &[Rgb565], target_length: usize) -> Vec<Rgb565> {
    let Some(&last) = source.last() else {
        return vec![Rgb565::BLACK; target_length];
    };
    let at = |index: usize| source.get(index).copied().unwrap_or(last);

    if source.len() > target_length {
        let stride = (source.len() / target_length.max(1)).max(1);

        (0..target_length).map(|i| at(i * stride)).collect()
    } else {
        let repeat = target_length.div_ceil(source.len());

        (0..target_length).map(|i| at(i / repeat)).collect()
    }
}

/// Builds the colour table for one render.
///
/// The table always has exactly `target_length` entries; a zero length is
/// treated as one.
#[must_use]
pub fn build_colour_table(controls: &ControlColours, target_length: u32) -> ColourTable {
    let target_length = target_length.max(1) as usize;
    let unique = unique_colours(controls);

    ColourTable::from_entries(resample(&unique, target_length))
}
