use crate::core::data::display_geometry::DisplayGeometry;
use crate::core::data::fixed::Fixed;
use crate::core::data::render_request::{MAX_ZOOM, clamp_zoom};

/// Distance between neighbouring pixels at the deepest zoom level.
pub const BASE_STEP: Fixed = Fixed::from_raw(0x0000_0FA0);

/// Pixel spacing for a zoom level; each level halves the spacing.
#[must_use]
pub const fn step_size(zoom: u32) -> Fixed {
    let zoom = clamp_zoom(zoom);

    BASE_STEP.scale(1 << (MAX_ZOOM - zoom))
}

/// World coordinate of the top-left pixel for a view centred on
/// `(centre_x, centre_y)`.
#[must_use]
pub fn top_left(centre_x: Fixed, centre_y: Fixed, step: Fixed, geometry: &DisplayGeometry) -> (Fixed, Fixed) {
    let half_width = (geometry.width >> 1) as i32;
    let half_height = (geometry.height >> 1) as i32;

    (
        centre_x - step.scale(half_width),
        centre_y + step.scale(half_height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_doubles_per_zoom_level_out() {
        assert_eq!(step_size(10), BASE_STEP);
        assert_eq!(step_size(9).raw(), 0x0FA0 * 2);
        assert_eq!(step_size(0).raw(), 0x0FA0 * 1024);
    }

    #[test]
    fn test_out_of_range_zoom_uses_widest_step() {
        assert_eq!(step_size(11), step_size(0));
    }

    #[test]
    fn test_top_left_offsets_half_the_display() {
        let geometry = DisplayGeometry::new(640, 480, 0);
        let step = Fixed::from_raw(100);
        let (x, y) = top_left(Fixed::ZERO, Fixed::ZERO, step, &geometry);

        assert_eq!(x.raw(), -320 * 100);
        assert_eq!(y.raw(), 240 * 100);
    }

    #[test]
    fn test_top_left_truncates_odd_dimensions() {
        let geometry = DisplayGeometry::new(5, 3, 0);
        let step = Fixed::from_raw(10);
        let (x, y) = top_left(Fixed::from_raw(1000), Fixed::from_raw(1000), step, &geometry);

        assert_eq!(x.raw(), 1000 - 20);
        assert_eq!(y.raw(), 1000 + 10);
    }

    #[test]
    fn test_top_left_wraps_like_a_32_bit_register() {
        let geometry = DisplayGeometry::new(640, 480, 0);
        let step = step_size(0);
        let (x, _) = top_left(Fixed::from_f64(-3.0), Fixed::ZERO, step, &geometry);
        let expected = Fixed::from_f64(-3.0).raw().wrapping_sub(320 * step.raw());

        assert_eq!(x.raw(), expected);
    }
}
