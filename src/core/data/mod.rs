pub mod colour;
pub mod colour_table;
pub mod control_colours;
pub mod display_geometry;
pub mod fixed;
pub mod frame;
pub mod frame_write;
pub mod pixel_cursor;
pub mod render_request;
