pub mod compare_frames;
pub mod render_frame;
