pub mod compare_frames;
