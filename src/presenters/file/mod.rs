pub mod framebuffer_dump;
pub mod ppm;
