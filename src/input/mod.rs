pub mod framebuffer_dump;
pub mod test_cases;
