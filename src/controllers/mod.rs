pub mod batch;
pub mod ports;
