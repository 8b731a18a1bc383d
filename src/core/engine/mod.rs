pub mod events;
pub mod pixel_packer;
pub mod ports;
pub mod raster_engine;
