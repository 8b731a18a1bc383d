pub mod adapters;
pub mod config;
pub mod controllers;
pub mod core;
pub mod input;
pub mod presenters;

pub use crate::adapters::framebuffer::memory::MemoryFramebuffer;
pub use crate::config::{ConfigError, EngineConfig};
pub use crate::controllers::batch::batch::{BatchController, BatchError, VerifyReport};
pub use crate::core::actions::render_frame::render_frame::{DriveError, render_frame};
pub use crate::core::data::display_geometry::DisplayGeometry;
pub use crate::core::data::fixed::Fixed;
pub use crate::core::data::render_request::RenderRequest;
pub use crate::core::engine::events::{EngineEvent, RenderSummary};
pub use crate::core::engine::ports::framebuffer::FramebufferPort;
pub use crate::core::engine::raster_engine::RasterEngine;
pub use crate::input::test_cases::{RenderCase, read_test_cases};
pub use crate::presenters::file::framebuffer_dump::FramebufferDumpPresenter;
pub use crate::presenters::file::ppm::PpmFilePresenter;
