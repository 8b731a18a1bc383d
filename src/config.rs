//! Host configuration, read from a TOML file.
//!
//! ```toml
//! [display]
//! width = 640
//! height = 480
//! base_address = 0
//!
//! [framebuffer]
//! ack_latency = 0
//! fill = 0x7BEF
//!
//! [render]
//! tick_budget = 2000000000
//! ```
//!
//! Every key is optional.

use crate::core::data::colour::Rgb565;
use crate::core::data::display_geometry::DisplayGeometry;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::path::Path;

pub const DEFAULT_TICK_BUDGET: u64 = 2_000_000_000;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read config: {}", err),
            Self::Toml(err) => write!(f, "invalid config: {}", err),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Toml(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(err)
    }
}

/// Simulated framebuffer controller behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramebufferConfig {
    /// Ticks a write waits before it is acknowledged.
    pub ack_latency: u32,

    /// Colour of words the engine never wrote.
    pub fill: u16,
}

impl Default for FramebufferConfig {
    fn default() -> Self {
        Self {
            ack_latency: 0,
            fill: Rgb565::GREY.raw(),
        }
    }
}

impl FramebufferConfig {
    #[must_use]
    pub fn fill_colour(&self) -> Rgb565 {
        Rgb565::from_raw(self.fill)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Engine ticks allowed per frame before the render is abandoned.
    pub tick_budget: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tick_budget: DEFAULT_TICK_BUDGET,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub display: DisplayGeometry,
    pub framebuffer: FramebufferConfig,
    pub render: RenderConfig,
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;

        Self::from_toml_str(&text)
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
