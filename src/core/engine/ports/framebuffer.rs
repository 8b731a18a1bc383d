use crate::core::data::display_geometry::DisplayGeometry;
use crate::core::data::frame_write::FrameWrite;

/// The display-memory side of the write handshake.
pub trait FramebufferPort {
    /// Geometry reported by the controller. Latched by the engine when a
    /// request is accepted.
    fn geometry(&self) -> DisplayGeometry;

    /// Presents `write` for one tick. Returns `true` when the controller
    /// acknowledges it; until then the engine presents the same write on
    /// every tick.
    fn write(&mut self, write: &FrameWrite) -> bool;
}

impl<F: FramebufferPort + ?Sized> FramebufferPort for &mut F {
    fn geometry(&self) -> DisplayGeometry {
        (**self).geometry()
    }

    fn write(&mut self, write: &FrameWrite) -> bool {
        (**self).write(write)
    }
}
