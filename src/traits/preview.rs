//! Preview collaborator seam.

use crate::stream::Bounds;

/// Whatever displays the currently selected artifact.
///
/// The session calls [`PreviewSink::load`] once per session for the first
/// artifact and again on every explicit selection change.
pub trait PreviewSink: Send {
    /// Show `payload`, framing the camera with `bounds`.
    fn load(&mut self, payload: &[u8], bounds: &Bounds);

    /// Return the camera to its default framing.
    fn reset_view(&mut self);
}
