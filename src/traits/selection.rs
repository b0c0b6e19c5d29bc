//! Artifact picker collaborator seam.

use crate::cache::SelectionOption;

/// The list the user picks the previewed artifact from.
pub trait SelectionView: Send {
    /// Replace the whole list. Called with an empty slice on every reset.
    fn rebuild(&mut self, options: &[SelectionOption]);

    /// Add one option at the end, for artifacts arriving later in a session.
    fn append(&mut self, option: &SelectionOption);
}
