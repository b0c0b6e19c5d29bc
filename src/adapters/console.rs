//! Terminal observers used by the `meshcast` binary.
//!
//! There is no 3D viewport on a terminal, so the preview reports what it
//! would frame instead of drawing it.

use crate::cache::{LogEntry, SelectionOption};
use crate::cli::output::{icons, print_log_entry, print_step_line};
use crate::stream::Bounds;
use crate::traits::{LogSink, PreviewSink, SelectionView};

/// Prints each log entry as it arrives.
#[derive(Debug, Default)]
pub struct ConsoleLog;

impl LogSink for ConsoleLog {
    fn append_entry(&mut self, entry: &LogEntry) {
        print_log_entry(entry);
    }

    fn clear(&mut self) {}
}

/// Reports the payload size and framing of the previewed artifact.
#[derive(Debug, Default)]
pub struct ConsolePreview {
    /// Set by `--debug`; otherwise previews are only traced
    verbose: bool,
    /// Box the camera is fitted to; the unit cube until something loads
    framing: Bounds,
}

impl ConsolePreview {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            framing: Bounds::default(),
        }
    }

    pub fn framing(&self) -> &Bounds {
        &self.framing
    }
}

impl PreviewSink for ConsolePreview {
    fn load(&mut self, payload: &[u8], bounds: &Bounds) {
        self.framing = *bounds;
        tracing::debug!(
            bytes = payload.len(),
            width = bounds.width,
            height = bounds.height,
            depth = bounds.depth,
            "Preview loaded"
        );
        if self.verbose {
            print_step_line(
                icons::SUCCESS,
                &format!(
                    "Preview: {} bytes, {:.2} x {:.2} x {:.2} (largest side {:.2})",
                    payload.len(),
                    bounds.width,
                    bounds.height,
                    bounds.depth,
                    bounds.max_extent()
                ),
            );
        }
    }

    fn reset_view(&mut self) {
        tracing::debug!(
            mid_x = self.framing.mid_x,
            mid_y = self.framing.mid_y,
            mid_z = self.framing.mid_z,
            distance = self.framing.max_extent(),
            "Preview view reset"
        );
    }
}

/// Mirrors the picker so the binary can list it at the end.
#[derive(Debug, Default)]
pub struct ConsoleSelection {
    options: Vec<SelectionOption>,
}

impl ConsoleSelection {
    pub fn options(&self) -> &[SelectionOption] {
        &self.options
    }
}

impl SelectionView for ConsoleSelection {
    fn rebuild(&mut self, options: &[SelectionOption]) {
        self.options = options.to_vec();
    }

    fn append(&mut self, option: &SelectionOption) {
        tracing::debug!("Artifact {} available: {}", option.index, option.name);
        self.options.push(option.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ArtifactIndex;

    fn option(index: usize, name: &str) -> SelectionOption {
        SelectionOption {
            index: ArtifactIndex::new(index),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_preview_frames_unit_cube_until_loaded() {
        let mut preview = ConsolePreview::new(false);
        assert_eq!(*preview.framing(), Bounds::default());
        assert_eq!(preview.framing().max_extent(), 1.0);

        let bounds = Bounds::from_extents(0.0, 4.0, 0.0, 2.0, -3.0, 3.0);
        preview.load(b"solid", &bounds);
        assert_eq!(*preview.framing(), bounds);
        assert_eq!(preview.framing().max_extent(), 6.0);

        preview.reset_view();
        assert_eq!(*preview.framing(), bounds);
    }

    #[test]
    fn test_selection_appends_and_rebuilds() {
        let mut selection = ConsoleSelection::default();
        selection.append(&option(0, "a.stl"));
        selection.append(&option(1, "b.stl"));
        assert_eq!(selection.options().len(), 2);

        selection.rebuild(&[]);
        assert!(selection.options().is_empty());
    }
}
