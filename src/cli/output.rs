//! Simple line-based CLI output utilities.

use crate::cache::{LogEntry, SelectionOption};

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Print a section header.
///
/// ```text
/// RENDER LOG
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "═".repeat(LINE_WIDTH));
}

/// Print a line within a section.
///
/// ```text
///   ✓ Wrote ./stls.zip
/// ```
pub fn print_step_line(icon: &str, message: &str) {
    println!("  {} {}", icon, message);
}

/// Print one log entry.
///
/// ```text
///   12:00:01 [extrude] done
///   12:00:02 ✗ Render failed: IO error: connection reset
/// ```
pub fn print_log_entry(entry: &LogEntry) {
    let time = entry.received_at.format("%H:%M:%S");
    if entry.is_error() {
        println!("  {} {} {}", time, icons::FAILURE, entry.text);
    } else {
        println!("  {} {}", time, entry.text);
    }
}

/// Print the selectable artifacts, marking the selected one.
///
/// ```text
///   → [0] base.stl
///     [1] lid.stl
/// ```
pub fn print_options(options: &[SelectionOption], selected: Option<usize>) {
    if options.is_empty() {
        print_step_line(icons::WARNING, "No artifacts received");
        return;
    }
    for option in options {
        let marker = if Some(option.index.get()) == selected {
            "→"
        } else {
            " "
        };
        println!("  {} [{}] {}", marker, option.index, option.name);
    }
}

/// Print the closing separator.
pub fn print_footer() {
    println!("{}", "═".repeat(LINE_WIDTH));
}

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
}
