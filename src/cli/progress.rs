//! Console output utilities for the CLI
//!
//! Plain console helpers for the inspection commands, plus the writer that
//! tees log output to both the console and a file.

use std::io::Write;

// ============================================================================
// Console output helpers
// ============================================================================

/// Print a header section with a box
pub fn print_header(title: &str) {
    let width = 68;
    let title_padded = format!("{:^width$}", title, width = width - 4);
    println!();
    println!("╔{}╗", "═".repeat(width - 2));
    println!("║{}║", title_padded);
    println!("╚{}╝", "═".repeat(width - 2));
    println!();
}

/// Print a success message with checkmark
pub fn print_success(msg: &str) {
    println!("  ✓ {}", msg);
}

/// Print an info message with bullet
pub fn print_info(msg: &str) {
    println!("  • {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("  ⚠ {}", msg);
}

// ============================================================================
// Dual log output
// ============================================================================

/// Writer that duplicates log output to the console and a log file.
pub struct DualWriter {
    pub console: std::io::Stderr,
    pub file: std::fs::File,
}

impl Write for DualWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let _ = self.console.write(buf);
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let _ = self.console.flush();
        self.file.flush()
    }
}
