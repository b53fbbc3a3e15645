//! Colored terminal output for publishing jobs

use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.verbose, self.quiet)
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    /// Write `marker` in `color`, then the message in the default color
    fn emit(&self, marker: &str, color: Color, message: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(&mut buffer, "{marker}");
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, " {message}");
        if let Err(e) = self.bufwtr.print(&buffer) {
            log::debug!("failed to write to stdout: {}", e);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        self.emit("ℹ", Color::Cyan, message);
    }

    /// Print a progress message
    pub fn progress(&self, message: &str) {
        self.emit("⋯", Color::Magenta, message);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        self.emit("✓", Color::Green, message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        self.emit("⚠", Color::Yellow, message);
    }

    /// Print a detail line, only in verbose mode
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            self.emit("→", Color::Blue, message);
        }
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) {
        if !self.quiet {
            println!("    {message}");
        }
    }

    /// Print an error message to stderr, regardless of quiet mode
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();

        if buffer
            .set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))
            .is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || writeln!(&mut buffer, " {message}").is_err()
            || bufwtr.print(&buffer).is_err()
        {
            eprintln!("✗ {message}");
        }
    }

    /// Print an indented line to stderr, regardless of quiet mode
    pub fn error_detail(&self, message: &str) {
        eprintln!("    {message}");
    }
}
