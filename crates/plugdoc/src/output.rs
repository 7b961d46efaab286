//! Colored terminal output for the plugdoc commands.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Build progress (`Reading docs.json...`, skipped plugins, the final page
/// count) goes to stderr so that `plugdoc sample` can be piped: only
/// [`Output::result`] writes to stdout.
pub(crate) struct Output {
    stderr: Term,
    stdout: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            stderr: Term::stderr(),
            stdout: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Progress line, e.g. the config path or a written file.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.stderr.write_line(msg);
    }

    /// Final `Done! ...` line, green.
    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.green, msg);
    }

    /// Skipped plugin, yellow.
    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&self.yellow, msg);
    }

    /// Fatal error before exit, red.
    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.red, msg);
    }

    /// Plugin count, cyan bold.
    pub(crate) fn highlight(&self, msg: &str) {
        self.styled(&self.cyan_bold, msg);
    }

    /// Command output (the sample task), uncolored on stdout.
    pub(crate) fn result(&self, text: &str) {
        let _ = self.stdout.write_line(text);
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.stderr.write_line(&style.apply_to(msg).to_string());
    }
}
