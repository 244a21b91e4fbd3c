//! Output formatting for the CLI.
//!
//! Human-readable messages are suppressed in `--json` mode, where only
//! [`Output::json`] documents and errors reach the terminal.

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    fn out(&self, symbol: StyledObject<&str>, msg: &str) {
        if !self.json {
            println!("{} {}", symbol, msg);
        }
    }

    fn err(&self, symbol: StyledObject<&str>, msg: &str) {
        if !self.json {
            eprintln!("{} {}", symbol, msg);
        }
    }

    pub fn info(&self, msg: &str) {
        self.out(style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.out(style("✓").green(), msg);
    }

    /// Warnings go to stderr.
    pub fn warn(&self, msg: &str) {
        self.err(style("⚠").yellow(), msg);
    }

    /// Errors are printed in both modes; as `{"error": ...}` under `--json`.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.err(style("→").dim(), &style(msg).dim().to_string());
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.json {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    /// Print a value as pretty JSON.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => self.error(&format!("Failed to encode output: {}", e)),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if !self.json {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    /// Print one row of a left-aligned table.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let row = cols
            .iter()
            .zip(widths)
            .map(|(col, &width)| format!("{:width$}", col))
            .collect::<Vec<_>>()
            .join("  ");
        println!("  {}", row);
    }

    /// Progress bar for `len` steps. Hidden under `--json`.
    pub fn progress(&self, len: u64, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }
        let bar_style = ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .map(|s| s.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());

        let pb = ProgressBar::new(len);
        pb.set_style(bar_style);
        pb.set_message(msg.to_string());
        pb
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Mark a selected facet option.
pub fn selected_marker(selected: bool) -> String {
    if selected {
        style("●").green().to_string()
    } else {
        style("○").dim().to_string()
    }
}

/// Truncate text to a column width, with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}
