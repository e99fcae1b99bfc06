//! The thin view layer between workflows and the terminal.
//!
//! Workflows in [`crate::controller`] never print. They call [`View`] methods,
//! which lets tests record every UI effect instead of drawing it.

use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use docgen_core::export::DownloadLink;
use docgen_core::mode::Mode;
use docgen_core::summary::{FileListing, FileSummary, ProjectSummary, RepositorySummary};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Label of the generate control when idle.
pub const IDLE_GENERATE_LABEL: &str = "Generate documentation";

/// Something that displays a percentage. Written from the progress ticker task.
pub trait ProgressSink: Send + Sync {
    fn set_progress(&self, percent: f64);
}

pub trait View {
    /// Activate the panel of `mode` and show its progress message.
    fn show_mode(&self, mode: Mode);
    fn show_file(&self, summary: &FileSummary);
    fn show_project(&self, summary: &ProjectSummary);
    fn show_repository(&self, summary: &RepositorySummary);

    fn set_generate_enabled(&self, enabled: bool);
    fn set_generate_label(&self, label: &str);
    fn set_analyze_busy(&self, busy: bool);

    fn show_loading(&self, message: &str);
    fn hide_loading(&self);
    /// Sink for the progress bar of the current loading indicator.
    fn progress(&self) -> Arc<dyn ProgressSink>;

    /// Reveal the result panel with the generated Markdown.
    fn show_result(&self, documentation: &str, download: &DownloadLink);
    fn hide_result(&self);

    /// Transient "copied" feedback.
    fn flash_copied(&self);
    fn notify_saved(&self, path: &Path);

    /// Blocking, user-facing error message.
    fn alert(&self, message: &str);
}

struct BarSink(ProgressBar);

impl ProgressSink for BarSink {
    fn set_progress(&self, percent: f64) {
        if !self.0.is_finished() {
            self.0.set_position(percent.clamp(0.0, 100.0).round() as u64);
        }
    }
}

/// Renders the controller on stderr/stdout with colors and an indicatif bar.
///
/// With `quiet` set only alerts are written; the caller prints results itself
/// (used for `--json` output).
pub struct TerminalView {
    quiet: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl TerminalView {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            bar: Mutex::new(None),
        }
    }

    fn current_bar(&self) -> Option<ProgressBar> {
        self.bar.lock().ok().and_then(|bar| bar.clone())
    }

    /// Print without tearing the progress bar.
    fn print(&self, f: impl FnOnce()) {
        match self.current_bar() {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }

    fn print_listing(listing: &FileListing) {
        for path in &listing.shown {
            eprintln!("    {}", path.bright_white());
        }
        if let Some(more) = listing.overflow_label() {
            eprintln!("    {}", more.bright_black());
        }
    }
}

impl View for TerminalView {
    fn show_mode(&self, mode: Mode) {
        if self.quiet {
            return;
        }
        let tabs: Vec<String> = Mode::ALL
            .iter()
            .map(|m| {
                if *m == mode {
                    f!("[{}]", m.as_str()).bright_cyan().bold().to_string()
                } else {
                    m.as_str().bright_black().to_string()
                }
            })
            .collect();
        self.print(|| eprintln!("{} {}", "Mode:".green(), tabs.join(" ")));
    }

    fn show_file(&self, summary: &FileSummary) {
        if self.quiet {
            return;
        }
        self.print(|| {
            eprintln!(
                "{} {} ({})",
                "File:".green(),
                summary.name.bright_white().bold(),
                f!("File size: {}", summary.size).bright_yellow()
            );
        });
    }

    fn show_project(&self, summary: &ProjectSummary) {
        if self.quiet {
            return;
        }
        self.print(|| {
            eprintln!("\n{}", "=".repeat(RULE_WIDTH).bright_cyan());
            eprintln!(
                "{}",
                f!("PROJECT {}", summary.archive_name).bright_cyan().bold()
            );
            eprintln!("{}", "=".repeat(RULE_WIDTH).bright_cyan());

            let mut table = new_table();
            table.add_row(prettytable::row![
                "Total files".green(),
                summary.total_files.to_string().bright_cyan().bold()
            ]);
            table.add_row(prettytable::row![
                "Code files".green(),
                summary.total_files.to_string().bright_cyan()
            ]);
            table.add_row(prettytable::row![
                "Main language".green(),
                summary.main_language.bright_magenta()
            ]);
            table.add_row(prettytable::row![
                "Size".green(),
                summary.size.bright_yellow()
            ]);
            let _ = table.print(&mut std::io::stderr());

            eprintln!("\n  {}", "Detected files".bright_white().bold());
            Self::print_listing(&summary.listing);
            eprintln!();
        });
    }

    fn show_repository(&self, summary: &RepositorySummary) {
        if self.quiet {
            return;
        }
        self.print(|| {
            eprintln!("\n{}", "=".repeat(RULE_WIDTH).bright_cyan());
            eprintln!("{}", f!("REPOSITORY {}", summary.name).bright_cyan().bold());
            eprintln!("{}", "=".repeat(RULE_WIDTH).bright_cyan());
            eprintln!("{}", summary.description.white());
            eprintln!("{}", summary.url.cyan().underline());

            let mut table = new_table();
            table.add_row(prettytable::row![
                "Stars".green(),
                summary.stars.to_string().bright_yellow(),
                "Forks".green(),
                summary.forks.to_string().bright_yellow()
            ]);
            table.add_row(prettytable::row![
                "Language".green(),
                summary.language.bright_magenta(),
                "Main language".green(),
                summary.main_language.bright_magenta()
            ]);
            table.add_row(prettytable::row![
                "Code files".green(),
                summary.code_files.to_string().bright_cyan(),
                "Repository size".green(),
                summary.size.bright_yellow()
            ]);
            let _ = table.print(&mut std::io::stderr());

            eprintln!("\n  {}", "Detected files".bright_white().bold());
            Self::print_listing(&summary.listing);
            eprintln!();
        });
    }

    fn set_generate_enabled(&self, enabled: bool) {
        log::debug!("generate control enabled={enabled}");
    }

    fn set_generate_label(&self, label: &str) {
        log::debug!("generate control label={label:?}");
    }

    fn set_analyze_busy(&self, busy: bool) {
        log::debug!("analyze control busy={busy}");
    }

    fn show_loading(&self, message: &str) {
        let bar = if self.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(100)
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.bar.lock() {
            if let Some(previous) = slot.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn hide_loading(&self) {
        let bar = self.bar.lock().ok().and_then(|mut slot| slot.take());
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
    }

    fn progress(&self) -> Arc<dyn ProgressSink> {
        Arc::new(BarSink(
            self.current_bar().unwrap_or_else(ProgressBar::hidden),
        ))
    }

    fn show_result(&self, documentation: &str, download: &DownloadLink) {
        if self.quiet {
            return;
        }
        self.print(|| {
            eprintln!("\n{}", "=".repeat(RULE_WIDTH).bright_magenta());
            eprintln!("{}", "DOCUMENTATION".bright_magenta().bold());
            eprintln!("{}", "=".repeat(RULE_WIDTH).bright_magenta());
            println!("{}", documentation);
            eprintln!("{}", "=".repeat(RULE_WIDTH).bright_magenta());
            eprintln!(
                "{}: {}",
                "Markdown".green(),
                download.file_name.bright_white()
            );
        });
    }

    fn hide_result(&self) {}

    fn flash_copied(&self) {
        self.print(|| eprintln!("{}", "Copied!".green().bold()));
    }

    fn notify_saved(&self, path: &Path) {
        self.print(|| eprintln!("{} {}", "Saved to:".green().bold(), path.display()));
    }

    fn alert(&self, message: &str) {
        self.print(|| eprintln!("{} {}", "✗".red().bold(), message.red()));
    }
}
