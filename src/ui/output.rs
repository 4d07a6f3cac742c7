use crate::error::{format_bytes, KurmiError, UserFriendlyError};
use crate::extractor::ExtractionReport;
use crate::pruner::PruneReport;
use console::{style, Emoji, Term};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &KurmiError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    eprintln!();
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    pub fn print_extraction_report(&self, report: &ExtractionReport) {
        match self.mode {
            OutputMode::Human => {
                if !self.quiet {
                    self.print_human_extraction_report(report)
                }
            }
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => self.print_plain_extraction_report(report),
        }
    }

    pub fn print_prune_report(&self, report: &PruneReport) {
        match self.mode {
            OutputMode::Human => {
                if !self.quiet {
                    self.print_human_prune_report(report)
                }
            }
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => self.print_plain_prune_report(report),
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                println!();
                if self.use_colors {
                    println!("{} {}", SPARKLES, style(title).bold().cyan());
                } else {
                    println!("=== {} ===", title);
                }
                println!();
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "header",
                    "title": title
                }));
            }
            OutputMode::Plain => {
                println!("=== {} ===", title);
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {}
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Error => "✗",
                MessageType::Warning => "!",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    /// Right-aligns `value` in `width` columns, then styles it, so escape
    /// codes never count towards the column width.
    fn highlight(&self, value: impl std::fmt::Display, width: usize) -> String {
        let padded = format!("{:>width$}", value, width = width);
        if self.use_colors {
            style(padded).cyan().bold().to_string()
        } else {
            padded
        }
    }

    fn print_human_extraction_report(&self, report: &ExtractionReport) {
        self.print_header("Parsing Complete");

        for category in &report.categories {
            println!(
                "  {:25} {} files - {}",
                category.category,
                self.highlight(category.files, 5),
                category.description
            );
        }

        self.print_separator();
        println!("  {:25} {} files", "TOTAL", self.highlight(report.total_files, 5));
        println!("  Bytes written:   {}", format_bytes(report.total_bytes));
        println!("  Unmatched:       {}", report.unmatched);
        println!("  Time taken:      {}", format_duration(report.extraction_duration));

        if !report.rejected.is_empty() {
            println!();
            println!("Rejected archive members:");
            for member in &report.rejected {
                println!("  - {}", member);
            }
        }

        self.print_separator();
        println!("Output files available at: {}", report.output_directory);
    }

    fn print_plain_extraction_report(&self, report: &ExtractionReport) {
        println!("REPORT: Parsing completed");
        println!("Archive: {}", report.archive);
        for category in &report.categories {
            println!("{}: {}", category.category, category.files);
        }
        println!("Total: {}", report.total_files);
        println!("Unmatched: {}", report.unmatched);
        if !report.rejected.is_empty() {
            println!("Rejected: {}", report.rejected.len());
        }
        println!("Output: {}", report.output_directory);
    }

    fn print_human_prune_report(&self, report: &PruneReport) {
        self.print_header("Vendor Removal Complete");

        for stats in &report.categories {
            let failed = if stats.failed > 0 {
                format!(", {} failed", stats.failed)
            } else {
                String::new()
            };
            println!(
                "  {:25} {} removed, {:>3} kept{}",
                stats.category,
                self.highlight(stats.removed, 3),
                stats.kept,
                failed
            );
        }

        self.print_separator();
        println!(
            "  {:25} {} directories removed",
            "TOTAL",
            self.highlight(report.total_removed(), 3)
        );
        println!("  {:25} {:>3} directories", "KEPT", report.total_kept());
        println!("  {:25} {:>3} vendors", "VENDORS KEPT", report.kept_vendors.len());

        if !report.failures.is_empty() {
            println!();
            println!("Issues encountered:");
            for failure in &report.failures {
                println!("  - {}", failure);
            }
        }
        self.print_separator();
    }

    fn print_plain_prune_report(&self, report: &PruneReport) {
        println!("REPORT: Vendor removal completed");
        for stats in &report.categories {
            println!(
                "{}: removed={} kept={} failed={}",
                stats.category, stats.removed, stats.kept, stats.failed
            );
        }
        println!("Removed: {}", report.total_removed());
        println!("Kept: {}", report.total_kept());
        if report.total_failed() > 0 {
            println!("Failed: {}", report.total_failed());
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Error,
    Warning,
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
