use crate::catalog::{ArchiveCandidate, RemovalPlan, VendorCatalog};
use crate::error::Result;
use crate::selection::{SelectionSession, Transition};
use std::io::{BufRead, Write};

const RULE_WIDTH: usize = 80;

/// Line-oriented operator input and menu output.
pub struct MenuIo<R, W> {
    input: R,
    output: W,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Confirmed,
    Cancelled,
}

impl<R: BufRead, W: Write> MenuIo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Reads one line without its terminator. Returns `None` once input is
    /// exhausted.
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

fn rule<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    Ok(())
}

/// Runs the toggle menu until the operator finishes or cancels. `annotate`
/// supplies the text shown after each item name.
pub fn run_selection_menu<R, W, F>(
    io: &mut MenuIo<R, W>,
    session: &mut SelectionSession<'_>,
    title: &str,
    annotate: F,
) -> Result<MenuOutcome>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> String,
{
    loop {
        render_selection_menu(io.output(), session, title, &annotate)?;

        let Some(input) = io.prompt("Enter your choice: ")? else {
            writeln!(io.output())?;
            return Ok(MenuOutcome::Cancelled);
        };

        match session.apply_input(&input) {
            Transition::Finished => return Ok(MenuOutcome::Confirmed),
            Transition::Cancelled => return Ok(MenuOutcome::Cancelled),
            Transition::Continue(notices) => {
                let out = io.output();
                for notice in notices {
                    if notice.is_warning() {
                        writeln!(out, "Warning: {}", notice)?;
                    } else {
                        writeln!(out, "{}", notice)?;
                    }
                }
            }
        }
    }
}

fn render_selection_menu<W: Write, F: Fn(&str) -> String>(
    out: &mut W,
    session: &SelectionSession<'_>,
    title: &str,
    annotate: &F,
) -> Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "{}", title)?;
    rule(out)?;
    writeln!(out)?;

    for (idx, item) in session.items().iter().enumerate() {
        let checkbox = if session.is_selected(item) { "[x]" } else { "[ ]" };
        writeln!(
            out,
            "  {:2}. {} {:<30} {}",
            idx + 1,
            checkbox,
            item,
            annotate(item)
        )?;
    }

    writeln!(out)?;
    rule(out)?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  - Enter numbers to toggle (e.g., 1,3,5 or 1-3)")?;
    writeln!(out, "  - Type 'all' to select all")?;
    writeln!(out, "  - Type 'none' to deselect all")?;

    if !session.presets().is_empty() {
        writeln!(out)?;
        writeln!(out, "Presets:")?;
        for preset in session.presets() {
            writeln!(
                out,
                "  - Type '{}' for {} ({})",
                preset.key, preset.name, preset.description
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "  - Press Enter or type 'done' to continue")?;
    writeln!(out, "  - Type 'q' to quit without changes")?;
    rule(out)?;
    Ok(())
}

/// Asks for explicit `yes`/`y`. Anything else, including end of input, is a
/// refusal.
pub fn confirm<R: BufRead, W: Write>(io: &mut MenuIo<R, W>, question: &str) -> Result<bool> {
    let answer = io.prompt(&format!("{} (yes/no): ", question))?;
    Ok(matches!(
        answer.map(|a| a.trim().to_lowercase()).as_deref(),
        Some("yes") | Some("y")
    ))
}

/// Lets the operator pick one archive by number. Returns `None` on `q` or end
/// of input.
pub fn select_archive<R: BufRead, W: Write>(
    io: &mut MenuIo<R, W>,
    candidates: &[ArchiveCandidate],
) -> Result<Option<usize>> {
    let out = io.output();
    writeln!(out)?;
    writeln!(out, "Found {} workspace archive(s):", candidates.len())?;
    writeln!(out)?;
    for (idx, candidate) in candidates.iter().enumerate() {
        writeln!(
            out,
            "  {:2}. {} ({:.2} MB, modified {})",
            idx + 1,
            candidate.file_name(),
            candidate.size_mb(),
            candidate.modified_display()
        )?;
    }
    writeln!(out)?;

    loop {
        let prompt = format!("Select archive (1-{}) or 'q' to quit: ", candidates.len());
        let Some(answer) = io.prompt(&prompt)? else {
            return Ok(None);
        };

        let answer = answer.trim().to_lowercase();
        if answer == "q" || answer == "quit" {
            return Ok(None);
        }

        match answer.parse::<usize>() {
            Ok(n) if (1..=candidates.len()).contains(&n) => return Ok(Some(n - 1)),
            _ => writeln!(
                io.output(),
                "Invalid selection. Please enter a number between 1 and {}",
                candidates.len()
            )?,
        }
    }
}

pub fn write_vendor_summary<W: Write>(out: &mut W, catalog: &VendorCatalog) -> Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "VENDOR DISTRIBUTION BY CATEGORY")?;
    rule(out)?;
    writeln!(out)?;

    for category in catalog.categories() {
        let vendors: Vec<&str> = catalog.vendors_in(category).collect();
        writeln!(out, "{}:", category)?;
        writeln!(out, "  Vendors ({}): {}", vendors.len(), vendors.join(", "))?;
        writeln!(out)?;
    }

    rule(out)?;
    writeln!(out, "ALL UNIQUE VENDORS ({}):", catalog.len())?;
    rule(out)?;
    for vendor in catalog.vendor_names() {
        writeln!(
            out,
            "  {:<30} (in {} categories)",
            vendor,
            catalog.category_count(&vendor)
        )?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn write_removal_plan<W: Write>(
    out: &mut W,
    kept: &[&str],
    plan: &RemovalPlan,
) -> Result<()> {
    if kept.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "Warning: No vendors selected. All vendor directories will be removed!"
        )?;
    } else {
        writeln!(out)?;
        writeln!(out, "Selected {} vendors to KEEP:", kept.len())?;
        for vendor in kept {
            writeln!(out, "  - {}", vendor)?;
        }
    }

    if plan.is_empty() {
        writeln!(out)?;
        writeln!(out, "No vendor directories to remove.")?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(
        out,
        "The following {} vendors will be REMOVED ({} directories):",
        plan.vendors.len(),
        plan.directory_count()
    )?;
    for entry in &plan.entries {
        if entry.remove.is_empty() {
            continue;
        }
        writeln!(
            out,
            "  {} ({}): {}",
            entry.category,
            entry.remove.len(),
            entry.remove.join(", ")
        )?;
    }
    writeln!(out)?;
    Ok(())
}
