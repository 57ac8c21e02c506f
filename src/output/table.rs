//! Terminal table output.
//!
//! One box header per group followed by a row per candidate. Groups with a
//! baseline fill in the speedup and change columns.

use std::io::Write;

use terminal_size::{terminal_size, Width};

use super::Printer;
use crate::error::Result;
use crate::utils::bench::{format_nanos, Stats};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

// Mean, median, min, max (12 each) + CV, speedup, change (9 each), with separating spaces
const FIXED_COLUMNS: usize = 12 * 4 + 9 * 3 + 7;

/// Human-readable table sink
pub struct TablePrinter<W: Write> {
    out: W,
    width: usize,
    label: String,
    header_printed: bool,
}

impl<W: Write> TablePrinter<W> {
    /// Table sized to the current terminal
    pub fn new(out: W) -> Self {
        Self::with_width(out, get_term_width())
    }

    /// Table with a fixed total width
    pub fn with_width(out: W, width: usize) -> Self {
        Self {
            out,
            width: width.clamp(40, 200),
            label: String::new(),
            header_printed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn label_width(&self) -> usize {
        self.width.saturating_sub(FIXED_COLUMNS + 2).max(15)
    }

    fn table_width(&self) -> usize {
        self.label_width() + FIXED_COLUMNS
    }

    fn print_column_header(&mut self) -> Result<()> {
        let label_width = self.label_width();
        let rule = "─".repeat(self.table_width());
        writeln!(self.out, "  {}", rule)?;
        writeln!(
            self.out,
            "  {:<l_width$} {:>12} {:>12} {:>12} {:>12} {:>9} {:>9} {:>9}",
            "Candidate",
            "Mean",
            "Median",
            "Min",
            "Max",
            "CV",
            "Speedup",
            "Change",
            l_width = label_width
        )?;
        writeln!(self.out, "  {}", rule)?;
        self.header_printed = true;
        Ok(())
    }

    fn print_row(&mut self, stats: &Stats, baseline: Option<&Stats>) -> Result<()> {
        if !self.header_printed {
            self.print_column_header()?;
        }

        let label_width = self.label_width();
        let (speedup, change) = match baseline {
            Some(baseline) => {
                let speedup = stats.speedup_over(baseline);
                let speedup = if speedup.is_finite() {
                    format!("{:.2}x", speedup)
                } else {
                    "inf".to_string()
                };
                let change = format!("{:+.1}%", stats.relative_change(baseline) * 100.0);
                (speedup, change)
            }
            None => (String::new(), String::new()),
        };
        let cv = format!("{:.2}%", stats.coefficient_of_variation());

        writeln!(
            self.out,
            "  {:<l_width$} {:>12} {:>12} {:>12} {:>12} {:>9} {:>9} {:>9}",
            truncate(&self.label, label_width),
            format_nanos(stats.mean),
            format_nanos(stats.median),
            format_nanos(stats.min),
            format_nanos(stats.max),
            cv,
            speedup,
            change,
            l_width = label_width
        )?;
        Ok(())
    }
}

impl<W: Write> Printer for TablePrinter<W> {
    fn run_started(&mut self, groups: usize) -> Result<()> {
        let width = self.width.min(80);
        let title = format!(" Micro-Bench: {} group(s) ", groups);
        let title_len = title.chars().count();
        let padding = width.saturating_sub(title_len + 2) / 2;
        let right_padding = width.saturating_sub(padding + title_len);
        let border = "═".repeat(width);

        writeln!(self.out, "╔{}╗", border)?;
        writeln!(
            self.out,
            "║{}{}{}║",
            " ".repeat(padding),
            title,
            " ".repeat(right_padding)
        )?;
        writeln!(self.out, "╚{}╝", border)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn group_started(&mut self, name: &str, candidates: usize) -> Result<()> {
        let max_content_width = self.width.saturating_sub(4).max(36);
        let name_line = format!("Group:      {}", name);
        let count_line = format!("Candidates: {}", candidates);
        let content_width = name_line
            .chars()
            .count()
            .max(count_line.chars().count())
            .min(max_content_width);
        let border = "─".repeat(content_width + 2);

        writeln!(self.out, "┌{}┐", border)?;
        writeln!(
            self.out,
            "│ {:<width$} │",
            truncate(&name_line, content_width),
            width = content_width
        )?;
        writeln!(
            self.out,
            "│ {:<width$} │",
            truncate(&count_line, content_width),
            width = content_width
        )?;
        writeln!(self.out, "└{}┘", border)?;
        self.header_printed = false;
        Ok(())
    }

    fn candidate_started(&mut self, label: &str) -> Result<()> {
        self.label = label.to_string();
        Ok(())
    }

    fn candidate_finished(&mut self, stats: &Stats) -> Result<()> {
        self.print_row(stats, None)
    }

    fn candidate_compared(&mut self, stats: &Stats, baseline: &Stats) -> Result<()> {
        self.print_row(stats, Some(baseline))
    }

    fn group_finished(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }

    fn run_finished(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "Note: Speedup and Change are relative to the group's baseline mean."
        )?;
        self.out.flush()?;
        Ok(())
    }
}
