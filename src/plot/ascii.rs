//! ASCII/Unicode bar chart for terminal output.
//!
//! This is intentionally "dumb" (fixed-width bars), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! One horizontal bar per course, scaled to the largest count, with the raw
//! count and percentage share appended to each bar.

use crate::domain::EnrollmentReport;
use crate::report::format::{format_percent, truncate};

const BAR_CELL: char = '█';
const LABEL_WIDTH: usize = 16;

/// Render the enrollment distribution as horizontal bars.
///
/// `width` is the maximum bar length in cells; non-zero counts always get at
/// least one cell so small courses stay visible.
pub fn render_ascii_bars(report: &EnrollmentReport, width: usize) -> String {
    let width = width.max(10);
    let label_width = LABEL_WIDTH;
    let max_count = report.entries.iter().map(|e| e.count).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "Enrollment per course | total={} | scale: {} = {}\n",
        report.total, BAR_CELL, scale_label(max_count, width)
    ));

    for entry in &report.entries {
        let cells = bar_cells(entry.count, max_count, width);
        let bar: String = std::iter::repeat(BAR_CELL).take(cells).collect();
        out.push_str(&format!(
            "{:<label_width$} {:<width$} {} ({}%)\n",
            truncate(&entry.course, LABEL_WIDTH),
            bar,
            entry.count,
            format_percent(entry.share_percent),
        ));
    }

    out
}

fn bar_cells(count: u64, max_count: u64, width: usize) -> usize {
    if count == 0 || max_count == 0 {
        return 0;
    }
    let scaled = (count as f64 / max_count as f64 * width as f64).round() as usize;
    scaled.clamp(1, width)
}

fn scale_label(max_count: u64, width: usize) -> String {
    if max_count == 0 {
        return "0".to_string();
    }
    format_per_cell(max_count as f64 / width as f64)
}

fn format_per_cell(per_cell: f64) -> String {
    if per_cell >= 1.0 {
        format!("{per_cell:.1}")
    } else {
        format!("{per_cell:.2}")
    }
}
