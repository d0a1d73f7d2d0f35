//! Plotters-powered enrollment chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `BarChart` widget?
//! - nicer axis + tick rendering
//! - less manual work for scaling/labels
//! - easy to extend later (exportable PNG/SVG backends, annotations, etc.)
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`. A pie chart reads poorly at terminal
//! resolution, so the distribution is drawn as one bar per course and the
//! legend carries the percentage labels.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::CourseShare;

/// Series styling: keep the palette high-contrast for terminal readability.
const PALETTE: [RGBColor; 6] = [
    RGBColor(0, 255, 255),
    RGBColor(0, 255, 0),
    RGBColor(255, 255, 0),
    RGBColor(255, 0, 255),
    RGBColor(255, 128, 0),
    RGBColor(0, 128, 255),
];

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: the entries are computed outside
/// the render call (by `report::build_report`), so `render()` only draws.
/// Bars appear in entry order; the legend numbers them to match the x axis.
pub struct EnrollmentChart<'a> {
    pub entries: &'a [CourseShare],
}

impl Widget for EnrollmentChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.entries.len();
        let max_count = self.entries.iter().map(|e| e.count).max().unwrap_or(0);
        if n == 0 || max_count == 0 {
            return;
        }

        // Headroom above the tallest bar keeps the top tick label readable.
        let y_max = max_count as f64 * 1.15;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(0f64..n as f64, 0f64..y_max)?;

            // Axes + tick labels.
            //
            // We disable the mesh lines to reduce visual clutter in
            // low-resolution terminal rendering; course names would overlap
            // on the x axis, so ticks carry legend numbers instead.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("course #")
                .y_desc("enrollees")
                .x_labels(n.min(8))
                .y_labels(5)
                .x_label_formatter(&|v| format!("{}", *v as usize + 1))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // One filled rectangle per course, with a small gap between bars.
            chart.draw_series(self.entries.iter().enumerate().map(|(i, entry)| {
                let color = PALETTE[i % PALETTE.len()];
                Rectangle::new(
                    [(i as f64 + 0.15, 0.0), (i as f64 + 0.85, entry.count as f64)],
                    color.filled(),
                )
            }))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
