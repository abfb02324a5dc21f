//! Convergence plotting.
//!
//! [`ConvergenceFigure`] accumulates line traces (one per simulation run)
//! and at most one reference overlay, then renders the result to a PNG with
//! the `plotters` bitmap backend. Accumulation is decoupled from rendering
//! so the batch loop can append traces incrementally and the tests can
//! inspect the figure without touching the filesystem.

use std::path::Path;
use std::process::Command;

use plotters::prelude::*;

use crate::error::{McError, McResult};

/// Canvas size in inches, matching a conventional figure layout.
const CANVAS_INCHES: (f64, f64) = (8.0, 6.0);

/// Padding around the drawing area, in inches.
const PAD_INCHES: f64 = 0.1;

/// One line series on the figure.
///
/// `start` is the iteration index of the first value, so warm-up-trimmed
/// traces plot at their true x positions rather than shifted to zero.
#[derive(Debug, Clone)]
pub struct Trace {
    /// Iteration index of the first value.
    pub start: usize,
    /// Estimate values, one per iteration from `start`.
    pub values: Vec<f64>,
}

/// The emphasized final-batch overlay plus the true-value line.
#[derive(Debug, Clone)]
pub struct Reference {
    /// Full (untrimmed) trajectories of the final batch, all drawn with
    /// emphasis.
    pub rows: Vec<Vec<f64>>,
    /// True constant value for the horizontal line.
    pub true_value: f64,
}

/// An accumulating convergence plot.
#[derive(Debug, Clone)]
pub struct ConvergenceFigure {
    title: String,
    y_bounds: (f64, f64),
    traces: Vec<Trace>,
    reference: Option<Reference>,
}

impl ConvergenceFigure {
    /// Create an empty figure with a title and fixed y-axis bounds.
    #[must_use]
    pub fn new(title: impl Into<String>, y_bounds: (f64, f64)) -> Self {
        Self {
            title: title.into(),
            y_bounds,
            traces: Vec::new(),
            reference: None,
        }
    }

    /// Figure title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Y-axis bounds.
    #[must_use]
    pub const fn y_bounds(&self) -> (f64, f64) {
        self.y_bounds
    }

    /// Traces accumulated so far.
    #[must_use]
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// The reference overlay, if one has been set.
    #[must_use]
    pub const fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    /// Append one line trace whose first value sits at iteration `start`.
    ///
    /// Empty traces are ignored.
    pub fn add_trace(&mut self, start: usize, values: Vec<f64>) {
        if !values.is_empty() {
            self.traces.push(Trace { start, values });
        }
    }

    /// Set the emphasized reference overlay: one batch's trajectories plus
    /// the horizontal true-value line.
    ///
    /// # Errors
    ///
    /// Returns [`McError::Plot`] if an overlay has already been set; the
    /// overlay is drawn at most once per figure.
    pub fn set_reference(&mut self, rows: Vec<Vec<f64>>, true_value: f64) -> McResult<()> {
        if self.reference.is_some() {
            return Err(McError::plot("reference overlay already set"));
        }
        self.reference = Some(Reference { rows, true_value });
        Ok(())
    }

    /// Largest iteration index covered by any series, used as the x range.
    #[must_use]
    pub fn x_max(&self) -> usize {
        let trace_max = self
            .traces
            .iter()
            .map(|t| t.start + t.values.len())
            .max()
            .unwrap_or(0);
        let ref_max = self
            .reference
            .as_ref()
            .and_then(|r| r.rows.iter().map(Vec::len).max())
            .unwrap_or(0);
        trace_max.max(ref_max).max(1)
    }

    /// Render the figure to a PNG file at the given resolution.
    ///
    /// The canvas is a fixed 8x6 inch layout; `dpi` scales pixel dimensions,
    /// padding, and font sizes together.
    ///
    /// # Errors
    ///
    /// Returns [`McError::Plot`] if the backend fails to draw or to write
    /// the file.
    pub fn render_png(&self, path: &Path, dpi: u32) -> McResult<()> {
        let width = (CANVAS_INCHES.0 * f64::from(dpi)) as u32;
        let height = (CANVAS_INCHES.1 * f64::from(dpi)) as u32;
        let pad = (PAD_INCHES * f64::from(dpi)) as u32;
        let label_area = (0.5 * f64::from(dpi)) as u32;
        let caption_size = (0.18 * f64::from(dpi)) as u32;

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let (y_min, y_max) = self.y_bounds;
        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", caption_size))
            .margin(pad)
            .x_label_area_size(label_area)
            .y_label_area_size(label_area)
            .build_cartesian_2d(0f64..self.x_max() as f64, y_min..y_max)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc("Iteration")
            .y_desc("Estimate")
            .draw()
            .map_err(plot_err)?;

        for trace in &self.traces {
            let points = trace
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| ((trace.start + i) as f64, v));
            chart
                .draw_series(LineSeries::new(points, BLUE.mix(0.3)))
                .map_err(plot_err)?;
        }

        if let Some(reference) = &self.reference {
            for row in &reference.rows {
                let points = row.iter().enumerate().map(|(i, &v)| (i as f64, v));
                chart
                    .draw_series(LineSeries::new(points, RED.mix(0.6).stroke_width(3)))
                    .map_err(plot_err)?;
            }

            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![
                        (0.0, reference.true_value),
                        (self.x_max() as f64, reference.true_value),
                    ],
                    BLACK.stroke_width(2),
                )))
                .map_err(plot_err)?;
        }

        root.present().map_err(plot_err)?;
        Ok(())
    }

    /// Render to a temporary PNG and open it with the platform image viewer.
    ///
    /// # Errors
    ///
    /// Returns [`McError::Plot`] if rendering fails, or [`McError::Io`] if
    /// the viewer cannot be launched.
    pub fn present(&self, dpi: u32) -> McResult<()> {
        let path = std::env::temp_dir().join(format!("mcviz-{}.png", std::process::id()));
        self.render_png(&path, dpi)?;
        Command::new(viewer_command()).arg(&path).spawn()?;
        Ok(())
    }
}

fn plot_err(err: impl std::fmt::Display) -> McError {
    McError::plot(err.to_string())
}

#[cfg(target_os = "macos")]
const fn viewer_command() -> &'static str {
    "open"
}

#[cfg(target_os = "windows")]
const fn viewer_command() -> &'static str {
    "explorer"
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const fn viewer_command() -> &'static str {
    "xdg-open"
}
