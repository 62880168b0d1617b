//! Chart rendering for the phase dataset
//!
//! Renderers produce the chart as bytes instead of writing files, so the
//! caller decides where and when the artifact is published.

use plotters::prelude::*;
use sphy_core::{Error, PhaseDataset, PhaseRecord, Result};
use std::ops::Range;
use tracing::debug;

/// Default file name of the rendered chart
pub const PLOT_FILE: &str = "sphy_bell_reversal_plot.svg";

/// Default level of the reference line
pub const BENCHMARK_LEVEL: f64 = 90.5842;

/// Number of labelled ticks per axis; grid lines sit on these ticks
const GRID_TICKS: usize = 11;

/// Dashed half-opacity grid
fn grid_style() -> ShapeStyle {
    BLACK.mix(0.5).stroke_width(1)
}

/// Labels and geometry of the comparison chart
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bell_label: String,
    pub sphy_label: String,
    pub benchmark_label: String,
    pub benchmark_level: f64,
    /// Width and height in pixels
    pub size: (u32, u32),
}

impl Default for ComparisonChart {
    fn default() -> Self {
        Self {
            title: "Bell Extinction via SPHY Kernel (Binary-Protected Execution)".to_string(),
            x_label: "Temporal Frame".to_string(),
            y_label: "Coherence Level (%)".to_string(),
            bell_label: "Uncertainty (Bell/Copenhagen)".to_string(),
            sphy_label: "Coherence (SPHY Binary)".to_string(),
            benchmark_label: "Base Coherence Benchmark".to_string(),
            benchmark_level: BENCHMARK_LEVEL,
            size: (1200, 600),
        }
    }
}

/// Trait for rendering the comparison chart
pub trait PlotRenderer {
    /// Render `dataset`; `None` when this renderer produces no artifact
    fn render(&self, dataset: &PhaseDataset, chart: &ComparisonChart) -> Result<Option<Vec<u8>>>;

    /// Check if this renderer actually produces output; callers skip
    /// [`PlotRenderer::render`] when it does not
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Renderer that draws nothing (headless runs and tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPlotRenderer;

impl PlotRenderer for NullPlotRenderer {
    fn render(&self, _dataset: &PhaseDataset, _chart: &ComparisonChart) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// SVG line chart of both phase columns plus the benchmark line
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgPlotRenderer;

impl PlotRenderer for SvgPlotRenderer {
    fn render(&self, dataset: &PhaseDataset, chart: &ComparisonChart) -> Result<Option<Vec<u8>>> {
        let svg = render_svg(dataset, chart)?;
        debug!(bytes = svg.len(), "Rendered comparison chart");
        Ok(Some(svg.into_bytes()))
    }
}

fn render_err(e: impl std::fmt::Display) -> Error {
    Error::Render(e.to_string())
}

/// Render the chart as an SVG document
pub fn render_svg(dataset: &PhaseDataset, chart: &ComparisonChart) -> Result<String> {
    if dataset.is_empty() {
        return Err(Error::empty_input("comparison chart"));
    }

    let bell = finite_points(dataset, |r| r.bell_uncertainty);
    let sphy = finite_points(dataset, |r| r.sphy_sovereignty);

    let x_range = frame_range(dataset.len());
    let y_range = value_range(
        bell.iter()
            .chain(sphy.iter())
            .map(|&(_, y)| y)
            .chain(std::iter::once(chart.benchmark_level)),
    );

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, chart.size).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.clone(), y_range.clone())
            .map_err(render_err)?;

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_labels(GRID_TICKS)
            .y_labels(GRID_TICKS)
            .disable_mesh()
            .draw()
            .map_err(render_err)?;

        // Mesh lines are always solid, so the grid is drawn as dashed series
        let x_ticks = ctx.as_coord_spec().x_spec().key_points(GRID_TICKS);
        let y_ticks = ctx.as_coord_spec().y_spec().key_points(GRID_TICKS);
        let y_span = (y_range.start, y_range.end);
        let grid_lines = x_ticks
            .iter()
            .map(|&x| vec![(x, y_span.0), (x, y_span.1)])
            .chain(y_ticks.iter().map(|&y| vec![(x_range.start, y), (x_range.end, y)]));
        for line in grid_lines {
            ctx.draw_series(DashedLineSeries::new(line, 4, 4, grid_style()))
                .map_err(render_err)?;
        }

        let bell_style = RED.mix(0.4).stroke_width(1);
        ctx.draw_series(LineSeries::new(bell, bell_style))
            .map_err(render_err)?
            .label(chart.bell_label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], bell_style));

        let sphy_style = BLUE.stroke_width(2);
        ctx.draw_series(LineSeries::new(sphy, sphy_style))
            .map_err(render_err)?
            .label(chart.sphy_label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], sphy_style));

        let benchmark_style = GREEN.stroke_width(2);
        let level = chart.benchmark_level;
        ctx.draw_series(DashedLineSeries::new(
            vec![(x_range.start, level), (x_range.end, level)],
            8,
            6,
            benchmark_style,
        ))
        .map_err(render_err)?
        .label(chart.benchmark_label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], benchmark_style));

        ctx.configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::LowerRight)
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// `(frame, value)` pairs, leaving out frames whose value is not finite
fn finite_points(dataset: &PhaseDataset, value: impl Fn(&PhaseRecord) -> f64) -> Vec<(f64, f64)> {
    dataset
        .records()
        .iter()
        .map(|r| (r.frame as f64, value(r)))
        .filter(|&(_, y)| y.is_finite())
        .collect()
}

/// Horizontal extent covering every frame index
fn frame_range(len: usize) -> Range<f64> {
    let end = len.saturating_sub(1).max(1) as f64;
    0.0..end
}

/// Vertical extent with 5% padding, ignoring non-finite values
fn value_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !lo.is_finite() {
        return 0.0..1.0;
    }
    let span = hi - lo;
    let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
    (lo - pad)..(hi + pad)
}
