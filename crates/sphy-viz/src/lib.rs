//! Comparison chart for the SPHY proof pipeline
//!
//! Draws the Bell uncertainty and SPHY sovereignty columns against the
//! frame index, with a dashed reference line at the coherence benchmark.

pub mod visualization;

pub use visualization::{
    render_svg, ComparisonChart, NullPlotRenderer, PlotRenderer, SvgPlotRenderer, BENCHMARK_LEVEL,
    PLOT_FILE,
};
