use anyhow::Context;
use sphy_proof::{pipeline, NativePhaseEngine, PipelineConfig, SvgPlotRenderer};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = PipelineConfig::default();

    let engine = NativePhaseEngine::load_symbol(&config.library_path, &config.symbol)
        .context("loading SPHY binary engine")?;

    let outcome = pipeline::run(&config, &engine, &SvgPlotRenderer)
        .context("generating reversal proof")?;

    println!(
        "✔ Reversal Proof generated using SPHY Binary Core: {}",
        outcome.dataset_path.display()
    );
    println!("\n📊 Sovereignty Report generated: {}", outcome.report_path.display());
    println!("🧮 SPHY Stability Index: {:.4}%", outcome.stability_index);
    if let Some(plot) = &outcome.plot_path {
        println!("📈 Comparison chart saved: {}", plot.display());
    }
    println!(
        "🔐 File SHA-256 signature created: {}",
        outcome.signature_path.display()
    );

    Ok(())
}
