use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::LevelFilter;
use pomo_assets::{AssetPipeline, BackgroundConfig, BackgroundStyle, PipelineConfig};

#[derive(Parser)]
#[command(
    name = "pomo-assets",
    about = "Generate the Pomo app icon set, its Contents.json and the DMG background"
)]
struct Cli {
    /// Project root the assets are written under
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// DMG background design
    #[arg(long, value_enum, default_value_t = BackgroundStyle::Clean)]
    background: BackgroundStyle,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = PipelineConfig::new(&cli.root)
        .with_background(BackgroundConfig::for_style(cli.background));

    println!("Generating assets in {}", cli.root.display());
    let report = AssetPipeline::new(config)
        .run_with_progress(|artifact| println!("  {} {}", "✓".green(), artifact))
        .with_context(|| format!("failed to generate assets in {}", cli.root.display()))?;

    println!(
        "{} Wrote {} files",
        "✓".green(),
        report.len().to_string().bold()
    );
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
