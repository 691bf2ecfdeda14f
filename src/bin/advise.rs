use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use hue_advisor_wasm::{AnalysisOptions, ColorEntry, ColorPalette, SamplerLimits, analyze_bytes};
use anyhow::Context;
use anyhow::Result;
use tracing::info;

/// Recommend clothing and makeup colors for photos (native wrapper).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths (JPEG or PNG)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Seed for the palette jitter; omit for a fresh palette every run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Largest decode allocation in MiB
    #[arg(long, default_value_t = 512)]
    max_alloc_mib: u64,

    /// Print one JSON object per input instead of a text report
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn print_entries(title: &str, entries: &[ColorEntry]) {
    println!("  {title}:");
    for entry in entries {
        println!("    {}  {:<10}  {}", entry.color, entry.name, entry.description);
    }
}

fn print_report(input: &Path, palette: &ColorPalette) {
    println!("{}", input.display());
    println!("  Undertone:   {}", palette.undertone);
    println!("  Season Type: {}", palette.season_type);
    print_entries("Fashion Palette", &palette.clothing);
    print_entries("Beauty Palette", &palette.makeup);
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let options = AnalysisOptions {
        seed: args.seed,
        limits: SamplerLimits {
            max_alloc: args.max_alloc_mib.saturating_mul(1024 * 1024),
        },
    };

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let palette = analyze_bytes(&bytes, &options)
            .with_context(|| format!("analyzing {}", input.display()))?;
        info!(input = %input.display(), "analyzed");

        if args.json {
            println!("{}", serde_json::to_string(&palette)?);
        } else {
            print_report(input, &palette);
        }
    }

    Ok(())
}
