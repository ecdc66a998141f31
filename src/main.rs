//! dungeonfinder - locate dungeons in legacy Beta-era worlds from the seed alone.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::{ScanConfig, DEFAULT_CONFIG_PATH};
use dungeonfinder_testkit::JsonlSink;
use dungeonfinder_world::{create_world, destroy_world, scan_region};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scan a chunk range of a world seed for dungeons", long_about = None)]
struct Args {
    /// TOML file with scan settings
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// World seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Lowest chunk x to scan
    #[arg(long, allow_negative_numbers = true)]
    min_x: Option<i32>,

    /// Lowest chunk z to scan
    #[arg(long, allow_negative_numbers = true)]
    min_z: Option<i32>,

    /// Chunk x upper bound (exclusive)
    #[arg(long, allow_negative_numbers = true)]
    max_x: Option<i32>,

    /// Chunk z upper bound (exclusive)
    #[arg(long, allow_negative_numbers = true)]
    max_z: Option<i32>,

    /// Also write each dungeon as a JSON line to this file
    #[arg(long)]
    jsonl: Option<PathBuf>,
}

impl Args {
    fn apply(self, mut cfg: ScanConfig) -> ScanConfig {
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        cfg.min_x = self.min_x.unwrap_or(cfg.min_x);
        cfg.min_z = self.min_z.unwrap_or(cfg.min_z);
        cfg.max_x = self.max_x.unwrap_or(cfg.max_x);
        cfg.max_z = self.max_z.unwrap_or(cfg.max_z);
        if self.jsonl.is_some() {
            cfg.jsonl = self.jsonl;
        }
        cfg
    }
}

fn main() -> Result<()> {
    // WARN by default, RUST_LOG overrides
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let cfg = ScanConfig::load_from_path(&args.config)?;
    let cfg = args.apply(cfg);
    let region = cfg.region()?;

    info!(seed = cfg.seed, ?region, "starting dungeon scan");
    let started = Instant::now();
    let mut world = create_world(cfg.seed);
    let reports = scan_region(&mut world, region);
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        chunks = world.len(),
        "scan complete"
    );
    destroy_world(world);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for report in &reports {
        writeln!(out, "{} {} {} {}", report.chunk_x, report.chunk_z, report.x, report.z)?;
    }
    out.flush()?;

    if let Some(path) = &cfg.jsonl {
        let mut sink = JsonlSink::create(path)?;
        for report in &reports {
            sink.write(report)?;
        }
        sink.finish()
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
