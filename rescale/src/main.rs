//! `rescale` CLI - Resize an image with bilinear interpolation.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rescale::cli::{ArgError, ErrorCode, output_path, parse_positive_number, parse_worker_count};
use rescale::io::{format_from_path, read_image, write_image};
use rescale::transform::{resize, resize_parallel};

/// Resize an image by a scale factor using bilinear interpolation.
#[derive(Parser, Debug)]
#[command(name = "rescale")]
#[command(version, about, long_about = None)]
struct Args {
    /// Source image path (PNG, JPEG, PNM or SPIX).
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Output image path. Defaults to "<source stem> (resized).<ext>" next to the source.
    #[arg(short, long, value_name = "PATH")]
    out_file: Option<PathBuf>,

    /// Scale factor applied to both axes (e.g. 0.5 halves, 2 doubles).
    #[arg(
        short,
        long,
        value_name = "FLOAT",
        allow_negative_numbers = true,
        value_parser = parse_positive_number
    )]
    scale: f64,

    /// Number of worker threads. Fractional values are truncated.
    #[arg(
        short,
        long,
        default_value = "1",
        value_name = "FLOAT",
        allow_negative_numbers = true,
        value_parser = parse_worker_count
    )]
    processors: usize,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version are not failures
            let code = if err.use_stderr() {
                ErrorCode::InvalidArgs.into()
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("rescale={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        let code = if err.downcast_ref::<ArgError>().is_some() {
            ErrorCode::InvalidArgs
        } else {
            ErrorCode::Generic
        };
        return code.into();
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let out_path = output_path(&args.source, args.out_file.as_deref())?;
    let format = format_from_path(&out_path)
        .with_context(|| format!("Cannot encode {}", out_path.display()))?;
    debug!(
        source = %args.source.display(),
        output = %out_path.display(),
        ?format,
        scale = args.scale,
        processors = args.processors,
        "starting"
    );

    let start = Instant::now();
    let pixs = read_image(&args.source)
        .with_context(|| format!("Failed to read {}", args.source.display()))?;
    info!(
        "Decoded {}x{} image in {:.2?}",
        pixs.width(),
        pixs.height(),
        start.elapsed()
    );

    let start = Instant::now();
    let pixd = if args.processors == 1 {
        resize(&pixs, args.scale)
    } else {
        resize_parallel(&pixs, args.scale, args.processors)
    }
    .context("Failed to resize image")?;
    info!(
        "Resized to {}x{} with {} processor(s) in {:.2?}",
        pixd.width(),
        pixd.height(),
        args.processors,
        start.elapsed()
    );

    let start = Instant::now();
    write_image(&pixd, &out_path, format)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    info!("Encoded in {:.2?}", start.elapsed());

    println!(
        "Resized image ({}x{}) saved to {}",
        pixd.width(),
        pixd.height(),
        out_path.display()
    );

    Ok(())
}
