use clap::Parser;
use imgshrink::config::Config;
use imgshrink::convert::{EngineConfig, EngineKind, Quality, create_engine};
use imgshrink::{output, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imgshrink")]
#[command(about = "Shrink oversized images in place")]
#[command(long_about = "\
Shrink oversized images in place

Recursively finds jpg/jpeg/png/bmp/tiff files whose longest side exceeds the
configured maximum, resizes them down (aspect ratio preserved), re-compresses,
and atomically replaces each original. Permission bits and ownership are
restored. Files already within bounds are never touched, so repeated runs
are safe.

Per-file failures are reported and the batch continues; the final report
shows processed/skipped/error counts and the bytes saved.")]
#[command(version)]
struct Cli {
    /// Directory to scan (default: working_directory from the config file)
    dir: Option<PathBuf>,

    /// Path to the TOML config file
    #[arg(long, default_value = "imgshrink.toml")]
    config: PathBuf,

    /// Compute statistics without modifying any file
    #[arg(long)]
    test: bool,

    /// Try the ImageMagick engine before the built-in one
    #[arg(long)]
    prefer_magick: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let root = cli
        .dir
        .unwrap_or_else(|| PathBuf::from(&config.working_directory));

    let catalog = scan::find_images(&root)?;

    let engine_config = EngineConfig {
        max_size: config.max_size,
        quality: Quality::new(config.quality),
        test_mode: cli.test,
    };
    let prefer = if cli.prefer_magick {
        EngineKind::Magick
    } else {
        EngineKind::Raster
    };
    let mut engine = create_engine(engine_config, prefer)?;

    println!("engine: {}", engine.name());
    if cli.test {
        println!("test mode: no files will be modified");
    }

    let total = catalog.len();
    for (i, entry) in catalog.iter().enumerate() {
        let line = match engine.convert(entry) {
            Ok(true) => output::format_processed(i + 1, total, &entry.path),
            Ok(false) => output::format_skipped(i + 1, total, &entry.path),
            Err(e) => output::format_error(i + 1, total, &entry.path, &e.to_string()),
        };
        println!("{}", line);
    }

    output::print_report(engine.stats());
    Ok(())
}
