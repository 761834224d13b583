//! zoidberg CLI - render heightfields from the terminal
//!
//! Loads a heightfield (or synthesizes the paraboloid demo), traces one ray
//! per pixel and writes the resulting height image.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use zoidberg_raytrace::{render, Heightfield};

mod output;
mod scene;
mod surface;

use scene::{SceneConfig, ViewOverrides};

#[derive(Parser)]
#[command(name = "zoidberg")]
#[command(about = "Ray-marching heightfield renderer", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a heightfield to an image
    Render {
        /// Heightfield as a JSON array of rows
        #[arg(short, long, conflicts_with = "demo")]
        surface: Option<PathBuf>,
        /// Size of the paraboloid demo surface used when no surface is given
        #[arg(long, default_value_t = 100)]
        demo: usize,
        /// TOML scene file with camera and render settings
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        view: ViewOverrides,
        /// Output file (format determined by extension: .png, .json)
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Display information about a heightfield file
    Info {
        /// Heightfield as a JSON array of rows
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            surface,
            demo,
            config,
            view,
            output,
        } => {
            let field = match surface {
                Some(path) => surface::load(&path)?,
                None => Heightfield::paraboloid(demo)
                    .with_context(|| format!("invalid demo size {demo}"))?,
            };
            let scene = match config {
                Some(path) => SceneConfig::load(&path)?,
                None => SceneConfig::default(),
            };
            render_file(&field, &scene, &view, &output)?;
        }
        Commands::Info { file } => {
            show_info(&file)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn render_file(
    field: &Heightfield,
    scene: &SceneConfig,
    view: &ViewOverrides,
    output: &Path,
) -> Result<()> {
    let (camera, settings) = scene.resolve(field, view);
    log::info!(
        "rendering {}x{} surface at {}x{} (aperture {:.3})",
        field.width(),
        field.height(),
        settings.width,
        settings.height,
        camera.aperture
    );

    let t0 = Instant::now();
    let image = render(&camera, field, &settings).context("render failed")?;
    println!("Rendering time: {:.3}s", t0.elapsed().as_secs_f64());

    output::write(&image, output)?;
    println!(
        "Wrote {}x{} image ({} hits) to {}",
        image.width(),
        image.height(),
        image.hit_count(),
        output.display()
    );
    Ok(())
}

fn show_info(path: &Path) -> Result<()> {
    let field = surface::load(path)?;
    let (lo, hi) = field.bounds();
    println!("File: {}", path.display());
    println!("Grid: {} x {}", field.width(), field.height());
    println!("Cells: {}", (field.width() - 1) * (field.height() - 1));
    println!("Height range: {lo} .. {hi}");
    Ok(())
}
