//! Command-line renderer for a single detector frame

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use nutrition_lens::config::{self, AppConfig};
use nutrition_lens::overlay::canvas::{load_font, CanvasSurface};
use nutrition_lens::{storage, vision};
use nutrition_lens::{BadgeCache, CoordinateFrame, GraphicOverlay, OverlayStyle, RecordingSurface};

/// NutritionLens - product label overlay renderer
#[derive(Parser, Debug)]
#[command(name = "nutrition-lens")]
#[command(about = "Draws product labels and nutrition badges over detected text")]
struct Args {
    /// Detector output (JSON) for one frame
    #[arg(short, long)]
    detections: PathBuf,

    /// Camera frame to draw on; sets the view size
    #[arg(short, long)]
    frame: Option<PathBuf>,

    /// Where to write the rendered overlay image
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (defaults to the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report which graphic contains the view point "x,y"
    #[arg(long, value_parser = parse_point)]
    probe: Option<(f32, f32)>,

    /// Print the draw commands as JSON
    #[arg(long)]
    dump: bool,
}

fn parse_point(value: &str) -> Result<(f32, f32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {value:?}"))?;
    let x = x.trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f32>().map_err(|e| e.to_string())?;
    Ok((x, y))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load or create configuration
    let (config, config_source) = load_or_create_config(args.config.as_deref())?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("NutritionLens starting...");
    match config_source {
        Some(path) => info!("Loaded configuration from {:?}", path),
        None => info!("Using default configuration"),
    }

    let detections = vision::load_detections(&args.detections)?;
    info!(
        "Loaded {} text blocks from {:?}",
        detections.blocks.len(),
        args.detections
    );

    let mut surface = match &args.frame {
        Some(path) => {
            let image = image::open(path)
                .with_context(|| format!("Failed to load frame image: {:?}", path))?;
            CanvasSurface::new(image.to_rgba8())
        }
        None => CanvasSurface::blank(config.view.width, config.view.height),
    };
    let view_size = surface.image().dimensions();

    let badge_dir = match &config.assets.badge_dir {
        Some(dir) => dir.clone(),
        None => storage::default_badge_dir()?,
    };
    let badges = Arc::new(BadgeCache::new(badge_dir));
    badges.preload()?;

    let mut overlay = GraphicOverlay::new(CoordinateFrame::identity(), badges);
    overlay.set_sizes(detections.sensor_size(), view_size)?;
    for block in detections.blocks {
        overlay.add_block(block)?;
    }

    let style = OverlayStyle {
        outline_regions: config.view.outline_regions,
        ..Default::default()
    };

    if let Some((x, y)) = args.probe {
        match overlay.graphic_at(x, y) {
            Some(graphic) => println!(
                "({x}, {y}) hits graphic {} {:?}",
                graphic.id(),
                graphic.text_block().map(|b| b.value.as_str()).unwrap_or_default()
            ),
            None => println!("({x}, {y}) hits nothing"),
        }
    }

    if args.dump {
        let mut recorder = RecordingSurface::new();
        overlay.draw(&mut recorder, &style);
        println!("{}", serde_json::to_string_pretty(recorder.commands())?);
    }

    if let Some(output) = &args.output {
        match &config.assets.font {
            Some(font) => surface = surface.with_font(load_font(font)?),
            None => warn!("No font configured, labels will be omitted from {:?}", output),
        }
        overlay.draw(&mut surface, &style);
        surface.save(output)?;
        info!("Wrote overlay to {:?}", output);
    }

    Ok(())
}

/// Load configuration from file or fall back to defaults
fn load_or_create_config(explicit: Option<&Path>) -> Result<(AppConfig, Option<PathBuf>)> {
    if let Some(path) = explicit {
        return Ok((config::load_config(path)?, Some(path.to_path_buf())));
    }

    if let Ok(config_dir) = storage::get_config_dir() {
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            if let Ok(config) = config::load_config(&config_path) {
                return Ok((config, Some(config_path)));
            }
        }
    }
    Ok((AppConfig::default(), None))
}
