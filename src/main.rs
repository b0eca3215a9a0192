//! Render a YAML scene description to a PNG image
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use indicatif::ProgressBar;
use log::info;

use whitted::cameras::Camera;
use whitted::render::{self, RenderSettings};
use whitted::scene::{Scene, SceneConfig};

/// Whitted ray tracer: spheres and planes under point lights, with
/// hard shadows and mirror bounces
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Scene description file (YAML)
    scene: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Override the scene's output width
    #[arg(long)]
    width: Option<u32>,

    /// Override the scene's output height
    #[arg(long)]
    height: Option<u32>,

    /// Override the reflection recursion bound
    #[arg(long)]
    max_depth: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let text = fs::read_to_string(&args.scene)
        .with_context(|| format!("reading scene file {}", args.scene.display()))?;
    let config: SceneConfig = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing scene file {}", args.scene.display()))?;

    let mut camera_config = config.camera.clone();
    if let Some(width) = args.width {
        camera_config.width = width;
    }
    if let Some(height) = args.height {
        camera_config.height = height;
    }
    let camera = Camera::from_config(&camera_config)?;

    let mut settings = RenderSettings::from_config(&config.settings);
    if let Some(max_depth) = args.max_depth {
        settings.max_depth = max_depth;
    }

    let scene = Scene::from_config(&config)?;
    info!(
        "rendering {} objects and {} lights at {}x{}, depth {}",
        scene.objects().len(),
        scene.lights().len(),
        camera.width(),
        camera.height(),
        settings.max_depth,
    );

    let bar = ProgressBar::new(camera.height() as u64);
    let start = Instant::now();
    let buffer = render::render_with_progress(&scene, &camera, &settings, &bar);
    bar.finish();
    info!("rendered in {:.2?}", start.elapsed());

    buffer
        .to_image()
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!("wrote {}", args.output.display());

    Ok(())
}
