use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::{default_thread_count, random_scene, RenderSettings, SceneDescription};
use lumen_tracer::Raytracer;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Render a sphere scene with the Lumen CPU path tracer.
#[derive(Parser, Debug)]
#[command(name = "lumen", version, about)]
struct CliArguments {
    /// Image width in pixels
    #[arg(long, default_value_t = 200)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 100)]
    height: u32,

    /// Samples per pixel
    #[arg(short, long, default_value_t = 100)]
    samples: u32,

    /// Maximum number of bounces per path
    #[arg(long, default_value_t = 50)]
    max_depth: u32,

    /// Worker threads (defaults to the number of hardware threads)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Seed for sampling and scene generation
    #[arg(long)]
    seed: Option<u64>,

    /// JSON scene file; the random cover scene is generated when omitted
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Output image (.ppm writes plain PPM, other extensions go through the image encoders)
    #[arg(short, long, default_value = "output.ppm")]
    output: PathBuf,

    /// Write the scene description to this path before rendering
    #[arg(long)]
    dump_scene: Option<PathBuf>,
}

impl CliArguments {
    fn settings(&self) -> RenderSettings {
        let mut settings = RenderSettings::new(self.width, self.height)
            .with_quality(self.samples, self.max_depth)
            .with_threads(self.threads.unwrap_or_else(default_thread_count));
        settings.seed = self.seed;
        settings
    }

    fn scene(&self) -> Result<SceneDescription> {
        match &self.scene {
            Some(path) => SceneDescription::load(path)
                .with_context(|| format!("Failed to load scene {}", path.display())),
            None => {
                let mut rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                Ok(random_scene(&mut rng))
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = CliArguments::parse();
    log::info!("Starting Lumen");

    let scene = args.scene()?;
    if let Some(path) = &args.dump_scene {
        scene
            .save(path)
            .with_context(|| format!("Failed to write scene to {}", path.display()))?;
        log::info!("Wrote scene to {}", path.display());
    }

    let mut tracer = Raytracer::new(args.settings()).context("Invalid render settings")?;
    tracer.render_scene(&scene).context("Render failed")?;
    tracer
        .output()
        .save(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArguments::try_parse_from(["lumen"]).unwrap();
        let settings = args.settings();

        assert_eq!((settings.width, settings.height), (200, 100));
        assert_eq!((settings.samples, settings.max_depth), (100, 50));
        assert!(settings.threads >= 1);
        assert_eq!(settings.seed, None);
        assert_eq!(args.output, PathBuf::from("output.ppm"));
    }

    #[test]
    fn test_flags_map_to_settings() {
        let args = CliArguments::try_parse_from([
            "lumen", "--width", "64", "--height", "32", "-s", "8", "--max-depth", "4", "-t", "3",
            "--seed", "17", "-o", "out.png",
        ])
        .unwrap();
        let settings = args.settings();

        assert_eq!(
            settings,
            RenderSettings::new(64, 32)
                .with_quality(8, 4)
                .with_threads(3)
                .with_seed(17)
        );
        assert_eq!(args.output, PathBuf::from("out.png"));
    }

    #[test]
    fn test_seeded_random_scene_is_reproducible() {
        let args = CliArguments::try_parse_from(["lumen", "--seed", "5"]).unwrap();
        assert_eq!(args.scene().unwrap(), args.scene().unwrap());
    }
}
