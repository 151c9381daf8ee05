use clap::Parser;
use log::{error, info, warn};

use pathlight::framebuffer::height_for_aspect;
use pathlight::output::write_image;
use pathlight::progress::RowProgress;
use pathlight::random;
use pathlight::render::{render, RenderSettings};
use pathlight::scene::ScenePreset;
use pathlight::Result;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

/// Aspect ratio used when only the width is given.
const DEFAULT_ASPECT_RATIO: f32 = 16.0 / 9.0;

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("pathlight - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    if let Some(threads) = args.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
            warn!("Could not configure {} worker threads: {}", threads, e);
        }
    }

    let height = args
        .height
        .unwrap_or_else(|| height_for_aspect(args.width, DEFAULT_ASPECT_RATIO));

    let seed = args.seed.unwrap_or_else(random::entropy_seed);
    info!("Using seed {}", seed);

    let settings = RenderSettings {
        width: args.width,
        height,
        samples_per_pixel: args.samples_per_pixel,
        max_depth: args.max_depth,
        seed,
    };
    settings.validate()?;

    let preset = ScenePreset::from(args.scene);
    info!("Scene: {:?}", preset);
    let scene = preset.build(settings.aspect_ratio(), seed);

    let progress = RowProgress::new(settings.height);
    let image = render(&scene, &settings, &progress)?;

    write_image(&image, &args.output)
}
