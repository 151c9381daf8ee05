use clap::{Parser, ValueEnum};
use log::LevelFilter;

use pathlight::scene::ScenePreset;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SceneArg {
    /// Two spheres shaded by surface normal
    Normals,
    /// Diffuse sphere on a diffuse ground
    Diffuse,
    /// Diffuse, glass and metal spheres
    Materials,
    /// Scene lit by an emissive sphere
    Lights,
    /// Random field of small spheres
    Cover,
}

impl From<SceneArg> for ScenePreset {
    fn from(scene: SceneArg) -> Self {
        match scene {
            SceneArg::Normals => ScenePreset::Normals,
            SceneArg::Diffuse => ScenePreset::Diffuse,
            SceneArg::Materials => ScenePreset::Materials,
            SceneArg::Lights => ScenePreset::Lights,
            SceneArg::Cover => ScenePreset::Cover,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "pathlight")]
#[command(about = "A CPU path tracer for sphere scenes")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "400", help = "Image width in pixels")]
    pub width: usize,

    /// Image height in pixels; derived from a 16:9 aspect ratio when omitted
    #[arg(long, help = "Image height in pixels (default: width / (16/9))")]
    pub height: Option<usize>,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "100", help = "Number of samples per pixel")]
    pub samples_per_pixel: u32,

    /// Maximum number of bounces per camera ray
    #[arg(long, default_value = "50", help = "Maximum number of bounces per camera ray")]
    pub max_depth: u32,

    /// Scene to render
    #[arg(long, value_enum, default_value = "materials", help = "Scene to render")]
    pub scene: SceneArg,

    /// Seed for all random sampling; random when omitted
    #[arg(long, help = "Seed for all random sampling (random when omitted)")]
    pub seed: Option<u64>,

    /// Number of worker threads
    #[arg(long, short = 't', help = "Number of worker threads (default: one per core)")]
    pub threads: Option<usize>,

    /// Output file path (.ppm or .png), or "-" for PPM on stdout
    #[arg(
        short,
        long,
        default_value = "output.ppm",
        help = "Output file path (.ppm or .png), or \"-\" for PPM on stdout"
    )]
    pub output: String,
}
