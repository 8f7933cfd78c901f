use clap::{Parser, ValueEnum};
use log::LevelFilter;

use raysphere::camera::MAX_IMAGE_DIMENSION;
use raysphere::scenes::SceneKind;

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
    /// Random spheres cover shot with depth of field
    Cover,
    /// Diffuse, metal and hollow glass spheres
    Materials,
}

impl From<SceneArg> for SceneKind {
    fn from(scene: SceneArg) -> Self {
        match scene {
            SceneArg::Cover => SceneKind::Cover,
            SceneArg::Materials => SceneKind::Materials,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "raysphere")]
#[command(about = "A recursive sphere ray tracer writing PPM images")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Scene to render
    #[arg(long, value_enum, default_value = "cover")]
    pub scene: SceneArg,

    /// Image width in pixels (scene default when omitted)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_IMAGE_DIMENSION)))]
    pub width: Option<u32>,

    /// Image aspect ratio, width over height (scene default when omitted)
    #[arg(long)]
    pub aspect_ratio: Option<f64>,

    /// Number of samples per pixel (scene default when omitted)
    #[arg(long, short = 's', value_parser = clap::value_parser!(u32).range(1..))]
    pub samples_per_pixel: Option<u32>,

    /// Maximum number of bounces per ray (scene default when omitted)
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for the random generator; omit for a different image each run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Shade hits by surface normal instead of tracing materials
    #[arg(long)]
    pub normals: bool,

    /// Output PPM file path, or "-" for stdout
    #[arg(short, long, default_value = "image.ppm")]
    pub output: String,
}
