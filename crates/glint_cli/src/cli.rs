use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

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

/// Built-in scenes, used when no scene file is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Builtin {
    /// Ground plus a diffuse, a glass and a metal sphere
    Spheres,
    /// The random field of small spheres around three large ones
    Cover,
}

/// Render a sphere scene with a Monte Carlo path tracer.
#[derive(Debug, Parser)]
#[command(name = "glint", version, about)]
pub struct Args {
    /// JSON scene description
    #[arg(short, long, conflicts_with = "builtin")]
    pub scene: Option<PathBuf>,

    /// Built-in scene to render when no scene file is given
    #[arg(short, long, value_enum, default_value = "spheres")]
    pub builtin: Builtin,

    /// Output image; .ppm is streamed as text, .png is encoded at the end
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Override the image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Override the number of samples per pixel
    #[arg(long)]
    pub samples: Option<u32>,

    /// Override the maximum bounce depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for the sampler (and for the random built-in scene)
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Render on the calling thread only
    #[arg(long)]
    pub single_thread: bool,

    /// Print the effective scene as JSON and exit without rendering
    #[arg(long)]
    pub dump_scene: bool,

    /// Default log level; RUST_LOG takes precedence
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
