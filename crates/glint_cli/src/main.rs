use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use glint_renderer::{
    Camera, CancelToken, Hittable, ImageBuffer, LogProgress, PixelSink, PpmSink, RenderError,
    RenderOptions,
};

mod builtin;
mod cli;
mod scene;

use cli::Args;
use scene::SceneFile;

/// Where a PPM is streamed while its render is still running.
fn partial_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

/// How the finished pixels leave the renderer.
enum Output {
    /// Streamed line by line into a side file, moved over the target once complete
    Ppm {
        sink: PpmSink<BufWriter<File>>,
        partial: PathBuf,
    },
    /// Collected in memory and encoded once the render is done
    Encoded(ImageBuffer),
}

impl Output {
    fn for_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("ppm") => {
                let partial = partial_path(path);
                let file = File::create(&partial)
                    .with_context(|| format!("Failed to create {}", partial.display()))?;
                Ok(Output::Ppm {
                    sink: PpmSink::new(BufWriter::new(file)),
                    partial,
                })
            }
            Some("png") => Ok(Output::Encoded(ImageBuffer::default())),
            _ => bail!(
                "Unsupported output format for {} (expected .ppm or .png)",
                path.display()
            ),
        }
    }

    fn sink(&mut self) -> &mut dyn PixelSink {
        match self {
            Output::Ppm { sink, .. } => sink,
            Output::Encoded(image) => image,
        }
    }

    /// Put the complete image at `path`.
    fn finish(self, path: &Path) -> Result<()> {
        match self {
            Output::Ppm { sink, partial } => {
                drop(sink);
                fs::rename(&partial, path).with_context(|| {
                    format!("Failed to move {} to {}", partial.display(), path.display())
                })?;
            }
            Output::Encoded(image) => {
                image
                    .save(path)
                    .with_context(|| format!("Failed to encode {}", path.display()))?;
            }
        }
        Ok(())
    }

    /// Throw away an incomplete image. Whatever was already at the target stays.
    fn discard(self) -> Result<()> {
        if let Output::Ppm { sink, partial } = self {
            drop(sink);
            fs::remove_file(&partial)
                .with_context(|| format!("Failed to remove {}", partial.display()))?;
        }
        Ok(())
    }
}

/// Render `world` and store the image at `path`, or nothing if the render fails.
fn render_to_file(
    camera: &mut Camera,
    world: &dyn Hittable,
    path: &Path,
    options: &RenderOptions,
) -> Result<()> {
    camera.initialize();
    let progress = LogProgress::new(camera.image_height());

    let mut output = Output::for_path(path)?;
    let result = camera.render(world, output.sink(), &progress, options);
    if let Err(err) = result {
        if let Err(cleanup) = output.discard() {
            log::warn!("{:#}", cleanup);
        }
        if let RenderError::Cancelled { completed_rows } = err {
            bail!(
                "Render cancelled after {} of {} scanlines, {} not written",
                completed_rows,
                camera.image_height(),
                path.display()
            );
        }
        return Err(err).context("Render failed");
    }
    output.finish(path)
}

fn load_scene(args: &Args) -> Result<SceneFile> {
    let mut scene = match &args.scene {
        Some(path) => SceneFile::load(path)?,
        None => {
            log::info!("Using built-in scene {:?}", args.builtin);
            builtin::scene(args.builtin, args.seed)
        }
    };

    if let Some(width) = args.width {
        scene.camera.image_width = width;
    }
    if let Some(samples) = args.samples {
        scene.camera.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        scene.camera.max_depth = max_depth;
    }

    Ok(scene)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();

    log::info!("Starting Glint");

    let scene = load_scene(&args)?;

    if args.dump_scene {
        println!("{}", serde_json::to_string_pretty(&scene)?);
        return Ok(());
    }

    let world = scene.build_world()?;
    let mut camera = scene.camera.to_camera()?;

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || {
            log::warn!("Interrupted, stopping after the current scanlines");
            cancel.cancel();
        })
        .context("Failed to install Ctrl-C handler")?;
    }

    let options = RenderOptions {
        seed: args.seed,
        parallel: !args.single_thread,
        cancel,
    };
    render_to_file(&mut camera, &world, &args.output, &options)?;

    log::info!("Saved to {}", args.output.display());
    Ok(())
}
