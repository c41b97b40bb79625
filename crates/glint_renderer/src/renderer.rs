//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative path tracing with a bounce limit
//! - Anti-aliasing via multi-sampling
//! - Scanline-parallel rendering with per-row random streams
//! - Cooperative cancellation between scanlines

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::{Camera, HitRecord, Hittable, PixelSink, Progress, RenderError};
use glint_math::{unit_vector, Color, Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// Closest hit distance accepted after a bounce.
///
/// Hits nearer than this are floating point noise at the previous surface.
const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// What an escaping ray sees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Background {
    /// White at the horizon below, sky blue straight up
    #[default]
    SkyGradient,
    /// A single flat color
    Solid(Color),
}

impl Background {
    /// Color seen along `ray` when nothing is hit.
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::SkyGradient => sky_gradient(ray),
            Background::Solid(color) => *color,
        }
    }
}

/// Compute sky gradient background.
///
/// Blends white (looking straight down) to sky blue (straight up) by the
/// y component of the normalized ray direction.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = unit_vector(ray.direction());
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Shared flag used to stop a render between scanlines.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the render to stop before its next scanline.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Knobs that affect how a render runs but not what it computes.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Base seed; each scanline derives its own generator from it
    pub seed: u64,
    /// Render scanlines on the rayon thread pool
    pub parallel: bool,
    /// Checked before every scanline
    pub cancel: CancelToken,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            parallel: true,
            cancel: CancelToken::new(),
        }
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and multiplying in their attenuation.
/// Paths that run out of depth or get absorbed carry no light.
///
/// Bounces are followed iteratively, so stack use does not grow with `depth`.
pub fn ray_color(
    ray: &Ray,
    depth: u32,
    world: &dyn Hittable,
    background: &Background,
    rng: &mut dyn RngCore,
) -> Color {
    let mut throughput = Color::ONE;
    let mut current = *ray;

    for _ in 0..depth {
        let mut rec = HitRecord::default();
        if !world.hit(&current, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY), &mut rec) {
            return throughput * background.color(&current);
        }

        match rec.material.scatter(&current, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                current = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    Color::ZERO
}

/// Render a single pixel with multi-sampling.
///
/// `camera` must be initialized.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel {
        let ray = camera.get_ray(i, j, rng);
        pixel_color += ray_color(&ray, camera.max_depth, world, &camera.background, rng);
    }

    pixel_color * camera.samples_scale()
}

/// Generator for scanline `row`, independent of which worker renders it.
fn row_rng(seed: u64, row: u32) -> StdRng {
    StdRng::seed_from_u64(seed ^ (u64::from(row) + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Render one scanline, left to right.
pub fn render_row(camera: &Camera, world: &dyn Hittable, j: u32, seed: u64) -> Vec<Color> {
    let mut rng = row_rng(seed, j);
    (0..camera.image_width)
        .map(|i| render_pixel(camera, world, i, j, &mut rng))
        .collect()
}

/// Drive an initialized camera over every scanline and feed `sink` in scan order.
pub(crate) fn render_scanlines(
    camera: &Camera,
    world: &dyn Hittable,
    sink: &mut dyn PixelSink,
    progress: &dyn Progress,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let width = camera.image_width;
    let height = camera.image_height();

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}{}",
        width,
        height,
        camera.samples_per_pixel,
        camera.max_depth,
        if options.parallel {
            format!(" on {} threads", rayon::current_num_threads())
        } else {
            String::new()
        }
    );
    let start = Instant::now();

    sink.begin(width, height)?;

    if options.parallel {
        render_parallel(camera, world, sink, progress, options)?;
    } else {
        for j in 0..height {
            if options.cancel.is_cancelled() {
                log::warn!("Render cancelled after {} of {} scanlines", j, height);
                return Err(RenderError::Cancelled { completed_rows: j });
            }
            for color in render_row(camera, world, j, options.seed) {
                sink.write_pixel(color)?;
            }
            progress.scanline_done(height - j - 1);
        }
    }

    sink.finish()?;
    progress.finished();
    log::info!("Rendered in {:.2?}", start.elapsed());

    Ok(())
}

/// Render batches of scanlines in parallel, emitting each batch in order.
fn render_parallel(
    camera: &Camera,
    world: &dyn Hittable,
    sink: &mut dyn PixelSink,
    progress: &dyn Progress,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let height = camera.image_height();
    let batch = (rayon::current_num_threads() as u32 * 4).max(1);
    let remaining = AtomicU32::new(height);

    let mut written = 0;
    while written < height {
        let end = (written + batch).min(height);
        let rows: Vec<Option<Vec<Color>>> = (written..end)
            .into_par_iter()
            .map(|j| {
                if options.cancel.is_cancelled() {
                    return None;
                }
                let row = render_row(camera, world, j, options.seed);
                let left = remaining.fetch_sub(1, Ordering::Relaxed) - 1;
                progress.scanline_done(left);
                Some(row)
            })
            .collect();

        for row in rows {
            let Some(row) = row else {
                log::warn!("Render cancelled after {} of {} scanlines", written, height);
                return Err(RenderError::Cancelled { completed_rows: written });
            };
            for color in row {
                sink.write_pixel(color)?;
            }
            written += 1;
        }
    }

    Ok(())
}
