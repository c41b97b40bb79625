//! Glint CPU path tracer.
//!
//! A Monte Carlo path tracer for small sphere scenes: a camera shoots
//! jittered rays through every pixel, rays bounce off materials until they
//! escape to the background or run out of depth, and the averaged samples
//! are streamed to a pixel sink in scan order.

mod camera;
mod error;
mod hittable;
mod material;
mod progress;
mod renderer;
pub mod sampling;
mod sink;
mod sphere;

pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Absorber, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use progress::{LogProgress, NoProgress, Progress};
pub use renderer::{
    ray_color, render_pixel, render_row, sky_gradient, Background, CancelToken, RenderOptions,
};
pub use sink::{color_to_rgb8, linear_to_gamma, ImageBuffer, PixelSink, PpmSink};
pub use sphere::Sphere;

/// Re-export the math types the renderer API is written in
pub use glint_math::{Color, Interval, Point3, Ray, Vec3};
