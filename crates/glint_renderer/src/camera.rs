//! Camera for ray generation.
//!
//! A camera is configured through its public fields (or the `with_*`
//! builders) and then rendered. Rendering recomputes the derived viewport
//! geometry from the current configuration before the first ray is traced,
//! and that geometry stays read-only for the rest of the render.

use crate::renderer::{self, Background, RenderOptions};
use crate::sampling::{random_in_unit_disk, sample_square};
use crate::{Hittable, PixelSink, Progress, RenderError};
use glint_math::{near_zero, unit_vector, Point3, Ray, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    /// Ratio of image width over height
    pub aspect_ratio: f32,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Random samples averaged per pixel
    pub samples_per_pixel: u32,
    /// Maximum number of bounces per path
    pub max_depth: u32,

    // Camera positioning
    pub look_from: Point3,
    pub look_at: Point3,
    pub vup: Vec3,

    // Lens settings
    pub vfov: f32,          // Vertical field of view in degrees
    pub defocus_angle: f32, // Variation angle of rays through each pixel
    pub focus_dist: f32,    // Distance from camera to plane of perfect focus

    /// What a ray sees when it escapes the scene
    pub background: Background,

    // Cached computed values (set by initialize())
    image_height: u32,
    samples_scale: f32,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            look_from: Point3::new(0.0, 0.0, 0.0),
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 1.0,
            background: Background::default(),
            image_height: 100,
            samples_scale: 0.1,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        }
    }

    /// Set image width and aspect ratio; the height follows from both.
    pub fn with_resolution(mut self, image_width: u32, aspect_ratio: f32) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the background seen by escaping rays.
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// True when look_from, look_at and vup do not span an orthonormal frame:
    /// the eye sits on its target, or vup is zero or parallel to the view.
    ///
    /// [`Camera::initialize`] substitutes a usable frame in that case.
    pub fn has_degenerate_frame(&self) -> bool {
        let view = self.look_from - self.look_at;
        near_zero(view) || near_zero(self.vup.cross(view))
    }

    /// Recompute the derived geometry from the current configuration.
    ///
    /// Called by [`Camera::render`]; call it yourself before using
    /// [`Camera::get_ray`] directly.
    pub fn initialize(&mut self) {
        if self.image_width == 0 {
            log::warn!("image_width of 0 raised to 1");
            self.image_width = 1;
        }
        if self.samples_per_pixel == 0 {
            log::warn!("samples_per_pixel of 0 raised to 1");
            self.samples_per_pixel = 1;
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            log::warn!("aspect_ratio {} is not positive, using 1.0", self.aspect_ratio);
            self.aspect_ratio = 1.0;
        }
        if near_zero(self.look_from - self.look_at) {
            log::warn!("look_from and look_at coincide, looking down -z instead");
            self.look_at = self.look_from - Vec3::Z;
        }
        if near_zero(self.vup.cross(self.look_from - self.look_at)) {
            let view = unit_vector(self.look_from - self.look_at);
            let fallback = if view.y.abs() < 0.9 { Vec3::Y } else { Vec3::Z };
            log::warn!(
                "vup {} is parallel to the view direction, using {}",
                self.vup,
                fallback
            );
            self.vup = fallback;
        }

        self.image_height = ((self.image_width as f32 / self.aspect_ratio).round() as u32).max(1);
        self.samples_scale = 1.0 / self.samples_per_pixel as f32;
        self.center = self.look_from;

        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Calculate camera basis vectors
        self.w = unit_vector(self.look_from - self.look_at);
        self.u = unit_vector(self.vup.cross(self.w));
        self.v = self.w.cross(self.u);

        // Viewport edges; v points up but image rows grow downwards
        let viewport_u = viewport_width * self.u;
        let viewport_v = viewport_height * -self.v;

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.center - self.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate defocus disk basis vectors
        let defocus_radius = self.focus_dist * (self.defocus_angle.to_radians() / 2.0).tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;
    }

    /// Render `world` into `sink`, one scanline at a time, top to bottom.
    pub fn render(
        &mut self,
        world: &dyn Hittable,
        sink: &mut dyn PixelSink,
        progress: &dyn Progress,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        self.initialize();
        renderer::render_scanlines(self, world, sink, progress, options)
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    /// World position of the center of pixel (i, j) on the focus plane.
    pub fn pixel_center(&self, i: u32, j: u32) -> Point3 {
        self.pixel00_loc + (i as f32) * self.pixel_delta_u + (j as f32) * self.pixel_delta_v
    }

    /// Image height derived by the last `initialize()`.
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Camera center derived by the last `initialize()`.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f32 {
        self.samples_scale
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
