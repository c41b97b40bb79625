//! JSON scene descriptions.
//!
//! A scene file holds camera settings, a registry of named materials and a
//! list of spheres that refer to those materials by name. Spheres naming the
//! same material share one instance.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glint_renderer::{
    Absorber, Background, Camera, Color, Dielectric, HittableList, Lambertian, Material, Metal,
    Point3, Sphere, Vec3,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid scene description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sphere {index} uses unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error(
        "Camera has no usable orientation: look_from {look_from:?}, look_at {look_at:?}, vup {vup:?}"
    )]
    DegenerateCamera {
        look_from: [f32; 3],
        look_at: [f32; 3],
        vup: [f32; 3],
    },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Background seen by rays that escape the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundSpec {
    #[default]
    Sky,
    Solid([f32; 3]),
}

/// Camera configuration as written in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraSettings {
    pub aspect_ratio: f32,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f32,
    pub look_from: [f32; 3],
    pub look_at: [f32; 3],
    pub vup: [f32; 3],
    /// Defocus cone angle in degrees; 0 disables depth of field
    pub defocus_angle: f32,
    pub focus_dist: f32,
    pub background: BackgroundSpec,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            vfov: 90.0,
            look_from: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -1.0],
            vup: [0.0, 1.0, 0.0],
            defocus_angle: 0.0,
            focus_dist: 1.0,
            background: BackgroundSpec::Sky,
        }
    }
}

impl CameraSettings {
    /// Build a camera from these settings.
    ///
    /// Fails when look_from sits on look_at or vup runs along the view direction.
    pub fn to_camera(&self) -> SceneResult<Camera> {
        let background = match self.background {
            BackgroundSpec::Sky => Background::SkyGradient,
            BackgroundSpec::Solid(rgb) => Background::Solid(Color::from_array(rgb)),
        };

        let camera = Camera::new()
            .with_resolution(self.image_width, self.aspect_ratio)
            .with_quality(self.samples_per_pixel, self.max_depth)
            .with_position(
                Point3::from_array(self.look_from),
                Point3::from_array(self.look_at),
                Vec3::from_array(self.vup),
            )
            .with_lens(self.vfov, self.defocus_angle, self.focus_dist)
            .with_background(background);

        if camera.has_degenerate_frame() {
            return Err(SceneError::DegenerateCamera {
                look_from: self.look_from,
                look_at: self.look_at,
                vup: self.vup,
            });
        }
        Ok(camera)
    }
}

/// A material entry in the scene's registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialSpec {
    Absorber,
    Lambertian {
        albedo: [f32; 3],
    },
    Metal {
        albedo: [f32; 3],
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        refraction_index: f32,
    },
}

impl MaterialSpec {
    fn build(&self) -> Arc<dyn Material> {
        match *self {
            MaterialSpec::Absorber => Arc::new(Absorber),
            MaterialSpec::Lambertian { albedo } => {
                Arc::new(Lambertian::new(Color::from_array(albedo)))
            }
            MaterialSpec::Metal { albedo, fuzz } => {
                Arc::new(Metal::new(Color::from_array(albedo), fuzz))
            }
            MaterialSpec::Dielectric { refraction_index } => {
                Arc::new(Dielectric::new(refraction_index))
            }
        }
    }
}

/// A sphere entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereSpec {
    pub center: [f32; 3],
    pub radius: f32,
    /// Key into the scene's material registry
    pub material: String,
}

/// A complete scene description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneFile {
    pub camera: CameraSettings,
    pub materials: BTreeMap<String, MaterialSpec>,
    pub spheres: Vec<SphereSpec>,
}

impl SceneFile {
    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = Self::from_json(&text)?;
        log::info!(
            "Loaded {} ({} materials, {} spheres)",
            path.display(),
            scene.materials.len(),
            scene.spheres.len()
        );
        Ok(scene)
    }

    /// Parse a scene from JSON text.
    pub fn from_json(text: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Instantiate the world described by this scene.
    ///
    /// Every material in the registry is built once and shared by all the
    /// spheres that name it.
    pub fn build_world(&self) -> SceneResult<HittableList> {
        let registry: HashMap<&str, Arc<dyn Material>> = self
            .materials
            .iter()
            .map(|(name, spec)| (name.as_str(), spec.build()))
            .collect();

        let mut world = HittableList::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            let material = registry.get(sphere.material.as_str()).ok_or_else(|| {
                SceneError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                }
            })?;
            if sphere.radius < 0.0 {
                log::warn!("Sphere {} has negative radius {}, clamped to 0", index, sphere.radius);
            }
            world.add(Box::new(Sphere::new(
                Point3::from_array(sphere.center),
                sphere.radius,
                Arc::clone(material),
            )));
        }

        log::debug!("Built world with {} spheres", world.len());
        Ok(world)
    }
}
