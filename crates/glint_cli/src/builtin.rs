//! Scenes that ship with the binary.

use glint_renderer::sampling::{gen_f32, gen_range, random_color, random_vec3};
use glint_renderer::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::Builtin;
use crate::scene::{CameraSettings, MaterialSpec, SceneFile, SphereSpec};

/// Build the scene description for a built-in scene.
pub fn scene(builtin: Builtin, seed: u64) -> SceneFile {
    match builtin {
        Builtin::Spheres => spheres(),
        Builtin::Cover => cover(seed),
    }
}

fn sphere(center: [f32; 3], radius: f32, material: &str) -> SphereSpec {
    SphereSpec {
        center,
        radius,
        material: material.to_string(),
    }
}

/// A ground plane with three spheres side by side.
fn spheres() -> SceneFile {
    let mut scene = SceneFile {
        camera: CameraSettings {
            vfov: 20.0,
            look_from: [-2.0, 2.0, 1.0],
            look_at: [0.0, 0.0, -1.0],
            defocus_angle: 10.0,
            focus_dist: 3.4,
            ..CameraSettings::default()
        },
        ..SceneFile::default()
    };

    let materials = [
        ("ground", MaterialSpec::Lambertian { albedo: [0.8, 0.8, 0.0] }),
        ("center", MaterialSpec::Lambertian { albedo: [0.1, 0.2, 0.5] }),
        ("glass", MaterialSpec::Dielectric { refraction_index: 1.5 }),
        ("bubble", MaterialSpec::Dielectric { refraction_index: 1.0 / 1.5 }),
        ("gold", MaterialSpec::Metal { albedo: [0.8, 0.6, 0.2], fuzz: 1.0 }),
    ];
    scene
        .materials
        .extend(materials.into_iter().map(|(name, spec)| (name.to_string(), spec)));

    scene.spheres = vec![
        sphere([0.0, -100.5, -1.0], 100.0, "ground"),
        sphere([0.0, 0.0, -1.2], 0.5, "center"),
        sphere([-1.0, 0.0, -1.0], 0.5, "glass"),
        sphere([-1.0, 0.0, -1.0], 0.4, "bubble"),
        sphere([1.0, 0.0, -1.0], 0.5, "gold"),
    ];
    scene
}

/// Three large spheres in a field of small random ones.
fn cover(seed: u64) -> SceneFile {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = SceneFile {
        camera: CameraSettings {
            aspect_ratio: 16.0 / 9.0,
            image_width: 1200,
            samples_per_pixel: 500,
            vfov: 20.0,
            look_from: [13.0, 2.0, 3.0],
            look_at: [0.0, 0.0, 0.0],
            defocus_angle: 0.6,
            focus_dist: 10.0,
            ..CameraSettings::default()
        },
        ..SceneFile::default()
    };

    scene.materials.insert(
        "ground".to_string(),
        MaterialSpec::Lambertian { albedo: [0.5, 0.5, 0.5] },
    );
    scene.materials.insert(
        "glass".to_string(),
        MaterialSpec::Dielectric { refraction_index: 1.5 },
    );
    scene.materials.insert(
        "brown".to_string(),
        MaterialSpec::Lambertian { albedo: [0.4, 0.2, 0.1] },
    );
    scene.materials.insert(
        "mirror".to_string(),
        MaterialSpec::Metal { albedo: [0.7, 0.6, 0.5], fuzz: 0.0 },
    );
    scene.spheres.push(sphere([0.0, -1000.0, 0.0], 1000.0, "ground"));

    let keep_clear = Vec3::new(4.0, 0.2, 0.0);
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(&mut rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(&mut rng),
                0.2,
                b as f32 + 0.9 * gen_f32(&mut rng),
            );
            if (center - keep_clear).length() <= 0.9 {
                continue;
            }

            let spec = if choose_mat < 0.8 {
                let albedo = random_vec3(&mut rng) * random_vec3(&mut rng);
                MaterialSpec::Lambertian { albedo: albedo.to_array() }
            } else if choose_mat < 0.95 {
                MaterialSpec::Metal {
                    albedo: random_color(&mut rng, 0.5, 1.0).to_array(),
                    fuzz: gen_range(&mut rng, 0.0, 0.5),
                }
            } else {
                // Glass spheres all share the registry's one dielectric.
                scene.spheres.push(sphere(center.to_array(), 0.2, "glass"));
                continue;
            };

            let name = format!("small_{}_{}", a, b);
            scene.materials.insert(name.clone(), spec);
            scene.spheres.push(sphere(center.to_array(), 0.2, &name));
        }
    }

    scene.spheres.push(sphere([0.0, 1.0, 0.0], 1.0, "glass"));
    scene.spheres.push(sphere([-4.0, 1.0, 0.0], 1.0, "brown"));
    scene.spheres.push(sphere([4.0, 1.0, 0.0], 1.0, "mirror"));

    log::debug!("Cover scene has {} spheres", scene.spheres.len());
    scene
}
