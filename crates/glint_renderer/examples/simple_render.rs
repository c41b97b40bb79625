//! Simple path tracer example.
//!
//! Renders three spheres on a ground sphere and saves to PPM format.

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use glint_renderer::{
    Camera, Color, Dielectric, HittableList, Lambertian, LogProgress, Metal, PpmSink,
    RenderOptions, Sphere, Vec3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let world = build_scene();

    let mut camera = Camera::new()
        .with_resolution(400, 16.0 / 9.0)
        .with_quality(50, 10)
        .with_position(
            Vec3::new(13.0, 2.0, 3.0), // look_from
            Vec3::new(0.0, 0.0, 0.0),  // look_at
            Vec3::new(0.0, 1.0, 0.0),  // vup
        )
        .with_lens(20.0, 0.6, 10.0);
    camera.initialize();

    let filename = "simple_render.ppm";
    let mut sink = PpmSink::new(BufWriter::new(File::create(filename)?));
    let progress = LogProgress::new(camera.image_height());

    camera.render(&world, &mut sink, &progress, &RenderOptions::default())?;
    log::info!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> HittableList {
    let mut world = HittableList::new();

    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    world
}
