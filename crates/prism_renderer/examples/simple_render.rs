//! Simple ray tracer example.
//!
//! Renders a few lit spheres over a triangle floor and saves to PPM format.
//! Pass a JSON file as the first argument to override the render config.

use anyhow::Context;
use prism_renderer::{
    AaSetting, AmbientLight, Attributes, Camera, Color, DirectionalLight, FrameBuffer,
    HittableList, Light, Material, PointLight, RenderConfig, Renderer, Sphere, Triangle, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufWriter, Write};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 450;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => RenderConfig::default().with_background(Color::new(0.5, 0.7, 1.0)),
    };

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    log::info!("Scene built with {} objects in {:?}", scene.len(), start.elapsed());

    let camera = Camera::new(
        Vec3::new(0.0, 1.5, 6.0), // look_from
        Vec3::new(0.0, 0.5, 0.0), // look_at
        Vec3::Y,                  // vup
        45.0,
    )?;

    let mut image = FrameBuffer::new(WIDTH, HEIGHT);
    let stats = {
        let mut renderer = Renderer::new(&mut image);
        renderer.put_camera(camera);
        renderer.put_scene(scene);
        renderer.put_lights(build_lights()?);
        renderer.put_aa_setting(AaSetting::jittered(3, &mut StdRng::seed_from_u64(7))?);
        renderer.put_attribute(Attributes::SHADOWS);
        renderer.put_config(config);
        renderer.render_buckets_to_display()?
    };

    log::info!(
        "Rendered {} samples in {:?}, {:.1}% hit geometry",
        stats.samples,
        stats.elapsed,
        100.0 * stats.hits as f64 / stats.samples as f64
    );

    let filename = "output.ppm";
    save_ppm(&image, filename).with_context(|| format!("writing {filename}"))?;
    log::info!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> anyhow::Result<HittableList> {
    let mut scene = HittableList::new();

    // Floor quad
    let floor = Material::matte(Color::splat(0.8));
    let corners = [
        Vec3::new(-6.0, 0.0, -6.0),
        Vec3::new(6.0, 0.0, -6.0),
        Vec3::new(6.0, 0.0, 6.0),
        Vec3::new(-6.0, 0.0, 6.0),
    ];
    scene.add(Triangle::new(corners[0], corners[2], corners[1], floor)?);
    scene.add(Triangle::new(corners[0], corners[3], corners[2], floor)?);

    scene.add(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Material::glossy(Color::new(0.8, 0.2, 0.1), 64.0),
    ));
    scene.add(Sphere::new(
        Vec3::new(-2.2, 0.6, 0.5),
        0.6,
        Material::matte(Color::new(0.2, 0.4, 0.9)),
    ));
    scene.add(Sphere::new(
        Vec3::new(2.0, 0.5, 0.8),
        0.5,
        Material::glossy(Color::new(0.9, 0.8, 0.2), 16.0),
    ));
    scene.add(Sphere::new(
        Vec3::new(0.9, 0.25, 2.0),
        0.25,
        Material::emissive(Color::new(1.0, 0.6, 0.3)),
    ));

    Ok(scene)
}

fn build_lights() -> anyhow::Result<Vec<Box<dyn Light>>> {
    Ok(vec![
        Box::new(AmbientLight::new(Color::splat(0.3))),
        Box::new(DirectionalLight::new(
            Vec3::new(-1.0, -2.0, -1.0),
            Color::splat(0.8),
        )?),
        Box::new(PointLight::new(Vec3::new(3.0, 4.0, 4.0), Color::new(0.6, 0.5, 0.4))),
    ])
}

fn save_ppm(image: &FrameBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", WIDTH, HEIGHT)?;
    writeln!(writer, "255")?;

    for rgba in image.to_rgba8(true).chunks_exact(4) {
        writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
    }

    writer.flush()
}
