//! Render facade.
//!
//! [`Renderer`] borrows a display and owns everything else a render pass
//! needs: camera, lights, scene, anti-aliasing setting, attribute bitmask and
//! shading model. Each `put_*` call replaces one attachment wholesale. A pass
//! needs a camera and a scene; lights may be empty and the AA setting falls
//! back to a single centred sample.

use std::time::{Duration, Instant};

use prism_math::{Interval, Ray};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::shade::{PhongShader, ShadeContext, Shader};
use crate::{AaSetting, Attributes, Camera, Color, Display, Hittable, Intersection, Light};

/// Errors reported by a render pass.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RenderError {
    #[error("no camera attached")]
    MissingCamera,

    #[error("no scene attached")]
    MissingScene,

    #[error("display has zero width or height")]
    EmptyDisplay,

    #[error("invalid render config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Render configuration values outside their usable range.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("t_min must be finite and non-negative, got {0}")]
    InvalidTMin(f32),

    #[error("shadow_bias must be finite and non-negative, got {0}")]
    InvalidShadowBias(f32),

    #[error("background colour must be finite")]
    NonFiniteBackground,
}

/// Render configuration.
///
/// Deserialization fills missing fields from the defaults and runs
/// [`RenderConfig::validate`]. Configs built in code are checked when a pass
/// starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigFields")]
pub struct RenderConfig {
    /// Color written when a ray doesn't hit anything
    pub background: Color,
    /// Smallest accepted hit distance, keeps rays from re-hitting their origin
    pub t_min: f32,
    /// Offset along the normal for shadow ray origins
    pub shadow_bias: f32,
    /// Tile edge for the bucketed parallel pass
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            t_min: 1e-3,
            shadow_bias: 1e-3,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_t_min(mut self, t_min: f32) -> Self {
        self.t_min = t_min;
        self
    }

    pub fn with_shadow_bias(mut self, shadow_bias: f32) -> Self {
        self.shadow_bias = shadow_bias;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let usable = |v: f32| v.is_finite() && v >= 0.0;
        if !usable(self.t_min) {
            return Err(ConfigError::InvalidTMin(self.t_min));
        }
        if !usable(self.shadow_bias) {
            return Err(ConfigError::InvalidShadowBias(self.shadow_bias));
        }
        if !self.background.is_finite() {
            return Err(ConfigError::NonFiniteBackground);
        }
        Ok(())
    }
}

/// Serialized form of [`RenderConfig`], before validation.
#[derive(Deserialize)]
#[serde(default)]
struct ConfigFields {
    background: Color,
    t_min: f32,
    shadow_bias: f32,
    bucket_size: u32,
}

impl Default for ConfigFields {
    fn default() -> Self {
        let config = RenderConfig::default();
        Self {
            background: config.background,
            t_min: config.t_min,
            shadow_bias: config.shadow_bias,
            bucket_size: config.bucket_size,
        }
    }
}

impl TryFrom<ConfigFields> for RenderConfig {
    type Error = ConfigError;

    fn try_from(fields: ConfigFields) -> Result<Self, Self::Error> {
        let config = RenderConfig {
            background: fields.background,
            t_min: fields.t_min,
            shadow_bias: fields.shadow_bias,
            bucket_size: fields.bucket_size,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Summary of a finished render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub pixels: u64,
    /// Primary rays traced
    pub samples: u64,
    /// Primary rays that hit the scene
    pub hits: u64,
    pub elapsed: Duration,
}

/// Read-only view of the attachments for one pass.
pub(crate) struct FrameContext<'a> {
    camera: &'a Camera,
    scene: &'a dyn Hittable,
    aa: &'a AaSetting,
    shader: &'a dyn Shader,
    shade_ctx: ShadeContext<'a>,
    width: f32,
    height: f32,
    aspect: f32,
}

impl FrameContext<'_> {
    /// Weighted sum over all AA samples of pixel `(x, y)`, plus the number of
    /// samples that hit the scene.
    pub(crate) fn render_pixel(&self, x: u32, y: u32) -> (Color, u64) {
        let mut color = Color::BLACK;
        let mut hits = 0;

        for sample in self.aa.samples() {
            let px = x as f32 + 0.5 + sample.dx;
            let py = y as f32 + 0.5 + sample.dy;
            // Pixel rows run top to bottom, the image plane's y runs up.
            let sx = 2.0 * px / self.width - 1.0;
            let sy = 1.0 - 2.0 * py / self.height;

            let ray = self.camera.ray_through(sx, sy, self.aspect);
            let (sample_color, hit) = self.trace(&ray);
            color += sample_color * sample.weight;
            hits += u64::from(hit);
        }

        (color, hits)
    }

    fn trace(&self, ray: &Ray) -> (Color, bool) {
        let range = Interval::from_min(self.shade_ctx.config.t_min);
        match self.scene.hit(ray, range) {
            Some(hit) => (self.shader.shade(&self.shade_ctx, &hit, ray, hit.bar), true),
            None => (self.shade_ctx.config.background, false),
        }
    }
}

/// The render facade.
///
/// The display is borrowed for the renderer's lifetime and must outlive it;
/// all other attachments are owned.
pub struct Renderer<'d, D: Display + ?Sized> {
    display: &'d mut D,
    camera: Option<Camera>,
    lights: Vec<Box<dyn Light>>,
    scene: Option<Box<dyn Hittable>>,
    aa: AaSetting,
    attributes: Attributes,
    shader: Box<dyn Shader>,
    config: RenderConfig,
}

impl<'d, D: Display + ?Sized> Renderer<'d, D> {
    /// Create an unconfigured renderer drawing into `display`.
    pub fn new(display: &'d mut D) -> Self {
        Self {
            display,
            camera: None,
            lights: Vec::new(),
            scene: None,
            aa: AaSetting::default(),
            attributes: Attributes::NONE,
            shader: Box::new(PhongShader),
            config: RenderConfig::default(),
        }
    }

    /// Attach a camera, replacing any previous one.
    pub fn put_camera(&mut self, camera: Camera) {
        if self.camera.replace(camera).is_some() {
            log::debug!("Replaced camera, now at {}", camera.position());
        }
    }

    /// Replace the whole light set.
    pub fn put_lights(&mut self, lights: Vec<Box<dyn Light>>) {
        log::debug!("Attached {} lights (was {})", lights.len(), self.lights.len());
        self.lights = lights;
    }

    /// Attach the geometry rays are traced against.
    pub fn put_scene(&mut self, scene: impl Hittable + 'static) {
        self.scene = Some(Box::new(scene));
    }

    pub fn put_aa_setting(&mut self, aa: AaSetting) {
        log::debug!("AA setting: {} samples per pixel", aa.len());
        self.aa = aa;
    }

    /// OR `flag` into the attribute bitmask.
    pub fn put_attribute(&mut self, flag: Attributes) {
        self.attributes.insert(flag);
    }

    /// Clear the bits of `flag` from the attribute bitmask.
    pub fn clear_attribute(&mut self, flag: Attributes) {
        self.attributes.remove(flag);
    }

    /// Swap the shading model, [`PhongShader`] by default.
    pub fn put_shader(&mut self, shader: impl Shader + 'static) {
        self.shader = Box::new(shader);
    }

    pub fn put_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    pub fn display(&self) -> &D {
        &*self.display
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn lights(&self) -> &[Box<dyn Light>] {
        &self.lights
    }

    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    pub fn aa_setting(&self) -> &AaSetting {
        &self.aa
    }

    pub fn attributes(&self) -> Attributes {
        self.attributes
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Colour of `hit` as seen along `ray`, attributes taken at weight `bar`.
    ///
    /// Uses the attached lights, scene (for shadow rays), attributes and
    /// shader. Works without a camera.
    pub fn shade(&self, hit: &Intersection<'_>, ray: &Ray, bar: f32) -> Color {
        let ctx = ShadeContext {
            lights: &self.lights,
            scene: self.scene.as_deref(),
            attributes: self.attributes,
            config: &self.config,
        };
        self.shader.shade(&ctx, hit, ray, bar)
    }

    /// Render every pixel sequentially on the calling thread.
    pub fn render_to_display(&mut self) -> Result<RenderStats, RenderError> {
        let start = Instant::now();
        let (width, height) = (self.display.width(), self.display.height());
        let aspect = self.display.aspect();
        let frame = frame_context(
            self.camera.as_ref(),
            self.scene.as_deref(),
            &self.lights,
            &self.aa,
            self.shader.as_ref(),
            self.attributes,
            &self.config,
            width,
            height,
            aspect,
        )?;

        log::info!(
            "Rendering {}x{} @ {} samples/pixel, {} lights",
            width,
            height,
            self.aa.len(),
            self.lights.len()
        );

        let mut hits = 0;
        for y in 0..height {
            for x in 0..width {
                let (color, pixel_hits) = frame.render_pixel(x, y);
                self.display.put_pixel(x, y, color);
                hits += pixel_hits;
            }
        }

        let stats = self.stats(width, height, hits, start.elapsed());
        log::info!("Rendered {} pixels in {:?} ({} hits)", stats.pixels, stats.elapsed, stats.hits);
        Ok(stats)
    }

    /// Render buckets in parallel, then write them to the display in order.
    ///
    /// Produces the same image as [`Self::render_to_display`].
    pub fn render_buckets_to_display(&mut self) -> Result<RenderStats, RenderError> {
        let start = Instant::now();
        let (width, height) = (self.display.width(), self.display.height());
        let aspect = self.display.aspect();
        let frame = frame_context(
            self.camera.as_ref(),
            self.scene.as_deref(),
            &self.lights,
            &self.aa,
            self.shader.as_ref(),
            self.attributes,
            &self.config,
            width,
            height,
            aspect,
        )?;

        let buckets = generate_buckets(width, height, self.config.bucket_size);
        log::info!(
            "Rendering {}x{} in {} buckets on {} threads",
            width,
            height,
            buckets.len(),
            rayon::current_num_threads()
        );

        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| render_bucket(bucket, &frame))
            .collect();

        let mut hits = 0;
        for result in &results {
            let bucket = result.bucket;
            for (i, &color) in result.pixels.iter().enumerate() {
                let i = i as u32;
                self.display
                    .put_pixel(bucket.x + i % bucket.width, bucket.y + i / bucket.width, color);
            }
            hits += result.hits;
        }

        let stats = self.stats(width, height, hits, start.elapsed());
        log::info!("Rendered {} buckets in {:?}", results.len(), stats.elapsed);
        Ok(stats)
    }

    fn stats(&self, width: u32, height: u32, hits: u64, elapsed: Duration) -> RenderStats {
        let pixels = u64::from(width) * u64::from(height);
        RenderStats {
            pixels,
            samples: pixels * self.aa.len() as u64,
            hits,
            elapsed,
        }
    }
}

/// Check the pass preconditions and bundle the attachments.
#[allow(clippy::too_many_arguments)]
fn frame_context<'a>(
    camera: Option<&'a Camera>,
    scene: Option<&'a dyn Hittable>,
    lights: &'a [Box<dyn Light>],
    aa: &'a AaSetting,
    shader: &'a dyn Shader,
    attributes: Attributes,
    config: &'a RenderConfig,
    width: u32,
    height: u32,
    aspect: f32,
) -> Result<FrameContext<'a>, RenderError> {
    let result = match (camera, scene) {
        (None, _) => Err(RenderError::MissingCamera),
        (_, None) => Err(RenderError::MissingScene),
        _ if width == 0 || height == 0 => Err(RenderError::EmptyDisplay),
        (Some(camera), Some(scene)) => config.validate().map_err(RenderError::from).map(|()| {
            FrameContext {
                camera,
                scene,
                aa,
                shader,
                shade_ctx: ShadeContext {
                    lights,
                    scene: Some(scene),
                    attributes,
                    config,
                },
                width: width as f32,
                height: height as f32,
                aspect,
            }
        }),
    };

    if let Err(err) = &result {
        log::warn!("Render pass not started: {}", err);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AmbientLight, DirectionalLight, FlatShader, FrameBuffer, HittableList, Material,
        PointLight, Sphere, Triangle,
    };
    use prism_math::Vec3;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Display that records every write.
    #[derive(Default)]
    struct RecordingDisplay {
        writes: Vec<(u32, u32, Color)>,
    }

    impl Display for RecordingDisplay {
        fn width(&self) -> u32 {
            4
        }

        fn height(&self) -> u32 {
            3
        }

        fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
            self.writes.push((x, y, color));
        }
    }

    fn red_sphere_scene() -> HittableList {
        HittableList::new().with(Sphere::new(Vec3::ZERO, 1.0, Material::matte(Color::RED)))
    }

    fn camera_facing_origin() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y, 90.0).unwrap()
    }

    #[test]
    fn test_render_without_camera_fails_without_writes() {
        init_logger();
        let mut display = RecordingDisplay::default();
        let mut renderer = Renderer::new(&mut display);
        renderer.put_scene(red_sphere_scene());

        assert_eq!(renderer.render_to_display(), Err(RenderError::MissingCamera));
        assert_eq!(renderer.render_buckets_to_display(), Err(RenderError::MissingCamera));
        assert!(display.writes.is_empty());
    }

    #[test]
    fn test_render_without_scene_fails_without_writes() {
        init_logger();
        let mut display = RecordingDisplay::default();
        let mut renderer = Renderer::new(&mut display);
        renderer.put_camera(camera_facing_origin());

        assert_eq!(renderer.render_to_display(), Err(RenderError::MissingScene));
        assert!(display.writes.is_empty());
    }

    #[test]
    fn test_empty_display_is_rejected() {
        let mut fb = FrameBuffer::new(0, 4);
        let mut renderer = Renderer::new(&mut fb);
        renderer.put_camera(Camera::default());
        renderer.put_scene(red_sphere_scene());

        assert_eq!(renderer.render_to_display(), Err(RenderError::EmptyDisplay));
    }

    #[test]
    fn test_every_pixel_written_once() {
        init_logger();
        let mut display = RecordingDisplay::default();
        let mut renderer = Renderer::new(&mut display);
        renderer.put_camera(camera_facing_origin());
        renderer.put_scene(HittableList::new());

        let stats = renderer.render_to_display().unwrap();
        assert_eq!(stats.pixels, 12);
        assert_eq!(stats.samples, 12);
        assert_eq!(stats.hits, 0);

        let mut coords: Vec<_> = display.writes.iter().map(|&(x, y, _)| (x, y)).collect();
        coords.sort();
        coords.dedup();
        assert_eq!(coords.len(), 12);
        assert_eq!(display.writes.len(), 12);
    }

    #[test]
    fn test_unlit_scene_is_black_and_miss_is_background() {
        init_logger();
        let mut fb = FrameBuffer::new(9, 9);
        let mut renderer = Renderer::new(&mut fb);
        renderer.put_camera(camera_facing_origin());
        renderer.put_scene(red_sphere_scene());
        renderer.put_config(RenderConfig::default().with_background(Color::BLUE));

        let stats = renderer.render_to_display().unwrap();
        assert!(stats.hits > 0 && stats.hits < stats.samples);

        assert_eq!(fb.get(4, 4), Some(Color::BLACK));
        assert_eq!(fb.get(0, 0), Some(Color::BLUE));
    }

    #[test]
    fn test_lit_sphere_center_pixel() {
        let mut fb = FrameBuffer::new(9, 9);
        let mut renderer = Renderer::new(&mut fb);
        renderer.put_camera(camera_facing_origin());
        renderer.put_scene(red_sphere_scene());
        renderer.put_lights(vec![
            Box::new(AmbientLight::new(Color::WHITE)),
            Box::new(DirectionalLight::new(Vec3::NEG_Z, Color::WHITE).unwrap()),
        ]);
        renderer.render_to_display().unwrap();

        // Facing the light head on: ambient 0.1 plus full diffuse.
        let center = fb.get(4, 4).unwrap();
        assert!((center.r - 1.1).abs() < 1e-3, "{center:?}");
        assert_eq!(center.g, 0.0);
        assert_eq!(center.b, 0.0);
    }

    #[test]
    fn test_latest_camera_wins() {
        let mut fb = FrameBuffer::new(5, 5);
        let mut renderer = Renderer::new(&mut fb);
        renderer.put_scene(red_sphere_scene());
        renderer.put_shader(FlatShader);
        renderer.put_camera(camera_facing_origin());
        let looking_away =
            Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 10.0), Vec3::Y, 90.0).unwrap();
        renderer.put_camera(looking_away);

        let stats = renderer.render_to_display().unwrap();
        assert_eq!(stats.hits, 0);
        assert!(fb.pixels().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_put_lights_replaces_set() {
        let mut fb = FrameBuffer::new(1, 1);
        let mut renderer = Renderer::new(&mut fb);
        renderer.put_lights(vec![
            Box::new(AmbientLight::new(Color::WHITE)),
            Box::new(PointLight::new(Vec3::Y, Color::WHITE)),
        ]);
        renderer.put_lights(vec![Box::new(AmbientLight::new(Color::RED))]);

        assert_eq!(renderer.lights().len(), 1);
    }

    #[test]
    fn test_attributes_or_and_clear() {
        let mut fb = FrameBuffer::new(1, 1);
        let mut renderer = Renderer::new(&mut fb);
        assert_eq!(renderer.attributes(), Attributes::NONE);

        renderer.put_attribute(Attributes::SHADOWS);
        renderer.put_attribute(Attributes::from_bits(1 << 4));
        assert_eq!(renderer.attributes().bits(), 0b1_0001);

        renderer.clear_attribute(Attributes::SHADOWS);
        assert_eq!(renderer.attributes(), Attributes::from_bits(1 << 4));
    }

    #[test]
    fn test_default_aa_setting() {
        let mut fb = FrameBuffer::new(1, 1);
        let mut renderer = Renderer::new(&mut fb);
        assert_eq!(renderer.aa_setting(), &AaSetting::single());

        renderer.put_aa_setting(AaSetting::six_tap());
        assert_eq!(renderer.aa_setting().len(), 6);
    }

    #[test]
    fn test_aa_blends_edge_pixels() {
        // Left half of the view is covered by a white quad, the right half is empty.
        let quad = HittableList::new()
            .with(
                Triangle::new(
                    Vec3::new(-10.0, -10.0, -1.0),
                    Vec3::new(0.0, -10.0, -1.0),
                    Vec3::new(0.0, 10.0, -1.0),
                    Material::matte(Color::WHITE),
                )
                .unwrap(),
            )
            .with(
                Triangle::new(
                    Vec3::new(-10.0, -10.0, -1.0),
                    Vec3::new(0.0, 10.0, -1.0),
                    Vec3::new(-10.0, 10.0, -1.0),
                    Material::matte(Color::WHITE),
                )
                .unwrap(),
            );

        let mut fb = FrameBuffer::new(3, 3);
        let mut renderer = Renderer::new(&mut fb);
        renderer.put_camera(Camera::default());
        renderer.put_scene(quad);
        renderer.put_shader(FlatShader);
        renderer.put_aa_setting(AaSetting::grid(4).unwrap());
        renderer.render_to_display().unwrap();

        // The middle column straddles x = 0: half its samples hit.
        let covered = fb.get(0, 1).unwrap();
        assert!((covered.r - 1.0).abs() < 1e-5, "{covered:?}");
        assert_eq!(fb.get(2, 1), Some(Color::BLACK));
        let edge = fb.get(1, 1).unwrap();
        assert!((edge.r - 0.5).abs() < 1e-5, "{edge:?}");
    }

    #[test]
    fn test_shade_uses_attached_state() {
        let material = Material::matte(Color::GREEN);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let hit = Intersection::new(&ray, 5.0, Vec3::Z, &material);

        let mut fb = FrameBuffer::new(1, 1);
        let mut renderer = Renderer::new(&mut fb);
        assert_eq!(renderer.shade(&hit, &ray, 0.0), Color::BLACK);

        let key = DirectionalLight::new(Vec3::NEG_Z, Color::WHITE).unwrap();
        renderer.put_lights(vec![Box::new(key)]);
        assert_eq!(renderer.shade(&hit, &ray, 0.0), Color::GREEN);
    }

    #[test]
    fn test_bucketed_pass_matches_sequential() {
        init_logger();
        let build_scene = || {
            HittableList::new()
                .with(Sphere::new(Vec3::new(-0.6, 0.0, 0.0), 0.8, Material::glossy(Color::RED, 16.0)))
                .with(Sphere::new(Vec3::new(0.7, 0.2, -0.5), 0.6, Material::matte(Color::CYAN)))
                .with(Sphere::new(Vec3::new(0.0, -101.0, 0.0), 100.0, Material::matte(Color::WHITE)))
        };
        let setup = |renderer: &mut Renderer<'_, FrameBuffer>| {
            renderer.put_camera(camera_facing_origin());
            renderer.put_scene(build_scene());
            renderer.put_lights(vec![
                Box::new(AmbientLight::new(Color::splat(0.2))),
                Box::new(PointLight::new(Vec3::new(3.0, 4.0, 3.0), Color::WHITE)),
            ]);
            renderer.put_aa_setting(AaSetting::six_tap());
            renderer.put_attribute(Attributes::SHADOWS);
            renderer.put_config(RenderConfig::default().with_bucket_size(7));
        };

        let mut sequential = FrameBuffer::new(40, 30);
        let seq_stats = {
            let mut renderer = Renderer::new(&mut sequential);
            setup(&mut renderer);
            renderer.render_to_display().unwrap()
        };

        let mut parallel = FrameBuffer::new(40, 30);
        let par_stats = {
            let mut renderer = Renderer::new(&mut parallel);
            setup(&mut renderer);
            renderer.render_buckets_to_display().unwrap()
        };

        assert_eq!(sequential, parallel);
        assert_eq!(seq_stats.hits, par_stats.hits);
        assert_eq!(seq_stats.samples, 40 * 30 * 6);
    }

    /// Pixel columns in the middle row that show red.
    fn red_columns(camera: Camera) -> Vec<u32> {
        let scene = HittableList::new().with(Sphere::new(
            Vec3::new(2.0, 0.0, -3.0),
            1.0,
            Material::matte(Color::RED),
        ));
        let mut fb = FrameBuffer::new(9, 9);
        let mut renderer = Renderer::new(&mut fb);
        renderer.put_camera(camera);
        renderer.put_scene(scene);
        renderer.put_shader(FlatShader);
        renderer.render_to_display().unwrap();

        (0..9).filter(|&x| fb.get(x, 4) == Some(Color::RED)).collect()
    }

    #[test]
    fn test_constructed_camera_is_not_mirrored() {
        let canonical = red_columns(Camera::default());
        let built = red_columns(Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0).unwrap());

        assert_eq!(canonical, built);
        // Object at +X shows up right of centre.
        assert!(!built.is_empty());
        assert!(built.iter().all(|&x| x > 4), "{built:?}");
    }

    #[test]
    fn test_invalid_config_fails_without_writes() {
        let mut display = RecordingDisplay::default();
        let mut renderer = Renderer::new(&mut display);
        renderer.put_camera(camera_facing_origin());
        renderer.put_scene(red_sphere_scene());
        renderer.put_config(RenderConfig::default().with_t_min(f32::NAN));

        assert!(matches!(
            renderer.render_to_display(),
            Err(RenderError::InvalidConfig(ConfigError::InvalidTMin(_)))
        ));

        renderer.put_config(RenderConfig::default().with_shadow_bias(-1.0));
        assert_eq!(
            renderer.render_buckets_to_display(),
            Err(RenderError::InvalidConfig(ConfigError::InvalidShadowBias(-1.0)))
        );
        assert!(display.writes.is_empty());
    }

    #[test]
    fn test_config_json_is_validated() {
        assert!(serde_json::from_str::<RenderConfig>(r#"{"t_min": -0.5}"#).is_err());
        assert!(serde_json::from_str::<RenderConfig>(r#"{"shadow_bias": -1e-3}"#).is_err());

        let config = RenderConfig::default().with_background(Color::BLUE).with_t_min(0.0);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<RenderConfig>(&json).unwrap(), config);
    }

    #[test]
    fn test_config_from_json() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"background": {"r": 0.5, "g": 0.7, "b": 1.0}, "bucket_size": 16}"#)
                .unwrap();

        assert_eq!(config.background, Color::new(0.5, 0.7, 1.0));
        assert_eq!(config.bucket_size, 16);
        assert_eq!(config.t_min, RenderConfig::default().t_min);
    }
}
