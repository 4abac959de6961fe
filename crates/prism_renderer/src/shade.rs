//! Shading models.
//!
//! A [`Shader`] turns an intersection plus the incoming ray into a colour.
//! The renderer owns one and swaps it with `put_shader`; everything a shader
//! may look at besides the hit itself travels in a [`ShadeContext`].

use prism_math::{try_normalize, Interval, Ray, Vec3};

use crate::{Attributes, Color, Hittable, Intersection, Light, LightSample, RenderConfig};

/// Read-only renderer state visible to a shader.
pub struct ShadeContext<'a> {
    pub lights: &'a [Box<dyn Light>],
    /// Scene for secondary rays, if one is attached
    pub scene: Option<&'a dyn Hittable>,
    pub attributes: Attributes,
    pub config: &'a RenderConfig,
}

impl ShadeContext<'_> {
    /// True if something in the scene blocks the path from `point` toward a
    /// light `distance` away along the unit vector `direction`.
    pub fn occluded(&self, point: Vec3, normal: Vec3, direction: Vec3, distance: f32) -> bool {
        let Some(scene) = self.scene else {
            return false;
        };

        let bias = self.config.shadow_bias;
        let shadow_ray = Ray::new(point + normal * bias, direction);
        let range = Interval::new(self.config.t_min, distance - bias);
        !range.is_empty() && scene.hit(&shadow_ray, range).is_some()
    }
}

/// Pluggable shading model.
pub trait Shader: Send + Sync {
    /// Colour seen along `ray` at `hit`, with surface attributes taken at
    /// interpolation weight `bar`.
    fn shade(&self, ctx: &ShadeContext<'_>, hit: &Intersection<'_>, ray: &Ray, bar: f32) -> Color;
}

/// Ambient + diffuse + specular local illumination, summed over all lights.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhongShader;

impl Shader for PhongShader {
    fn shade(&self, ctx: &ShadeContext<'_>, hit: &Intersection<'_>, ray: &Ray, bar: f32) -> Color {
        let material = hit.material;
        let surface = hit.attributes_at(bar).color;
        let n = hit.shading_normal(bar);
        let view = try_normalize(-ray.direction).unwrap_or(hit.normal);

        let base = material.diffuse.modulate(surface);
        let ambient_response = material.ambient.modulate(surface);
        let with_specular = !ctx.attributes.contains(Attributes::NO_SPECULAR);
        let with_shadows = ctx.attributes.contains(Attributes::SHADOWS);

        let mut color = material.emission;

        for light in ctx.lights {
            match light.sample(hit.point) {
                LightSample::Ambient { color: light_color } => {
                    color += light_color.modulate(ambient_response);
                }
                LightSample::Directed {
                    color: light_color,
                    direction,
                    distance,
                } => {
                    let n_dot_l = n.dot(direction);
                    if n_dot_l <= 0.0 {
                        continue;
                    }
                    if with_shadows && ctx.occluded(hit.point, hit.normal, direction, distance) {
                        continue;
                    }

                    color += light_color.modulate(base) * n_dot_l;

                    if with_specular {
                        let reflected = 2.0 * n_dot_l * n - direction;
                        let r_dot_v = reflected.dot(view);
                        if r_dot_v > 0.0 {
                            color += light_color.modulate(material.specular)
                                * r_dot_v.powf(material.shininess);
                        }
                    }
                }
            }
        }

        color
    }
}

/// Unlit surface colour plus emission. Ignores lights.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatShader;

impl Shader for FlatShader {
    fn shade(&self, _ctx: &ShadeContext<'_>, hit: &Intersection<'_>, _ray: &Ray, bar: f32) -> Color {
        let surface = hit.attributes_at(bar).color;
        hit.material.diffuse.modulate(surface) + hit.material.emission
    }
}

/// Debug view mapping the shading normal from `[-1, 1]` to `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalShader;

impl Shader for NormalShader {
    fn shade(&self, _ctx: &ShadeContext<'_>, hit: &Intersection<'_>, _ray: &Ray, bar: f32) -> Color {
        Color::from(hit.shading_normal(bar) * 0.5 + Vec3::splat(0.5))
    }
}
