//! Sphere primitive for ray tracing.

use prism_math::{Interval, Ray, Vec3};

use crate::hittable::{Hittable, Intersection, SurfaceAttributes};
use crate::{Color, Material};

/// A sphere primitive with a uniform surface colour.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    color: Color,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            color: Color::WHITE,
            material,
        }
    }

    /// Set the surface colour multiplied into the material's diffuse term.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'_>> {
        if self.radius <= 0.0 {
            return None;
        }

        let oc = self.center - ray.origin;
        let a = ray.direction.length_squared();
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        let attributes = SurfaceAttributes::new(outward_normal, self.color);

        Some(Intersection::new(ray, root, outward_normal, &self.material).with_attributes(
            attributes,
            attributes,
            0.0,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere_ahead() -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Material::default()).with_color(Color::CYAN)
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = sphere.hit(&ray, Interval::from_min(0.001)).unwrap();

        assert!((hit.t - 0.5).abs() < 0.001);
        assert!(hit.front_face);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
        assert_eq!(hit.attributes_at(hit.bar).color, Color::CYAN);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);

        assert!(sphere.hit(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, Material::default());
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = sphere.hit(&ray, Interval::from_min(0.001)).unwrap();

        assert!((hit.t - 2.0).abs() < 1e-5);
        assert!(!hit.front_face);
        assert!((hit.normal + Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_sphere_respects_interval() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert!(sphere.hit(&ray, Interval::new(0.001, 0.4)).is_none());
    }

    #[test]
    fn test_zero_radius_never_hits() {
        let sphere = Sphere::new(Vec3::NEG_Z, -1.0, Material::default());
        assert_eq!(sphere.radius(), 0.0);
        assert!(sphere.hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), Interval::UNIVERSE).is_none());
    }
}
