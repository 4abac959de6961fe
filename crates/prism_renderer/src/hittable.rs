//! Hittable trait and the intersection record handed to shading.

use prism_math::{try_normalize, Interval, Ray, Vec3};

use crate::{Color, Material};

/// Per-point surface data that shading interpolates across a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceAttributes {
    /// Shading normal (not necessarily unit length after interpolation)
    pub normal: Vec3,
    /// Surface colour, modulated with the material's diffuse response
    pub color: Color,
}

impl SurfaceAttributes {
    pub fn new(normal: Vec3, color: Color) -> Self {
        Self { normal, color }
    }

    pub fn lerp(&self, other: &SurfaceAttributes, t: f32) -> SurfaceAttributes {
        SurfaceAttributes {
            normal: self.normal.lerp(other.normal, t),
            color: self.color.lerp(other.color, t),
        }
    }
}

/// Record of a ray-object intersection.
///
/// Surface attributes are carried as two endpoints, `near` and `far`, and
/// the weight `bar` picks the point between them: `near.lerp(far, bar)`.
/// A primitive with constant attributes sets both ends equal.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Ray parameter of the hit
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Geometric normal, unit length, always facing against the ray
    pub normal: Vec3,
    /// Whether the ray hit the outside of the surface
    pub front_face: bool,
    /// Interpolation weight between `near` and `far`
    pub bar: f32,
    pub near: SurfaceAttributes,
    pub far: SurfaceAttributes,
    pub material: &'a Material,
}

impl<'a> Intersection<'a> {
    /// Build a hit with constant attributes taken from the geometric normal.
    ///
    /// `outward_normal` must be unit length.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        // If the ray and normal point in the same direction, we're inside
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        let attributes = SurfaceAttributes::new(outward_normal, Color::WHITE);

        Self {
            t,
            point: ray.at(t),
            normal,
            front_face,
            bar: 0.0,
            near: attributes,
            far: attributes,
            material,
        }
    }

    /// Replace the interpolated attributes.
    pub fn with_attributes(mut self, near: SurfaceAttributes, far: SurfaceAttributes, bar: f32) -> Self {
        self.near = near;
        self.far = far;
        self.bar = bar;
        self
    }

    /// Attributes at weight `bar`.
    pub fn attributes_at(&self, bar: f32) -> SurfaceAttributes {
        self.near.lerp(&self.far, bar)
    }

    /// Unit shading normal at weight `bar`, on the same side as [`Self::normal`].
    ///
    /// Falls back to the geometric normal if interpolation cancels out.
    pub fn shading_normal(&self, bar: f32) -> Vec3 {
        let interpolated = try_normalize(self.attributes_at(bar).normal).unwrap_or(self.normal);
        if interpolated.dot(self.normal) < 0.0 {
            -interpolated
        } else {
            interpolated
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Closest intersection with `ray` whose parameter lies in `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'_>>;
}

impl<T: Hittable + ?Sized> Hittable for Box<T> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'_>> {
        (**self).hit(ray, ray_t)
    }
}

/// A list of hittable objects.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Hittable + 'static) {
        self.objects.push(Box::new(object));
    }

    /// Builder-style variant of [`Self::add`].
    pub fn with(mut self, object: impl Hittable + 'static) -> Self {
        self.add(object);
        self
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'_>> {
        let mut closest: Option<Intersection<'_>> = None;

        for object in &self.objects {
            let interval = match &closest {
                Some(hit) => ray_t.with_max(hit.t),
                None => ray_t,
            };
            if let Some(hit) = object.hit(ray, interval) {
                closest = Some(hit);
            }
        }

        closest
    }
}
