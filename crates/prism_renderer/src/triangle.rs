//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection. Vertex
//! attributes are reported through the two-endpoint form of
//! [`Intersection`]: with barycentrics `(u, v)` the near end is vertex 0, the
//! far end is the point on edge `v1-v2` at `v / (u + v)`, and `bar = u + v`.
//! Interpolating near to far by `bar` is then exactly the barycentric blend of
//! all three vertices.

use prism_math::{try_normalize, Interval, MathError, Ray, Vec3};

use crate::hittable::{Hittable, Intersection, SurfaceAttributes};
use crate::{Color, Material};

/// A triangle primitive.
pub struct Triangle {
    vertices: [Vec3; 3],
    attributes: [SurfaceAttributes; 3],
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    material: Material,
}

impl Triangle {
    /// Flat-shaded white triangle.
    ///
    /// Fails if the vertices are collinear.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Result<Self, MathError> {
        let normal = try_normalize((v1 - v0).cross(v2 - v0))?;
        let flat = SurfaceAttributes::new(normal, Color::WHITE);

        Ok(Self {
            vertices: [v0, v1, v2],
            attributes: [flat; 3],
            normal,
            material,
        })
    }

    /// Triangle with per-vertex normals and colours (smooth shading).
    pub fn with_vertex_attributes(
        vertices: [Vec3; 3],
        attributes: [SurfaceAttributes; 3],
        material: Material,
    ) -> Result<Self, MathError> {
        let [v0, v1, v2] = vertices;
        let normal = try_normalize((v1 - v0).cross(v2 - v0))?;

        Ok(Self {
            vertices,
            attributes,
            normal,
            material,
        })
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'_>> {
        let [v0, v1, v2] = self.vertices;
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < 1e-8 {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if !ray_t.contains(t) {
            return None;
        }

        let [a0, a1, a2] = self.attributes;
        let bar = u + v;
        let far = if bar > 0.0 {
            a1.lerp(&a2, v / bar)
        } else {
            a1
        };

        Some(Intersection::new(ray, t, self.normal, &self.material).with_attributes(a0, far, bar))
    }
}
