//! Camera frame for ray generation.
//!
//! A [`Camera`] is an immutable snapshot: an eye position, an orthonormal
//! basis `{front, up, right}` and the precomputed `fov_scale`. To move the
//! camera, build a new one and hand it to the renderer.

use prism_math::{try_normalize, Ray, Vec3};
use thiserror::Error;

/// Errors that can occur while building a camera frame.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CameraError {
    #[error("camera position and look-at target coincide")]
    ZeroViewDirection,

    #[error("world up vector is zero or parallel to the view direction")]
    DegenerateUp,

    #[error("field of view must be finite and in [0, 180) degrees, got {0}")]
    InvalidFov(f32),
}

/// Perspective camera frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    /// tan(fov / 2), multiplied against pixel-plane coordinates
    fov_scale: f32,
}

/// Remove from `general` its component along the unit vector `unit`, then
/// normalize what is left.
fn orthonormalize(general: Vec3, unit: Vec3) -> Option<Vec3> {
    try_normalize(general - general.dot(unit) * unit).ok()
}

impl Camera {
    /// Build a camera at `position` looking at `look_at`.
    ///
    /// `world_up` only needs to be roughly upward; it is made orthogonal to the
    /// view direction with a Gram-Schmidt step. `fov_degrees` is the vertical
    /// field of view.
    pub fn new(
        position: Vec3,
        look_at: Vec3,
        world_up: Vec3,
        fov_degrees: f32,
    ) -> Result<Self, CameraError> {
        if !fov_degrees.is_finite() || !(0.0..180.0).contains(&fov_degrees) {
            return Err(CameraError::InvalidFov(fov_degrees));
        }

        let front = try_normalize(look_at - position).map_err(|_| CameraError::ZeroViewDirection)?;
        let up = orthonormalize(world_up, front).ok_or(CameraError::DegenerateUp)?;
        let right = up.cross(front);
        let fov_scale = (fov_degrees * std::f32::consts::PI / 360.0).tan();

        Ok(Self {
            position,
            front,
            up,
            right,
            fov_scale,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit view direction.
    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn fov_scale(&self) -> f32 {
        self.fov_scale
    }

    /// Primary ray through a point on the image plane.
    ///
    /// `sx` and `sy` are normalized pixel-plane coordinates in `[-1, 1]`:
    /// `sx` grows toward screen right, `sy` grows along `up`, and `(0, 0)` is
    /// the image centre. `aspect` is width over height. The returned
    /// direction is unit length.
    ///
    /// Screen right is `front × up`, independent of the stored `right`.
    pub fn ray_through(&self, sx: f32, sy: f32, aspect: f32) -> Ray {
        let screen_right = self.front.cross(self.up);
        let direction = self.front
            + screen_right * (sx * self.fov_scale * aspect)
            + self.up * (sy * self.fov_scale);

        // front is unit and orthogonal to the other two terms, so the sum
        // can never collapse to zero.
        Ray::new(self.position, direction.normalize())
    }
}

impl Default for Camera {
    /// Canonical frame at the origin looking down -Z.
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            fov_scale: 1.0,
        }
    }
}
