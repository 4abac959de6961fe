//! Light sources.
//!
//! The renderer treats lights as opaque: it stores them and hands them to the
//! active [`Shader`](crate::Shader), which asks each one how it illuminates a
//! surface point.

use prism_math::{try_normalize, MathError, Vec3};

use crate::Color;

/// How a light reaches a given surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightSample {
    /// Direction-less fill light.
    Ambient { color: Color },
    /// Light arriving along a direction.
    Directed {
        color: Color,
        /// Unit vector from the surface point toward the light
        direction: Vec3,
        /// Distance to the light, infinite for directional lights
        distance: f32,
    },
}

/// Trait for light sources.
pub trait Light: Send + Sync {
    /// Illumination arriving at `point`.
    fn sample(&self, point: Vec3) -> LightSample;
}

/// Uniform ambient light.
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    color: Color,
}

impl AmbientLight {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Light for AmbientLight {
    fn sample(&self, _point: Vec3) -> LightSample {
        LightSample::Ambient { color: self.color }
    }
}

/// Light infinitely far away, arriving from a single direction.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    /// Unit vector pointing toward the light
    toward_light: Vec3,
    color: Color,
}

impl DirectionalLight {
    /// `direction` is the direction the light travels in, e.g. `-Y` for light
    /// shining straight down.
    pub fn new(direction: Vec3, color: Color) -> Result<Self, MathError> {
        Ok(Self {
            toward_light: -try_normalize(direction)?,
            color,
        })
    }
}

impl Light for DirectionalLight {
    fn sample(&self, _point: Vec3) -> LightSample {
        LightSample::Directed {
            color: self.color,
            direction: self.toward_light,
            distance: f32::INFINITY,
        }
    }
}

/// Point light with optional inverse-square falloff.
/// Closest distance the inverse-square falloff is evaluated at. Nearer points
/// get the intensity they would have at this distance.
pub const MIN_FALLOFF_DISTANCE: f32 = 1e-2;

#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    position: Vec3,
    color: Color,
    inverse_square: bool,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position,
            color,
            inverse_square: false,
        }
    }

    /// Divide the light's colour by the squared distance to the lit point.
    pub fn with_falloff(mut self) -> Self {
        self.inverse_square = true;
        self
    }
}

impl Light for PointLight {
    fn sample(&self, point: Vec3) -> LightSample {
        let offset = self.position - point;
        let distance = offset.length();

        // A point sitting on the light receives nothing directional.
        let Ok(direction) = try_normalize(offset) else {
            return LightSample::Ambient {
                color: Color::BLACK,
            };
        };

        let color = if self.inverse_square {
            let d = distance.max(MIN_FALLOFF_DISTANCE);
            self.color / (d * d)
        } else {
            self.color
        };

        LightSample::Directed {
            color,
            direction,
            distance,
        }
    }
}
