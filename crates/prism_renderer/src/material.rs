//! Surface response used by the local illumination shaders.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Color;

/// Material values the shaders can't work with.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MaterialError {
    #[error("shininess must be finite and positive, got {0}")]
    InvalidShininess(f32),

    #[error("material colours must be finite")]
    NonFiniteColor,
}

/// Phong-style surface material.
///
/// Colours are reflectances (per-channel multipliers applied to incoming
/// light with [`Color::modulate`]), except `emission`, which is added as-is.
/// Deserialization fills missing fields from [`Material::default`] and runs
/// [`Material::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MaterialFields")]
pub struct Material {
    /// Response to ambient lights
    pub ambient: Color,
    /// Lambertian response, further modulated by the interpolated surface colour
    pub diffuse: Color,
    /// Highlight response
    pub specular: Color,
    /// Phong exponent; larger is tighter
    pub shininess: f32,
    /// Light emitted by the surface itself
    pub emission: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::splat(0.1),
            diffuse: Color::splat(0.7),
            specular: Color::splat(0.3),
            shininess: 32.0,
            emission: Color::BLACK,
        }
    }
}

impl Material {
    /// Purely diffuse material of the given colour.
    pub fn matte(color: Color) -> Self {
        Self {
            ambient: color.scale(0.1),
            diffuse: color,
            specular: Color::BLACK,
            shininess: 1.0,
            emission: Color::BLACK,
        }
    }

    /// Diffuse colour with a white highlight.
    pub fn glossy(color: Color, shininess: f32) -> Self {
        Self {
            ambient: color.scale(0.1),
            diffuse: color,
            specular: Color::splat(0.5),
            shininess,
            emission: Color::BLACK,
        }
    }

    /// Surface that only emits light.
    pub fn emissive(color: Color) -> Self {
        Self {
            ambient: Color::BLACK,
            diffuse: Color::BLACK,
            specular: Color::BLACK,
            shininess: 1.0,
            emission: color,
        }
    }

    /// Check that shading this material yields finite colours.
    pub fn validate(&self) -> Result<(), MaterialError> {
        if !self.shininess.is_finite() || self.shininess <= 0.0 {
            return Err(MaterialError::InvalidShininess(self.shininess));
        }
        let colors = [self.ambient, self.diffuse, self.specular, self.emission];
        if !colors.iter().all(|c| c.is_finite()) {
            return Err(MaterialError::NonFiniteColor);
        }
        Ok(())
    }
}

/// Serialized form of [`Material`], before validation.
#[derive(Deserialize)]
#[serde(default)]
struct MaterialFields {
    ambient: Color,
    diffuse: Color,
    specular: Color,
    shininess: f32,
    emission: Color,
}

impl Default for MaterialFields {
    fn default() -> Self {
        let m = Material::default();
        Self {
            ambient: m.ambient,
            diffuse: m.diffuse,
            specular: m.specular,
            shininess: m.shininess,
            emission: m.emission,
        }
    }
}

impl TryFrom<MaterialFields> for Material {
    type Error = MaterialError;

    fn try_from(fields: MaterialFields) -> Result<Self, Self::Error> {
        let material = Material {
            ambient: fields.ambient,
            diffuse: fields.diffuse,
            specular: fields.specular,
            shininess: fields.shininess,
            emission: fields.emission,
        };
        material.validate()?;
        Ok(material)
    }
}
