//! Prism - a minimal Whitted-style ray tracer core.
//!
//! Colour algebra, a look-at camera frame and a render facade that traces one
//! primary ray per anti-aliasing sample and shades hits with local
//! illumination. Pixels go to any [`Display`] the caller provides.

mod aa;
mod attributes;
mod bucket;
mod camera;
mod color;
mod display;
mod hittable;
mod light;
mod material;
mod renderer;
mod shade;
mod sphere;
mod triangle;

pub use aa::{AaError, AaSample, AaSetting};
pub use attributes::Attributes;
pub use bucket::{generate_buckets, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraError};
pub use color::Color;
pub use display::{linear_to_gamma, Display, FrameBuffer};
pub use hittable::{Hittable, HittableList, Intersection, SurfaceAttributes};
pub use light::{AmbientLight, DirectionalLight, Light, LightSample, PointLight, MIN_FALLOFF_DISTANCE};
pub use material::{Material, MaterialError};
pub use renderer::{ConfigError, RenderConfig, RenderError, RenderStats, Renderer};
pub use shade::{FlatShader, NormalShader, PhongShader, ShadeContext, Shader};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{Interval, MathError, Ray, Vec3};
