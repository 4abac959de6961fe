//! Anti-aliasing sample patterns.
//!
//! An [`AaSetting`] is an ordered list of sub-pixel offsets with weights. The
//! renderer shoots one primary ray per sample and writes the weighted sum.
//! Weights are normalized to sum to one when the setting is built.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when building an AA setting.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum AaError {
    #[error("an AA setting needs at least one sample")]
    Empty,

    #[error("sample weight must be finite and positive, got {0}")]
    InvalidWeight(f32),

    #[error("sample offset ({0}, {1}) must be finite and within one pixel")]
    InvalidOffset(f32, f32),
}

/// One sub-pixel sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AaSample {
    /// Horizontal offset from the pixel centre, in pixels (+x is right)
    pub dx: f32,
    /// Vertical offset from the pixel centre, in pixels (+y is down)
    pub dy: f32,
    pub weight: f32,
}

impl AaSample {
    pub const fn new(dx: f32, dy: f32, weight: f32) -> Self {
        Self { dx, dy, weight }
    }
}

/// The classic six-sample weighted filter.
const SIX_TAP: [AaSample; 6] = [
    AaSample::new(-0.52, 0.38, 0.128),
    AaSample::new(0.41, 0.56, 0.119),
    AaSample::new(0.27, 0.08, 0.294),
    AaSample::new(-0.17, -0.29, 0.249),
    AaSample::new(0.58, -0.55, 0.104),
    AaSample::new(-0.31, -0.71, 0.106),
];

/// Anti-aliasing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AaSample>", into = "Vec<AaSample>")]
pub struct AaSetting {
    samples: Vec<AaSample>,
}

impl AaSetting {
    /// Validate `samples` and normalize their weights.
    pub fn new(samples: Vec<AaSample>) -> Result<Self, AaError> {
        if samples.is_empty() {
            return Err(AaError::Empty);
        }

        for s in &samples {
            if !s.weight.is_finite() || s.weight <= 0.0 {
                return Err(AaError::InvalidWeight(s.weight));
            }
            let in_range = |o: f32| o.is_finite() && o.abs() <= 1.0;
            if !in_range(s.dx) || !in_range(s.dy) {
                return Err(AaError::InvalidOffset(s.dx, s.dy));
            }
        }

        let total: f32 = samples.iter().map(|s| s.weight).sum();
        let samples = samples
            .into_iter()
            .map(|s| AaSample::new(s.dx, s.dy, s.weight / total))
            .collect();

        Ok(Self { samples })
    }

    /// One ray through the pixel centre.
    pub fn single() -> Self {
        Self {
            samples: vec![AaSample::new(0.0, 0.0, 1.0)],
        }
    }

    /// `n x n` regular grid of equally weighted samples.
    pub fn grid(n: u32) -> Result<Self, AaError> {
        Self::new(grid_cells(n).map(|(x, y)| AaSample::new(x, y, 1.0)).collect())
    }

    /// `n x n` stratified samples, each jittered inside its grid cell.
    pub fn jittered(n: u32, rng: &mut impl Rng) -> Result<Self, AaError> {
        let cell = 1.0 / n.max(1) as f32;
        Self::new(
            grid_cells(n)
                .map(|(x, y)| {
                    let jx = rng.gen_range(-0.5..0.5) * cell;
                    let jy = rng.gen_range(-0.5..0.5) * cell;
                    AaSample::new(x + jx, y + jy, 1.0)
                })
                .collect(),
        )
    }

    /// Six weighted samples spread over a slightly wider than one pixel area.
    pub fn six_tap() -> Self {
        Self {
            samples: SIX_TAP.to_vec(),
        }
    }

    pub fn samples(&self) -> &[AaSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: an empty setting cannot be built.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for AaSetting {
    fn default() -> Self {
        Self::single()
    }
}

impl TryFrom<Vec<AaSample>> for AaSetting {
    type Error = AaError;

    fn try_from(samples: Vec<AaSample>) -> Result<Self, AaError> {
        Self::new(samples)
    }
}

impl From<AaSetting> for Vec<AaSample> {
    fn from(setting: AaSetting) -> Self {
        setting.samples
    }
}

/// Centres of an `n x n` grid over the pixel, as offsets from the pixel centre.
fn grid_cells(n: u32) -> impl Iterator<Item = (f32, f32)> {
    let step = 1.0 / n.max(1) as f32;
    (0..n).flat_map(move |j| {
        (0..n).map(move |i| ((i as f32 + 0.5) * step - 0.5, (j as f32 + 0.5) * step - 0.5))
    })
}
