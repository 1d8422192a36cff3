//! Band-limited pseudo-noise built by repeated upsampling.
//!
//! There is no gradient lattice: each step doubles the resolution with
//! trilinear resampling, which smooths what is already there, and then adds
//! fresh uniform noise whose amplitude shrinks with the resolution.

use crate::error::{Result, VoxelError};
use crate::voxel::VoxelField;
use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use std::time::Instant;

#[derive(Clone, Debug)]
pub struct FractalNoise {
    target_width: usize,
    roughness: f32,
    normalize: bool,
    seed: Option<u64>,
}

impl FractalNoise {
    pub const DEFAULT_ROUGHNESS: f32 = 0.3;

    /// The built field is cubic, with a side of the smallest power of two
    /// that is at least `target_width`.
    pub fn new(target_width: usize) -> Result<Self> {
        if target_width == 0 {
            return Err(VoxelError::Configuration(
                "noise target width must be positive".to_string(),
            ));
        }
        Ok(FractalNoise {
            target_width,
            roughness: Self::DEFAULT_ROUGHNESS,
            normalize: false,
            seed: None,
        })
    }

    /// Exponent of the per-step amplitude, `width^(-roughness)`.
    pub fn roughness(mut self, roughness: f32) -> Result<Self> {
        if !roughness.is_finite() {
            return Err(VoxelError::Configuration(format!(
                "noise roughness must be finite, got {}",
                roughness
            )));
        }
        self.roughness = roughness;
        Ok(self)
    }

    /// Rescale the result into `[0, 1]` once built. Off by default.
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(&self) -> Result<VoxelField> {
        match self.seed {
            Some(seed) => self.build_with_rng(&mut StdRng::seed_from_u64(seed)),
            None => self.build_with_rng(&mut thread_rng()),
        }
    }

    pub fn build_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<VoxelField> {
        let start = Instant::now();
        let mut field = VoxelField::new(1, 1, 1)?;
        while field.width() < self.target_width {
            let old = field.width();
            let new = old * 2;
            field = field.resample(new, new, new)?;
            let scale = (old as f32).powf(-self.roughness);
            log::debug!("noise step {} -> {}, amplitude {}", old, new, scale);
            add_noise(&mut field, scale, rng);
        }
        if self.normalize {
            field.normalize();
        }
        log::info!(
            "built {0}x{0}x{0} noise in {1} s",
            field.width(),
            start.elapsed().as_secs_f32()
        );
        Ok(field)
    }
}

/// Adds independent noise, uniform in `[-scale, scale]`, to every voxel.
pub fn add_noise<R: Rng + ?Sized>(field: &mut VoxelField, scale: f32, rng: &mut R) {
    let unit = Uniform::new(0f32, 1.);
    for v in field.as_mut_slice() {
        *v += scale * (1. - 2. * unit.sample(rng));
    }
}
