use crate::error::{Result, VoxelError};
use crate::math::{abs2, pow_wn, sub, v, V3};
use crate::voxel::VoxelField;
use rayon::prelude::*;

/// A scalar "how much stuff is here" field over the unit cube.
pub trait Density {
    /// `p` has every component in `[0, 1]`.
    fn density(&self, p: &V3) -> f32;
}

#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub radius: f32,
}

/// https://en.wikipedia.org/wiki/Mandelbulb
#[derive(Clone, Copy, Debug)]
pub struct Mandelbulb {
    order: u32,
    max_iter: u32,
}

impl Sphere {
    pub fn new(radius: f32) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.) {
            return Err(VoxelError::Configuration(format!(
                "sphere radius must be positive, got {}",
                radius
            )));
        }
        Ok(Sphere { radius })
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Sphere { radius: 0.5 }
    }
}

// Off-center on y, giving a lopsided shape.
const SPHERE_CENTER: V3 = V3 {
    x: 0.5,
    y: 0.2,
    z: 0.5,
};

impl Density for Sphere {
    fn density(&self, p: &V3) -> f32 {
        if abs2(&sub(p, &SPHERE_CENTER)) < self.radius * self.radius {
            0.1
        } else {
            0.
        }
    }
}

pub const DEFAULT_MAX_ITER: u32 = 20;

impl Mandelbulb {
    pub fn new(order: u32, max_iter: u32) -> Result<Self> {
        if order == 0 {
            return Err(VoxelError::Configuration(
                "mandelbulb order must be at least 1".to_string(),
            ));
        }
        if max_iter == 0 {
            return Err(VoxelError::Configuration(
                "mandelbulb iteration cap must be at least 1".to_string(),
            ));
        }
        Ok(Mandelbulb { order, max_iter })
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    /// Number of iterations before the orbit of `c` leaves the unit ball,
    /// capped at `max_iter`.
    pub fn escape_time(&self, c: &V3) -> u32 {
        let mut coords = *c;
        let mut i = 0;
        while i < self.max_iter {
            if abs2(&coords) > 1. {
                break;
            }
            coords = pow_wn(&coords, self.order) + *c;
            i += 1;
        }
        i
    }
}

impl Default for Mandelbulb {
    fn default() -> Self {
        Mandelbulb {
            order: 4,
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

impl Density for Mandelbulb {
    fn density(&self, p: &V3) -> f32 {
        let c = 2. * (*p - v(0.5, 0.5, 0.5));
        (0.3 * self.escape_time(&c) as f32) / self.max_iter as f32
    }
}

/// Samples `density` at `(x / width, y / height, z / depth)` for every voxel.
pub fn from_density(
    density: &(impl Density + Sync),
    width: usize,
    height: usize,
    depth: usize,
) -> Result<VoxelField> {
    let mut field = VoxelField::new(width, height, depth)?;
    field
        .as_mut_slice()
        .par_chunks_mut(depth)
        .enumerate()
        .map(|(i, column)| (i % width, i / width, column))
        .for_each(|(x, y, column)| {
            for (z, p) in column.iter_mut().enumerate() {
                *p = density.density(&v(
                    x as f32 / width as f32,
                    y as f32 / height as f32,
                    z as f32 / depth as f32,
                ));
            }
        });
    Ok(field)
}
