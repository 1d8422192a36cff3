//! Dense 3D scalar grids.
//!
//! A [`VoxelField`] owns its samples exclusively. Operations that change the
//! resolution ([`VoxelField::resample`]) hand back a fresh field instead of
//! touching the source.

use crate::error::{Result, VoxelError};
use rayon::prelude::*;
use std::ops::{Index, IndexMut};

/// A `width` x `height` x `depth` grid of `f32` densities stored with `z`
/// varying fastest, then `x`, then `y`.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelField {
    width: usize,
    height: usize,
    depth: usize,
    /// Display-only scale hints for whoever renders the field.
    pub x_ratio: f32,
    pub y_ratio: f32,
    pub z_ratio: f32,
    voxels: Vec<f32>,
}

fn check_dimensions(w: usize, h: usize, d: usize) -> Result<()> {
    if w == 0 || h == 0 || d == 0 {
        return Err(VoxelError::Configuration(format!(
            "grid dimensions must be positive, got {}x{}x{}",
            w, h, d
        )));
    }
    if w.checked_mul(h).and_then(|wh| wh.checked_mul(d)).is_none() {
        return Err(VoxelError::Configuration(format!(
            "a {}x{}x{} grid does not fit in memory",
            w, h, d
        )));
    }
    Ok(())
}

impl VoxelField {
    /// Creates a zero-filled field.
    pub fn new(width: usize, height: usize, depth: usize) -> Result<Self> {
        check_dimensions(width, height, depth)?;
        Ok(VoxelField {
            width,
            height,
            depth,
            x_ratio: 1.,
            y_ratio: 1.,
            z_ratio: 1.,
            voxels: vec![0.; width * height * depth],
        })
    }

    /// Wraps existing samples, which must already be in storage order.
    pub fn from_vec(width: usize, height: usize, depth: usize, voxels: Vec<f32>) -> Result<Self> {
        check_dimensions(width, height, depth)?;
        if voxels.len() != width * height * depth {
            return Err(VoxelError::Configuration(format!(
                "a {}x{}x{} field needs {} voxels, got {}",
                width,
                height,
                depth,
                width * height * depth,
                voxels.len()
            )));
        }
        Ok(VoxelField {
            width,
            height,
            depth,
            x_ratio: 1.,
            y_ratio: 1.,
            z_ratio: 1.,
            voxels,
        })
    }

    /// The single-voxel constant field used as a placeholder volume.
    pub fn cube() -> Self {
        VoxelField {
            width: 1,
            height: 1,
            depth: 1,
            x_ratio: 1.,
            y_ratio: 1.,
            z_ratio: 1.,
            voxels: vec![0.1],
        }
    }

    /// Reallocates the storage to `w * h * d` zeros. Previous contents are
    /// dropped.
    pub fn resize(&mut self, w: usize, h: usize, d: usize) -> Result<()> {
        check_dimensions(w, h, d)?;
        self.width = w;
        self.height = h;
        self.depth = d;
        self.voxels = vec![0.; w * h * d];
        Ok(())
    }

    pub fn resize_cube(&mut self, size: usize) -> Result<()> {
        self.resize(size, size, size)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn dimensions(&self) -> [usize; 3] {
        [self.width, self.height, self.depth]
    }

    pub fn ratios(&self) -> [f32; 3] {
        [self.x_ratio, self.y_ratio, self.z_ratio]
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Raw samples in storage order, ready for a 3D texture upload.
    pub fn as_slice(&self) -> &[f32] {
        &self.voxels
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.voxels
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.voxels
    }

    /// Same as the classic `depth * (height * y + x) + z` whenever
    /// `width == height`.
    #[inline]
    fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        self.depth * (self.width * y + x) + z
    }

    fn checked_idx(&self, x: usize, y: usize, z: usize) -> Result<usize> {
        if x >= self.width || y >= self.height || z >= self.depth {
            return Err(VoxelError::IndexOutOfRange {
                x,
                y,
                z,
                width: self.width,
                height: self.height,
                depth: self.depth,
            });
        }
        Ok(self.idx(x, y, z))
    }

    pub fn at(&self, x: usize, y: usize, z: usize) -> Result<f32> {
        let i = self.checked_idx(x, y, z)?;
        Ok(self.voxels[i])
    }

    pub fn at_mut(&mut self, x: usize, y: usize, z: usize) -> Result<&mut f32> {
        let i = self.checked_idx(x, y, z)?;
        Ok(&mut self.voxels[i])
    }

    /// Smallest and largest sample.
    pub fn min_max(&self) -> (f32, f32) {
        self.voxels
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Rescales every sample into `[0, 1]` using the global extrema. A flat
    /// field maps to all zeros.
    pub fn normalize(&mut self) {
        let (min, max) = self.min_max();
        let range = if min != max { max - min } else { 1. };
        self.voxels.iter_mut().for_each(|v| *v = (*v - min) / range);
    }

    /// Trilinear resampling into a new `w` x `h` x `d` field.
    ///
    /// The upper interpolation corner is clamped to the last sample on each
    /// axis, so the far edge never reads outside the source.
    pub fn resample(&self, w: usize, h: usize, d: usize) -> Result<VoxelField> {
        let mut dst = VoxelField::new(w, h, d)?;
        dst.x_ratio = self.x_ratio;
        dst.y_ratio = self.y_ratio;
        dst.z_ratio = self.z_ratio;
        dst.voxels
            .par_chunks_mut(d)
            .enumerate()
            .map(|(i, column)| (i % w, i / w, column))
            .for_each(|(x, y, column)| {
                let x_o = (x * self.width) as f32 / w as f32;
                let y_o = (y * self.height) as f32 / h as f32;
                let x_f = x_o as usize;
                let y_f = y_o as usize;
                let x_c = usize::min(x_f + 1, self.width - 1);
                let y_c = usize::min(y_f + 1, self.height - 1);
                let x_i = x_o - x_f as f32;
                let y_i = y_o - y_f as f32;
                for (z, p) in column.iter_mut().enumerate() {
                    let z_o = (z * self.depth) as f32 / d as f32;
                    let z_f = z_o as usize;
                    let z_c = usize::min(z_f + 1, self.depth - 1);
                    let z_i = z_o - z_f as f32;
                    let s = |x, y, z| self.voxels[self.idx(x, y, z)];
                    *p = x_i
                        * (y_i * (z_i * s(x_c, y_c, z_c) + (1. - z_i) * s(x_c, y_c, z_f))
                            + (1. - y_i) * (z_i * s(x_c, y_f, z_c) + (1. - z_i) * s(x_c, y_f, z_f)))
                        + (1. - x_i)
                            * (y_i * (z_i * s(x_f, y_c, z_c) + (1. - z_i) * s(x_f, y_c, z_f))
                                + (1. - y_i)
                                    * (z_i * s(x_f, y_f, z_c) + (1. - z_i) * s(x_f, y_f, z_f)));
                }
            });
        Ok(dst)
    }
}

impl Index<(usize, usize, usize)> for VoxelField {
    type Output = f32;

    fn index(&self, (x, y, z): (usize, usize, usize)) -> &f32 {
        match self.checked_idx(x, y, z) {
            Ok(i) => &self.voxels[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl IndexMut<(usize, usize, usize)> for VoxelField {
    fn index_mut(&mut self, (x, y, z): (usize, usize, usize)) -> &mut f32 {
        match self.checked_idx(x, y, z) {
            Ok(i) => &mut self.voxels[i],
            Err(e) => panic!("{}", e),
        }
    }
}
