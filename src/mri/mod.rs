//! Volumes stacked from raw MRI slices.
//!
//! Each slice is its own file named `<base><index>` and holds a square image
//! of big-endian unsigned 16-bit samples, row after row, with no header. The
//! side length is inferred from the file size.

use crate::error::{Result, VoxelError};
use crate::voxel::VoxelField;
use byteorder::{BigEndian, ByteOrder};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct MriVolume {
    base: String,
    start: u32,
    end: u32,
    ratios: [f32; 3],
}

impl MriVolume {
    /// Slices `start..=end` of the set whose files are named `<base><index>`.
    pub fn new(base: &str, start: u32, end: u32) -> Self {
        MriVolume {
            base: base.to_string(),
            start,
            end,
            ratios: [1., 1., 1.],
        }
    }

    /// Display scale hints copied onto the loaded field.
    pub fn ratios(mut self, x: f32, y: f32, z: f32) -> Self {
        self.ratios = [x, y, z];
        self
    }

    pub fn slice_path(&self, index: u32) -> PathBuf {
        PathBuf::from(format!("{}{}", self.base, index))
    }

    /// Reads every slice and normalizes the whole volume into `[0, 1]`.
    pub fn load(&self) -> Result<VoxelField> {
        if self.end < self.start {
            return Err(VoxelError::Configuration(format!(
                "slice range {}..={} is empty",
                self.start, self.end
            )));
        }
        let depth = (self.end - self.start) as usize + 1;

        let first_path = self.slice_path(self.start);
        let first = read_slice(&first_path)?;
        let width = slice_width(&first_path, first.len())?;

        let mut field = VoxelField::new(width, width, depth)?;
        let mut samples = vec![0u16; width * width];
        let mut pending = Some(first);
        for (z, index) in (self.start..=self.end).enumerate() {
            let path = self.slice_path(index);
            let bytes = if let Some(bytes) = pending.take() {
                bytes
            } else {
                let bytes = read_slice(&path)?;
                // Later slices must match the first one byte for byte.
                if bytes.len() != 2 * width * width {
                    return Err(VoxelError::DimensionMismatch {
                        path,
                        expected: width,
                        found: inferred_width(bytes.len()),
                    });
                }
                bytes
            };
            BigEndian::read_u16_into(&bytes, &mut samples);
            for y in 0..width {
                for x in 0..width {
                    field[(x, y, z)] = f32::from(samples[width * y + x]);
                }
            }
            log::debug!("read slice {} ({}x{})", path.display(), width, width);
        }

        field.normalize();
        field.x_ratio = self.ratios[0];
        field.y_ratio = self.ratios[1];
        field.z_ratio = self.ratios[2];
        log::info!(
            "loaded {}x{}x{} MRI volume from {}",
            width,
            width,
            depth,
            self.base
        );
        Ok(field)
    }
}

/// Loads slices `start..=end` of `base` with default display ratios.
pub fn load_mri_slices(base: &str, start: u32, end: u32) -> Result<VoxelField> {
    MriVolume::new(base, start, end).load()
}

fn read_slice(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => VoxelError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => VoxelError::Io(e),
    })
}

fn inferred_width(len: usize) -> usize {
    ((len / 2) as f64).sqrt() as usize
}

/// Side length of a slice, which must be exactly `2 * w * w` bytes.
fn slice_width(path: &Path, len: usize) -> Result<usize> {
    let w = inferred_width(len);
    if w == 0 || len != 2 * w * w {
        return Err(VoxelError::MalformedSlice {
            path: path.to_path_buf(),
            len,
        });
    }
    Ok(w)
}
