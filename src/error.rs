use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoxelError {
    #[error("can't open slice {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("slice {} is {found} voxels wide, expected {expected}", path.display())]
    DimensionMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
    #[error("slice {} has {len} bytes, which is not a square of 16-bit samples", path.display())]
    MalformedSlice { path: PathBuf, len: usize },
    #[error("voxel ({x}, {y}, {z}) is outside a {width}x{height}x{depth} field")]
    IndexOutOfRange {
        x: usize,
        y: usize,
        z: usize,
        width: usize,
        height: usize,
        depth: usize,
    },
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VoxelError>;
