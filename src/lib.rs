pub mod density;
pub mod error;
pub mod export;
pub mod math;
pub mod mesh;
pub mod mri;
pub mod noise;
pub mod voxel;

pub use density::{from_density, Density, Mandelbulb, Sphere};
pub use error::{Result, VoxelError};
pub use mesh::{iso_surface, Mesh};
pub use mri::{load_mri_slices, MriVolume};
pub use noise::FractalNoise;
pub use voxel::VoxelField;
