//! Getting a field out of the process: raw dumps for a 3D texture loader, a
//! small JSON header describing them, and a flat preview image.

use crate::error::{Result, VoxelError};
use crate::voxel::VoxelField;
use byteorder::{LittleEndian, WriteBytesExt};
use image::{ImageBuffer, Luma};
use std::io::{self, Write};

/// Voxels as little-endian `f32` in storage order (`z` fastest, then `x`,
/// then `y`).
pub fn write_raw<W: Write>(field: &VoxelField, out: &mut W) -> io::Result<()> {
    for &value in field.as_slice() {
        out.write_f32::<LittleEndian>(value)?;
    }
    Ok(())
}

pub fn header_json(field: &VoxelField) -> serde_json::Value {
    let (min, max) = field.min_max();
    serde_json::json!({
        "width": field.width(),
        "height": field.height(),
        "depth": field.depth(),
        "ratios": field.ratios(),
        "min": min,
        "max": max,
        "format": "f32le",
        "layout": "zxy",
    })
}

/// Maximum-intensity projection along `z`, with values clamped to `[0, 1]`.
///
/// Fails when the field is wider or taller than an image can be.
pub fn projection_image(field: &VoxelField) -> Result<ImageBuffer<Luma<u16>, Vec<u16>>> {
    let [w, h, d] = field.dimensions();
    let (img_w, img_h) = image_size(w, h)?;
    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(img_w, img_h);
    for (x, y, p) in img.enumerate_pixels_mut() {
        let peak = (0..d)
            .map(|z| field[(x as usize, y as usize, z)])
            .fold(f32::NEG_INFINITY, f32::max);
        *p = Luma([(peak.clamp(0., 1.) * u16::MAX as f32) as u16]);
    }
    Ok(img)
}

fn image_size(w: usize, h: usize) -> Result<(u32, u32)> {
    match (u32::try_from(w), u32::try_from(h)) {
        (Ok(img_w), Ok(img_h)) => Ok((img_w, img_h)),
        _ => Err(VoxelError::Configuration(format!(
            "a {}x{} projection is too large for an image",
            w, h
        ))),
    }
}
