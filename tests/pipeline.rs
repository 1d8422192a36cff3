use approx::assert_abs_diff_eq;
use std::io::Read;
use voxels::{export, from_density, iso_surface, FractalNoise, Mandelbulb, Sphere, VoxelField};

#[test]
fn mandelbulb_volume_is_symmetric_about_its_center_voxel() {
    let size = 16;
    let field = from_density(&Mandelbulb::new(3, 20).unwrap(), size, size, size).unwrap();
    assert_abs_diff_eq!(field[(8, 8, 8)], 0.3);
    // Corner voxel maps to c = (-1, -1, -1), outside the unit ball.
    assert_eq!(field[(0, 0, 0)], 0.);
}

#[test]
fn sphere_volume_resampled_and_meshed() {
    let field = from_density(&Sphere::default(), 8, 8, 8).unwrap();
    let up = field.resample(16, 16, 16).unwrap();
    assert_eq!(up.dimensions(), [16, 16, 16]);
    assert_eq!(up.resample(16, 16, 16).unwrap(), up);

    let mesh = iso_surface(&field, 0.1);
    let filled = field.as_slice().iter().filter(|&&v| v >= 0.1).count();
    assert!(filled > 0);
    assert_eq!(mesh.faces().len(), 6 * filled);
    assert_eq!(mesh.vertices().len(), 8 * filled);
}

#[test]
fn noise_volume_exports() {
    let field = FractalNoise::new(8).unwrap().seed(11).build().unwrap();
    assert_eq!(field.dimensions(), [8, 8, 8]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.raw");
    let mut file = std::fs::File::create(&path).unwrap();
    export::write_raw(&field, &mut file).unwrap();
    drop(file);

    let mut bytes = Vec::new();
    std::fs::File::open(&path)
        .unwrap()
        .read_to_end(&mut bytes)
        .unwrap();
    assert_eq!(bytes.len(), 4 * 512);
    let first = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    assert_eq!(first, field.as_slice()[0]);

    let header = export::header_json(&field);
    assert_eq!(header["width"], 8);
    assert_eq!(header["layout"], "zxy");
}

#[test]
fn cube_fixture_previews_as_one_pixel() {
    let img = export::projection_image(&VoxelField::cube()).unwrap();
    assert_eq!(img.dimensions(), (1, 1));
    assert_eq!(img.get_pixel(0, 0)[0], (0.1 * u16::MAX as f32) as u16);
}
