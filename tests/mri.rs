use std::fs;
use std::path::Path;
use voxels::{load_mri_slices, MriVolume, VoxelError};

fn write_slice(dir: &Path, index: u32, samples: &[u16]) {
    let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_be_bytes()).collect();
    fs::write(dir.join(format!("brain.{}", index)), bytes).unwrap();
}

fn base(dir: &Path) -> String {
    format!("{}/brain.", dir.display())
}

#[test]
fn stacks_slices_depth_wise() {
    let dir = tempfile::tempdir().unwrap();
    for i in 1..=3 {
        let samples: Vec<u16> = (0..16).map(|s| s * 100 + i as u16).collect();
        write_slice(dir.path(), i, &samples);
    }
    let field = load_mri_slices(&base(dir.path()), 1, 3).unwrap();
    assert_eq!(field.width(), 4);
    assert_eq!(field.height(), 4);
    assert_eq!(field.depth(), 3);
    assert_eq!(field.len(), 48);
}

#[test]
fn samples_are_big_endian_and_normalized() {
    let dir = tempfile::tempdir().unwrap();
    // 0x0100 read big-endian is 256; read little-endian it would be 1.
    write_slice(dir.path(), 7, &[0, 0x0100, 0, 0]);
    write_slice(dir.path(), 8, &[0, 0, 0, 0x0200]);
    let field = load_mri_slices(&base(dir.path()), 7, 8).unwrap();
    assert_eq!(field.dimensions(), [2, 2, 2]);
    // Row 0, column 1 of the first slice.
    assert_eq!(field.at(1, 0, 0).unwrap(), 0.5);
    // Row 1, column 1 of the second slice holds the maximum.
    assert_eq!(field.at(1, 1, 1).unwrap(), 1.);
    assert_eq!(field.min_max(), (0., 1.));
}

#[test]
fn constant_volume_does_not_divide_by_zero() {
    let dir = tempfile::tempdir().unwrap();
    write_slice(dir.path(), 1, &[500; 4]);
    let field = load_mri_slices(&base(dir.path()), 1, 1).unwrap();
    assert!(field.as_slice().iter().all(|&v| v == 0.));
}

#[test]
fn mismatched_slice_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    for i in 1..=3 {
        write_slice(dir.path(), i, &[1; 16]);
    }
    write_slice(dir.path(), 4, &[1; 9]);
    assert!(load_mri_slices(&base(dir.path()), 1, 3).is_ok());
    match load_mri_slices(&base(dir.path()), 1, 4) {
        Err(VoxelError::DimensionMismatch {
            expected, found, ..
        }) => {
            assert_eq!(expected, 4);
            assert_eq!(found, 3);
        }
        other => panic!("expected a dimension mismatch, got {:?}", other),
    }
}

#[test]
fn later_slice_with_extra_bytes_is_a_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    for i in 1..=3 {
        write_slice(dir.path(), i, &[1; 16]);
    }
    // 34 bytes still rounds down to a width of 4.
    fs::write(dir.path().join("brain.4"), [0u8; 34]).unwrap();
    match load_mri_slices(&base(dir.path()), 1, 4) {
        Err(VoxelError::DimensionMismatch {
            expected, found, ..
        }) => {
            assert_eq!(expected, 4);
            assert_eq!(found, 4);
        }
        other => panic!("expected a dimension mismatch, got {:?}", other),
    }
}

#[test]
fn missing_slice_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_slice(dir.path(), 1, &[1; 4]);
    let err = load_mri_slices(&base(dir.path()), 1, 2).unwrap_err();
    match err {
        VoxelError::FileNotFound { path } => assert!(path.ends_with("brain.2")),
        other => panic!("expected a missing file, got {:?}", other),
    }
}

#[test]
fn truncated_slice_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("brain.1"), [0u8; 33]).unwrap();
    assert!(matches!(
        load_mri_slices(&base(dir.path()), 1, 1),
        Err(VoxelError::MalformedSlice { len: 33, .. })
    ));
}

#[test]
fn display_ratios_are_carried() {
    let dir = tempfile::tempdir().unwrap();
    write_slice(dir.path(), 1, &[1, 2, 3, 4]);
    let field = MriVolume::new(&base(dir.path()), 1, 1)
        .ratios(0.7, 1., -1.)
        .load()
        .unwrap();
    assert_eq!(field.ratios(), [0.7, 1., -1.]);
}
