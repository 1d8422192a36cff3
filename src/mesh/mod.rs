//! Quad meshes and the blocky voxel preview.

pub mod obj;

use crate::math::{scale, v, V3};
use crate::voxel::VoxelField;
use obj::ObjLine;
use std::io::{self, Write};
use std::ops;

/// Vertex positions plus quad faces indexing into them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<V3>,
    faces: Vec<[usize; 4]>,
}

// Corner i has x set by bit 0, y by bit 1 and z by bit 2.
const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 2, 3, 1],
    [4, 5, 7, 6],
    [0, 4, 6, 2],
    [1, 3, 7, 5],
    [0, 1, 5, 4],
    [2, 6, 7, 3],
];

impl Mesh {
    pub fn new(vertices: Vec<V3>, faces: Vec<[usize; 4]>) -> Self {
        Mesh { vertices, faces }
    }

    /// Axis-aligned cube spanning `[-1, 1]` on every axis, faces wound
    /// counter-clockwise seen from outside.
    pub fn cube() -> Self {
        let side = |bit: usize, i: usize| if i & bit != 0 { 1. } else { -1. };
        Mesh {
            vertices: (0..8).map(|i| v(side(1, i), side(2, i), side(4, i))).collect(),
            faces: CUBE_FACES.to_vec(),
        }
    }

    pub fn vertices(&self) -> &[V3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 4]] {
        &self.faces
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn translate(&mut self, offset: V3) {
        self.vertices.iter_mut().for_each(|p| *p += offset);
    }

    pub fn scale(&mut self, factors: V3) {
        self.vertices.iter_mut().for_each(|p| *p = scale(p, &factors));
    }

    /// Appends `other`, shifting its face indices past our vertices.
    pub fn append(&mut self, other: &Mesh) {
        let base = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(other.faces.iter().map(|f| f.map(|i| i + base)));
    }

    /// Each quad `a b c d` split into triangles `a b c` and `a c d`.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        self.faces
            .iter()
            .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]])
            .collect()
    }

    pub fn obj_lines(&self, name: &str) -> Vec<ObjLine> {
        let mut lines = vec![
            ObjLine::Comment(format!(
                "{} vertices, {} faces",
                self.vertices.len(),
                self.faces.len()
            )),
            ObjLine::Name(name.to_string()),
        ];
        lines.extend(self.vertices.iter().map(|p| ObjLine::Vertex(p.x, p.y, p.z)));
        lines.extend(self.faces.iter().map(|f| ObjLine::Face(f.to_vec())));
        lines
    }

    pub fn write_obj<W: Write>(&self, name: &str, out: &mut W) -> io::Result<()> {
        for line in self.obj_lines(name) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

impl ops::AddAssign<&Mesh> for Mesh {
    fn add_assign(&mut self, rhs: &Mesh) {
        self.append(rhs);
    }
}

/// One cube per voxel whose value is at least `threshold`.
///
/// This is a blocky preview, not a smooth surface: every selected voxel turns
/// into a full cube sized to its cell, and the cells tile `[-0.5, 0.5]` on
/// every axis.
pub fn iso_surface(field: &VoxelField, threshold: f32) -> Mesh {
    let [w, h, d] = field.dimensions();
    let cell = v(0.5 / w as f32, 0.5 / h as f32, 0.5 / d as f32);
    let mut mesh = Mesh::default();
    for z in 0..d {
        for y in 0..h {
            for x in 0..w {
                if field[(x, y, z)] >= threshold {
                    let mut cube = Mesh::cube();
                    cube.translate(v(
                        (2 * x + 1) as f32,
                        (2 * y + 1) as f32,
                        (2 * z + 1) as f32,
                    ));
                    cube.scale(cell);
                    cube.translate(v(-0.5, -0.5, -0.5));
                    mesh += &cube;
                }
            }
        }
    }
    log::debug!(
        "iso surface at {} kept {} of {} voxels",
        threshold,
        mesh.faces.len() / 6,
        field.len()
    );
    mesh
}
