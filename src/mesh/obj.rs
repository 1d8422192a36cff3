use std::fmt;

/// The subset of Wavefront OBJ statements a voxel mesh needs.
#[derive(Debug, Clone)]
pub enum ObjLine {
    Comment(String),
    Name(String),
    Vertex(f32, f32, f32),
    /// Zero-based vertex indices; written one-based.
    Face(Vec<usize>),
}

impl fmt::Display for ObjLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ObjLine::Comment(c) => write!(f, "# {}", c),
            ObjLine::Name(n) => write!(f, "o {}", n),
            ObjLine::Vertex(x, y, z) => write!(f, "v {} {} {}", x, y, z),
            ObjLine::Face(indices) => {
                write!(f, "f")?;
                for i in indices {
                    write!(f, " {}", i + 1)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_are_one_based() {
        assert_eq!(ObjLine::Face(vec![0, 1, 2, 3]).to_string(), "f 1 2 3 4");
    }

    #[test]
    fn vertices_and_comments() {
        assert_eq!(ObjLine::Vertex(0.5, -1., 0.).to_string(), "v 0.5 -1 0");
        assert_eq!(ObjLine::Comment("hi".to_string()).to_string(), "# hi");
        assert_eq!(ObjLine::Name("iso".to_string()).to_string(), "o iso");
    }
}
