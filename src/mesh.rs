//! Loaded mesh geometry and the errors that can stop a mesh from loading.

use std::fmt;
use std::path::Path;

use crate::math::Vec4;
use crate::obj;

/// A triangular face. The members a, b and c are one-based indices into the vertex
/// array of the mesh that owns the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Face {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    pub const fn indices(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }
}

impl From<[u32; 3]> for Face {
    fn from([a, b, c]: [u32; 3]) -> Self {
        Self::new(a, b, c)
    }
}

/// Why a mesh description could not be turned into a [`Mesh`].
#[derive(Debug)]
pub enum LoadError {
    /// The source could not be read.
    Io(std::io::Error),
    /// A `v` or `f` line could not be parsed.
    Parse { line: usize, message: String },
    /// A face with other than three vertex references.
    NotTriangle { line: usize, count: usize },
    /// No vertices or no faces.
    Empty { vertices: usize, faces: usize },
    /// A face refers to a vertex that does not exist. `face` is zero-based.
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
}

impl LoadError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        LoadError::Parse {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "unreadable mesh source: {e}"),
            LoadError::Parse { line, message } => write!(f, "line {line}: {message}"),
            LoadError::NotTriangle { line, count } => {
                write!(f, "line {line}: face has {count} vertices, only triangles are supported")
            }
            LoadError::Empty { vertices, faces } => {
                write!(f, "no usable geometry ({vertices} vertices, {faces} faces)")
            }
            LoadError::IndexOutOfRange {
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "face {face} refers to vertex {index}, mesh has {vertex_count} vertices"
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

/// One loaded object: vertex positions plus triangular faces indexing into them.
///
/// A mesh is validated on construction (at least one vertex and one face, every
/// face index in `1..=vertex_count`) and immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    name: Option<String>,
    vertices: Vec<Vec4>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec4>, faces: Vec<Face>) -> Result<Self, LoadError> {
        if vertices.is_empty() || faces.is_empty() {
            return Err(LoadError::Empty {
                vertices: vertices.len(),
                faces: faces.len(),
            });
        }
        for (i, face) in faces.iter().enumerate() {
            for index in face.indices() {
                if index == 0 || index as usize > vertices.len() {
                    return Err(LoadError::IndexOutOfRange {
                        face: i,
                        index,
                        vertex_count: vertices.len(),
                    });
                }
            }
        }
        Ok(Self {
            name: None,
            vertices,
            faces,
        })
    }

    /// Parse a mesh from the text of a mesh description.
    pub fn parse(source: &str) -> Result<Self, LoadError> {
        obj::parse(source)
    }

    /// Read and parse a mesh description file.
    pub fn from_obj(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The first object name in the source, if it had one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn vertices(&self) -> &[Vec4] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// The vertex at a one-based index.
    pub fn vertex(&self, index: u32) -> Option<Vec4> {
        (index as usize)
            .checked_sub(1)
            .and_then(|i| self.vertices.get(i))
            .copied()
    }

    /// Every face resolved to its three vertex positions, in parse order.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec4; 3]> + '_ {
        // Indices were validated in `new`.
        self.faces.iter().map(move |face| {
            face.indices()
                .map(|index| self.vertices[index as usize - 1])
        })
    }
}
