//! Parser for the line-oriented mesh description format.
//!
//! Recognized lines (first whitespace-separated token):
//!
//! | Line               | Meaning                                           |
//! |--------------------|---------------------------------------------------|
//! | `v x y z [w]`      | vertex; `w` defaults to 1.0                       |
//! | `f r r r`          | triangular face, each `r` one of the forms below  |
//! | `o name`           | object name (logged; all faces share one mesh)    |
//! | anything else      | ignored                                           |
//!
//! Face references come in four forms, told apart by their slashes:
//!
//! ```text
//! f 1 2 3                 0 slashes    vertex
//! f 3/1 4/2 5/3           3 slashes    vertex/texture
//! f 7//1 8//2 9//3        6 slashes    vertex//normal
//! f 6/4/1 3/5/3 7/6/5     6 slashes    vertex/texture/normal
//! ```
//!
//! Only the vertex index is kept. Texture and normal indices must still parse.

use crate::math::Vec4;
use crate::mesh::{Face, LoadError, Mesh};

/// The shape of every reference on one `f` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceFormat {
    /// `i`
    Vertex,
    /// `i/t`
    VertexTexture,
    /// `i//n`
    VertexNormal,
    /// `i/t/n`
    VertexTextureNormal,
}

impl FaceFormat {
    /// Classify a face line from its references, counting separators once.
    ///
    /// Returns `None` when the slashes cannot be split evenly over the references.
    pub fn classify(references: &[&str]) -> Option<Self> {
        if references.is_empty() {
            return None;
        }
        let slashes: usize = references.iter().map(|r| r.matches('/').count()).sum();
        if slashes % references.len() != 0 {
            return None;
        }
        match slashes / references.len() {
            0 => Some(FaceFormat::Vertex),
            1 => Some(FaceFormat::VertexTexture),
            2 if references[0].contains("//") => Some(FaceFormat::VertexNormal),
            2 => Some(FaceFormat::VertexTextureNormal),
            _ => None,
        }
    }

    /// Number of `/`-separated fields in one reference, empty ones included.
    fn fields(self) -> usize {
        match self {
            FaceFormat::Vertex => 1,
            FaceFormat::VertexTexture => 2,
            FaceFormat::VertexNormal | FaceFormat::VertexTextureNormal => 3,
        }
    }

    /// Whether field `i` must be present (as opposed to must be empty).
    fn requires(self, i: usize) -> bool {
        !(self == FaceFormat::VertexNormal && i == 1)
    }

    /// Read the vertex index out of one reference.
    pub fn vertex_index(self, reference: &str) -> Result<u32, String> {
        let fields: Vec<&str> = reference.split('/').collect();
        if fields.len() != self.fields() {
            return Err(format!("face reference '{reference}' does not match {self:?}"));
        }
        let mut indices = [0u32; 3];
        for (i, field) in fields.iter().enumerate() {
            match (self.requires(i), field.is_empty()) {
                (true, false) => {
                    indices[i] = field
                        .parse()
                        .map_err(|_| format!("invalid index '{field}' in '{reference}'"))?;
                }
                (false, true) => {}
                (true, true) => return Err(format!("missing index in '{reference}'")),
                (false, false) => {
                    return Err(format!("unexpected texture index in '{reference}'"))
                }
            }
        }
        Ok(indices[0])
    }
}

fn parse_vertex<'a>(
    fields: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Vec4, LoadError> {
    let mut components: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    let mut count = 0;
    for field in fields {
        if count == 4 {
            return Err(LoadError::parse(line, "vertex has more than 4 components"));
        }
        components[count] = field
            .parse()
            .map_err(|_| LoadError::parse(line, format!("invalid number '{field}'")))?;
        count += 1;
    }
    if count < 3 {
        return Err(LoadError::parse(
            line,
            format!("vertex has {count} components, expected 3 or 4"),
        ));
    }
    Ok(Vec4::from(components))
}

fn parse_face<'a>(
    fields: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Face, LoadError> {
    let references: Vec<&str> = fields.collect();
    if references.len() != 3 {
        return Err(LoadError::NotTriangle {
            line,
            count: references.len(),
        });
    }
    let format = FaceFormat::classify(&references)
        .ok_or_else(|| LoadError::parse(line, "face references have mixed formats"))?;

    let mut indices = [0u32; 3];
    for (slot, reference) in indices.iter_mut().zip(&references) {
        *slot = format
            .vertex_index(reference)
            .map_err(|message| LoadError::parse(line, message))?;
    }
    Ok(Face::from(indices))
}

/// Parse a whole mesh description into a single [`Mesh`].
pub fn parse(source: &str) -> Result<Mesh, LoadError> {
    let mut name: Option<String> = None;
    let mut vertices = Vec::new();
    let mut faces = Vec::new();

    for (n, text) in source.lines().enumerate() {
        let line = n + 1;
        let mut fields = text.split_whitespace();
        match fields.next() {
            Some("v") => vertices.push(parse_vertex(fields, line)?),
            Some("f") => faces.push(parse_face(fields, line)?),
            Some("o") => {
                let object = fields.collect::<Vec<_>>().join(" ");
                log::info!("object '{object}' (line {line})");
                name.get_or_insert(object);
            }
            _ => {}
        }
    }

    let mesh = Mesh::new(vertices, faces)?;
    Ok(match name {
        Some(name) => mesh.with_name(name),
        None => mesh,
    })
}
