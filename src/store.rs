//! Growable collection of loaded meshes.

use std::path::Path;

use crate::math::Vec4;
use crate::mesh::Mesh;

const INITIAL_CAPACITY: usize = 4;

/// Owns every loaded [`Mesh`] in load order.
///
/// The store keeps an explicit logical capacity that doubles whenever a push would
/// exceed it. Meshes own their vertex buffers, so growing the store moves `Mesh`
/// handles around but never the vertex data they point to.
#[derive(Debug, Clone)]
pub struct MeshStore {
    meshes: Vec<Mesh>,
    capacity: usize,
}

impl MeshStore {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Alias for [`MeshStore::new`].
    pub fn create() -> Self {
        Self::new()
    }

    /// An empty store with room for `capacity` meshes (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            meshes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a mesh and return its index, doubling the capacity first when full.
    pub fn push(&mut self, mesh: Mesh) -> usize {
        if self.meshes.len() == self.capacity {
            let grown = self.capacity * 2;
            self.meshes.reserve_exact(grown - self.meshes.len());
            log::debug!("mesh store grown from {} to {grown}", self.capacity);
            self.capacity = grown;
        }
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    /// Load one mesh description file into the store.
    ///
    /// Returns the new mesh's index. A source that cannot be read or parsed, or
    /// that yields no geometry, is logged and skipped; the store is unchanged.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Option<usize> {
        let path = path.as_ref();
        match Mesh::from_obj(path) {
            Ok(mesh) => {
                log::info!(
                    "loaded '{}': {} vertices, {} faces",
                    path.display(),
                    mesh.vertex_count(),
                    mesh.face_count()
                );
                Some(self.push(mesh))
            }
            Err(e) => {
                log::warn!("skipping '{}': {e}", path.display());
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&Mesh> {
        self.meshes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mesh> {
        self.meshes.iter()
    }

    /// Every face of every mesh, in load order then parse order, resolved to its
    /// three vertex positions.
    pub fn faces(&self) -> impl Iterator<Item = [Vec4; 3]> + '_ {
        self.meshes.iter().flat_map(Mesh::triangles)
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(Mesh::vertex_count).sum()
    }

    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(Mesh::face_count).sum()
    }
}

impl Default for MeshStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a MeshStore {
    type Item = &'a Mesh;
    type IntoIter = std::slice::Iter<'a, Mesh>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
