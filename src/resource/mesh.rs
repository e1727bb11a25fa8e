/// Managed mesh record: sub-mesh draw ranges over device-owned buffers.
///
/// A mesh groups one or more sub-meshes. Each sub-mesh is the smallest unit
/// a draw command can reference; draw commands select one by index.

use slotmap::new_key_type;
use crate::ids::InstanceId;

new_key_type! {
    /// Registry key for a mesh record
    pub struct MeshKey;
}

/// Primitive topology for a sub-mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    TriangleList,
    LineList,
    PointList,
}

/// A drawable region within the mesh's shared buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubMesh {
    /// First vertex index (base vertex for indexed draw)
    pub vertex_offset: u32,
    /// Number of vertices
    pub vertex_count: u32,
    /// First index in index buffer (ignored if mesh is non-indexed)
    pub index_offset: u32,
    /// Number of indices (ignored if mesh is non-indexed)
    pub index_count: u32,
    /// Primitive topology for this sub-mesh
    pub topology: PrimitiveTopology,
}

impl SubMesh {
    /// A triangle-list sub-mesh covering `vertex_count` vertices from zero
    pub fn triangles(vertex_count: u32) -> Self {
        Self {
            vertex_offset: 0,
            vertex_count,
            index_offset: 0,
            index_count: 0,
            topology: PrimitiveTopology::TriangleList,
        }
    }
}

/// Managed mesh record.
///
/// Created only through `ResourceRegistry::create_mesh()`, which guarantees
/// at least one sub-mesh and assigns the instance identity.
#[derive(Debug, Clone)]
pub struct Mesh {
    sub_meshes: Vec<SubMesh>,
    instance: InstanceId,
}

impl Mesh {
    pub(crate) fn new(sub_meshes: Vec<SubMesh>, instance: InstanceId) -> Self {
        Self { sub_meshes, instance }
    }

    /// Number of sub-meshes (always at least 1)
    pub fn sub_mesh_count(&self) -> u32 {
        self.sub_meshes.len() as u32
    }

    /// Sub-mesh at `index`, if in range
    pub fn sub_mesh(&self, index: u32) -> Option<&SubMesh> {
        self.sub_meshes.get(index as usize)
    }

    /// All sub-meshes, in index order
    pub fn sub_meshes(&self) -> &[SubMesh] {
        &self.sub_meshes
    }

    /// Stable identity of this mesh
    pub fn instance_id(&self) -> InstanceId {
        self.instance
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
