/// Central registry for managed-side resource records.
///
/// Stores texture and mesh records in slot maps; the slot key doubles as
/// the record's stable instance identity. The device owns the actual GPU
/// storage, so removing a record here drops only the managed bookkeeping.

use slotmap::{Key, SlotMap};
use crate::error::Result;
use crate::engine_bail;
use crate::ids::InstanceId;
use crate::resource::{Mesh, MeshKey, SubMesh, Texture, TextureDesc, TextureKey};

/// Registry singleton (managed by Engine, or standalone in tests/tools)
pub struct ResourceRegistry {
    textures: SlotMap<TextureKey, Texture>,
    meshes: SlotMap<MeshKey, Mesh>,
}

impl ResourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            textures: SlotMap::with_key(),
            meshes: SlotMap::with_key(),
        }
    }

    // ===== TEXTURES =====

    /// Register a new texture record
    ///
    /// # Errors
    ///
    /// Returns an error if any extent is zero, or layer/mip counts are zero.
    pub fn create_texture(&mut self, desc: TextureDesc) -> Result<TextureKey> {
        if desc.width == 0 || desc.height == 0 {
            engine_bail!("meridian::ResourceRegistry",
                "Texture extent {}x{} is not valid", desc.width, desc.height);
        }
        if desc.array_layers == 0 {
            engine_bail!("meridian::ResourceRegistry",
                "Texture must have at least one array layer");
        }
        if desc.mip_levels == 0 {
            engine_bail!("meridian::ResourceRegistry",
                "Texture must have at least one mip level");
        }

        Ok(self.textures.insert_with_key(|key| {
            Texture::new(desc.clone(), InstanceId::new(key.data().as_ffi()))
        }))
    }

    /// Get a texture record by key
    pub fn texture(&self, key: TextureKey) -> Option<&Texture> {
        self.textures.get(key)
    }

    /// Remove a texture record by key
    ///
    /// Returns the removed record, or None if the key is stale.
    pub fn remove_texture(&mut self, key: TextureKey) -> Option<Texture> {
        self.textures.remove(key)
    }

    /// Number of registered textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    // ===== MESHES =====

    /// Register a new mesh record
    ///
    /// # Errors
    ///
    /// Returns an error if `sub_meshes` is empty.
    pub fn create_mesh(&mut self, sub_meshes: Vec<SubMesh>) -> Result<MeshKey> {
        if sub_meshes.is_empty() {
            engine_bail!("meridian::ResourceRegistry",
                "Mesh must have at least one sub-mesh");
        }

        Ok(self.meshes.insert_with_key(|key| {
            Mesh::new(sub_meshes.clone(), InstanceId::new(key.data().as_ffi()))
        }))
    }

    /// Get a mesh record by key
    pub fn mesh(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    /// Remove a mesh record by key
    pub fn remove_mesh(&mut self, key: MeshKey) -> Option<Mesh> {
        self.meshes.remove(key)
    }

    /// Number of registered meshes
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Remove all records
    pub fn clear(&mut self) {
        self.textures.clear();
        self.meshes.clear();
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
