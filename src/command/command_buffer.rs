/// CommandBuffer - records rendering commands for later execution.
///
/// Commands are validated as they are recorded and executed by a
/// [`GraphicsDevice`] at submit time. The recorded list survives submission
/// so the same buffer can be submitted repeatedly; `clear()` empties it.

use std::sync::Mutex;
use glam::{Mat4, Vec4};
use crate::error::{Error, Result};
use crate::engine_bail;
use crate::device::{self, GraphicsDevice};
use crate::ids::NameId;
use crate::names;
use crate::resource::{MeshKey, ResourceRegistry};
use crate::target::{RenderTargetBinding, RenderTargetIdentifier};

/// A single recorded command, as handed to the device
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Bind a color+depth attachment set
    SetRenderTarget(RenderTargetBinding),
    /// Clear the currently bound targets
    ClearRenderTarget {
        clear_color: bool,
        clear_depth: bool,
        color: [f32; 4],
        depth: f32,
    },
    /// Copy source into dest with a fullscreen pass
    Blit {
        source: RenderTargetIdentifier,
        dest: RenderTargetIdentifier,
    },
    /// Draw one sub-mesh of a mesh with the given transform
    DrawMesh {
        mesh: MeshKey,
        matrix: Mat4,
        sub_mesh: u32,
    },
    /// Draw one sub-mesh once per matrix
    DrawMeshInstanced {
        mesh: MeshKey,
        sub_mesh: u32,
        matrices: Vec<Mat4>,
    },
    /// Dispatch a compute kernel
    DispatchCompute {
        kernel: NameId,
        groups: [u32; 3],
    },
    /// Set a global shader float by interned name
    SetGlobalFloat { name: NameId, value: f32 },
    /// Set a global shader vector by interned name
    SetGlobalVector { name: NameId, value: Vec4 },
    /// Set a global shader texture by interned name
    SetGlobalTexture {
        name: NameId,
        target: RenderTargetIdentifier,
    },
}

/// Named list of recorded commands
///
/// # Example
///
/// ```no_run
/// use meridian_graphics::meridian::command::CommandBuffer;
/// use meridian_graphics::meridian::target::BuiltinRenderTarget;
///
/// let mut cmd = CommandBuffer::new("shadows");
/// cmd.set_render_target(BuiltinRenderTarget::CameraTarget);
/// cmd.clear_render_target(true, true, [0.0; 4], 1.0);
/// ```
pub struct CommandBuffer {
    name: String,
    commands: Vec<Command>,
}

impl CommandBuffer {
    /// Create a new empty command buffer
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            commands: Vec::new(),
        }
    }

    // ===== ACCESSORS =====

    /// Buffer name (shows up in device debug tooling)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if nothing is recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Recorded commands, in order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Discard all recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    // ===== RENDER TARGETS =====

    /// Bind a single target for both color and depth
    pub fn set_render_target(&mut self, target: impl Into<RenderTargetIdentifier>) {
        let identifier = target.into();
        self.commands.push(Command::SetRenderTarget(
            RenderTargetBinding::single(identifier, identifier),
        ));
    }

    /// Bind a full attachment set (validated at construction)
    pub fn set_render_target_binding(&mut self, binding: RenderTargetBinding) {
        self.commands.push(Command::SetRenderTarget(binding));
    }

    /// Clear the currently bound targets
    pub fn clear_render_target(
        &mut self,
        clear_color: bool,
        clear_depth: bool,
        color: [f32; 4],
        depth: f32,
    ) {
        self.commands.push(Command::ClearRenderTarget {
            clear_color,
            clear_depth,
            color,
            depth,
        });
    }

    /// Record a fullscreen copy from `source` into `dest`
    pub fn blit(
        &mut self,
        source: impl Into<RenderTargetIdentifier>,
        dest: impl Into<RenderTargetIdentifier>,
    ) {
        self.commands.push(Command::Blit {
            source: source.into(),
            dest: dest.into(),
        });
    }

    // ===== DRAWING =====

    /// Record a draw of one sub-mesh
    ///
    /// An out-of-range sub-mesh index is clamped to the last sub-mesh with
    /// a warning rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if `mesh` is not registered.
    pub fn draw_mesh(
        &mut self,
        resources: &ResourceRegistry,
        mesh: MeshKey,
        matrix: Mat4,
        sub_mesh: u32,
    ) -> Result<()> {
        let sub_mesh = self.resolve_sub_mesh(resources, mesh, sub_mesh)?;
        self.commands.push(Command::DrawMesh {
            mesh,
            matrix,
            sub_mesh,
        });
        Ok(())
    }

    /// Record an instanced draw of one sub-mesh, once per matrix
    ///
    /// # Errors
    ///
    /// Returns an error if `mesh` is not registered or `matrices` is empty.
    /// Whether the device can actually instance is checked at submit time.
    pub fn draw_mesh_instanced(
        &mut self,
        resources: &ResourceRegistry,
        mesh: MeshKey,
        sub_mesh: u32,
        matrices: Vec<Mat4>,
    ) -> Result<()> {
        if matrices.is_empty() {
            engine_bail!("meridian::CommandBuffer",
                "Instanced draw needs at least one matrix");
        }
        let sub_mesh = self.resolve_sub_mesh(resources, mesh, sub_mesh)?;
        self.commands.push(Command::DrawMeshInstanced {
            mesh,
            sub_mesh,
            matrices,
        });
        Ok(())
    }

    fn resolve_sub_mesh(
        &self,
        resources: &ResourceRegistry,
        mesh: MeshKey,
        sub_mesh: u32,
    ) -> Result<u32> {
        let record = resources.mesh(mesh).ok_or_else(|| {
            crate::engine_error!("meridian::CommandBuffer",
                "Draw in '{}' references an unknown mesh", self.name);
            Error::InvalidResource("Draw references an unknown mesh".to_string())
        })?;

        let count = record.sub_mesh_count();
        if sub_mesh >= count {
            crate::engine_warn!("meridian::CommandBuffer",
                "sub-mesh index {} out of range ({} sub-meshes), clamping",
                sub_mesh, count);
            Ok(count - 1)
        } else {
            Ok(sub_mesh)
        }
    }

    // ===== COMPUTE =====

    /// Record a compute dispatch, interning the kernel name
    ///
    /// # Errors
    ///
    /// Returns an error if any group count is zero.
    pub fn dispatch_compute(&mut self, kernel: &str, x: u32, y: u32, z: u32) -> Result<()> {
        if x == 0 || y == 0 || z == 0 {
            engine_bail!("meridian::CommandBuffer",
                "Dispatch group counts must be non-zero, got {}x{}x{}", x, y, z);
        }
        self.commands.push(Command::DispatchCompute {
            kernel: names::intern(kernel),
            groups: [x, y, z],
        });
        Ok(())
    }

    // ===== GLOBAL SHADER PROPERTIES =====

    /// Record a global shader float, interning the property name
    pub fn set_global_float(&mut self, name: &str, value: f32) {
        self.commands.push(Command::SetGlobalFloat {
            name: names::intern(name),
            value,
        });
    }

    /// Record a global shader vector, interning the property name
    pub fn set_global_vector(&mut self, name: &str, value: Vec4) {
        self.commands.push(Command::SetGlobalVector {
            name: names::intern(name),
            value,
        });
    }

    /// Record a global shader texture, interning the property name
    pub fn set_global_texture(
        &mut self,
        name: &str,
        target: impl Into<RenderTargetIdentifier>,
    ) {
        self.commands.push(Command::SetGlobalTexture {
            name: names::intern(name),
            target: target.into(),
        });
    }

    // ===== SUBMISSION =====

    /// Hand the recorded commands to a device for execution
    ///
    /// The list stays recorded; call [`clear`](Self::clear) to empty it.
    ///
    /// # Errors
    ///
    /// Returns an unsupported-operation error if the list contains an
    /// instanced draw, a dispatch, or a binding with more color targets
    /// than the device capabilities allow, or whatever error the device
    /// reports from execution.
    pub fn submit(&self, device: &Mutex<dyn GraphicsDevice>) -> Result<()> {
        let mut device = device::lock(device);
        let caps = device.caps();

        for command in &self.commands {
            match command {
                Command::SetRenderTarget(binding)
                    if binding.color().len() as u32 > caps.max_render_targets =>
                {
                    crate::engine_error!("meridian::CommandBuffer",
                        "'{}' binds {} color targets but the device supports at most {}",
                        self.name, binding.color().len(), caps.max_render_targets);
                    return Err(Error::UnsupportedOperation(format!(
                        "Device supports at most {} simultaneous color targets",
                        caps.max_render_targets
                    )));
                }
                Command::DrawMeshInstanced { .. } if !caps.supports_instancing => {
                    crate::engine_error!("meridian::CommandBuffer",
                        "'{}' contains an instanced draw but the device does not support instancing",
                        self.name);
                    return Err(Error::UnsupportedOperation(
                        "Device does not support instanced drawing".to_string(),
                    ));
                }
                Command::DispatchCompute { .. } if !caps.supports_compute => {
                    crate::engine_error!("meridian::CommandBuffer",
                        "'{}' contains a compute dispatch but the device does not support compute",
                        self.name);
                    return Err(Error::UnsupportedOperation(
                        "Device does not support compute dispatch".to_string(),
                    ));
                }
                _ => {}
            }
        }

        device.execute(&self.commands)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "command_buffer_tests.rs"]
mod tests;
