use super::*;
use crate::device::mock_device::MockDevice;
use crate::device::{DeviceCaps, GraphicsDevice};
use crate::error::Error;
use crate::resource::{MeshKey, ResourceRegistry, SubMesh};
use crate::target::{
    BuiltinRenderTarget, LoadAction, RenderTargetBinding, RenderTargetIdentifier, StoreAction,
};
use std::sync::{Arc, Mutex};

// ============================================================================
// Helpers
// ============================================================================

fn create_mock_device() -> (Arc<Mutex<MockDevice>>, Arc<Mutex<dyn GraphicsDevice>>) {
    create_mock_device_with(DeviceCaps::default())
}

fn create_mock_device_with(
    caps: DeviceCaps,
) -> (Arc<Mutex<MockDevice>>, Arc<Mutex<dyn GraphicsDevice>>) {
    let concrete = Arc::new(Mutex::new(MockDevice::with_caps(caps)));
    let dynamic: Arc<Mutex<dyn GraphicsDevice>> = concrete.clone();
    (concrete, dynamic)
}

fn registry_with_mesh(sub_meshes: u32) -> (ResourceRegistry, MeshKey) {
    let mut registry = ResourceRegistry::new();
    let subs = (0..sub_meshes).map(|_| SubMesh::triangles(3)).collect();
    let key = registry.create_mesh(subs).unwrap();
    (registry, key)
}

// ============================================================================
// Recording
// ============================================================================

#[test]
fn test_new_buffer_is_empty() {
    let cmd = CommandBuffer::new("empty");
    assert_eq!(cmd.name(), "empty");
    assert!(cmd.is_empty());
    assert_eq!(cmd.len(), 0);
}

#[test]
fn test_set_render_target_binds_color_and_depth() {
    let mut cmd = CommandBuffer::new("targets");
    cmd.set_render_target(BuiltinRenderTarget::CameraTarget);

    let expected = RenderTargetIdentifier::from_builtin(BuiltinRenderTarget::CameraTarget);
    match &cmd.commands()[0] {
        Command::SetRenderTarget(binding) => {
            assert_eq!(binding.color(), &[expected]);
            assert_eq!(binding.depth(), expected);
        }
        other => panic!("expected SetRenderTarget, got {:?}", other),
    }
}

#[test]
fn test_blit_records_identifier_pair() {
    let mut cmd = CommandBuffer::new("blit");
    cmd.blit("SourceRT", BuiltinRenderTarget::CameraTarget);

    assert_eq!(
        cmd.commands()[0],
        Command::Blit {
            source: RenderTargetIdentifier::from_name("SourceRT"),
            dest: RenderTargetIdentifier::from_builtin(BuiltinRenderTarget::CameraTarget),
        }
    );
}

#[test]
fn test_clear_discards_recorded_commands() {
    let mut cmd = CommandBuffer::new("clear");
    cmd.clear_render_target(true, true, [0.0; 4], 1.0);
    cmd.set_global_float("_Exposure", 1.5);
    assert_eq!(cmd.len(), 2);

    cmd.clear();
    assert!(cmd.is_empty());
}

#[test]
fn test_set_global_properties_intern_names() {
    let mut cmd = CommandBuffer::new("globals");
    cmd.set_global_float("_Exposure", 2.0);
    cmd.set_global_vector("_FogParams", glam::Vec4::ONE);
    cmd.set_global_texture("_ShadowMap", "ShadowRT");

    let expected = crate::names::intern("_Exposure");
    match &cmd.commands()[0] {
        Command::SetGlobalFloat { name, value } => {
            assert_eq!(*name, expected);
            assert_eq!(*value, 2.0);
        }
        other => panic!("expected SetGlobalFloat, got {:?}", other),
    }

    // The same property name from anywhere resolves to the same id.
    match &cmd.commands()[2] {
        Command::SetGlobalTexture { name, target } => {
            assert_eq!(*name, crate::names::intern("_ShadowMap"));
            assert_eq!(*target, RenderTargetIdentifier::from_name("ShadowRT"));
        }
        other => panic!("expected SetGlobalTexture, got {:?}", other),
    }
}

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn test_draw_mesh_in_range() {
    let (registry, mesh) = registry_with_mesh(3);
    let mut cmd = CommandBuffer::new("draw");

    cmd.draw_mesh(&registry, mesh, glam::Mat4::IDENTITY, 2).unwrap();

    match &cmd.commands()[0] {
        Command::DrawMesh { sub_mesh, .. } => assert_eq!(*sub_mesh, 2),
        other => panic!("expected DrawMesh, got {:?}", other),
    }
}

#[test]
fn test_draw_mesh_clamps_out_of_range_sub_mesh() {
    let (registry, mesh) = registry_with_mesh(2);
    let mut cmd = CommandBuffer::new("draw");

    // Lenient policy: warn and clamp to the last sub-mesh, do not reject.
    cmd.draw_mesh(&registry, mesh, glam::Mat4::IDENTITY, 7).unwrap();

    match &cmd.commands()[0] {
        Command::DrawMesh { sub_mesh, .. } => assert_eq!(*sub_mesh, 1),
        other => panic!("expected DrawMesh, got {:?}", other),
    }
}

#[test]
fn test_draw_mesh_unknown_mesh_fails() {
    let (mut registry, mesh) = registry_with_mesh(1);
    registry.remove_mesh(mesh);

    let mut cmd = CommandBuffer::new("draw");
    let result = cmd.draw_mesh(&registry, mesh, glam::Mat4::IDENTITY, 0);
    assert!(result.is_err());
    assert!(cmd.is_empty());
}

#[test]
fn test_draw_mesh_instanced_requires_matrices() {
    let (registry, mesh) = registry_with_mesh(1);
    let mut cmd = CommandBuffer::new("draw");

    let result = cmd.draw_mesh_instanced(&registry, mesh, 0, vec![]);
    assert!(result.is_err());

    let result = cmd.draw_mesh_instanced(&registry, mesh, 0, vec![glam::Mat4::IDENTITY; 4]);
    assert!(result.is_ok());
}

// ============================================================================
// Compute
// ============================================================================

#[test]
fn test_dispatch_rejects_zero_groups() {
    let mut cmd = CommandBuffer::new("compute");
    assert!(cmd.dispatch_compute("CullLights", 0, 1, 1).is_err());
    assert!(cmd.dispatch_compute("CullLights", 1, 0, 1).is_err());
    assert!(cmd.dispatch_compute("CullLights", 1, 1, 0).is_err());
    assert!(cmd.is_empty());
}

#[test]
fn test_dispatch_interns_kernel_name() {
    let mut cmd = CommandBuffer::new("compute");
    cmd.dispatch_compute("CullLights", 8, 8, 1).unwrap();

    match &cmd.commands()[0] {
        Command::DispatchCompute { kernel, groups } => {
            assert_eq!(*kernel, crate::names::intern("CullLights"));
            assert_eq!(*groups, [8, 8, 1]);
        }
        other => panic!("expected DispatchCompute, got {:?}", other),
    }
}

// ============================================================================
// Submission
// ============================================================================

#[test]
fn test_submit_hands_commands_to_device() {
    let (mock, device) = create_mock_device();
    let mut cmd = CommandBuffer::new("frame");
    cmd.set_render_target(BuiltinRenderTarget::CameraTarget);
    cmd.clear_render_target(true, true, [0.1, 0.1, 0.1, 1.0], 1.0);

    cmd.submit(&device).unwrap();

    let mock = mock.lock().unwrap();
    assert_eq!(mock.executed().len(), 2);
    assert_eq!(mock.executed(), cmd.commands());
}

#[test]
fn test_submit_keeps_commands_recorded() {
    let (_, device) = create_mock_device();
    let mut cmd = CommandBuffer::new("frame");
    cmd.clear_render_target(true, false, [0.0; 4], 1.0);

    cmd.submit(&device).unwrap();
    cmd.submit(&device).unwrap();
    assert_eq!(cmd.len(), 1);
}

#[test]
fn test_submit_rejects_instancing_without_capability() {
    let (mock, device) = create_mock_device_with(DeviceCaps {
        supports_instancing: false,
        ..DeviceCaps::default()
    });

    let (registry, mesh) = registry_with_mesh(1);
    let mut cmd = CommandBuffer::new("frame");
    cmd.draw_mesh_instanced(&registry, mesh, 0, vec![glam::Mat4::IDENTITY])
        .unwrap();

    match cmd.submit(&device) {
        Err(Error::UnsupportedOperation(_)) => {}
        other => panic!("expected UnsupportedOperation, got {:?}", other),
    }
    // Nothing reaches the device when the gate rejects.
    assert!(mock.lock().unwrap().executed().is_empty());
}

#[test]
fn test_submit_rejects_binding_over_device_target_limit() {
    let (mock, device) = create_mock_device_with(DeviceCaps {
        max_render_targets: 4,
        ..DeviceCaps::default()
    });

    let colors: Vec<_> = (0..5)
        .map(|i| RenderTargetIdentifier::from_name(&format!("LimitRT{}", i)))
        .collect();
    let binding = RenderTargetBinding::new(
        colors,
        RenderTargetIdentifier::from_builtin(BuiltinRenderTarget::Depth),
        LoadAction::Load,
        StoreAction::Store,
        LoadAction::Load,
        StoreAction::Store,
    )
    .unwrap();

    let mut cmd = CommandBuffer::new("frame");
    cmd.set_render_target_binding(binding);

    match cmd.submit(&device) {
        Err(Error::UnsupportedOperation(_)) => {}
        other => panic!("expected UnsupportedOperation, got {:?}", other),
    }
    assert!(mock.lock().unwrap().executed().is_empty());
}

#[test]
fn test_submit_accepts_binding_at_device_target_limit() {
    let (mock, device) = create_mock_device_with(DeviceCaps {
        max_render_targets: 4,
        ..DeviceCaps::default()
    });

    let colors: Vec<_> = (0..4)
        .map(|i| RenderTargetIdentifier::from_name(&format!("FitRT{}", i)))
        .collect();
    let binding = RenderTargetBinding::new(
        colors,
        RenderTargetIdentifier::from_builtin(BuiltinRenderTarget::Depth),
        LoadAction::Load,
        StoreAction::Store,
        LoadAction::Load,
        StoreAction::Store,
    )
    .unwrap();

    let mut cmd = CommandBuffer::new("frame");
    cmd.set_render_target_binding(binding);

    cmd.submit(&device).unwrap();
    assert_eq!(mock.lock().unwrap().executed().len(), 1);
}

#[test]
fn test_submit_rejects_compute_without_capability() {
    let (mock, device) = create_mock_device_with(DeviceCaps {
        supports_compute: false,
        ..DeviceCaps::default()
    });

    let mut cmd = CommandBuffer::new("frame");
    cmd.dispatch_compute("CullLights", 1, 1, 1).unwrap();

    match cmd.submit(&device) {
        Err(Error::UnsupportedOperation(_)) => {}
        other => panic!("expected UnsupportedOperation, got {:?}", other),
    }
    assert!(mock.lock().unwrap().executed().is_empty());
}
