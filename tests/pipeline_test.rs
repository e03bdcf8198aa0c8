#![cfg(feature = "integration-tests")]

use castle_scene::{
    error::{SetupError, ShaderStage},
    pipelines::scene::{FRAGMENT_SHADER, VERTEX_SHADER, setup_scene_pipelines},
};

const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// A device without a surface, or `None` when the machine has no adapter.
async fn headless_device() -> Option<wgpu::Device> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions::default())
        .await
        .ok()?;
    let (device, _queue) = adapter
        .request_device(&wgpu::DeviceDescriptor::default())
        .await
        .ok()?;
    Some(device)
}

fn with_device(test: impl AsyncFnOnce(wgpu::Device)) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(async {
        match headless_device().await {
            Some(device) => test(device).await,
            None => eprintln!("no GPU adapter available, skipping"),
        }
    });
}

#[test]
fn scene_shaders_build_both_pipelines() {
    with_device(async |device| {
        let result = setup_scene_pipelines(&device, COLOR_FORMAT, VERTEX_SHADER, FRAGMENT_SHADER).await;
        assert!(result.is_ok(), "{:?}", result.err());
    });
}

#[test]
fn broken_vertex_shader_reports_the_vertex_stage() {
    with_device(async |device| {
        let result = setup_scene_pipelines(&device, COLOR_FORMAT, "fn vs_wall( {", FRAGMENT_SHADER).await;
        match result {
            Err(SetupError::ShaderCompile { stage, log }) => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert!(!log.is_empty());
            }
            other => panic!("expected a vertex compile error, got {:?}", other.err()),
        }
    });
}

#[test]
fn broken_fragment_shader_reports_the_fragment_stage() {
    with_device(async |device| {
        let result = setup_scene_pipelines(&device, COLOR_FORMAT, VERTEX_SHADER, "@fragment fn").await;
        assert!(matches!(
            result,
            Err(SetupError::ShaderCompile {
                stage: ShaderStage::Fragment,
                ..
            })
        ));
    });
}

#[test]
fn missing_entry_points_fail_validation() {
    with_device(async |device| {
        // compiles fine but has no vs_wall / vs_plane
        let result = setup_scene_pipelines(&device, COLOR_FORMAT, FRAGMENT_SHADER, FRAGMENT_SHADER).await;
        assert!(matches!(result, Err(SetupError::ProgramValidate { .. })));
    });
}
