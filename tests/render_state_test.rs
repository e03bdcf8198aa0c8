use castle_scene::{
    RenderSettings,
    data_structures::mesh::{GeometryCache, GeometryKey},
    render::{FrameRenderer, RendererState},
    scene::{Material, SceneObject, castle},
};

#[test]
fn renderer_starts_uninitialized() {
    let renderer = FrameRenderer::new(castle().unwrap(), RenderSettings::default());
    assert_eq!(renderer.state(), RendererState::Uninitialized);
    assert_eq!(renderer.scene().len(), 20);
}

#[test]
fn frames_are_only_accepted_after_setup() {
    let state = RendererState::Uninitialized;
    assert_eq!(state.on_frame(), None);

    let state = state.on_setup();
    assert_eq!(state, RendererState::Ready);
    assert!(!state.schedules_next_frame());

    let state = state.on_frame().unwrap();
    assert_eq!(state, RendererState::Rendering);
    assert!(state.schedules_next_frame());
    assert_eq!(state.on_frame(), Some(RendererState::Rendering));
}

#[test]
fn stopping_ends_the_loop_for_good() {
    for state in [
        RendererState::Uninitialized,
        RendererState::Ready,
        RendererState::Rendering,
    ] {
        let stopped = state.on_stop();
        assert_eq!(stopped, RendererState::Stopped);
        assert_eq!(stopped.on_frame(), None);
        assert_eq!(stopped.on_setup(), RendererState::Stopped);
        assert!(!stopped.schedules_next_frame());
    }

    let mut renderer = FrameRenderer::new(castle().unwrap(), RenderSettings::default());
    renderer.stop();
    assert_eq!(renderer.state(), RendererState::Stopped);
}

#[test]
fn renderer_plans_one_draw_per_object() {
    let renderer = FrameRenderer::new(castle().unwrap(), RenderSettings::default());
    let plan = renderer.plan(3000.0, 4.0 / 3.0);
    assert_eq!(plan.draws.len(), renderer.scene().len());
    assert_eq!(plan.camera.aspect, 4.0 / 3.0);
}

#[test]
fn identical_objects_share_one_mesh() {
    let scene = vec![
        SceneObject::wall("a", [1.0, 2.0, 3.0], [1.0, 1.0, 1.0], Material::Stone).unwrap(),
        SceneObject::wall("b", [1.0, 2.0, 3.0], [1.0, 1.0, 1.0], Material::Bark).unwrap(),
        SceneObject::ground("c", [1.0, 2.0, 3.0], [1.0, 1.0, 1.0], Material::Grass).unwrap(),
    ];
    assert_eq!(GeometryKey::of(&scene[0]), GeometryKey::of(&scene[1]));
    assert_ne!(GeometryKey::of(&scene[0]), GeometryKey::of(&scene[2]));

    let mut built = Vec::new();
    let cache = GeometryCache::build(&scene, |obj| {
        built.push(obj.name);
        obj.name
    });
    assert_eq!(built, ["a", "c"]);
    assert_eq!(cache.unique_meshes(), 2);
    assert_eq!(cache.mesh_for(1), Some(&"a"));
    assert_eq!(cache.mesh_for(2), Some(&"c"));
    assert_eq!(cache.mesh_for(3), None);
}

#[test]
fn every_castle_object_has_its_own_geometry() {
    let scene = castle().unwrap();
    let cache = GeometryCache::build(&scene, |obj| obj.name);
    assert_eq!(cache.unique_meshes(), scene.len());
    for (i, obj) in scene.iter().enumerate() {
        assert_eq!(cache.mesh_for(i), Some(&obj.name));
    }
}
