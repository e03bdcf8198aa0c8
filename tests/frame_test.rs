mod common;

use std::f64::consts::FRAC_PI_2;

use castle_scene::{
    RenderSettings,
    camera::{Orbit, aspect_ratio},
    frame::FramePlan,
    scene::{ObjectKind, Rotation, castle, door_swing},
};
use cgmath::{Deg, EuclideanSpace, Matrix4, Point3, Rad, Vector3, Vector4};
use common::test_utils::{assert_near, assert_vec3_near, is_identity};

fn default_orbit() -> Orbit {
    RenderSettings::default().orbit
}

#[test]
fn camera_orbits_at_radius_thirty_and_height_thirteen() {
    let orbit = default_orbit();
    assert_vec3_near(orbit.eye(0.0).to_vec(), Vector3::new(30.0, 13.0, 0.0), 1e-5);
    assert_vec3_near(orbit.eye(FRAC_PI_2).to_vec(), Vector3::new(0.0, 13.0, 30.0), 1e-4);
}

#[test]
fn frame_time_is_scaled_to_the_orbit_angle() {
    let scene = castle().unwrap();
    let settings = RenderSettings::default();
    // a quarter of the six second orbit
    let plan = FramePlan::new(&scene, 1500.0, 1.0, &settings);
    assert_near(plan.t as f32, FRAC_PI_2 as f32, 1e-4);
    assert_vec3_near(plan.camera.eye.to_vec(), Vector3::new(0.0, 13.0, 30.0), 1e-3);
}

#[test]
fn camera_looks_at_the_origin_with_fixed_lens() {
    let scene = castle().unwrap();
    let plan = FramePlan::new(&scene, 0.0, 1.6, &RenderSettings::default());
    let camera = plan.camera;
    assert_eq!(camera.target, Point3::origin());
    assert_eq!(camera.up, Vector3::unit_y());
    assert_eq!(camera.fovy, Rad::from(Deg(45.0)));
    assert_eq!(camera.aspect, 1.6);
    assert_eq!(camera.znear, 0.1);
    assert_eq!(camera.zfar, 1000.0);
}

#[test]
fn view_matrix_moves_the_eye_to_the_origin() {
    let scene = castle().unwrap();
    let plan = FramePlan::new(&scene, 777.0, 1.0, &RenderSettings::default());
    let eye = plan.camera.eye;
    let in_view = plan.camera.view_matrix() * Vector4::new(eye.x, eye.y, eye.z, 1.0);
    assert_vec3_near(in_view.truncate(), Vector3::new(0.0, 0.0, 0.0), 1e-4);
}

#[test]
fn projection_maps_near_and_far_to_the_wgpu_depth_range() {
    let scene = castle().unwrap();
    let plan = FramePlan::new(&scene, 0.0, 1.0, &RenderSettings::default());
    let proj = plan.camera.projection_matrix();
    let near = proj * Vector4::new(0.0, 0.0, -0.1, 1.0);
    let far = proj * Vector4::new(0.0, 0.0, -1000.0, 1.0);
    assert_near(near.z / near.w, 0.0, 1e-4);
    assert_near(far.z / far.w, 1.0, 1e-4);
}

#[test]
fn one_draw_per_object_in_scene_order() {
    let scene = castle().unwrap();
    let plan = FramePlan::new(&scene, 4200.0, 1.0, &RenderSettings::default());
    assert_eq!(plan.draws.len(), scene.len());
    for (i, (draw, obj)) in plan.draws.iter().zip(&scene).enumerate() {
        assert_eq!(draw.object, i);
        assert_eq!(draw.kind, obj.kind);
        assert_eq!(draw.material, obj.material);
    }
}

#[test]
fn rotation_never_leaks_into_the_next_draw() {
    let scene = castle().unwrap();
    let settings = RenderSettings::default();
    for step in 0..200 {
        let time_ms = step as f64 * 37.5;
        let plan = FramePlan::new(&scene, time_ms, 1.0, &settings);
        for draw in &plan.draws {
            let obj = &scene[draw.object];
            if obj.kind == ObjectKind::Wall && matches!(obj.rotation, Rotation::None) {
                assert!(is_identity(draw.world), "{} inherited a rotation", obj.name);
            }
        }
        // the house follows the door directly
        assert!(is_identity(plan.draws[2].world));
    }
}

#[test]
fn door_world_matrix_is_its_swing_about_x() {
    let scene = castle().unwrap();
    let settings = RenderSettings::default();
    let plan = FramePlan::new(&scene, 2500.0, 1.0, &settings);
    let door = &plan.draws[1];
    assert_eq!(scene[door.object].name, "door");
    assert_eq!(door.world, Matrix4::from_angle_x(door_swing(plan.t)));
    assert!(!is_identity(door.world));
}

#[test]
fn long_running_clock_keeps_the_orbit_precise() {
    let scene = castle().unwrap();
    let settings = RenderSettings::default();
    // three hours is a whole number of six second orbits
    let three_hours = 3.0 * 60.0 * 60.0 * 1000.0;
    let early = FramePlan::new(&scene, 1500.0, 1.0, &settings);
    let late = FramePlan::new(&scene, three_hours + 1500.0, 1.0, &settings);

    assert_vec3_near(late.camera.eye.to_vec(), early.camera.eye.to_vec(), 1e-4);
    assert_eq!(late.draws[1].world, Matrix4::from_angle_x(door_swing(late.t)));
}

#[test]
fn plans_are_pure_functions_of_time() {
    let scene = castle().unwrap();
    let settings = RenderSettings::default();
    let a = FramePlan::new(&scene, 1234.5, 1.25, &settings);
    let b = FramePlan::new(&scene, 1234.5, 1.25, &settings);
    assert_eq!(a, b);
}

#[test]
fn aspect_ratio_survives_a_collapsed_canvas() {
    assert_eq!(aspect_ratio(800, 600), 800.0 / 600.0);
    assert_eq!(aspect_ratio(800, 0), 800.0);
}
