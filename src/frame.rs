//! Per-frame values.
//!
//! A [`FramePlan`] is computed from the host's clock before anything touches
//! the GPU. It owns the camera state and one [`DrawCall`] per scene object,
//! each carrying its own world matrix. Nothing is shared between draws, so a
//! rotated object can't leave its rotation behind for the next one.

use cgmath::{Matrix4, SquareMatrix, Vector3};

use crate::{
    camera::CameraState,
    config::RenderSettings,
    scene::{Material, ObjectKind, SceneObject},
};

/// A single draw of one scene object.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawCall {
    /// Index into the scene table.
    pub object: usize,
    pub kind: ObjectKind,
    pub material: Material,
    pub world: Matrix4<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    /// Scaled scene time. Kept in `f64`: hours of milliseconds no longer fit
    /// an `f32` with sub-degree precision.
    pub t: f64,
    pub camera: CameraState,
    pub draws: Vec<DrawCall>,
}

impl FramePlan {
    pub fn new(
        scene: &[SceneObject],
        time_ms: f64,
        aspect: f32,
        settings: &RenderSettings,
    ) -> Self {
        let t = time_ms * settings.time_scale;
        let camera = CameraState::looking_at_origin(
            settings.orbit.eye(t),
            settings.fovy,
            aspect,
            settings.znear,
            settings.zfar,
        );
        let draws = scene
            .iter()
            .enumerate()
            .map(|(object, obj)| DrawCall {
                object,
                kind: obj.kind,
                material: obj.material,
                world: world_matrix(obj, t),
            })
            .collect();
        Self { t, camera, draws }
    }
}

/// World matrix of one object at scene time `t`.
///
/// Walls have their transform baked into the vertices, so an unrotated wall
/// gets the identity. Plane vertices are 2D; their z translation is applied
/// here before the rotation.
pub fn world_matrix(obj: &SceneObject, t: f64) -> Matrix4<f32> {
    let base = match obj.kind {
        ObjectKind::Wall => Matrix4::identity(),
        ObjectKind::Plane => {
            Matrix4::from_translation(Vector3::new(0.0, 0.0, obj.transform.translation.z))
        }
    };
    match obj.rotation.angle_at(t) {
        Some(angle) => Matrix4::from_angle_x(angle) * base,
        None => base,
    }
}
