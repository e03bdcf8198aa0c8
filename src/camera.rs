//! Orbiting camera and the view/projection uniforms.

use cgmath::{EuclideanSpace, Matrix4, Point3, Rad, SquareMatrix, Vector3};

/// cgmath builds OpenGL clip space (z in -1..1); wgpu expects z in 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Camera circling the origin at a fixed height.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Orbit {
    pub radius: f32,
    pub height: f32,
}

impl Orbit {
    /// Eye position after travelling `t` radians around the Y axis.
    pub fn eye(&self, t: f64) -> Point3<f32> {
        let (sin, cos) = t.rem_euclid(std::f64::consts::TAU).sin_cos();
        Point3::new(
            self.radius * cos as f32,
            self.height,
            self.radius * sin as f32,
        )
    }
}

/// Everything needed to derive the view and projection matrices of a frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraState {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fovy: Rad<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl CameraState {
    pub fn looking_at_origin<F: Into<Rad<f32>>>(
        eye: Point3<f32>,
        fovy: F,
        aspect: f32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        Self {
            eye,
            target: Point3::origin(),
            up: Vector3::unit_y(),
            fovy: fovy.into(),
            aspect,
            znear,
            zfar,
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Aspect ratio of a surface, guarding against a zero-height canvas.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

/// A single matrix uniform. View, projection and every object's world
/// matrix each live in their own buffer of this shape.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MatrixUniform {
    matrix: [[f32; 4]; 4],
}

impl MatrixUniform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity().into(),
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        self.matrix.into()
    }
}

impl From<Matrix4<f32>> for MatrixUniform {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self {
            matrix: matrix.into(),
        }
    }
}
