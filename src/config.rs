//! Render settings shared by the setup code and the frame loop.

use cgmath::Deg;

use crate::camera::Orbit;

/// Tunables of the demo. `Default` reproduces the castle as it is meant to
/// be seen; callers of [`crate::run`] may override individual fields.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub clear_colour: wgpu::Color,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub orbit: Orbit,
    /// Multiplied with the host's millisecond clock to get the scene time.
    pub time_scale: f64,
    /// Id of the `<canvas>` element used on the web.
    pub canvas_id: &'static str,
    /// Directory, relative to the asset root, holding `<material>.png`.
    pub texture_dir: &'static str,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_colour: wgpu::Color::WHITE,
            fovy: Deg(45.0),
            znear: 0.1,
            zfar: 1000.0,
            orbit: Orbit {
                radius: 30.0,
                height: 13.0,
            },
            // one full orbit every six seconds
            time_scale: std::f64::consts::TAU / 6000.0,
            canvas_id: "surface",
            texture_dir: "textures",
        }
    }
}
