//! castle-scene
//!
//! A small textured castle rendered with wgpu, targeting WebGL2 in the
//! browser first and native windows second. The scene is a fixed table of
//! boxes ("walls") and ground quads ("planes"); an orbiting camera circles it
//! while the gate swings open and shut.
//!
//! High-level modules
//! - `geometry`: pure vertex/index/normal builders for walls and planes
//! - `scene`: the static castle table, transforms, rotation rules, materials
//! - `camera`: orbit, view/projection matrices and matrix uniforms
//! - `frame`: per-frame values (camera state and one draw call per object)
//! - `context`: surface, device and queue with backend fallback
//! - `pipelines`: shader compilation, linking and validation
//! - `resources`: texture loading and binding
//! - `data_structures`: GPU textures, cached meshes, per-object uniforms
//! - `render`: the frame renderer and its state machine
//! - `flow`: the winit event loop driving it all
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod frame;
pub mod geometry;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

pub use config::RenderSettings;
pub use flow::run;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), JsValue> {
    run(RenderSettings::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}
