//! GPU-side data: textures and the uploaded scene geometry.
//!
//! - `texture` wraps WGPU textures (colour images and the depth buffer)
//! - `mesh` holds per-primitive vertex buffers, the geometry cache and the
//!   per-object world uniforms

pub mod mesh;
pub mod texture;
