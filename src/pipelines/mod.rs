//! Render pipeline definitions.
//!
//! - `scene` compiles the wall and plane pipelines sharing one set of
//!   world/view/projection uniforms

pub mod scene;
