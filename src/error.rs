//! Errors that stop the scene from being set up.
//!
//! None of these are retried: once setup fails, the frame loop never starts.

use crate::{resources::texture::TextureError, scene::SceneError};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("no GPU context available on {primary} or {fallback}: {reason}")]
    ContextUnavailable {
        primary: &'static str,
        fallback: &'static str,
        reason: String,
    },
    #[error("ERROR compiling {stage} shader! {log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("ERROR linking program! {log}")]
    ProgramLink { log: String },
    #[error("ERROR validating program! {log}")]
    ProgramValidate { log: String },
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Texture(#[from] TextureError),
}
