//! Engine-wide error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::render::opengl::{BufferError, ShaderError};
use crate::render::window::WindowError;

/// Any failure raised while setting up a sample program
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    #[error("Shader error: {0}")]
    Shader(#[from] ShaderError),

    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result alias for [`EngineError`]
pub type EngineResult<T> = Result<T, EngineError>;
