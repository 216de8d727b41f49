//! Errors surfaced by the tracer.

use lumen_core::{SceneError, SettingsError};
use thiserror::Error;

/// Errors that can occur while rendering or writing output.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("Failed to spawn render thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),

    #[error("Render worker panicked")]
    WorkerPanicked,

    #[error("Pixel {0} was written more than once")]
    DuplicateWrite(usize),

    #[error("Pixel {0} was never written")]
    IncompleteBuffer(usize),

    #[error("Buffer holds {actual} pixels, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
