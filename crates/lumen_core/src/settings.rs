//! Render settings consumed by the tracer.
//!
//! All values are fixed when a tracer is constructed; changing them means
//! building a new tracer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when settings cannot drive a render.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Output size must be non-zero (got {width}x{height})")]
    ZeroDimension { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Thread count must be at least 1")]
    ZeroThreads,

    #[error("Output size {width}x{height} overflows the pixel index range")]
    TooLarge { width: u32, height: u32 },
}

/// Result type for settings validation.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Output size, sampling quality and parallelism for one tracer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Jittered rays cast per pixel
    pub samples: u32,
    /// Maximum number of scatter events per path
    pub max_depth: u32,
    /// Worker threads spawned per render
    pub threads: usize,
    /// Base seed for sampling; `None` draws a fresh one per render
    pub seed: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 200,
            height: 100,
            samples: 100,
            max_depth: 50,
            threads: default_thread_count(),
            seed: None,
        }
    }
}

impl RenderSettings {
    /// Create settings for the given resolution with default quality.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Fix the sampling seed for reproducible output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Total number of pixels in the output buffer.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reject settings that cannot produce an image.
    ///
    /// A `max_depth` of zero is accepted: every surface hit then renders black.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if (self.width as u64) * (self.height as u64) > usize::MAX as u64 {
            return Err(SettingsError::TooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples == 0 {
            return Err(SettingsError::ZeroSamples);
        }
        if self.threads == 0 {
            return Err(SettingsError::ZeroThreads);
        }
        Ok(())
    }
}

/// Number of hardware threads, falling back to one.
pub fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
