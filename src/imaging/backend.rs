//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the icon pipeline
//! needs: load the base icon once, then render any number of outputs from it.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), pure Rust with no
//! system dependencies. Everything is statically linked into the binary.

use super::params::RenderParams;
use super::raster::Raster;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image processing backends.
///
/// `Sync` so renders can be fanned out across rayon workers.
pub trait ImageBackend: Sync {
    /// Decode the base icon, with an alpha channel guaranteed.
    fn load(&self, path: &Path) -> Result<Raster, BackendError>;

    /// Produce one encoded output from the base icon.
    fn render(&self, base: &Raster, params: &RenderParams) -> Result<Vec<u8>, BackendError>;
}
