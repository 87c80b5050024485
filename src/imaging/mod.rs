//! Image processing in pure Rust with no system dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode + ensure alpha** | `image::ImageReader` → RGBA8 |
//! | **Resize (cover/contain/fill)** | Lanczos3 + center crop / letterbox |
//! | **Pad / flatten** | `imageops::replace` on a filled canvas, alpha blend |
//! | **Encode** | PNG, WebP (lossless), JPEG, TIFF encoders of the `image` crate |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Raster**: Immutable image handle; every transform returns a new handle
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Icon plans (which sizes, which padding, which format)

pub mod backend;
pub mod calculations;
pub mod operations;
pub mod params;
pub mod raster;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use params::{
    Color, EncodeOptions, JpegOptions, OutputFormat, Padding, PngOptions, Quality, RenderParams,
    ResizeFit, TiffOptions, WebpOptions,
};
pub use raster::Raster;
pub use rust_backend::RustBackend;
