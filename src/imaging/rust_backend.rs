//! Pure Rust image processing backend, no system dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Crop / letterbox / pad | `imageops::crop_imm`, `imageops::replace` |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |
//! | Encode → WebP | `image::codecs::webp::WebPEncoder` (lossless) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//! | Encode → TIFF | `image::codecs::tiff::TiffEncoder` |

use super::backend::{BackendError, ImageBackend};
use super::calculations::padded_inner_size;
use super::params::{Color, Padding, RenderParams};
use super::raster::Raster;
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
#[derive(Debug)]
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn load(&self, path: &Path) -> Result<Raster, BackendError> {
        Raster::open(path)
    }

    fn render(&self, base: &Raster, params: &RenderParams) -> Result<Vec<u8>, BackendError> {
        let (inner_w, inner_h) = padded_inner_size(params.width, params.padding)
            .zip(padded_inner_size(params.height, params.padding))
            .ok_or_else(|| {
                BackendError::ProcessingFailed(format!(
                    "Padding of {}px leaves no room in a {}x{} icon",
                    params.padding, params.width, params.height
                ))
            })?;

        let mut icon = base.resize(inner_w, inner_h, params.fit, Color::TRANSPARENT);
        if params.padding > 0 {
            icon = icon.extend(Padding::uniform(params.padding), Color::TRANSPARENT);
        }
        if let Some(background) = params.background {
            icon = icon.flatten(background);
        }
        icon.encode(&params.encode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::{EncodeOptions, PngOptions, ResizeFit, WebpOptions};
    use crate::test_helpers::write_test_png;

    fn png() -> EncodeOptions {
        EncodeOptions::Png(PngOptions::default())
    }

    #[test]
    fn load_png_gains_alpha() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("logo.png");
        write_test_png(&path, 64, 48);

        let raster = RustBackend::new().load(&path).unwrap();
        assert_eq!(raster.dimensions(), (64, 48));
        assert!(raster.has_alpha());
    }

    #[test]
    fn load_nonexistent_file_errors() {
        let result = RustBackend::new().load(Path::new("/nonexistent/logo.png"));
        assert!(result.is_err());
    }

    #[test]
    fn render_square_icon() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("logo.png");
        write_test_png(&path, 128, 128);

        let backend = RustBackend::new();
        let base = backend.load(&path).unwrap();
        let bytes = backend
            .render(&base, &RenderParams::resize(32, 32, ResizeFit::Cover, png()))
            .unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
    }

    #[test]
    fn render_wide_tile_from_square_source() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("logo.png");
        write_test_png(&path, 128, 128);

        let backend = RustBackend::new();
        let base = backend.load(&path).unwrap();
        let bytes = backend
            .render(
                &base,
                &RenderParams::resize(
                    310,
                    150,
                    ResizeFit::Contain,
                    EncodeOptions::WebP(WebpOptions::default()),
                ),
            )
            .unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (310, 150));
    }

    #[test]
    fn render_padded_flattened_icon_is_opaque() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("logo.png");
        write_test_png(&path, 100, 100);

        let backend = RustBackend::new();
        let base = backend.load(&path).unwrap();
        let params = RenderParams {
            padding: 12,
            background: Some(Color::WHITE),
            ..RenderParams::resize(180, 180, ResizeFit::Cover, png())
        };
        let bytes = backend.render(&base, &params).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (180, 180));
        assert!(!decoded.color().has_alpha());
        // Padding area shows the background
        assert_eq!(decoded.to_rgb8().get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn render_rejects_oversized_padding() {
        let backend = RustBackend::new();
        let base = Raster::from_rgba(image::RgbaImage::new(4, 4));
        let params = RenderParams {
            padding: 90,
            ..RenderParams::resize(180, 180, ResizeFit::Cover, png())
        };
        assert!(matches!(
            backend.render(&base, &params),
            Err(BackendError::ProcessingFailed(_))
        ));
    }
}
