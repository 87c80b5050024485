//! Immutable image handle with value semantics.
//!
//! A [`Raster`] wraps a decoded image behind an `Arc`. Every transform borrows
//! the receiver and returns a new `Raster`, so one base icon can feed any number
//! of derived outputs without copies leaking between pipeline stages.

use super::backend::BackendError;
use super::calculations::{calculate_contain_dimensions, calculate_fill_dimensions, center_offset};
use super::params::{Color, EncodeOptions, Padding, ResizeFit};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::codecs::tiff::TiffEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader, RgbImage, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Raster(Arc<DynamicImage>);

impl Raster {
    /// Decode an image from disk, adding an alpha channel if it has none.
    pub fn open(path: &Path) -> Result<Self, BackendError> {
        let img = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to decode {}: {}",
                    path.display(),
                    e
                ))
            })?;
        Ok(Self::from_rgba(img.to_rgba8()))
    }

    pub fn from_rgba(img: RgbaImage) -> Self {
        Self(Arc::new(DynamicImage::ImageRgba8(img)))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.0.width(), self.0.height())
    }

    pub fn has_alpha(&self) -> bool {
        self.0.color().has_alpha()
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.0
    }

    /// Resize into a `width`x`height` box using `fit`.
    ///
    /// `background` fills the letterbox area for [`ResizeFit::Contain`].
    pub fn resize(&self, width: u32, height: u32, fit: ResizeFit, background: Color) -> Self {
        let source = self.0.to_rgba8();
        let out = match fit {
            ResizeFit::Fill => imageops::resize(&source, width, height, FilterType::Lanczos3),
            ResizeFit::Cover => {
                let (fill_w, fill_h) =
                    calculate_fill_dimensions(source.dimensions(), (width, height));
                let filled = imageops::resize(&source, fill_w, fill_h, FilterType::Lanczos3);
                let (x, y) = center_offset((fill_w, fill_h), (width, height));
                imageops::crop_imm(&filled, x, y, width, height).to_image()
            }
            ResizeFit::Contain => {
                let (fit_w, fit_h) =
                    calculate_contain_dimensions(source.dimensions(), (width, height));
                let fitted = imageops::resize(&source, fit_w, fit_h, FilterType::Lanczos3);
                let mut canvas = RgbaImage::from_pixel(width, height, background.to_rgba());
                let (x, y) = center_offset((width, height), (fit_w, fit_h));
                imageops::replace(&mut canvas, &fitted, x as i64, y as i64);
                canvas
            }
        };
        Self::from_rgba(out)
    }

    /// Add margins filled with `background` around the image.
    pub fn extend(&self, padding: Padding, background: Color) -> Self {
        let source = self.0.to_rgba8();
        let (w, h) = source.dimensions();
        let mut canvas = RgbaImage::from_pixel(
            w + padding.left + padding.right,
            h + padding.top + padding.bottom,
            background.to_rgba(),
        );
        imageops::replace(
            &mut canvas,
            &source,
            padding.left as i64,
            padding.top as i64,
        );
        Self::from_rgba(canvas)
    }

    /// Composite onto an opaque `background`, dropping the alpha channel.
    pub fn flatten(&self, background: Color) -> Self {
        let source = self.0.to_rgba8();
        let blend = |fg: u8, bg: u8, alpha: f32| {
            (fg as f32 * alpha + bg as f32 * (1.0 - alpha)).round() as u8
        };
        let out = RgbImage::from_fn(source.width(), source.height(), |x, y| {
            let [r, g, b, a] = source.get_pixel(x, y).0;
            let alpha = a as f32 / 255.0;
            image::Rgb([
                blend(r, background.r, alpha),
                blend(g, background.g, alpha),
                blend(b, background.b, alpha),
            ])
        });
        Self(Arc::new(DynamicImage::ImageRgb8(out)))
    }

    /// Encode to an in-memory buffer.
    pub fn encode(&self, options: &EncodeOptions) -> Result<Vec<u8>, BackendError> {
        let mut buf = Vec::new();
        let result = match options {
            EncodeOptions::Png(png) => {
                let compression = match png.compression_level {
                    0..=3 => CompressionType::Fast,
                    4..=6 => CompressionType::Default,
                    _ => CompressionType::Best,
                };
                let encoder =
                    PngEncoder::new_with_quality(&mut buf, compression, PngFilter::Adaptive);
                self.0.write_with_encoder(encoder)
            }
            EncodeOptions::WebP(_) => self.0.write_with_encoder(WebPEncoder::new_lossless(&mut buf)),
            EncodeOptions::Jpeg(jpeg) => {
                // JPEG has no alpha channel
                let rgb = DynamicImage::ImageRgb8(self.0.to_rgb8());
                let encoder = JpegEncoder::new_with_quality(&mut buf, jpeg.quality.value() as u8);
                rgb.write_with_encoder(encoder)
            }
            EncodeOptions::Tiff(_) => {
                self.0.write_with_encoder(TiffEncoder::new(Cursor::new(&mut buf)))
            }
        };
        result.map_err(|e| {
            BackendError::ProcessingFailed(format!("{} encode failed: {}", options.format(), e))
        })?;
        Ok(buf)
    }
}
