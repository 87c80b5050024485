//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the pipeline in [`generate`](crate::generate) (which
//! decides which icons to create) and the [`backend`](super::backend) (which
//! does the actual pixel work). This separation allows swapping backends
//! (e.g. for testing with a mock) without changing pipeline logic.
//!
//! ## Types
//!
//! - [`ResizeFit`]: How the aspect ratio is reconciled with the target box.
//! - [`Color`]: RGBA color parsed from a CSS color string.
//! - [`Padding`]: Per-side margins added around an image.
//! - [`Quality`]: Lossy encoding quality (1–100). Clamped on construction.
//! - [`OutputFormat`] / [`EncodeOptions`]: Output codec plus its options.
//! - [`RenderParams`]: Full description of one output icon.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resize policy: crop-to-fill, letterbox, or stretch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFit {
    /// Scale to cover the box, then center-crop the overflow.
    #[default]
    Cover,
    /// Scale to fit inside the box, letterboxed on the background.
    Contain,
    /// Stretch to the exact box, ignoring aspect ratio.
    Fill,
}

impl ResizeFit {
    pub const ALL: [&'static str; 3] = ["cover", "contain", "fill"];

    pub fn as_str(self) -> &'static str {
        match self {
            ResizeFit::Cover => "cover",
            ResizeFit::Contain => "contain",
            ResizeFit::Fill => "fill",
        }
    }
}

impl FromStr for ResizeFit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cover" => Ok(ResizeFit::Cover),
            "contain" => Ok(ResizeFit::Contain),
            "fill" => Ok(ResizeFit::Fill),
            _ => Err(()),
        }
    }
}

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any CSS color: hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`, `hwb()`,
    /// space- or comma-separated arguments, percentages, `transparent`, and
    /// the full set of named colors.
    ///
    /// Returns `None` for anything else.
    pub fn parse(input: &str) -> Option<Self> {
        let [r, g, b, a] = csscolorparser::parse(&input.trim().to_ascii_lowercase())
            .ok()?
            .to_rgba8();
        Some(Self::rgba(r, g, b, a))
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

/// Margins added on each side of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Padding {
    pub fn uniform(px: u32) -> Self {
        Self {
            top: px,
            bottom: px,
            left: px,
            right: px,
        }
    }
}

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

impl From<u32> for Quality {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<Quality> for u32 {
    fn from(q: Quality) -> Self {
        q.0
    }
}

/// Output codec for a generated icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Png,
    WebP,
    Jpeg,
    Tiff,
}

impl OutputFormat {
    /// Format keys accepted in the `formats` option, in canonical order.
    pub const KEYS: [&'static str; 4] = ["png", "webp", "jpeg", "tiff"];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "png" => Some(OutputFormat::Png),
            "webp" => Some(OutputFormat::WebP),
            "jpeg" => Some(OutputFormat::Jpeg),
            "tiff" => Some(OutputFormat::Tiff),
            _ => None,
        }
    }

    /// Option key, also used as the file extension.
    pub fn key(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Tiff => "tiff",
        }
    }

    pub fn mime_type(self) -> String {
        format!("image/{}", self.key())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// PNG options. `compressionLevel` follows zlib's 0-9 scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct PngOptions {
    pub compression_level: u8,
}

impl Default for PngOptions {
    fn default() -> Self {
        Self {
            compression_level: 9,
        }
    }
}

/// WebP options.
///
/// The pure-Rust encoder writes lossless WebP only, so config resolution
/// rejects `lossless: false`. `quality` and `effort` are accepted for config
/// compatibility and have no effect on the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct WebpOptions {
    pub quality: Quality,
    #[serde(alias = "reductionEffort")]
    pub effort: u8,
    pub lossless: bool,
}

impl Default for WebpOptions {
    fn default() -> Self {
        Self {
            quality: Quality::new(60),
            effort: 6,
            lossless: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct JpegOptions {
    pub quality: Quality,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TiffOptions {}

/// An output format together with its encoder options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeOptions {
    Png(PngOptions),
    WebP(WebpOptions),
    Jpeg(JpegOptions),
    Tiff(TiffOptions),
}

impl EncodeOptions {
    pub fn format(&self) -> OutputFormat {
        match self {
            EncodeOptions::Png(_) => OutputFormat::Png,
            EncodeOptions::WebP(_) => OutputFormat::WebP,
            EncodeOptions::Jpeg(_) => OutputFormat::Jpeg,
            EncodeOptions::Tiff(_) => OutputFormat::Tiff,
        }
    }
}

/// Full description of one rendered icon.
///
/// The base image is resized into the box left after removing `padding` from
/// each side of `width`x`height`, extended back to `width`x`height` with
/// transparent margins, optionally flattened onto `background`, then encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub width: u32,
    pub height: u32,
    pub fit: ResizeFit,
    pub padding: u32,
    /// Flatten onto this color, removing alpha.
    pub background: Option<Color>,
    pub encode: EncodeOptions,
}

impl RenderParams {
    /// A plain resize + encode with no padding or flattening.
    pub fn resize(width: u32, height: u32, fit: ResizeFit, encode: EncodeOptions) -> Self {
        Self {
            width,
            height,
            fit,
            padding: 0,
            background: None,
            encode,
        }
    }
}
