//! Shared test utilities for the pwa-assets test suite.
//!
//! Provides a throwaway project directory (base icon + HTML page), a minimal
//! options object, and a synthetic PNG writer.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_project("<html><head></head></html>");
//! let config = resolve_in(tmp.path(), &base_options());
//! assert_eq!(config.base_icon_name, "icon");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::{MetaConfig, ResolvedConfig, resolve};
use image::{Rgb, RgbImage};
use serde_json::{Value, json};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write an opaque RGB gradient PNG of the given size.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    });
    img.save(path).unwrap();
}

/// A temp directory with `icon.png` (64x64) and `index.html` holding `html`.
pub fn setup_project(html: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_test_png(&tmp.path().join("icon.png"), 64, 64);
    std::fs::write(tmp.path().join("index.html"), html).unwrap();
    tmp
}

/// Minimal valid options for a project created by [`setup_project`].
pub fn base_options() -> Value {
    json!({
        "name": "Weather",
        "insertInto": ["index.html"],
        "icons": { "baseIcon": "icon.png" }
    })
}

/// Resolve `options` against `dir` with base URL `/`.
pub fn resolve_in(dir: &Path, options: &Value) -> ResolvedConfig {
    resolve(options, &MetaConfig::new(dir, "/"), None).unwrap()
}
