//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! ==> Generating PWA assets
//! Generating 10 icons (5 sizes x 2 formats)
//!     done: default icons
//! Generating Apple touch icon
//!     done: Apple touch icon
//! ...
//! ==> Done
//!
//! Icons (9)
//!     apple-touch-icon.1a2b3c4d.png (12.3 KB)
//!     ...
//! Manifest: 2 icons → dist/manifest.webmanifest
//! Browser config → dist/browserconfig.xml
//! ```
//!
//! ## Check
//!
//! ```text
//! Weather (Wx)
//!     Base icon: icon.png
//!     Sizes: 96, 152, 192, 384, 512
//!     Formats: png, webp
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::config::ResolvedConfig;
use crate::generate::{Generation, GenerationEvent};
use std::path::Path;

const INDENT: &str = "    ";

/// Human-readable byte count.
fn format_bytes(len: usize) -> String {
    if len < 1024 {
        format!("{len} B")
    } else if len < 1024 * 1024 {
        format!("{:.1} KB", len as f64 / 1024.0)
    } else {
        format!("{:.1} MB", len as f64 / (1024.0 * 1024.0))
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format a single generation event as display lines.
pub fn format_generation_event(event: &GenerationEvent) -> Vec<String> {
    match event {
        GenerationEvent::Started => vec!["==> Generating PWA assets".to_string()],
        GenerationEvent::StageStarted { message, .. } => vec![message.clone()],
        GenerationEvent::StageFinished { stage } => vec![format!("{INDENT}done: {stage}")],
        GenerationEvent::Finished => vec!["==> Done".to_string()],
    }
}

/// Format the files produced by a run.
pub fn format_generation_summary(
    generation: &Generation,
    manifest_icons: usize,
    out_dir: &Path,
) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("Icons ({})", generation.generated_icons.len()));
    for (filename, bytes) in &generation.generated_icons {
        lines.push(format!(
            "{INDENT}{filename} ({})",
            format_bytes(bytes.len())
        ));
    }
    lines.push(format!(
        "Manifest: {manifest_icons} icons \u{2192} {}",
        out_dir.join(crate::manifest::MANIFEST_FILENAME).display()
    ));
    lines.push(format!(
        "Browser config \u{2192} {}",
        out_dir.join(crate::browserconfig::BROWSERCONFIG_FILENAME).display()
    ));
    lines
}

pub fn print_generation_summary(generation: &Generation, manifest_icons: usize, out_dir: &Path) {
    for line in format_generation_summary(generation, manifest_icons, out_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format a resolved config for `check`.
pub fn format_check_output(config: &ResolvedConfig) -> Vec<String> {
    let mut lines = Vec::new();
    if config.short_name == config.name {
        lines.push(config.name.clone());
    } else {
        lines.push(format!("{} ({})", config.name, config.short_name));
    }
    if config.disabled {
        lines.push(format!("{INDENT}Disabled: generation will be skipped"));
    }
    if !config.description.is_empty() {
        lines.push(format!("{INDENT}Description: {}", config.description));
    }
    lines.push(format!("{INDENT}Base icon: {}", config.base_icon.display()));

    let sizes: Vec<String> = config.sizes.iter().map(u32::to_string).collect();
    lines.push(format!("{INDENT}Sizes: {}", sizes.join(", ")));
    let formats: Vec<&str> = config.formats.iter().map(|f| f.format().key()).collect();
    lines.push(format!("{INDENT}Formats: {}", formats.join(", ")));
    lines.push(format!("{INDENT}Resize: {}", config.resize_fit.as_str()));
    lines.push(format!(
        "{INDENT}Favicons: {}",
        if config.gen_favicons { "yes" } else { "no" }
    ));
    lines.push(format!(
        "{INDENT}Apple touch icon: padding {}px",
        config.apple_touch_icon_padding
    ));
    lines.push(format!(
        "{INDENT}Colors: theme {}, tile {}",
        config.theme_color, config.ms_tile_color
    ));
    lines.push(format!("{INDENT}Fingerprint: {}", config.hash_method));
    lines.push(format!("{INDENT}Start URL: {}", config.start_url));

    lines.push("Inject into".to_string());
    for path in &config.insert_into {
        lines.push(format!("{INDENT}{}", path.display()));
    }
    if !config.extra.is_empty() {
        lines.push("Manifest extras".to_string());
        for (key, value) in &config.extra {
            lines.push(format!("{INDENT}{key}: {value}"));
        }
    }
    lines
}

pub fn print_check_output(config: &ResolvedConfig) {
    for line in format_check_output(config) {
        println!("{}", line);
    }
}
