//! # pwa-assets
//!
//! Generates Progressive Web App assets from one base icon and a configuration
//! block: default icons in several sizes and formats, favicons, an Apple touch
//! icon, Microsoft tiles, a web app manifest and a `browserconfig.xml`. It then
//! injects the matching `<link>`/`<meta>` tags into existing HTML files.
//!
//! # Pipeline
//!
//! ```text
//! raw options ──resolve──▶ ResolvedConfig ──PwaGenerator::generate──▶ Generation
//!                                              │
//!                                              ├─ icons (filename → bytes)
//!                                              ├─ manifest.webmanifest
//!                                              ├─ browserconfig.xml
//!                                              └─ HTML files rewritten in place
//! ```
//!
//! The library never writes icons itself; a host (a bundler, or the bundled
//! `pwa-assets` CLI) publishes the returned outputs.
//!
//! ```no_run
//! use pwa_assets::config::MetaConfig;
//! use pwa_assets::generate::{PwaGenerator, write_outputs};
//! use serde_json::json;
//! use std::path::Path;
//!
//! let options = json!({
//!     "name": "Weather",
//!     "insertInto": ["index.html"],
//!     "icons": { "baseIcon": "icon.png", "genFavicons": true }
//! });
//! let meta = MetaConfig::new("site", "/");
//! let mut generator = PwaGenerator::new(&options, &meta, None)?;
//! if let Some(generation) = generator.generate()? {
//!     let manifest = generator.manifest().expect("manifest assembled");
//!     write_outputs(Path::new("site/dist"), &generation, manifest)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Option resolution: synonym keys, defaults, validation, config file loading |
//! | [`fingerprint`] | Name/content/none filename fingerprints with a swappable hash |
//! | [`imaging`] | Pure-Rust image operations: resize with fit, pad, flatten, encode |
//! | [`generate`] | `PwaGenerator`: icon stages, events, HTML injection |
//! | [`manifest`] | Web app manifest assembly with ordered keys |
//! | [`browserconfig`] | Microsoft tile XML |
//! | [`html`] | Maud-rendered head fragments and tag strip/insert |
//! | [`types`] | Shared types (`IconEntry`, `GeneratedIcons`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Deterministic Output
//!
//! Name-based fingerprints depend only on the logical filename, manifest keys
//! keep insertion order, and parallel renders are collected in plan order.
//! Two runs with equal inputs produce byte-identical manifests and identical
//! filenames.
//!
//! ## Idempotent Injection
//!
//! Before inserting, every tag this crate owns is stripped from the target
//! file. Running the generator on every build never accumulates duplicate
//! `<link rel="manifest">` or theme-color tags.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resizing and encoding use the `image` crate only. The binary has
//! no system dependencies.

pub mod browserconfig;
pub mod config;
pub mod fingerprint;
pub mod generate;
pub mod html;
pub mod imaging;
pub mod manifest;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
