//! Asset generation.
//!
//! [`PwaGenerator`] owns a resolved config, an [`ImageBackend`] and every
//! output of a run. `generate()` runs the stages in a fixed order:
//!
//! ```text
//! default icons → favicons (optional) → Apple touch icon → Microsoft tiles
//!              → manifest assembly → HTML injection
//! ```
//!
//! ## Outputs
//!
//! | Stage | Files | Side outputs |
//! |---|---|---|
//! | Default icons | `<base>-SxS.<fingerprint>.<format>` per size and format | manifest icon entries |
//! | Favicons | `favicon-32x32.*.png`, `favicon-16x16.*.png` | `<link rel="icon">` |
//! | Apple touch icon | `apple-touch-icon.*.png` (180x180, flattened) | `<link rel="apple-touch-icon">` |
//! | Microsoft tiles | `mstile-70x70`, `150x150`, `310x310`, `310x150` | `browserconfig.xml` logos |
//! | Manifest | (held in memory) | `<link rel="manifest">` |
//! | HTML | rewrites every `insertInto` file in place | |
//!
//! The only filesystem writes of the library are the HTML rewrites; icons,
//! the manifest and the browser config are returned for the host to publish
//! (see [`write_outputs`]).
//!
//! ## Events
//!
//! With [`PwaGenerator::with_events`], progress is sent over an `mpsc`
//! channel: `Started`, then `StageStarted`/`StageFinished` per stage, then
//! `Finished`. A disabled config produces no events.
//!
//! ## Parallelism
//!
//! Default icons are rendered with rayon. Results are collected in
//! (size, format) order, so filenames, icon entries and the manifest do not
//! depend on scheduling.

use crate::browserconfig::{BROWSERCONFIG_FILENAME, BrowserConfig};
use crate::config::{ConfigError, MetaConfig, ResolvedConfig, resolve};
use crate::fingerprint::{Fingerprinter, HashFunction, HashMethod};
use crate::html;
use crate::imaging::operations::{
    plan_apple_touch_icon, plan_favicons, plan_ms_tiles, plan_square_icon,
};
use crate::imaging::{BackendError, ImageBackend, Raster, RenderParams, RustBackend};
use crate::manifest::{MANIFEST_FILENAME, Manifest};
use crate::types::{GeneratedIcons, IconEntry};
use rayon::prelude::*;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("{stage} failed: {source}")]
    Encode { stage: Stage, source: BackendError },
    #[error("could not find <head> or </head> in {}", .0.display())]
    HeadNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A generation stage, as reported in events and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    DefaultIcons,
    Favicons,
    AppleTouchIcon,
    MsTiles,
    Html,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::DefaultIcons => "default icons",
            Stage::Favicons => "favicons",
            Stage::AppleTouchIcon => "Apple touch icon",
            Stage::MsTiles => "Microsoft tile icons",
            Stage::Html => "HTML injection",
        })
    }
}

/// Progress reported while generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationEvent {
    Started,
    StageStarted { stage: Stage, message: String },
    StageFinished { stage: Stage },
    Finished,
}

/// Result of one successful `generate()` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    /// Complete `browserconfig.xml` document.
    pub browser_config: String,
    pub generated_icons: GeneratedIcons,
}

#[derive(Debug)]
pub struct PwaGenerator<B: ImageBackend = RustBackend> {
    config: ResolvedConfig,
    backend: B,
    fingerprinter: Fingerprinter,
    events: Option<Sender<GenerationEvent>>,
    base: Option<Raster>,
    generated: GeneratedIcons,
    icons: Vec<IconEntry>,
    manifest: Option<Manifest>,
    html: String,
    browser_config: BrowserConfig,
}

impl PwaGenerator<RustBackend> {
    /// Resolve `raw` options and build a generator on the pure-Rust backend.
    pub fn new(
        raw: &Value,
        meta: &MetaConfig,
        fallback: Option<&Value>,
    ) -> Result<Self, ConfigError> {
        let config = resolve(raw, meta, fallback)?;
        Ok(Self::with_backend(config, RustBackend::new()))
    }
}

impl<B: ImageBackend> PwaGenerator<B> {
    pub fn with_backend(config: ResolvedConfig, backend: B) -> Self {
        let fingerprinter = Fingerprinter::new(config.hash_method);
        let browser_config = BrowserConfig::new(&config.ms_tile_color);
        let html = html::head_meta(&config.base_url, &config.theme_color);
        Self {
            config,
            backend,
            fingerprinter,
            events: None,
            base: None,
            generated: GeneratedIcons::new(),
            icons: Vec::new(),
            manifest: None,
            html,
            browser_config,
        }
    }

    pub fn with_events(mut self, events: Sender<GenerationEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn set_hash_method(&mut self, method: HashMethod) {
        self.fingerprinter.set_method(method);
    }

    pub fn set_hash_function(&mut self, hash: HashFunction) {
        self.fingerprinter.set_hash_function(hash);
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn base_icon_name(&self) -> &str {
        &self.config.base_icon_name
    }

    pub fn generated_icons(&self) -> &GeneratedIcons {
        &self.generated
    }

    /// Manifest icon entries accumulated by the default icon stage.
    pub fn icon_entries(&self) -> &[IconEntry] {
        &self.icons
    }

    /// `None` until [`gen_manifest`](Self::gen_manifest) has run.
    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    /// The fragment injected into HTML files.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// The complete `browserconfig.xml` document for the tiles generated so far.
    pub fn browser_config(&self) -> String {
        self.browser_config.to_xml()
    }

    fn emit(&self, event: GenerationEvent) {
        if let Some(tx) = &self.events {
            tx.send(event).ok();
        }
    }

    fn reset(&mut self) {
        self.base = None;
        self.generated.clear();
        self.icons.clear();
        self.manifest = None;
        self.html = html::head_meta(&self.config.base_url, &self.config.theme_color);
        self.browser_config = BrowserConfig::new(&self.config.ms_tile_color);
    }

    /// The decoded base icon, loaded on first use.
    fn base_icon(&mut self, stage: Stage) -> Result<Raster, GenerateError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        let base = self
            .backend
            .load(&self.config.base_icon)
            .map_err(|source| GenerateError::Encode { stage, source })?;
        self.base = Some(base.clone());
        Ok(base)
    }

    fn render_all(
        &mut self,
        stage: Stage,
        plans: &[RenderParams],
    ) -> Result<Vec<Vec<u8>>, GenerateError> {
        let base = self.base_icon(stage)?;
        let backend = &self.backend;
        plans
            .par_iter()
            .map(|params| backend.render(&base, params))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| GenerateError::Encode { stage, source })
    }

    /// Fingerprint and store an output; returns its public URL.
    fn store(&mut self, logical: &str, bytes: Vec<u8>) -> String {
        let filename = self.fingerprinter.apply(logical, &bytes);
        let src = format!("{}{}", self.config.base_url, filename);
        self.generated.insert(filename, bytes);
        src
    }

    /// One icon per configured size and format, listed in the manifest.
    pub fn gen_default_icons(&mut self) -> Result<(), GenerateError> {
        let stage = Stage::DefaultIcons;
        let fit = self.config.resize_fit;
        let formats = &self.config.formats;
        let plans: Vec<RenderParams> = self
            .config
            .sizes
            .iter()
            .flat_map(|&size| {
                formats
                    .iter()
                    .map(move |encode| plan_square_icon(size, fit, encode))
            })
            .collect();
        self.emit(GenerationEvent::StageStarted {
            stage,
            message: format!(
                "Generating {} icons ({} sizes x {} formats)",
                plans.len(),
                self.config.sizes.len(),
                self.config.formats.len()
            ),
        });

        let rendered = self.render_all(stage, &plans)?;
        for (params, bytes) in plans.iter().zip(rendered) {
            let format = params.encode.format();
            let sizes = format!("{}x{}", params.width, params.height);
            let logical = format!("{}-{}.{}", self.config.base_icon_name, sizes, format.key());
            let src = self.store(&logical, bytes);
            self.icons.push(IconEntry {
                src,
                sizes,
                mime_type: format.mime_type(),
            });
        }

        self.emit(GenerationEvent::StageFinished { stage });
        Ok(())
    }

    /// 32x32 and 16x16 PNG favicons.
    pub fn gen_favicons(&mut self) -> Result<(), GenerateError> {
        let stage = Stage::Favicons;
        self.emit(GenerationEvent::StageStarted {
            stage,
            message: "Generating favicons".to_string(),
        });

        let plans = plan_favicons(self.config.resize_fit, &self.config.png);
        let rendered = self.render_all(stage, &plans)?;
        for (params, bytes) in plans.iter().zip(rendered) {
            let sizes = format!("{}x{}", params.width, params.height);
            let src = self.store(&format!("favicon-{sizes}.png"), bytes);
            self.html.push_str(&html::favicon_link(&sizes, &src));
        }

        self.emit(GenerationEvent::StageFinished { stage });
        Ok(())
    }

    /// The padded, flattened 180x180 home-screen icon.
    pub fn gen_apple_touch_icon(&mut self) -> Result<(), GenerateError> {
        let stage = Stage::AppleTouchIcon;
        self.emit(GenerationEvent::StageStarted {
            stage,
            message: "Generating Apple touch icon".to_string(),
        });

        let params = plan_apple_touch_icon(
            self.config.resize_fit,
            self.config.apple_touch_icon_padding,
            self.config.apple_touch_icon_background,
            &self.config.png,
        )
        .ok_or_else(|| GenerateError::Encode {
            stage,
            source: BackendError::ProcessingFailed(format!(
                "padding of {}px leaves no room for the icon",
                self.config.apple_touch_icon_padding
            )),
        })?;
        let base = self.base_icon(stage)?;
        let bytes = self
            .backend
            .render(&base, &params)
            .map_err(|source| GenerateError::Encode { stage, source })?;
        let src = self.store("apple-touch-icon.png", bytes);
        self.html.push_str(&html::apple_touch_icon_link(&src));

        self.emit(GenerationEvent::StageFinished { stage });
        Ok(())
    }

    /// Square and wide Microsoft tiles, recorded in the browser config.
    pub fn gen_ms_tile_icons(&mut self) -> Result<(), GenerateError> {
        let stage = Stage::MsTiles;
        self.emit(GenerationEvent::StageStarted {
            stage,
            message: "Generating Microsoft tile icons".to_string(),
        });

        let plans = plan_ms_tiles(self.config.resize_fit, &self.config.png);
        let rendered = self.render_all(stage, &plans)?;
        for (params, bytes) in plans.iter().zip(rendered) {
            let logical = format!("mstile-{}x{}.png", params.width, params.height);
            let src = self.store(&logical, bytes);
            self.browser_config
                .push_logo(params.width, params.height, &src);
        }

        self.emit(GenerationEvent::StageFinished { stage });
        Ok(())
    }

    /// Assemble the manifest from the icon entries gathered so far.
    pub fn gen_manifest(&mut self) {
        self.manifest = Some(Manifest::assemble(&self.config, self.icons.clone()));
        let link = html::manifest_link(&self.config.base_url);
        if !self.html.contains(&link) {
            self.html.push_str(&link);
        }
    }

    /// Rewrite every target HTML file with the current fragment.
    pub fn inject_html(&mut self) -> Result<(), GenerateError> {
        let stage = Stage::Html;
        self.emit(GenerationEvent::StageStarted {
            stage,
            message: format!("Injecting HTML into {} files", self.config.insert_into.len()),
        });

        for path in &self.config.insert_into {
            let document = fs::read_to_string(path)?;
            let updated = html::inject(&document, &self.html)
                .ok_or_else(|| GenerateError::HeadNotFound(path.clone()))?;
            fs::write(path, updated)?;
        }

        self.emit(GenerationEvent::StageFinished { stage });
        Ok(())
    }

    /// Run every stage. Returns `Ok(None)` without doing anything when disabled.
    ///
    /// All previous outputs are discarded first, so the result reflects exactly
    /// this run. On error, partial outputs remain readable but are incomplete.
    pub fn generate(&mut self) -> Result<Option<Generation>, GenerateError> {
        if self.config.disabled {
            return Ok(None);
        }
        self.reset();
        self.emit(GenerationEvent::Started);

        self.gen_default_icons()?;
        if self.config.gen_favicons {
            self.gen_favicons()?;
        }
        self.gen_apple_touch_icon()?;
        self.gen_ms_tile_icons()?;
        self.gen_manifest();
        self.inject_html()?;

        self.emit(GenerationEvent::Finished);
        Ok(Some(Generation {
            browser_config: self.browser_config.to_xml(),
            generated_icons: self.generated.clone(),
        }))
    }
}

/// Publish a generation into `out_dir`: every icon, the manifest and the
/// browser config. Returns the written paths, icons first.
pub fn write_outputs(
    out_dir: &Path,
    generation: &Generation,
    manifest: &Manifest,
) -> Result<Vec<PathBuf>, GenerateError> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(generation.generated_icons.len() + 2);
    for (filename, bytes) in &generation.generated_icons {
        let path = out_dir.join(filename);
        fs::write(&path, bytes)?;
        written.push(path);
    }

    let manifest_path = out_dir.join(MANIFEST_FILENAME);
    fs::write(&manifest_path, manifest.to_json_pretty()?)?;
    written.push(manifest_path);

    let browserconfig_path = out_dir.join(BROWSERCONFIG_FILENAME);
    fs::write(&browserconfig_path, &generation.browser_config)?;
    written.push(browserconfig_path);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::imaging::{Color, OutputFormat, ResizeFit};
    use crate::test_helpers::{base_options, resolve_in, setup_project};
    use serde_json::json;
    use std::sync::mpsc;
    use tempfile::TempDir;

    const HTML: &str = "<html><head><title>t</title></head><body></body></html>";

    fn generator(options: Value) -> (TempDir, PwaGenerator<MockBackend>) {
        let tmp = setup_project(HTML);
        let config = resolve_in(tmp.path(), &options);
        (tmp, PwaGenerator::with_backend(config, MockBackend::new()))
    }

    fn nine_icon_options() -> Value {
        let mut options = base_options();
        options["icons"]["sizes"] = json!([192, 512]);
        options["icons"]["formats"] = json!({ "png": {} });
        options["icons"]["genFavicons"] = json!(true);
        options
    }

    fn render_sizes(backend: &MockBackend) -> Vec<(u32, u32, OutputFormat)> {
        backend
            .renders()
            .into_iter()
            .filter_map(|op| match op {
                RecordedOp::Render {
                    width,
                    height,
                    format,
                    ..
                } => Some((width, height, format)),
                _ => None,
            })
            .collect()
    }

    // =========================================================================
    // Full run
    // =========================================================================

    #[test]
    fn full_run_produces_nine_icons() {
        let (_tmp, mut generator) = generator(nine_icon_options());
        let generation = generator.generate().unwrap().unwrap();

        assert_eq!(generation.generated_icons.len(), 9);
        let names: Vec<&String> = generation.generated_icons.keys().collect();
        for prefix in [
            "icon-192x192.",
            "icon-512x512.",
            "favicon-32x32.",
            "favicon-16x16.",
            "apple-touch-icon.",
            "mstile-70x70.",
            "mstile-150x150.",
            "mstile-310x310.",
            "mstile-310x150.",
        ] {
            assert!(
                names.iter().any(|n| n.starts_with(prefix) && n.ends_with(".png")),
                "missing {prefix} in {names:?}"
            );
        }

        let manifest = generator.manifest().unwrap();
        let sizes: Vec<&str> = manifest.icons.iter().map(|i| i.sizes.as_str()).collect();
        assert_eq!(sizes, vec!["192x192", "512x512"]);
    }

    #[test]
    fn stages_render_in_order() {
        let (_tmp, mut generator) = generator(nine_icon_options());
        generator.generate().unwrap();

        // Stages run one after another; renders within a stage may interleave
        let renders = render_sizes(&generator.backend);
        let stages: Vec<Vec<(u32, u32, OutputFormat)>> = [2, 2, 1, 4]
            .iter()
            .scan(0, |start, &len| {
                let mut stage = renders[*start..*start + len].to_vec();
                stage.sort_by_key(|&(width, height, _)| (width, height));
                *start += len;
                Some(stage)
            })
            .collect();
        assert_eq!(renders.len(), 9);
        assert_eq!(
            stages,
            vec![
                vec![(192, 192, OutputFormat::Png), (512, 512, OutputFormat::Png)],
                vec![(16, 16, OutputFormat::Png), (32, 32, OutputFormat::Png)],
                vec![(180, 180, OutputFormat::Png)],
                vec![
                    (70, 70, OutputFormat::Png),
                    (150, 150, OutputFormat::Png),
                    (310, 150, OutputFormat::Png),
                    (310, 310, OutputFormat::Png),
                ],
            ]
        );

        // Output order is fixed by the plan, not by render completion
        let sizes: Vec<&str> = generator
            .icon_entries()
            .iter()
            .map(|e| e.sizes.as_str())
            .collect();
        assert_eq!(sizes, vec!["192x192", "512x512"]);
        let xml = generator.browser_config();
        let tiles: Vec<usize> = [
            "square70x70logo",
            "square150x150logo",
            "square310x310logo",
            "wide310x150logo",
        ]
        .iter()
        .map(|tag| xml.find(tag).unwrap())
        .collect();
        assert!(tiles.windows(2).all(|pair| pair[0] < pair[1]));

        let loads = generator
            .backend
            .get_operations()
            .into_iter()
            .filter(|op| matches!(op, RecordedOp::Load(_)))
            .count();
        assert_eq!(loads, 1);
    }

    #[test]
    fn default_icons_iterate_sizes_then_formats() {
        let mut options = base_options();
        options["icons"]["sizes"] = json!([96]);
        options["icons"]["formats"] = json!({ "webp": {}, "png": {} });
        let (_tmp, mut generator) = generator(options);
        generator.gen_default_icons().unwrap();

        let entries: Vec<(&str, &str)> = generator
            .icon_entries()
            .iter()
            .map(|e| (e.sizes.as_str(), e.mime_type.as_str()))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("96x96", "image/png"),
                ("96x96", "image/webp"),
                ("192x192", "image/png"),
                ("192x192", "image/webp"),
                ("512x512", "image/png"),
                ("512x512", "image/webp"),
            ]
        );
    }

    #[test]
    fn apple_touch_icon_uses_padding_and_background() {
        let mut options = base_options();
        options["icons"]["atip"] = json!(20);
        options["icons"]["atib"] = json!("#000");
        let (_tmp, mut generator) = generator(options);
        generator.gen_apple_touch_icon().unwrap();

        let renders = generator.backend.renders();
        assert_eq!(
            renders,
            vec![RecordedOp::Render {
                width: 180,
                height: 180,
                fit: ResizeFit::Cover,
                padding: 20,
                background: Some(Color::rgba(0, 0, 0, 255)),
                format: OutputFormat::Png,
            }]
        );
        assert!(generator.html().contains(r#"<link rel="apple-touch-icon" sizes="180x180""#));
    }

    #[test]
    fn favicons_skipped_unless_enabled() {
        let (_tmp, mut generator) = generator(base_options());
        generator.generate().unwrap();
        assert!(!generator
            .generated_icons()
            .keys()
            .any(|name| name.starts_with("favicon-")));
        assert!(!generator.html().contains(r#"rel="icon""#));
    }

    // =========================================================================
    // Fingerprints and URLs
    // =========================================================================

    #[test]
    fn icon_urls_use_base_url_and_fingerprint() {
        let tmp = setup_project(HTML);
        let mut config = resolve_in(tmp.path(), &base_options());
        config.base_url = "/app/".into();
        let mut generator = PwaGenerator::with_backend(config, MockBackend::new());
        generator.set_hash_method(HashMethod::None);
        generator.gen_ms_tile_icons().unwrap();

        assert!(generator.generated_icons().contains_key("mstile-70x70.png"));
        assert!(generator
            .browser_config()
            .contains(r#"<square70x70logo src="/app/mstile-70x70.png"/>"#));
        assert!(generator
            .browser_config()
            .contains(r#"<wide310x150logo src="/app/mstile-310x150.png"/>"#));
    }

    #[test]
    fn custom_hash_function_is_used() {
        let (_tmp, mut generator) = generator(base_options());
        generator.set_hash_function(Box::new(|_: &[u8]| "deadbeefcafef00d".to_string()));
        generator.gen_apple_touch_icon().unwrap();
        assert!(generator
            .generated_icons()
            .contains_key("apple-touch-icon.cafef00d.png"));
    }

    #[test]
    fn name_fingerprints_are_stable_across_runs() {
        let (_tmp, mut generator) = generator(base_options());
        let first = generator.generate().unwrap().unwrap();
        let second = generator.generate().unwrap().unwrap();
        assert_eq!(
            first.generated_icons.keys().collect::<Vec<_>>(),
            second.generated_icons.keys().collect::<Vec<_>>()
        );
    }

    // =========================================================================
    // Events
    // =========================================================================

    #[test]
    fn events_bracket_every_stage() {
        let (_tmp, generator) = generator(nine_icon_options());
        let (tx, rx) = mpsc::channel();
        let mut generator = generator.with_events(tx);
        generator.generate().unwrap();

        let events: Vec<GenerationEvent> = rx.try_iter().collect();
        assert_eq!(events.first(), Some(&GenerationEvent::Started));
        assert_eq!(events.last(), Some(&GenerationEvent::Finished));

        let stages: Vec<(bool, Stage)> = events
            .iter()
            .filter_map(|e| match e {
                GenerationEvent::StageStarted { stage, .. } => Some((true, *stage)),
                GenerationEvent::StageFinished { stage } => Some((false, *stage)),
                _ => None,
            })
            .collect();
        let mut expected = Vec::new();
        for stage in [
            Stage::DefaultIcons,
            Stage::Favicons,
            Stage::AppleTouchIcon,
            Stage::MsTiles,
            Stage::Html,
        ] {
            expected.push((true, stage));
            expected.push((false, stage));
        }
        assert_eq!(stages, expected);
    }

    #[test]
    fn favicon_events_absent_when_disabled() {
        let (_tmp, generator) = generator(base_options());
        let (tx, rx) = mpsc::channel();
        let mut generator = generator.with_events(tx);
        generator.generate().unwrap();
        assert!(!rx.try_iter().any(|e| matches!(
            e,
            GenerationEvent::StageStarted {
                stage: Stage::Favicons,
                ..
            }
        )));
    }

    // =========================================================================
    // Disabled and failure paths
    // =========================================================================

    #[test]
    fn disabled_does_nothing() {
        let mut options = base_options();
        options["disabled"] = json!(true);
        let (tmp, generator) = generator(options);
        let (tx, rx) = mpsc::channel();
        let mut generator = generator.with_events(tx);

        assert_eq!(generator.generate().unwrap(), None);
        assert!(generator.backend.get_operations().is_empty());
        assert_eq!(rx.try_iter().count(), 0);
        assert_eq!(fs::read_to_string(tmp.path().join("index.html")).unwrap(), HTML);
    }

    #[test]
    fn encode_failure_names_the_stage() {
        let tmp = setup_project(HTML);
        let config = resolve_in(tmp.path(), &base_options());
        let mut generator = PwaGenerator::with_backend(config, MockBackend::failing_at(70, 70));

        let err = generator.generate().unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Encode {
                stage: Stage::MsTiles,
                ..
            }
        ));
        assert!(err.to_string().starts_with("Microsoft tile icons failed"));
        // HTML injection never ran
        assert_eq!(fs::read_to_string(tmp.path().join("index.html")).unwrap(), HTML);
    }

    #[test]
    fn missing_head_is_reported() {
        let tmp = setup_project("<html><body></body></html>");
        let config = resolve_in(tmp.path(), &base_options());
        let mut generator = PwaGenerator::with_backend(config, MockBackend::new());

        match generator.generate() {
            Err(GenerateError::HeadNotFound(path)) => {
                assert_eq!(path, tmp.path().join("index.html"))
            }
            other => panic!("expected HeadNotFound, got {other:?}"),
        }
    }

    // =========================================================================
    // HTML and manifest
    // =========================================================================

    #[test]
    fn html_fragment_order() {
        let (_tmp, mut generator) = generator(nine_icon_options());
        generator.generate().unwrap();
        let fragment = generator.html();

        let positions: Vec<usize> = [
            r#"<meta name="msapplication-config""#,
            r#"<meta name="theme-color""#,
            r#"<link rel="icon" sizes="32x32""#,
            r#"<link rel="icon" sizes="16x16""#,
            r#"<link rel="apple-touch-icon""#,
            r#"<link rel="manifest""#,
        ]
        .iter()
        .map(|tag| fragment.find(tag).unwrap_or_else(|| panic!("missing {tag}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn injection_is_idempotent_across_runs() {
        let (tmp, mut generator) = generator(nine_icon_options());
        generator.generate().unwrap();
        let once = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        generator.generate().unwrap();
        let twice = fs::read_to_string(tmp.path().join("index.html")).unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice.matches(r#"rel="manifest""#).count(), 1);
        assert!(twice.starts_with("<html><head><meta name=\"msapplication-config\""));
    }

    #[test]
    fn gen_manifest_is_idempotent() {
        let (_tmp, mut generator) = generator(base_options());
        generator.gen_default_icons().unwrap();
        generator.gen_manifest();
        let first = generator.manifest().cloned();
        generator.gen_manifest();
        assert_eq!(generator.manifest().cloned(), first);
        assert_eq!(generator.html().matches(r#"rel="manifest""#).count(), 1);
    }

    #[test]
    fn write_outputs_publishes_everything() {
        let (_tmp, mut generator) = generator(nine_icon_options());
        let generation = generator.generate().unwrap().unwrap();
        let out = TempDir::new().unwrap();

        let written = write_outputs(out.path(), &generation, generator.manifest().unwrap()).unwrap();
        assert_eq!(written.len(), 11);
        let manifest: Value =
            serde_json::from_str(&fs::read_to_string(out.path().join(MANIFEST_FILENAME)).unwrap())
                .unwrap();
        assert_eq!(manifest["name"], "Weather");
        assert_eq!(
            fs::read_to_string(out.path().join(BROWSERCONFIG_FILENAME)).unwrap(),
            generation.browser_config
        );
    }
}
