//! Option resolution.
//!
//! Turns a loosely-specified configuration object into an immutable
//! [`ResolvedConfig`]. Most options accept several spellings; the first present
//! synonym wins, JSON `null` counts as absent, and resolution stops at the first
//! invalid field.
//!
//! ## Config File
//!
//! The CLI reads `pwa.toml` (or any JSON file, e.g. a `package.json` with a
//! `pwaManifest` block):
//!
//! ```toml
//! name = "Weather"
//! themeColor = "#336699"
//! insertInto = ["index.html"]
//!
//! [icons]
//! baseIcon = "icon.png"
//! sizes = [96, 152, 192, 384, 512]
//! resizeMethod = "cover"          # cover | contain | fill
//! appleTouchIconPadding = 12
//! genFavicons = true
//!
//! [icons.formats.png]
//! compressionLevel = 9
//!
//! [production]                    # merged over the top level when the environment is "production"
//! hashMethod = "content"
//! ```
//!
//! ## Lookup Order
//!
//! 1. The environment-specific sub-object (keyed by the lower-cased environment
//!    name) is shallow-merged over the top level.
//! 2. Each synonym of a field is tried in order.
//! 3. The fallback document (the whole `package.json`) is consulted under the
//!    field's first synonym.
//! 4. The field's default applies; fields without one are required.
//!
//! Manifest extras (`display`, `lang`, ...) are looked up in the options object
//! only and are emitted under their canonical key.

use crate::fingerprint::HashMethod;
use crate::imaging::operations::max_apple_touch_icon_padding;
use crate::imaging::{
    Color, EncodeOptions, JpegOptions, OutputFormat, PngOptions, ResizeFit, TiffOptions,
    WebpOptions,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("PWA options must be an object containing the desired parameters")]
    NotAnObject,
    #[error("no \"{key}\" block found in {}", .path.display())]
    KeyNotFound { key: String, path: PathBuf },
    #[error("missing required option \"{field}\"")]
    Missing { field: &'static str },
    #[error("invalid option \"{field}\": {reason}")]
    Invalid { field: String, reason: String },
    #[error("option \"{field}\" points to {}, which does not exist", .path.display())]
    MissingFile { field: &'static str, path: PathBuf },
}

fn invalid(field: impl Into<String>, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.into(),
        reason: reason.into(),
    }
}

/// Context supplied by the host rather than the options object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaConfig {
    /// Relative paths (`insertInto`, `baseIcon`) resolve against this directory.
    pub resolve_dir: PathBuf,
    /// Public URL prefix, e.g. `"/"` or `"/app/"`.
    pub base_url: String,
    /// Build environment, e.g. `"production"`.
    pub environment: Option<String>,
}

impl MetaConfig {
    pub fn new(resolve_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            resolve_dir: resolve_dir.into(),
            base_url: base_url.into(),
            environment: None,
        }
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }
}

/// Fully validated options. Immutable after [`resolve`].
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub disabled: bool,
    /// Absolute HTML files to inject into; all exist at resolution time.
    pub insert_into: Vec<PathBuf>,
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub scope: String,
    pub theme_color: String,
    pub ms_tile_color: String,
    pub base_url: String,
    pub base_icon: PathBuf,
    /// File stem of the base icon; prefix of every default icon filename.
    pub base_icon_name: String,
    /// Deduplicated, always containing 192 and 512.
    pub sizes: Vec<u32>,
    /// One entry per format; PNG always present.
    pub formats: Vec<EncodeOptions>,
    /// PNG options shared by favicons, the Apple touch icon and tiles.
    pub png: PngOptions,
    pub resize_fit: ResizeFit,
    pub apple_touch_icon_background: Color,
    pub apple_touch_icon_padding: u32,
    pub gen_favicons: bool,
    pub hash_method: HashMethod,
    /// Manifest fields beyond the identity fields, in emission order.
    pub extra: Map<String, Value>,
}

// =============================================================================
// Synonym tables
// =============================================================================

const DISABLED: &[&str] = &["disable", "disabled"];
const INSERT_INTO: &[&str] = &["insertInto", "insert-into"];
const NAME: &[&str] = &["name"];
const SHORT_NAME: &[&str] = &["shortName", "short-name", "short_name"];
const DESCRIPTION: &[&str] = &["description", "desc"];
const START_URL: &[&str] = &["startURL", "startUrl", "start-url", "start_url"];
const SCOPE: &[&str] = &["scope"];
const THEME_COLOR: &[&str] = &["themeColor", "theme-color", "theme_color", "theme"];
const HASH_METHOD: &[&str] = &["hashMethod", "hash-method", "fingerprint"];
const ICON_OPTIONS: &[&str] = &[
    "genIcon",
    "gen-icon",
    "iconGen",
    "icon-gen",
    "genIconOpts",
    "gen-icon-opts",
    "iconGenOpts",
    "icon-gen-opts",
    "generateIconOptions",
    "generate-icon-options",
    "iconGenerationOptions",
    "icon-generation-options",
    "icons",
];

const MS_TILE_COLOR: &[&str] = &[
    "msTileColor",
    "ms-tile-color",
    "microsoftTileColor",
    "microsoft-tile-color",
];
const BASE_ICON: &[&str] = &["baseIcon", "base-icon", "fromIcon", "from-icon"];
const SIZES: &[&str] = &["sizes", "sizeList", "size-list"];
const FORMATS: &[&str] = &["formats", "formatList", "format-list"];
const RESIZE_METHOD: &[&str] = &["resizeMethod", "resize-method", "resize"];
const APPLE_TOUCH_ICON_BG: &[&str] = &[
    "appleTouchIconBG",
    "appleTouchIconBg",
    "apple-touch-icon-bg",
    "appleTouchIconBackground",
    "apple-touch-icon-background",
    "atib",
];
const APPLE_TOUCH_ICON_PADDING: &[&str] =
    &["appleTouchIconPadding", "apple-touch-icon-padding", "atip"];
const GEN_FAVICONS: &[&str] = &[
    "genFavicons",
    "gen-favicons",
    "generateFavicons",
    "generate-favicons",
];

const INCLUDE: &[&str] = &["include", "includeParams", "include-params"];

pub const DEFAULT_SIZES: [u32; 5] = [96, 152, 192, 384, 512];
const REQUIRED_SIZES: [u32; 2] = [192, 512];
const DEFAULT_THEME_COLOR: &str = "white";
const DEFAULT_APPLE_TOUCH_ICON_PADDING: u32 = 12;
const MAX_PNG_COMPRESSION: u8 = 9;

/// Validation applied to a manifest extra.
enum Check {
    Str,
    Bool,
    StrArray,
    OneOf(&'static [&'static str]),
    /// Array of objects, each carrying the named key.
    ObjectsWith(&'static str),
    /// Object carrying the named key.
    ObjectWith(&'static str),
}

impl Check {
    fn validate(&self, value: &Value) -> Result<(), String> {
        let ok = match self {
            Check::Str => value.is_string(),
            Check::Bool => value.is_boolean(),
            Check::StrArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            Check::OneOf(choices) => value.as_str().is_some_and(|s| choices.contains(&s)),
            Check::ObjectsWith(key) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|item| has_key(item, key))),
            Check::ObjectWith(key) => has_key(value, key),
        };
        if ok {
            return Ok(());
        }
        Err(match self {
            Check::Str => "must be a string".to_string(),
            Check::Bool => "must be a boolean".to_string(),
            Check::StrArray => "must be an array of strings".to_string(),
            Check::OneOf(choices) => format!("must be one of: {}", choices.join(", ")),
            Check::ObjectsWith(key) => {
                format!("must be an array of objects, each with a \"{key}\" key")
            }
            Check::ObjectWith(key) => format!("must be an object with a \"{key}\" key"),
        })
    }
}

fn has_key(value: &Value, key: &str) -> bool {
    value.as_object().is_some_and(|obj| obj.contains_key(key))
}

enum ExtraDefault {
    None,
    ThemeColor,
    Literal(&'static str),
}

struct ExtraField {
    keys: &'static [&'static str],
    check: Check,
    default: ExtraDefault,
}

const EXTRA_FIELDS: &[ExtraField] = &[
    ExtraField {
        keys: &[
            "background_color",
            "backgroundColor",
            "background-color",
            "bgColor",
            "bg-color",
            "bg",
        ],
        check: Check::Str,
        default: ExtraDefault::ThemeColor,
    },
    ExtraField {
        keys: &["categories"],
        check: Check::StrArray,
        default: ExtraDefault::None,
    },
    ExtraField {
        keys: &["dir", "direction", "textDirection", "text-direction"],
        check: Check::OneOf(&["rtl", "ltr", "auto"]),
        default: ExtraDefault::None,
    },
    ExtraField {
        keys: &["display", "displayMode", "display-mode"],
        check: Check::OneOf(&["standalone", "minimal-ui", "fullscreen", "browser"]),
        default: ExtraDefault::Literal("standalone"),
    },
    ExtraField {
        keys: &[
            "iarc_rating_id",
            "iarc",
            "iarcId",
            "iarcID",
            "iarc-id",
            "iarcRatingId",
            "iarcRatingID",
            "iarc-rating-id",
            "iarcRating",
            "iarc-rating",
        ],
        check: Check::Str,
        default: ExtraDefault::None,
    },
    ExtraField {
        keys: &["lang", "language"],
        check: Check::Str,
        default: ExtraDefault::None,
    },
    ExtraField {
        keys: &[
            "orientation",
            "rotated",
            "screenOrientation",
            "screen-orientation",
        ],
        check: Check::OneOf(&[
            "any",
            "natural",
            "landscape",
            "landscape-primary",
            "landscape-secondary",
            "portrait",
            "portrait-primary",
            "portrait-secondary",
        ]),
        default: ExtraDefault::None,
    },
    ExtraField {
        keys: &[
            "prefer_related_applications",
            "preferRelated",
            "prefer-related",
            "preferRelatedApplications",
            "prefer-related-applications",
        ],
        check: Check::Bool,
        default: ExtraDefault::None,
    },
    ExtraField {
        keys: &[
            "related_applications",
            "related",
            "relatedApplications",
            "related-applications",
        ],
        check: Check::ObjectsWith("url"),
        default: ExtraDefault::None,
    },
    ExtraField {
        keys: &["screenshots", "screenShots", "screen-shots"],
        check: Check::ObjectsWith("src"),
        default: ExtraDefault::None,
    },
    ExtraField {
        keys: &["serviceworker", "sw", "serviceWorker", "service-worker"],
        check: Check::ObjectWith("src"),
        default: ExtraDefault::None,
    },
];

// =============================================================================
// Lookup
// =============================================================================

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// An options object plus the fallback document consulted for absent fields.
struct Options<'a> {
    map: &'a Map<String, Value>,
    fallback: Option<&'a Map<String, Value>>,
}

impl<'a> Options<'a> {
    fn get(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .find_map(|key| present(self.map.get(*key)))
            .or_else(|| {
                let fallback = self.fallback?;
                present(fallback.get(*keys.first()?))
            })
    }

    fn string(
        &self,
        keys: &'static [&'static str],
        default: Option<&str>,
    ) -> Result<String, ConfigError> {
        match self.get(keys) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(invalid(keys[0], "must be a string")),
            None => default
                .map(str::to_string)
                .ok_or(ConfigError::Missing { field: keys[0] }),
        }
    }

    fn boolean(&self, keys: &'static [&'static str], default: bool) -> Result<bool, ConfigError> {
        match self.get(keys) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(invalid(keys[0], "must be a boolean")),
            None => Ok(default),
        }
    }

    fn choice<T: FromStr>(
        &self,
        keys: &'static [&'static str],
        choices: &[&str],
        default: &str,
    ) -> Result<T, ConfigError> {
        let value = self.string(keys, Some(default))?;
        value.parse().map_err(|_| {
            invalid(
                keys[0],
                format!("\"{value}\" is not one of: {}", choices.join(", ")),
            )
        })
    }

    fn object(&self, keys: &'static [&'static str]) -> Result<Options<'a>, ConfigError> {
        match self.get(keys) {
            Some(Value::Object(map)) => Ok(Options {
                map,
                fallback: self.fallback,
            }),
            Some(_) => Err(invalid(keys[0], "must be an object")),
            None => Err(ConfigError::Missing { field: keys[0] }),
        }
    }
}

/// A non-negative whole number, accepting integral floats.
fn as_whole(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u32::MAX as f64)
            .map(|f| f as u64)
    })
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolve `raw` options into a [`ResolvedConfig`].
///
/// `fallback` is the document the options were taken from (e.g. the whole
/// `package.json`); it supplies fields absent from the options block.
pub fn resolve(
    raw: &Value,
    meta: &MetaConfig,
    fallback: Option<&Value>,
) -> Result<ResolvedConfig, ConfigError> {
    let raw = raw.as_object().ok_or(ConfigError::NotAnObject)?;
    let merged = apply_environment(raw, meta.environment.as_deref())?;
    let opts = Options {
        map: &merged,
        fallback: fallback.and_then(Value::as_object),
    };

    let disabled = opts.boolean(DISABLED, false)?;
    let insert_into = resolve_insert_targets(&opts, &meta.resolve_dir)?;
    let name = opts.string(NAME, None)?;
    let short_name = opts.string(SHORT_NAME, Some(name.as_str()))?;
    let description = opts.string(DESCRIPTION, Some(""))?;
    let start_url = opts.string(START_URL, Some(meta.base_url.as_str()))?;
    let scope = opts.string(SCOPE, Some(meta.base_url.as_str()))?;
    let theme_color = opts.string(THEME_COLOR, Some(DEFAULT_THEME_COLOR))?;
    let hash_method: HashMethod = opts.choice(HASH_METHOD, &HashMethod::ALL, "name")?;

    let icons = opts.object(ICON_OPTIONS)?;
    let ms_tile_color = icons.string(MS_TILE_COLOR, Some(theme_color.as_str()))?;
    let base_icon_relative = icons.string(BASE_ICON, None)?;
    let base_icon = existing_path(&meta.resolve_dir, &base_icon_relative, BASE_ICON[0])?;
    let base_icon_name = Path::new(&base_icon_relative)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("icon")
        .to_string();
    let sizes = resolve_sizes(icons.get(SIZES))?;
    let (png, formats) = resolve_formats(icons.get(FORMATS))?;
    let resize_fit: ResizeFit = icons.choice(RESIZE_METHOD, &ResizeFit::ALL, "cover")?;

    // Defaults to the theme color; errors name whichever key supplied the value
    let background_field = match icons.get(APPLE_TOUCH_ICON_BG) {
        Some(_) => APPLE_TOUCH_ICON_BG[0],
        None => THEME_COLOR[0],
    };
    let background = icons.string(APPLE_TOUCH_ICON_BG, Some(theme_color.as_str()))?;
    let apple_touch_icon_background = Color::parse(&background).ok_or_else(|| {
        invalid(
            background_field,
            format!("\"{background}\" is not a recognized color"),
        )
    })?;
    let apple_touch_icon_padding = resolve_padding(icons.get(APPLE_TOUCH_ICON_PADDING))?;
    let gen_favicons = icons.boolean(GEN_FAVICONS, false)?;

    let extra = resolve_extra(&merged, &theme_color)?;

    Ok(ResolvedConfig {
        disabled,
        insert_into,
        name,
        short_name,
        description,
        start_url,
        scope,
        theme_color,
        ms_tile_color,
        base_url: meta.base_url.clone(),
        base_icon,
        base_icon_name,
        sizes,
        formats,
        png,
        resize_fit,
        apple_touch_icon_background,
        apple_touch_icon_padding,
        gen_favicons,
        hash_method,
        extra,
    })
}

/// Shallow-merge the environment sub-object over the top level.
fn apply_environment(
    raw: &Map<String, Value>,
    environment: Option<&str>,
) -> Result<Map<String, Value>, ConfigError> {
    let mut merged = raw.clone();
    let Some(environment) = environment else {
        return Ok(merged);
    };
    let key = environment.to_lowercase();
    match merged.remove(&key) {
        Some(Value::Object(overrides)) => {
            for (k, v) in overrides {
                merged.insert(k, v);
            }
        }
        Some(Value::Null) | None => {}
        Some(_) => {
            return Err(invalid(
                key,
                "environment-specific options must be an object",
            ));
        }
    }
    Ok(merged)
}

fn existing_path(
    resolve_dir: &Path,
    relative: &str,
    field: &'static str,
) -> Result<PathBuf, ConfigError> {
    let path = resolve_dir.join(relative);
    if path.exists() {
        Ok(path)
    } else {
        Err(ConfigError::MissingFile { field, path })
    }
}

fn resolve_insert_targets(
    opts: &Options<'_>,
    resolve_dir: &Path,
) -> Result<Vec<PathBuf>, ConfigError> {
    let field = INSERT_INTO[0];
    let value = opts.get(INSERT_INTO).ok_or(ConfigError::Missing { field })?;
    let items = value
        .as_array()
        .ok_or_else(|| invalid(field, "must be an array of HTML file paths"))?;
    items
        .iter()
        .map(|item| {
            let relative = item
                .as_str()
                .ok_or_else(|| invalid(field, "must be an array of HTML file paths"))?;
            existing_path(resolve_dir, relative, field)
        })
        .collect()
}

fn resolve_sizes(value: Option<&Value>) -> Result<Vec<u32>, ConfigError> {
    let Some(value) = value else {
        return Ok(DEFAULT_SIZES.to_vec());
    };
    let items = value
        .as_array()
        .ok_or_else(|| invalid(SIZES[0], "must be an array of positive integers"))?;
    let mut sizes = Vec::with_capacity(items.len() + REQUIRED_SIZES.len());
    for item in items {
        let size = as_whole(item)
            .filter(|&n| n > 0)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| invalid(SIZES[0], format!("{item} is not a positive integer")))?;
        if !sizes.contains(&size) {
            sizes.push(size);
        }
    }
    for size in REQUIRED_SIZES {
        if !sizes.contains(&size) {
            sizes.push(size);
        }
    }
    Ok(sizes)
}

fn default_formats() -> Vec<EncodeOptions> {
    vec![
        EncodeOptions::WebP(WebpOptions::default()),
        EncodeOptions::Png(PngOptions::default()),
    ]
}

fn resolve_formats(
    value: Option<&Value>,
) -> Result<(PngOptions, Vec<EncodeOptions>), ConfigError> {
    let Some(value) = value else {
        return Ok((PngOptions::default(), default_formats()));
    };
    let map = value
        .as_object()
        .ok_or_else(|| invalid(FORMATS[0], "must be an object keyed by format"))?;

    let png: PngOptions = match present(map.get("png")) {
        Some(options) => decode_format("png", options)?,
        None => PngOptions::default(),
    };
    if png.compression_level > MAX_PNG_COMPRESSION {
        return Err(invalid(
            "formats.png",
            format!("compressionLevel must be between 0 and {MAX_PNG_COMPRESSION}"),
        ));
    }

    let mut formats = vec![EncodeOptions::Png(png.clone())];
    for (key, options) in map {
        let encode = match OutputFormat::from_key(key) {
            Some(OutputFormat::Png) => continue,
            Some(OutputFormat::WebP) => {
                let webp: WebpOptions = decode_format(key, options)?;
                if !webp.lossless {
                    return Err(invalid(
                        "formats.webp",
                        "lossless must be true (only lossless WebP encoding is available)",
                    ));
                }
                EncodeOptions::WebP(webp)
            }
            Some(OutputFormat::Jpeg) => {
                EncodeOptions::Jpeg(decode_format::<JpegOptions>(key, options)?)
            }
            Some(OutputFormat::Tiff) => {
                EncodeOptions::Tiff(decode_format::<TiffOptions>(key, options)?)
            }
            None => {
                return Err(invalid(
                    FORMATS[0],
                    format!(
                        "unsupported format \"{key}\" (expected one of: {})",
                        OutputFormat::KEYS.join(", ")
                    ),
                ));
            }
        };
        formats.push(encode);
    }
    Ok((png, formats))
}

/// Decode one format's options; `null` means all defaults.
fn decode_format<T: DeserializeOwned + Default>(
    key: &str,
    options: &Value,
) -> Result<T, ConfigError> {
    let field = format!("formats.{key}");
    match options {
        Value::Null => Ok(T::default()),
        Value::Object(_) => {
            serde_json::from_value(options.clone()).map_err(|e| invalid(field, e.to_string()))
        }
        _ => Err(invalid(field, "must be an object")),
    }
}

fn resolve_padding(value: Option<&Value>) -> Result<u32, ConfigError> {
    let Some(value) = value else {
        return Ok(DEFAULT_APPLE_TOUCH_ICON_PADDING);
    };
    let max = max_apple_touch_icon_padding();
    as_whole(value)
        .filter(|&p| p <= u64::from(max))
        .and_then(|p| u32::try_from(p).ok())
        .ok_or_else(|| {
            invalid(
                APPLE_TOUCH_ICON_PADDING[0],
                format!("must be an integer between 0 and {max}"),
            )
        })
}

fn resolve_extra(
    raw: &Map<String, Value>,
    theme_color: &str,
) -> Result<Map<String, Value>, ConfigError> {
    let mut extra = Map::new();
    for field in EXTRA_FIELDS {
        let canonical = field.keys[0];
        match field.keys.iter().find_map(|key| present(raw.get(*key))) {
            Some(value) => {
                field
                    .check
                    .validate(value)
                    .map_err(|reason| invalid(canonical, reason))?;
                extra.insert(canonical.to_string(), value.clone());
            }
            None => match field.default {
                ExtraDefault::None => {}
                ExtraDefault::ThemeColor => {
                    extra.insert(canonical.to_string(), Value::from(theme_color));
                }
                ExtraDefault::Literal(default) => {
                    extra.insert(canonical.to_string(), Value::from(default));
                }
            },
        }
    }

    if let Some(include) = INCLUDE.iter().find_map(|key| present(raw.get(*key))) {
        let keys = include
            .as_array()
            .filter(|items| items.iter().all(Value::is_string))
            .ok_or_else(|| invalid(INCLUDE[0], "must be an array of option names"))?;
        for key in keys.iter().filter_map(Value::as_str) {
            if let Some(value) = raw.get(key) {
                extra.insert(key.to_string(), value.clone());
            }
        }
    }
    Ok(extra)
}

// =============================================================================
// Config file loading
// =============================================================================

/// Options read from a config file.
#[derive(Debug, Clone, PartialEq)]
pub struct RawConfig {
    pub options: Value,
    /// The enclosing document when options came from a keyed block.
    pub fallback: Option<Value>,
}

/// Read a JSON or TOML (by `.toml` extension) config file.
///
/// When the document has an object under `key`, that block is the options
/// and the whole document is the fallback. Otherwise the whole document is
/// the options, except for `package.json`, which must carry the block.
pub fn load_raw_config(path: &Path, key: &str) -> Result<RawConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let document: Value = if path.extension().is_some_and(|ext| ext == "toml") {
        let table: toml::Value = toml::from_str(&content)?;
        serde_json::to_value(table)?
    } else {
        serde_json::from_str(&content)?
    };

    if document.get(key).is_some_and(Value::is_object) {
        let options = document[key].clone();
        return Ok(RawConfig {
            options,
            fallback: Some(document),
        });
    }
    if path.file_name().is_some_and(|name| name == "package.json") {
        return Err(ConfigError::KeyNotFound {
            key: key.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(RawConfig {
        options: document,
        fallback: None,
    })
}

/// A documented stock config, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# pwa-assets configuration
# ========================
# Required: name, insertInto, icons.baseIcon. Everything else shows its default.
# Most keys accept several spellings (themeColor, theme-color, theme, ...).

# App name, and the short name shown under home-screen icons (defaults to name).
name = "My App"
shortName = "My App"
description = ""

# Defaults to the base URL.
# startURL = "/"
# scope = "/"

themeColor = "white"

# HTML files that receive <link>/<meta> tags, relative to this file.
insertInto = ["index.html"]

# Filename fingerprint: "name" (stable), "content" (changes with the bytes) or "none".
hashMethod = "name"

# Set to true to skip generation entirely.
disabled = false

# Extra manifest fields.
display = "standalone"    # standalone | minimal-ui | fullscreen | browser
# backgroundColor = "white"   # defaults to themeColor
# lang = "en"
# orientation = "any"
# include = ["custom_field"]  # copy these keys into the manifest unchanged

# ---------------------------------------------------------------------------
# Icon generation
# ---------------------------------------------------------------------------
[icons]
baseIcon = "icon.png"

# Square sizes for manifest icons. 192 and 512 are always added.
sizes = [96, 152, 192, 384, 512]

# cover (crop to fill) | contain (letterbox) | fill (stretch)
resizeMethod = "cover"

# Apple touch icon: padding on each side (0-89) and background (any CSS color).
appleTouchIconPadding = 12
# appleTouchIconBackground = "white"   # defaults to themeColor

# Microsoft tile color (defaults to themeColor).
# msTileColor = "white"

# Also emit 32x32 and 16x16 favicons.
genFavicons = false

# One table per output format: png, webp, jpeg, tiff. PNG is always produced.
[icons.formats.png]
compressionLevel = 9

[icons.formats.webp]
quality = 60
effort = 6

# ---------------------------------------------------------------------------
# Environment overrides: merged over the top level when --env / NODE_ENV
# matches the table name.
# ---------------------------------------------------------------------------
[production]
hashMethod = "content"
"##
}
