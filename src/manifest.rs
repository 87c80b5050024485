//! Web app manifest assembly.
//!
//! The manifest is a pure merge of resolved configuration and the icon
//! entries produced by the default icon stage:
//!
//! ```text
//! { name, short_name, start_url, scope, description?, icons, theme_color, ...extra }
//! ```
//!
//! Extra fields are spread last, so an `include`d key that collides with an
//! identity field replaces its value in place. Keys keep insertion order, which
//! makes the serialized output byte-identical across runs with equal inputs.

use crate::config::ResolvedConfig;
use crate::types::IconEntry;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

/// Filename the manifest is published under, relative to the base URL.
pub const MANIFEST_FILENAME: &str = "manifest.webmanifest";

#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub name: String,
    pub short_name: String,
    pub start_url: String,
    pub scope: String,
    /// Omitted from the output when empty.
    pub description: String,
    pub icons: Vec<IconEntry>,
    pub theme_color: String,
    pub extra: Map<String, Value>,
}

impl Manifest {
    pub fn assemble(config: &ResolvedConfig, icons: Vec<IconEntry>) -> Self {
        Self {
            name: config.name.clone(),
            short_name: config.short_name.clone(),
            start_url: config.start_url.clone(),
            scope: config.scope.clone(),
            description: config.description.clone(),
            icons,
            theme_color: config.theme_color.clone(),
            extra: config.extra.clone(),
        }
    }

    /// The manifest as an ordered JSON object.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("name".into(), json!(self.name));
        map.insert("short_name".into(), json!(self.short_name));
        map.insert("start_url".into(), json!(self.start_url));
        map.insert("scope".into(), json!(self.scope));
        if !self.description.is_empty() {
            map.insert("description".into(), json!(self.description));
        }
        let icons = self
            .icons
            .iter()
            .map(|icon| json!({ "src": icon.src, "sizes": icon.sizes, "type": icon.mime_type }))
            .collect();
        map.insert("icons".into(), Value::Array(icons));
        map.insert("theme_color".into(), json!(self.theme_color));
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_value())
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
