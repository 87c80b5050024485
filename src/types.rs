//! Shared types used across pipeline stages.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Generated filename → encoded image bytes.
///
/// Fingerprinting keeps names unique per logical icon, so a repeated name
/// simply overwrites.
pub type GeneratedIcons = BTreeMap<String, Vec<u8>>;

/// One icon listed in the web app manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconEntry {
    /// URL path: base URL + generated filename.
    pub src: String,
    /// `"WxH"`, e.g. `"192x192"`.
    pub sizes: String,
    /// MIME type, e.g. `"image/png"`.
    #[serde(rename = "type")]
    pub mime_type: String,
}
