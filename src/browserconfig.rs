//! Microsoft `browserconfig.xml` builder.
//!
//! The tile section is accumulated while tiles are generated and wrapped into
//! a complete document on read.

/// Filename the browser config is published under, relative to the base URL.
pub const BROWSERCONFIG_FILENAME: &str = "browserconfig.xml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    tile: String,
}

impl BrowserConfig {
    pub fn new(tile_color: &str) -> Self {
        Self {
            tile: format!("<TileColor>{}</TileColor>", xml_escape(tile_color)),
        }
    }

    /// Append a tile logo. Square tiles become `<squareWxHlogo>`, others `<wideWxHlogo>`.
    pub fn push_logo(&mut self, width: u32, height: u32, src: &str) {
        let kind = if width == height { "square" } else { "wide" };
        self.tile.push_str(&format!(
            "<{kind}{width}x{height}logo src=\"{}\"/>",
            xml_escape(src)
        ));
    }

    pub fn to_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?><browserconfig><msapplication><tile>{}</tile></msapplication></browserconfig>"#,
            self.tile
        )
    }
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
