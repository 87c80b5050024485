//! HTML fragments and head injection.
//!
//! Fragments are rendered with [maud](https://maud.lambda.xyz/), so every
//! attribute value is escaped. Injection is deliberately narrow: strip the
//! tags this crate owns, then splice the fresh fragment into `<head>`.
//!
//! ## Owned tags
//!
//! ```text
//! <link rel="manifest" ...>          <meta name="theme-color" ...>
//! <link rel="icon" ...>              <meta name="msapplication-..." ...>
//! <link rel="apple-touch-icon" ...>
//! ```
//!
//! Stripping these before inserting makes repeated runs idempotent: a file
//! always ends up with exactly one set.

use crate::browserconfig::BROWSERCONFIG_FILENAME;
use crate::manifest::MANIFEST_FILENAME;
use maud::html;
use regex::Regex;
use std::sync::LazyLock;

static OWNED_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<link rel="(manifest|icon|apple-touch-icon)"(.*?)>|<meta name="(msapplication(.*?)|theme-color)"(.*?)>"#,
    )
    .expect("owned tag pattern must compile")
});

const HEAD_OPEN: &str = "<head>";
const HEAD_CLOSE: &str = "</head>";

/// Browser config pointer and theme color; always the start of the fragment.
pub fn head_meta(base_url: &str, theme_color: &str) -> String {
    let config_url = format!("{base_url}{BROWSERCONFIG_FILENAME}");
    html! {
        meta name="msapplication-config" content=(config_url);
        meta name="theme-color" content=(theme_color);
    }
    .into_string()
}

pub fn favicon_link(sizes: &str, href: &str) -> String {
    html! { link rel="icon" sizes=(sizes) href=(href); }.into_string()
}

pub fn apple_touch_icon_link(href: &str) -> String {
    html! { link rel="apple-touch-icon" sizes="180x180" href=(href); }.into_string()
}

pub fn manifest_link(base_url: &str) -> String {
    let href = format!("{base_url}{MANIFEST_FILENAME}");
    html! { link rel="manifest" href=(href); }.into_string()
}

/// Remove every owned tag in a single pass.
pub fn strip_owned_tags(document: &str) -> String {
    OWNED_TAGS.replace_all(document, "").into_owned()
}

/// Byte offset to insert at: right after `<head>`, else right before `</head>`.
pub fn insertion_point(document: &str) -> Option<usize> {
    document
        .find(HEAD_OPEN)
        .map(|i| i + HEAD_OPEN.len())
        .or_else(|| document.find(HEAD_CLOSE))
}

/// Strip owned tags and splice `fragment` into the head.
///
/// Returns `None` when the document has neither `<head>` nor `</head>`.
pub fn inject(document: &str, fragment: &str) -> Option<String> {
    let stripped = strip_owned_tags(document);
    let at = insertion_point(&stripped)?;
    let mut out = String::with_capacity(stripped.len() + fragment.len());
    out.push_str(&stripped[..at]);
    out.push_str(fragment);
    out.push_str(&stripped[at..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_meta_renders_both_tags() {
        assert_eq!(
            head_meta("/app/", "#123456"),
            r##"<meta name="msapplication-config" content="/app/browserconfig.xml"><meta name="theme-color" content="#123456">"##
        );
    }

    #[test]
    fn link_fragments() {
        assert_eq!(
            favicon_link("32x32", "/favicon-32x32.png"),
            r#"<link rel="icon" sizes="32x32" href="/favicon-32x32.png">"#
        );
        assert_eq!(
            apple_touch_icon_link("/apple-touch-icon.png"),
            r#"<link rel="apple-touch-icon" sizes="180x180" href="/apple-touch-icon.png">"#
        );
        assert_eq!(
            manifest_link("/"),
            r#"<link rel="manifest" href="/manifest.webmanifest">"#
        );
    }

    #[test]
    fn fragment_values_are_escaped() {
        let meta = head_meta("/", "\"><script>");
        assert!(!meta.contains("<script>"));
        assert!(meta.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn inject_after_head_open() {
        let out = inject("<html><head></head></html>", "<X>").unwrap();
        assert_eq!(out, "<html><head><X></head></html>");
    }

    #[test]
    fn inject_before_head_close_when_head_has_attributes() {
        let out = inject(r#"<html><head lang="en"><title>t</title></head></html>"#, "<X>").unwrap();
        assert_eq!(
            out,
            r#"<html><head lang="en"><title>t</title><X></head></html>"#
        );
    }

    #[test]
    fn inject_without_head_fails() {
        assert_eq!(inject("<html><body></body></html>", "<X>"), None);
    }

    #[test]
    fn strips_owned_tags_only() {
        let doc = concat!(
            r#"<head><link rel="manifest" href="/old.webmanifest">"#,
            r#"<link rel="icon" sizes="16x16" href="/f.png">"#,
            r#"<link rel="apple-touch-icon" sizes="180x180" href="/a.png">"#,
            r#"<meta name="msapplication-config" content="/browserconfig.xml">"#,
            r#"<meta name="msapplication-TileColor" content="white">"#,
            r##"<meta name="theme-color" content="#fff">"##,
            r#"<link rel="stylesheet" href="/s.css">"#,
            r#"<meta name="viewport" content="width=device-width">"#,
            "</head>"
        );
        assert_eq!(
            strip_owned_tags(doc),
            r#"<head><link rel="stylesheet" href="/s.css"><meta name="viewport" content="width=device-width"></head>"#
        );
    }

    #[test]
    fn reinjection_is_idempotent() {
        let fragment = format!(
            "{}{}{}",
            head_meta("/", "white"),
            favicon_link("32x32", "/favicon-32x32.png"),
            manifest_link("/")
        );
        let once = inject("<html><head><title>t</title></head></html>", &fragment).unwrap();
        let twice = inject(&once, &fragment).unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.matches("rel=\"manifest\"").count(), 1);
    }
}
