//! Preview assembly: inline local stylesheets and scripts into `index.html`
//! so the bundle renders in a sandboxed frame without further fetches.
//!
//! Matching is targeted pattern matching on `<link href=*.css>` and
//! `<script src=*.js></script>`, not an HTML parse. Tags that appear inside
//! comments or string literals are matched too.

use std::sync::LazyLock;
use regex::{Captures, Regex};
use sitegen_types::GeneratedCode;

static ASSET_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?i)<link\b[^>]*?\bhref\s*=\s*["']([^"']+\.css)["'][^>]*>"#,
        r#"|<script\b[^>]*?\bsrc\s*=\s*["']([^"']+\.js)["'][^>]*>\s*</script\s*>"#,
    ))
    .expect("asset tag pattern is valid")
});

/// Shown by the preview surface when the bundle has no entry document.
pub const PREVIEW_PLACEHOLDER: &str = "No index.html found to preview.";

/// Build the self-contained preview document, or `None` without `index.html`.
///
/// References to paths missing from the bundle are kept verbatim.
pub fn build_preview_document(code: &GeneratedCode) -> Option<String> {
    let html = code.entry_document()?;

    let document = ASSET_TAG.replace_all(html, |caps: &Captures| {
        let original = caps[0].to_string();
        if let Some(css_path) = caps.get(1) {
            match code.get(normalize_asset_path(css_path.as_str())) {
                Some(css) => format!("<style>{}</style>", css),
                None => original,
            }
        } else if let Some(js_path) = caps.get(2) {
            match code.get(normalize_asset_path(js_path.as_str())) {
                Some(js) => format!("<script type=\"module\">{}</script>", js),
                None => original,
            }
        } else {
            original
        }
    });

    Some(document.into_owned())
}

/// Strip one leading `./` or `/`.
pub fn normalize_asset_path(path: &str) -> &str {
    path.strip_prefix("./")
        .or_else(|| path.strip_prefix('/'))
        .unwrap_or(path)
}
