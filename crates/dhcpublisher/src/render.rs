//! The HTML→PDF engine seam.
//!
//! Batch conversion talks to an [`HtmlRenderer`] so it can be exercised
//! against a fake engine in tests; [`PrintPdfRenderer`] is the production
//! binding on printpdf's HTML pipeline (stylesheet resolution → HTML
//! translation → PDF write).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use printpdf::{Base64OrRaw, GeneratePdfOptions, PdfDocument, PdfSaveOptions};
use regex::Regex;
use tracing::debug;

use crate::error::RenderError;

/// Image formats preloaded into the engine's image map.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// An HTML→PDF rendering engine.
///
/// `base_dir` is the directory relative image and stylesheet references
/// resolve against.
pub trait HtmlRenderer {
    fn render(&self, html: &[u8], base_dir: &Path) -> Result<Vec<u8>, RenderError>;
}

/// Production engine backed by printpdf's HTML pipeline.
#[derive(Debug, Default)]
pub struct PrintPdfRenderer;

impl HtmlRenderer for PrintPdfRenderer {
    fn render(&self, html: &[u8], base_dir: &Path) -> Result<Vec<u8>, RenderError> {
        let html = String::from_utf8_lossy(html);
        let html = inline_stylesheets(&html, base_dir);
        let images = load_images(base_dir)?;
        let fonts = BTreeMap::new();

        let mut warnings = Vec::new();
        let doc = PdfDocument::from_html(
            &html,
            &images,
            &fonts,
            &GeneratePdfOptions::default(),
            &mut warnings,
        )
        .map_err(|e| RenderError::Pipeline(e.to_string()))?;

        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        for warning in &warnings {
            debug!("pdf engine warning: {warning:?}");
        }
        Ok(bytes)
    }
}

/// Replace `<link rel="stylesheet" href="…">` tags with inline `<style>`
/// blocks read relative to `base_dir`. The engine performs no file I/O of
/// its own, so stylesheet references are resolved up front. An unreadable
/// stylesheet leaves the tag in place.
fn inline_stylesheets(html: &str, base_dir: &Path) -> String {
    static LINK_TAG: OnceLock<Regex> = OnceLock::new();
    static HREF_ATTR: OnceLock<Regex> = OnceLock::new();
    let link_tag = LINK_TAG.get_or_init(|| {
        Regex::new(r#"(?i)<link\b[^>]*rel\s*=\s*["']?stylesheet["']?[^>]*>"#).unwrap()
    });
    let href_attr =
        HREF_ATTR.get_or_init(|| Regex::new(r#"(?i)href\s*=\s*["']([^"']+)["']"#).unwrap());

    link_tag
        .replace_all(html, |caps: &regex::Captures<'_>| {
            let tag = &caps[0];
            let Some(href) = href_attr.captures(tag).map(|c| c[1].to_owned()) else {
                return tag.to_owned();
            };
            match fs::read_to_string(base_dir.join(&href)) {
                Ok(css) => format!("<style>\n{css}\n</style>"),
                Err(err) => {
                    debug!("stylesheet {href} not readable: {err}");
                    tag.to_owned()
                }
            }
        })
        .into_owned()
}

/// Preload every image file under `dir` (recursively) into the engine's
/// image map, keyed by its `/`-separated path relative to `dir`, so that
/// `<img src="img/logo.png">` resolves against the subdirectory being
/// converted.
fn load_images(dir: &Path) -> Result<BTreeMap<String, Base64OrRaw>, RenderError> {
    let mut images = BTreeMap::new();
    collect_images(dir, dir, &mut images)?;
    Ok(images)
}

fn collect_images(
    root: &Path,
    dir: &Path,
    images: &mut BTreeMap<String, Base64OrRaw>,
) -> Result<(), RenderError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_images(root, &path, images)?;
            continue;
        }
        if !is_image(&path) {
            continue;
        }
        let key = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        images.insert(key, Base64OrRaw::Raw(fs::read(&path)?));
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}
