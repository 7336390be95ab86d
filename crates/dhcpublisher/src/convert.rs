//! PDF conversion of extracted collections: per-subdirectory document
//! rendering and the batch loop over a target directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{BatchFailure, BatchSummary, PublishError, RenderError};
use crate::render::HtmlRenderer;

/// Select the HTML document of `sub_dir`: the first file in name order
/// whose name ends in `.html`. Further HTML files are ignored (first match
/// wins); the skipped names are logged.
pub fn select_html_file(sub_dir: &Path) -> Result<PathBuf, RenderError> {
    let mut html_files = Vec::new();
    for entry in fs::read_dir(sub_dir)? {
        let path = entry?.path();
        if path.is_file() && has_html_name(&path) {
            html_files.push(path);
        }
    }
    html_files.sort();

    let mut html_files = html_files.into_iter();
    let chosen = html_files
        .next()
        .ok_or_else(|| RenderError::NoHtmlFound(sub_dir.to_path_buf()))?;

    let ignored: Vec<String> = html_files.map(|p| p.display().to_string()).collect();
    if !ignored.is_empty() {
        warn!(
            "{}: multiple HTML files, converting {} and ignoring {}",
            sub_dir.display(),
            chosen.display(),
            ignored.join(", ")
        );
    }
    Ok(chosen)
}

fn has_html_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(".html"))
}

/// Output path for a rendered document: same directory, extension replaced
/// with `pdf` (`report.html` → `report.pdf`).
pub fn pdf_output_path(html_file: &Path) -> PathBuf {
    html_file.with_extension("pdf")
}

/// Render the single HTML document of `sub_dir` into a sibling PDF,
/// replacing any previous output. Returns the written PDF path.
pub fn convert_dir(sub_dir: &Path, renderer: &dyn HtmlRenderer) -> Result<PathBuf, RenderError> {
    let html_file = select_html_file(sub_dir)?;
    let target = pdf_output_path(&html_file);

    if target.exists()
        && let Err(err) = fs::remove_file(&target)
    {
        // Non-fatal; the write below surfaces a real error if the path is
        // actually unwritable.
        debug!("could not remove stale {}: {err}", target.display());
    }

    let html = fs::read(&html_file)?;
    let pdf = renderer.render(&html, sub_dir)?;
    fs::write(&target, pdf)?;
    Ok(target)
}

/// Convert every immediate subdirectory of `target_dir`, in name order.
/// A failed subdirectory is recorded in the summary and the loop continues
/// with the next one.
pub fn convert_all(
    target_dir: &Path,
    renderer: &dyn HtmlRenderer,
) -> Result<BatchSummary, PublishError> {
    let mut sub_dirs = Vec::new();
    for entry in fs::read_dir(target_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            sub_dirs.push(entry.path());
        }
    }
    sub_dirs.sort();

    let mut summary = BatchSummary::default();
    for sub_dir in sub_dirs {
        info!("Processing directory {}...", sub_dir.display());
        match convert_dir(&sub_dir, renderer) {
            Ok(_) => {
                info!("Conversion in {} done.", sub_dir.display());
                summary.succeeded += 1;
            }
            Err(err) => {
                warn!("Could not convert HTML in {}: {err}", sub_dir.display());
                summary.failures.push(BatchFailure {
                    item: sub_dir,
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_path_replaces_the_html_extension() {
        assert_eq!(
            pdf_output_path(Path::new("/out/1_col/report.html")),
            PathBuf::from("/out/1_col/report.pdf")
        );
    }

    #[test]
    fn pdf_path_only_touches_the_last_extension() {
        assert_eq!(
            pdf_output_path(Path::new("notes.v2.html")),
            PathBuf::from("notes.v2.pdf")
        );
    }

    #[test]
    fn html_name_match_is_exact_and_case_sensitive() {
        assert!(has_html_name(Path::new("index.html")));
        assert!(!has_html_name(Path::new("index.htm")));
        assert!(!has_html_name(Path::new("index.HTML")));
        assert!(!has_html_name(Path::new("html")));
    }

    #[test]
    fn selects_the_first_html_in_name_order() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.html"), "b").unwrap();
        fs::write(tmp.path().join("a.html"), "a").unwrap();
        fs::write(tmp.path().join("z.css"), "").unwrap();

        let chosen = select_html_file(tmp.path()).unwrap();
        assert_eq!(chosen, tmp.path().join("a.html"));
    }

    #[test]
    fn empty_directory_reports_no_html_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = select_html_file(tmp.path()).unwrap_err();
        assert!(matches!(err, RenderError::NoHtmlFound(_)));
    }

    #[test]
    fn html_named_subdirectories_are_not_selected() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("docs.html")).unwrap();
        let err = select_html_file(tmp.path()).unwrap_err();
        assert!(matches!(err, RenderError::NoHtmlFound(_)));
    }
}
