//! Batch publisher for DHC document collections.
//!
//! A DHC file is a zip archive holding one HTML document together with its
//! images and stylesheets. This crate extracts a directory of such archives
//! into numbered subdirectories and renders each subdirectory's HTML
//! document into a sibling PDF, resolving relative references against that
//! subdirectory.
//!
//! Both batch operations run strictly sequentially and never abort on a
//! single bad input: per-item failures are recorded in the returned
//! [`BatchSummary`] and processing continues.

pub mod convert;
pub mod error;
pub mod extract;
pub mod render;

use std::path::Path;

pub use convert::convert_all;
pub use error::{BatchFailure, BatchSummary, ExtractError, PublishError, RenderError};
pub use extract::unzip_all;
pub use render::{HtmlRenderer, PrintPdfRenderer};

/// Outcome of a full unzip-then-convert run.
#[derive(Debug)]
pub struct PublishSummary {
    /// Result of the extraction pass.
    pub unzipped: BatchSummary,
    /// Result of the conversion pass.
    pub converted: BatchSummary,
}

/// Extract every archive in `dhc_dir` into `target_dir`, then render each
/// extracted collection to PDF with the production engine.
pub fn publish(
    dhc_dir: impl AsRef<Path>,
    target_dir: impl AsRef<Path>,
) -> Result<PublishSummary, PublishError> {
    let target_dir = target_dir.as_ref();
    let unzipped = extract::unzip_all(dhc_dir.as_ref(), target_dir)?;
    let converted = convert::convert_all(target_dir, &PrintPdfRenderer)?;
    Ok(PublishSummary {
        unzipped,
        converted,
    })
}
