//! Archive extraction: one zipped collection into one numbered target
//! subdirectory, and the batch loop driving it over a source directory.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use zip::ZipArchive;

use crate::error::{BatchFailure, BatchSummary, ExtractError, PublishError};

/// Extraction target names are capped at this many characters, counter
/// prefix included.
const MAX_TARGET_NAME_LEN: usize = 60;

/// Extract one archive into `dest_dir`, preserving the archive's internal
/// directory structure. Entries are written in archive order, overwriting
/// files already present. Returns the number of file entries written.
///
/// Entry paths are validated before writing; an entry that would land
/// outside `dest_dir` fails the whole archive rather than being skipped.
pub fn extract_archive(archive: &Path, dest_dir: &Path) -> Result<usize, ExtractError> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(BufReader::new(file))?;

    let mut written = 0;
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let relative = entry
            .enclosed_name()
            .map(Path::to_path_buf)
            .ok_or_else(|| ExtractError::UnsafeEntryPath(entry.name().to_owned()))?;
        let target = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        written += 1;
    }
    Ok(written)
}

/// Derive the extraction target directory name for an archive:
/// `"{counter}_{stem}"`, truncated to at most 60 characters. The counter
/// prefix survives truncation, and the cut never splits a multi-byte
/// character.
pub fn extraction_dir_name(counter: usize, archive: &Path) -> String {
    let stem = archive
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    truncate_chars(&format!("{counter}_{stem}"), MAX_TARGET_NAME_LEN)
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_owned(),
        None => s.to_owned(),
    }
}

/// Extract every regular file in `source_dir` into its own numbered
/// subdirectory of `target_dir`, creating `target_dir` if needed.
///
/// Fails fast when `source_dir` is missing. A single archive's failure is
/// recorded in the summary and the loop continues with the next file.
/// Sequence indices are 1-based and follow directory enumeration order.
pub fn unzip_all(source_dir: &Path, target_dir: &Path) -> Result<BatchSummary, PublishError> {
    if !source_dir.is_dir() {
        return Err(PublishError::MissingSourceDir(source_dir.to_path_buf()));
    }
    fs::create_dir_all(target_dir)?;

    let mut summary = BatchSummary::default();
    let mut counter = 0usize;
    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let archive = entry.path();
        counter += 1;

        info!("Unzipping {counter}. file {}...", archive.display());
        match unzip_one(counter, &archive, target_dir) {
            Ok(_) => {
                info!("Unzip for {counter}. file {} done.", archive.display());
                summary.succeeded += 1;
            }
            Err(err) => {
                warn!("unable to unzip {}: {err}", archive.display());
                summary.failures.push(BatchFailure {
                    item: archive,
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok(summary)
}

/// Create the numbered extraction target for one archive and extract into
/// it. Returns the target subdirectory.
fn unzip_one(counter: usize, archive: &Path, target_dir: &Path) -> Result<PathBuf, ExtractError> {
    let sub_dir = target_dir.join(extraction_dir_name(counter, archive));
    fs::create_dir_all(&sub_dir)?;
    extract_archive(archive, &sub_dir)?;
    Ok(sub_dir)
}
