//! Shared fixture helpers for integration tests.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::ZipWriter;
use zip::write::FileOptions;

/// Write a zip archive at `path` containing the given (entry name, bytes)
/// pairs. Entry names may contain `/` separators for nested files.
pub fn write_archive(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).expect("create archive");
    let mut zip = ZipWriter::new(file);
    for (name, bytes) in entries {
        zip.start_file(*name, FileOptions::default())
            .expect("start entry");
        zip.write_all(bytes).expect("write entry");
    }
    zip.finish().expect("finish archive");
}

/// Write a handful of bytes no zip reader will accept.
pub fn write_corrupt_archive(path: &Path) {
    std::fs::write(path, b"this is not a zip archive").expect("write corrupt archive");
}
