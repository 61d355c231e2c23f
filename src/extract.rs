//! Tar archive extraction logic.

use crate::types::FetchResult;
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tar::Archive;

const BZIP2_EXTENSIONS: [&str; 4] = [".tar.bz", ".tar.bz2", ".tbz", ".tbz2"];
const GZIP_EXTENSIONS: [&str; 2] = [".tar.gz", ".tgz"];

/// Opens an archive with the decompressor implied by its file name.
fn open_archive(archive_path: &Path) -> io::Result<Archive<Box<dyn Read>>> {
    let file = BufReader::new(File::open(archive_path)?);
    let name = archive_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    let reader: Box<dyn Read> = if BZIP2_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        Box::new(BzDecoder::new(file))
    } else if GZIP_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(Archive::new(reader))
}

/// Extracts a tar archive to a target directory with progress tracking.
///
/// # Arguments
///
/// * `archive_path` - Path to the archive; `.tar.bz`, `.tar.gz` and plain `.tar` are understood
/// * `target_dir` - Target directory for extraction, created if missing
/// * `extract_pb` - Progress bar for visual feedback
///
/// # Returns
///
/// One entry per extracted regular file, sized from the tar header.
/// Entries already written stay on disk when an error is returned.
pub(crate) fn extract_archive(
    archive_path: &Path,
    target_dir: &Path,
    extract_pb: &indicatif::ProgressBar,
) -> io::Result<Vec<FetchResult>> {
    let mut archive = open_archive(archive_path)?;
    std::fs::create_dir_all(target_dir)?;

    let mut extracted = Vec::new();

    for (index, entry) in archive.entries()?.enumerate() {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();
        let size = entry.header().size()?;
        let is_file = entry.header().entry_type().is_file();

        if index < 10 || index % 100 == 0 {
            extract_pb.set_message(format!(
                "📂 Extracting: {} files | {}",
                index + 1,
                path.display()
            ));
        }
        extract_pb.inc(1);

        // unpack_in refuses entries that would land outside target_dir
        if entry.unpack_in(target_dir)? && is_file {
            extracted.push(FetchResult {
                local_path: target_dir.join(&path),
                size,
            });
        }
    }

    extract_pb.finish_with_message(format!(
        "✅ Extracted {} files to {}",
        extracted.len(),
        target_dir.display()
    ));

    Ok(extracted)
}
