//! Template archive export (gzip-compressed tar).

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use super::types::ArchiveEntry;

const ENTRY_MODE: u32 = 0o644;

/// Makes `path` unique among `seen` by suffixing `_2`, `_3`, ... before the extension.
fn unique_path(path: &str, seen: &mut HashSet<String>) -> String {
    if seen.insert(path.to_string()) {
        return path.to_string();
    }
    let (stem, extension) = match path.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => (stem, format!(".{ext}")),
        _ => (path, String::new()),
    };
    let mut n = 2;
    loop {
        let candidate = format!("{stem}_{n}{extension}");
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Writes `entries` as a `.tar.gz` stream into `writer` and returns the writer.
///
/// Entries with the same path (two emails with the same name) are kept by
/// renaming the later ones.
pub fn write_archive<W: Write>(entries: &[ArchiveEntry], writer: W) -> Result<W> {
    let encoder = GzEncoder::new(writer, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    let mtime = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0);
    let mut seen = HashSet::new();

    for entry in entries {
        let path = unique_path(&entry.path, &mut seen);
        let mut header = tar::Header::new_gnu();
        header.set_size(entry.html.len() as u64);
        header.set_mode(ENTRY_MODE);
        header.set_mtime(mtime);
        builder
            .append_data(&mut header, &path, entry.html.as_bytes())
            .with_context(|| format!("Failed to add '{path}' to archive"))?;
        log::debug!("Archived {} ({} bytes)", path, entry.html.len());
    }

    let encoder = builder
        .into_inner()
        .context("Failed to finish tar stream")?;
    encoder.finish().context("Failed to finish gzip stream")
}

/// Writes `entries` as a `.tar.gz` file at `path`.
pub fn write_archive_file(entries: &[ArchiveEntry], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut file = write_archive(entries, std::io::BufWriter::new(file))?;
    file.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote {} templates to {}", entries.len(), path.display());
    Ok(())
}
