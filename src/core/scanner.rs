use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::types::Entry;

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    Some(parts.join("/"))
}

/// Collect every regular, non-hidden file under `dir`, ordered by relative
/// path. Bytes are read later, during the build.
pub fn scan_dir(dir: &Path) -> Result<Vec<Entry>> {
    if !dir.is_dir() {
        bail!("Source directory not found: {}", dir.display());
    }

    let mut files: Vec<(String, PathBuf)> = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable path: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(rel) = relative_name(dir, entry.path()) {
            files.push((rel, entry.into_path()));
        }
    }

    files.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    Ok(files
        .into_iter()
        .map(|(rel, path)| Entry::from_file(rel, path))
        .collect())
}

/// Entries for an explicit list of files, in the order given.
pub fn scan_files(paths: &[PathBuf]) -> Result<Vec<Entry>> {
    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        if !path.is_file() {
            bail!("File not found: {}", path.display());
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        entries.push(Entry::from_file(name, path.clone()));
    }
    Ok(entries)
}
