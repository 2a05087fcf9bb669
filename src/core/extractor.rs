use std::io::Read;

use crate::core::classifier::{basename, is_image};
use crate::error::{CbzError, CbzResult};
use crate::types::{Entry, ProgressCallback};
use crate::utils::codec::open_archive;
use crate::utils::progress::percent;

/// Pull every image out of a ZIP container, ordered by full in-archive path.
///
/// Fails only when the container itself cannot be opened. Individual entries
/// that fail to decode are logged and left out.
pub fn extract(data: &[u8], on_progress: Option<ProgressCallback>) -> CbzResult<Vec<Entry>> {
    let mut zip = open_archive(data)?;

    let mut candidates: Vec<(String, usize)> = Vec::new();
    for index in 0..zip.len() {
        let file = match zip.by_index(index) {
            Ok(file) => file,
            Err(e) => {
                log::warn!("Skipping entry #{}: {}", index, e);
                continue;
            }
        };
        if file.is_dir() || !is_image(file.name()) {
            continue;
        }
        candidates.push((file.name().to_string(), index));
    }

    candidates.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    let total = candidates.len();
    let mut entries = Vec::with_capacity(total);

    for (done, (path, index)) in candidates.iter().enumerate() {
        match read_entry(&mut zip, *index) {
            Ok(bytes) => entries.push(Entry::from_bytes(basename(path), bytes)),
            Err(e) => log::warn!("Failed to decode {}: {}", path, e),
        }

        if let Some(progress) = on_progress {
            progress(percent(done + 1, total), path);
        }
    }

    log::info!("Extracted {} of {} images", entries.len(), total);

    Ok(entries)
}

// The declared size comes from the archive and is not trusted for allocation.
fn read_entry(zip: &mut zip::ZipArchive<std::io::Cursor<&[u8]>>, index: usize) -> CbzResult<Vec<u8>> {
    let mut file = zip.by_index(index)?;
    let declared = file.size();
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    if buf.len() as u64 != declared {
        return Err(CbzError::CorruptEntry(format!(
            "{} declares {} bytes but holds {}",
            file.name(),
            declared,
            buf.len()
        )));
    }
    Ok(buf)
}
