use crate::core::allocator::sequential_name;
use crate::error::{CbzError, CbzResult};
use crate::types::{Archive, ArchiveEntry, Entry, Selection};

/// Repackage selected entries, in the order given, as `001.ext`, `002.ext`, ...
pub fn reexport(entries: &[Entry], selection: &Selection) -> CbzResult<Archive> {
    if selection.count_in(entries) == 0 {
        return Err(CbzError::NoFiles);
    }

    let mut archive = Archive::default();
    let mut ordinal = 1u64;

    for entry in entries.iter().filter(|e| selection.is_selected(e.id)) {
        match entry.read() {
            Ok(data) => {
                let ext = entry.extension().filter(|e| !e.is_empty());
                archive.entries.push(ArchiveEntry {
                    name: sequential_name(ordinal, ext),
                    data: data.into_owned(),
                });
                ordinal += 1;
            }
            Err(e) => {
                log::warn!("Skipping {}: {}", entry.source_name, e);
                archive.skipped.push(entry.source_name.clone());
            }
        }
    }

    Ok(archive)
}

/// Parse a 1-based page list such as `3,1,5-7` into zero-based indices,
/// keeping the order given.
pub fn parse_pages(input: &str, count: usize) -> CbzResult<Vec<usize>> {
    let mut pages = Vec::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (start, end) = match part.split_once('-') {
            Some((a, b)) => (parse_page(a, count)?, parse_page(b, count)?),
            None => {
                let page = parse_page(part, count)?;
                (page, page)
            }
        };

        if start <= end {
            pages.extend(start..=end);
        } else {
            pages.extend((end..=start).rev());
        }
    }

    if pages.is_empty() {
        return Err(CbzError::InvalidPages(format!("no pages in \"{}\"", input)));
    }

    Ok(pages.into_iter().map(|p| p - 1).collect())
}

fn parse_page(text: &str, count: usize) -> CbzResult<usize> {
    let page: usize = text
        .trim()
        .parse()
        .map_err(|_| CbzError::InvalidPages(format!("\"{}\" is not a page number", text)))?;
    if page == 0 || page > count {
        return Err(CbzError::InvalidPages(format!(
            "page {} out of range (1-{})",
            page, count
        )));
    }
    Ok(page)
}
