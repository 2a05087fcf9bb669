use crate::core::allocator::NameAllocator;
use crate::error::{CbzError, CbzResult};
use crate::types::{Archive, ArchiveEntry, Classification, Entry, ProgressCallback, Selection};
use crate::utils::progress::percent;

const PASSES: [Classification; 3] = [
    Classification::Special,
    Classification::Image,
    Classification::Ordinary,
];

/// Assemble the selected entries into an archive.
///
/// Entries are written in three passes (special files, images, everything
/// else), each in source order. A single allocator spans all passes, so
/// images and other files share one numbering sequence while special files
/// never consume it. An entry whose bytes cannot be read is logged and
/// skipped.
pub fn build(
    entries: &[Entry],
    selection: &Selection,
    preserve: bool,
    on_progress: Option<ProgressCallback>,
) -> CbzResult<Archive> {
    let total = selection.count_in(entries);
    if total == 0 {
        return Err(CbzError::NoFiles);
    }

    if let Some(progress) = on_progress {
        progress(0, "Starting...");
    }

    let mut allocator = NameAllocator::new();
    let mut archive = Archive::default();
    let mut processed = 0usize;

    for class in PASSES {
        let pass = entries
            .iter()
            .filter(|e| selection.is_selected(e.id) && e.classification() == class);

        for entry in pass {
            processed += 1;

            match entry.read() {
                Ok(data) => {
                    let name = allocator.allocate(class, &entry.source_name, preserve);
                    log::debug!("{} -> {}", entry.source_name, name);
                    archive.entries.push(ArchiveEntry {
                        name,
                        data: data.into_owned(),
                    });
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", entry.source_name, e);
                    archive.skipped.push(entry.source_name.clone());
                }
            }

            if let Some(progress) = on_progress {
                progress(percent(processed, total), &entry.source_name);
            }
        }
    }

    log::info!(
        "Built archive with {} entries ({} skipped)",
        archive.len(),
        archive.skipped.len()
    );

    Ok(archive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn entry(name: &str) -> Entry {
        Entry::from_bytes(name, name.as_bytes().to_vec())
    }

    fn build_all(entries: &[Entry], preserve: bool) -> Archive {
        build(entries, &Selection::all(entries), preserve, None).unwrap()
    }

    #[test]
    fn test_special_first_then_source_order() {
        let entries = vec![entry("comicinfo.xml"), entry("page2.jpg"), entry("page1.jpg")];
        let archive = build_all(&entries, false);
        assert_eq!(archive.names(), vec!["comicinfo.xml", "001.jpg", "002.jpg"]);
        assert_eq!(archive.entries[1].data, b"page2.jpg");
        assert_eq!(archive.entries[2].data, b"page1.jpg");
    }

    #[test]
    fn test_pass_ordering_regardless_of_input_order() {
        let entries = vec![
            entry("notes.txt"),
            entry("b.png"),
            entry("README.md"),
            entry("a.jpg"),
            entry("ComicInfo.xml"),
        ];
        let archive = build_all(&entries, false);
        assert_eq!(
            archive.names(),
            vec!["README.md", "ComicInfo.xml", "001.png", "002.jpg", "003.txt"]
        );
    }

    #[test]
    fn test_duplicate_special_names() {
        let entries = vec![entry("readme.txt"), entry("extra/readme.txt")];
        let archive = build_all(&entries, false);
        assert_eq!(archive.names(), vec!["readme.txt", "readme_1.txt"]);
    }

    #[test]
    fn test_no_selection_fails() {
        let entries = vec![entry("a.png")];
        let err = build(&entries, &Selection::none(), false, None).unwrap_err();
        assert!(matches!(err, CbzError::NoFiles));

        let err = build(&[], &Selection::none(), false, None).unwrap_err();
        assert!(matches!(err, CbzError::NoFiles));
    }

    #[test]
    fn test_unselected_entries_are_dropped() {
        let entries = vec![entry("a.png"), entry("b.png"), entry("c.png")];
        let mut selection = Selection::all(&entries);
        selection.deselect(entries[1].id);

        let archive = build(&entries, &selection, false, None).unwrap();
        assert_eq!(archive.names(), vec!["001.png", "002.png"]);
        assert_eq!(archive.entries[1].data, b"c.png");
    }

    #[test]
    fn test_preserve_mode_keeps_names() {
        let entries = vec![entry("ch1/p1.png"), entry("ch2/p1.png"), entry("notes.txt")];
        let archive = build_all(&entries, true);
        assert_eq!(archive.names(), vec!["p1.png", "p1_1.png", "notes.txt"]);
    }

    #[test]
    fn test_unreadable_entry_is_skipped() {
        let missing = PathBuf::from("/nonexistent/cbzkit/test/page.png");
        let entries = vec![
            entry("a.png"),
            Entry::from_file("page.png", missing),
            entry("b.png"),
        ];
        let archive = build_all(&entries, false);
        assert_eq!(archive.names(), vec!["001.png", "002.png"]);
        assert_eq!(archive.skipped, vec!["page.png".to_string()]);
    }

    #[test]
    fn test_progress_is_monotonic_and_ends_at_100() {
        let entries = vec![entry("x.txt"), entry("a.png"), entry("info.txt"), entry("b.gif")];
        let seen = RefCell::new(Vec::new());
        let record = |p: u8, _: &str| seen.borrow_mut().push(p);

        build(&entries, &Selection::all(&entries), false, Some(&record)).unwrap();

        let seen = seen.into_inner();
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_output_names_unique() {
        let names = [
            "001.png", "a.png", "readme.txt", "x/readme.txt", "002.png", "b.txt", "c",
        ];
        let entries: Vec<Entry> = names.iter().map(|n| entry(n)).collect();
        for preserve in [false, true] {
            let archive = build_all(&entries, preserve);
            let unique: HashSet<&str> = archive.names().into_iter().collect();
            assert_eq!(unique.len(), archive.len());
            assert_eq!(archive.len(), names.len());
        }
    }
}
