use std::collections::HashSet;

use crate::core::classifier::{basename, extension};
use crate::types::Classification;

/// Output-name ledger and shared ordinal counter for one build.
#[derive(Debug)]
pub struct NameAllocator {
    ledger: HashSet<String>,
    counter: u64,
}

impl Default for NameAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl NameAllocator {
    pub fn new() -> Self {
        NameAllocator {
            ledger: HashSet::new(),
            counter: 1,
        }
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.ledger.contains(name)
    }

    /// Returns a name not yet in the ledger and records it.
    pub fn allocate(
        &mut self,
        classification: Classification,
        source_name: &str,
        preserve: bool,
    ) -> String {
        let name = if preserve || classification == Classification::Special {
            self.next_preserved(source_name)
        } else {
            self.next_sequential(source_name)
        };
        self.ledger.insert(name.clone());
        name
    }

    fn next_preserved(&self, source_name: &str) -> String {
        let base = basename(source_name);
        if !self.is_taken(base) {
            return base.to_string();
        }

        let (stem, ext) = match base.rfind('.') {
            Some(i) => (&base[..i], Some(&base[i + 1..])),
            None => (base, None),
        };

        let mut suffix = 1u64;
        loop {
            let candidate = match ext {
                Some(ext) => format!("{}_{}.{}", stem, suffix, ext),
                None => format!("{}_{}", stem, suffix),
            };
            if !self.is_taken(&candidate) {
                log::debug!("{} renamed to {} to avoid a collision", base, candidate);
                return candidate;
            }
            suffix += 1;
        }
    }

    // Every attempt consumes an ordinal, including the ones that collide.
    fn next_sequential(&mut self, source_name: &str) -> String {
        let ext = extension(source_name)
            .filter(|e| !e.is_empty())
            .map(|e| e.to_ascii_lowercase());

        loop {
            let candidate = sequential_name(self.counter, ext.as_deref());
            self.counter += 1;
            if !self.is_taken(&candidate) {
                return candidate;
            }
            log::debug!("{} already used, skipping to the next ordinal", candidate);
        }
    }
}

/// `7, Some("png")` becomes `007.png`. Padding grows past 999.
pub fn sequential_name(ordinal: u64, ext: Option<&str>) -> String {
    match ext {
        Some(ext) => format!("{:03}.{}", ordinal, ext),
        None => format!("{:03}", ordinal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Classification::*;

    #[test]
    fn test_sequential_names() {
        let mut alloc = NameAllocator::new();
        assert_eq!(alloc.allocate(Image, "b.jpg", false), "001.jpg");
        assert_eq!(alloc.allocate(Image, "a.PNG", false), "002.png");
        assert_eq!(alloc.allocate(Ordinary, "notes.txt", false), "003.txt");
        assert_eq!(alloc.allocate(Ordinary, "LICENSE", false), "004");
        assert_eq!(alloc.counter(), 5);
    }

    #[test]
    fn test_special_keeps_name_and_counter() {
        let mut alloc = NameAllocator::new();
        assert_eq!(alloc.allocate(Special, "meta/ComicInfo.xml", false), "ComicInfo.xml");
        assert_eq!(alloc.counter(), 1);
        assert_eq!(alloc.allocate(Image, "x.png", false), "001.png");
    }

    #[test]
    fn test_preserved_collision_suffix() {
        let mut alloc = NameAllocator::new();
        assert_eq!(alloc.allocate(Special, "readme.txt", false), "readme.txt");
        assert_eq!(alloc.allocate(Special, "other/readme.txt", false), "readme_1.txt");
        assert_eq!(alloc.allocate(Special, "third/readme.txt", false), "readme_2.txt");
        assert_eq!(alloc.counter(), 1);
    }

    #[test]
    fn test_preserve_mode_without_extension() {
        let mut alloc = NameAllocator::new();
        assert_eq!(alloc.allocate(Ordinary, "a/LICENSE", true), "LICENSE");
        assert_eq!(alloc.allocate(Ordinary, "b/LICENSE", true), "LICENSE_1");
    }

    #[test]
    fn test_preserved_suffix_skips_existing_suffixed_name() {
        let mut alloc = NameAllocator::new();
        alloc.allocate(Image, "p_1.png", true);
        alloc.allocate(Image, "p.png", true);
        assert_eq!(alloc.allocate(Image, "dup/p.png", true), "p_2.png");
    }

    #[test]
    fn test_sequential_collision_advances_ordinal() {
        let mut alloc = NameAllocator::new();
        assert_eq!(alloc.allocate(Image, "002.png", true), "002.png");
        assert_eq!(alloc.allocate(Image, "a.png", false), "001.png");
        assert_eq!(alloc.allocate(Image, "b.png", false), "003.png");
        assert_eq!(alloc.counter(), 4);
    }

    #[test]
    fn test_padding_grows_past_999() {
        assert_eq!(sequential_name(999, Some("png")), "999.png");
        assert_eq!(sequential_name(1000, Some("png")), "1000.png");
        assert_eq!(sequential_name(7, None), "007");
    }

    #[test]
    fn test_names_are_unique() {
        let mut alloc = NameAllocator::new();
        let mut seen = HashSet::new();
        for i in 0..50 {
            let name = format!("dir{}/readme.txt", i % 3);
            assert!(seen.insert(alloc.allocate(Special, &name, false)));
            assert!(seen.insert(alloc.allocate(Image, "x.jpg", i % 2 == 0)));
        }
    }
}
