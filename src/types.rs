#![allow(dead_code)]

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::classifier::{classify, extension};

static NEXT_ENTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle used by the caller layer to refer to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    pub fn fresh() -> Self {
        EntryId(NEXT_ENTRY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Image,
    Special,
    Ordinary,
}

impl Classification {
    pub fn label(self) -> &'static str {
        match self {
            Classification::Image => "image",
            Classification::Special => "special",
            Classification::Ordinary => "other",
        }
    }
}

#[derive(Debug, Clone)]
pub enum EntrySource {
    Memory(Vec<u8>),
    File(PathBuf),
}

/// One unit of content flowing through pack/unpack. The payload is never
/// transformed, only renamed and repositioned.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: EntryId,
    pub source_name: String,
    pub source: EntrySource,
    classification: Classification,
}

impl Entry {
    pub fn new(source_name: impl Into<String>, source: EntrySource) -> Self {
        let source_name = source_name.into();
        let classification = classify(&source_name);
        Entry {
            id: EntryId::fresh(),
            source_name,
            source,
            classification,
        }
    }

    pub fn from_bytes(source_name: impl Into<String>, data: Vec<u8>) -> Self {
        Entry::new(source_name, EntrySource::Memory(data))
    }

    pub fn from_file(source_name: impl Into<String>, path: PathBuf) -> Self {
        Entry::new(source_name, EntrySource::File(path))
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn extension(&self) -> Option<&str> {
        extension(&self.source_name)
    }

    pub fn read(&self) -> io::Result<Cow<'_, [u8]>> {
        match &self.source {
            EntrySource::Memory(data) => Ok(Cow::Borrowed(data)),
            EntrySource::File(path) => fs::read(path).map(Cow::Owned),
        }
    }
}

/// Caller-owned selection state, kept apart from the archival entries.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: HashSet<EntryId>,
}

impl Selection {
    pub fn all(entries: &[Entry]) -> Self {
        Selection {
            ids: entries.iter().map(|e| e.id).collect(),
        }
    }

    pub fn none() -> Self {
        Selection::default()
    }

    pub fn select(&mut self, id: EntryId) {
        self.ids.insert(id);
    }

    pub fn deselect(&mut self, id: EntryId) {
        self.ids.remove(&id);
    }

    pub fn is_selected(&self, id: EntryId) -> bool {
        self.ids.contains(&id)
    }

    pub fn count_in(&self, entries: &[Entry]) -> usize {
        entries.iter().filter(|e| self.is_selected(e.id)).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub data: Vec<u8>,
}

/// Ordered output of a build. Names are unique.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    pub entries: Vec<ArchiveEntry>,
    pub skipped: Vec<String>,
}

impl Archive {
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.data.len() as u64).sum()
    }
}

#[derive(Debug, Clone)]
pub struct PackOptions {
    pub sources: Vec<String>,
    pub output: Option<String>,
    pub preserve_names: bool,
    pub compression_level: u32,
    pub excludes: Vec<String>,
    pub force: bool,
}

#[derive(Debug, Clone)]
pub struct UnpackOptions {
    pub input: String,
    pub output: String,
    pub renumber: bool,
    pub force: bool,
}

#[derive(Debug, Clone)]
pub struct ReexportOptions {
    pub input: String,
    pub output: String,
    pub pages: Option<String>,
    pub compression_level: u32,
    pub force: bool,
}

pub type ProgressCallback<'a> = &'a dyn Fn(u8, &str);
