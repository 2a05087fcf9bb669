use anyhow::{bail, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::core::classifier::classify;
use crate::core::hasher::short_hash;
use crate::utils::codec::open_archive;
use crate::utils::fs::format_bytes;

#[derive(Debug, Clone)]
pub struct ListedEntry {
    pub name: String,
    pub kind: &'static str,
    pub size: u64,
    pub hash: Option<String>,
}

/// Every non-directory entry in stored order, with a digest of its bytes.
pub fn list_entries(data: &[u8]) -> Result<Vec<ListedEntry>> {
    let mut zip = open_archive(data)?;
    let mut listed = Vec::with_capacity(zip.len());

    for index in 0..zip.len() {
        let mut file = match zip.by_index(index) {
            Ok(file) => file,
            Err(e) => {
                log::warn!("Skipping entry #{}: {}", index, e);
                continue;
            }
        };
        if file.is_dir() {
            continue;
        }

        let mut buf = Vec::new();
        let hash = match file.read_to_end(&mut buf) {
            Ok(_) => Some(short_hash(&buf)),
            Err(e) => {
                log::warn!("Failed to decode {}: {}", file.name(), e);
                None
            }
        };

        listed.push(ListedEntry {
            name: file.name().to_string(),
            kind: classify(file.name()).label(),
            size: file.size(),
            hash,
        });
    }

    Ok(listed)
}

pub fn list(input: &str) -> Result<Vec<ListedEntry>> {
    let input_path = Path::new(input);
    if !input_path.is_file() {
        bail!("Archive not found: {}", input_path.display());
    }

    let data = fs::read(input_path)?;
    let listed = list_entries(&data)?;

    for (i, entry) in listed.iter().enumerate() {
        println!(
            "{:>4}  {:<8} {:>10}  {}  {}",
            i + 1,
            entry.kind,
            format_bytes(entry.size),
            entry.hash.as_deref().unwrap_or("<unreadable>"),
            entry.name
        );
    }
    eprintln!("{} entries", listed.len());

    Ok(listed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Archive, ArchiveEntry};
    use crate::utils::codec::write_archive;

    #[test]
    fn test_list_entries() {
        let archive = Archive {
            entries: vec![
                ArchiveEntry {
                    name: "ComicInfo.xml".to_string(),
                    data: b"<x/>".to_vec(),
                },
                ArchiveEntry {
                    name: "001.png".to_string(),
                    data: b"hello".to_vec(),
                },
            ],
            skipped: Vec::new(),
        };
        let data = write_archive(&archive, 6).unwrap();
        let listed = list_entries(&data).unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].kind, "special");
        assert_eq!(listed[1].name, "001.png");
        assert_eq!(listed[1].kind, "image");
        assert_eq!(listed[1].size, 5);
        assert_eq!(listed[1].hash.as_deref(), Some("2cf24dba5fb0"));
    }
}
