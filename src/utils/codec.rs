use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{CbzError, CbzResult};
use crate::types::Archive;

/// Level 0 stores entries as-is, 1..=9 deflates at that level.
fn file_options(level: u32) -> SimpleFileOptions {
    if level == 0 {
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
    } else {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(level.min(9) as i64))
    }
}

/// Serialize an archive into ZIP bytes, entries in archive order.
pub fn write_archive(archive: &Archive, level: u32) -> CbzResult<Vec<u8>> {
    let cap = archive.total_size() as usize + archive.len() * 128;
    let mut zip = ZipWriter::new(Cursor::new(Vec::with_capacity(cap)));
    let options = file_options(level);

    for entry in &archive.entries {
        zip.start_file(entry.name.as_str(), options)?;
        zip.write_all(&entry.data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

pub fn open_archive(data: &[u8]) -> CbzResult<ZipArchive<Cursor<&[u8]>>> {
    ZipArchive::new(Cursor::new(data)).map_err(|e| CbzError::NotAnArchive(e.to_string()))
}
