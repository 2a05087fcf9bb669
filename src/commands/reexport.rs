use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::commands::pack::print_box;
use crate::core::extractor::extract;
use crate::core::reexport::{parse_pages, reexport as reexport_entries};
use crate::types::{Entry, ReexportOptions, Selection};
use crate::utils::codec::write_archive;
use crate::utils::fs::{check_output_file, format_bytes};

pub fn reexport(options: &ReexportOptions) -> Result<()> {
    let input_path = Path::new(&options.input);
    let output_path = Path::new(&options.output);

    if !input_path.is_file() {
        bail!("Archive not found: {}", input_path.display());
    }
    check_output_file(output_path, options.force)?;

    let data = fs::read(input_path)?;
    let extracted = extract(&data, None)?;
    eprintln!("Found {} images in {}", extracted.len(), input_path.display());

    // Validate the page list before any packing work.
    let pages: Vec<Entry> = match &options.pages {
        Some(list) => parse_pages(list, extracted.len())?
            .into_iter()
            .map(|i| extracted[i].clone())
            .collect(),
        None => extracted,
    };

    let archive = reexport_entries(&pages, &Selection::all(&pages))?;
    let bytes = write_archive(&archive, options.compression_level)?;
    fs::write(output_path, &bytes)?;

    print_box(
        "Re-export Complete",
        &[
            &format!("Output: {}", output_path.display()),
            &format!("Pages: {}", archive.len()),
            &format!("Archive size: {}", format_bytes(bytes.len() as u64)),
        ],
        "\x1b[32m",
    );

    Ok(())
}
