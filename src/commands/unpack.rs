use anyhow::{bail, Result};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::commands::pack::print_box;
use crate::core::allocator::NameAllocator;
use crate::core::extractor::extract;
use crate::types::{Entry, UnpackOptions};
use crate::utils::fs::{ensure_dir, format_bytes, is_empty_dir};
use crate::utils::progress::{create_progress_bar, display_name};

struct PlannedFile<'a> {
    name: String,
    entry: &'a Entry,
}

/// Assign on-disk names before any write happens. Basenames from different
/// archive folders can clash, so they go through the allocator too.
fn plan_names(entries: &[Entry], renumber: bool) -> Vec<PlannedFile<'_>> {
    let mut allocator = NameAllocator::new();
    entries
        .iter()
        .map(|entry| PlannedFile {
            name: allocator.allocate(entry.classification(), &entry.source_name, !renumber),
            entry,
        })
        .collect()
}

pub fn unpack(options: &UnpackOptions) -> Result<()> {
    let input_path = Path::new(&options.input);
    let output_path = Path::new(&options.output);

    if !input_path.is_file() {
        bail!("Archive not found: {}", input_path.display());
    }

    if output_path.exists() && !is_empty_dir(output_path)? {
        if !options.force {
            bail!(
                "Output directory already exists: {}. Use --force to overwrite.",
                output_path.display()
            );
        }

        eprintln!("Removing existing {}...", output_path.display());
        fs::remove_dir_all(output_path)?;
    }

    eprintln!("Opening {}", input_path.display());
    let data = fs::read(input_path)?;

    let start = Instant::now();
    let pb = create_progress_bar();
    let entries = extract(
        &data,
        Some(&|percent, name| {
            pb.set_position(percent as u64);
            pb.set_message(display_name(name));
        }),
    );
    pb.finish_and_clear();
    let entries = entries?;

    if entries.is_empty() {
        bail!("No images found in {}", input_path.display());
    }

    ensure_dir(output_path)?;
    eprintln!("Extracting to {}", output_path.display());

    let planned = plan_names(&entries, options.renumber);
    let written: Vec<Result<u64>> = planned
        .par_iter()
        .map(|file| {
            let data = file.entry.read()?;
            fs::write(output_path.join(&file.name), &data)?;
            Ok(data.len() as u64)
        })
        .collect();

    let mut total_size = 0u64;
    let mut failed = 0usize;
    for (file, result) in planned.iter().zip(written) {
        match result {
            Ok(size) => total_size += size,
            Err(e) => {
                log::warn!("Failed to write {}: {}", file.name, e);
                failed += 1;
            }
        }
    }
    let elapsed = start.elapsed().as_secs_f64();

    if failed == planned.len() {
        bail!("Could not write any file to {}", output_path.display());
    }

    let mut lines = vec![
        format!(
            "Extracted: {} images ({})",
            planned.len() - failed,
            format_bytes(total_size)
        ),
        format!("Time: {:.1}s", elapsed),
    ];
    if failed > 0 {
        lines.push(format!("Failed: {}", failed));
    }
    let line_refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
    print_box("Unpack Complete", &line_refs, "\x1b[32m");

    Ok(())
}
