use anyhow::{bail, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::builder::build;
use crate::core::scanner::{scan_dir, scan_files};
use crate::types::{Entry, EntrySource, PackOptions, Selection};
use crate::utils::codec::write_archive;
use crate::utils::fs::{check_output_file, format_bytes};
use crate::utils::progress::{create_progress_bar, display_name};

fn default_output(source: &Path) -> PathBuf {
    let stem = source.canonicalize().ok().and_then(|p| {
        let name = if p.is_dir() { p.file_name() } else { p.file_stem() };
        name.map(|n| n.to_string_lossy().to_string())
    });
    let stem = stem.unwrap_or_else(|| "archive".to_string());
    PathBuf::from(format!("{}.cbz", stem))
}

fn collect_entries(sources: &[String]) -> Result<Vec<Entry>> {
    if sources.len() == 1 && Path::new(&sources[0]).is_dir() {
        return scan_dir(Path::new(&sources[0]));
    }

    let paths: Vec<PathBuf> = sources.iter().map(PathBuf::from).collect();
    if let Some(dir) = paths.iter().find(|p| p.is_dir()) {
        bail!(
            "Pass either one directory or a list of files, not both: {}",
            dir.display()
        );
    }
    scan_files(&paths)
}

/// Keep a previous run's archive out of the next one when it sits inside
/// the scanned folder.
fn deselect_output(entries: &[Entry], selection: &mut Selection, output: &Path) {
    let output = match output.canonicalize() {
        Ok(p) => p,
        Err(_) => return,
    };
    for entry in entries {
        if let EntrySource::File(path) = &entry.source {
            if path.canonicalize().ok().as_deref() == Some(output.as_path()) {
                log::info!("Not packing the output archive {}", entry.source_name);
                selection.deselect(entry.id);
            }
        }
    }
}

pub fn pack(options: &PackOptions) -> Result<()> {
    if options.sources.is_empty() {
        bail!("No source given");
    }

    let output = match &options.output {
        Some(o) => PathBuf::from(o),
        None => default_output(Path::new(&options.sources[0])),
    };
    check_output_file(&output, options.force)?;

    eprintln!("Scanning {}...", options.sources.join(", "));
    let entries = collect_entries(&options.sources)?;

    let mut selection = Selection::all(&entries);
    for entry in &entries {
        if options
            .excludes
            .iter()
            .any(|pattern| entry.source_name.contains(pattern.as_str()))
        {
            log::info!("Excluding {}", entry.source_name);
            selection.deselect(entry.id);
        }
    }
    deselect_output(&entries, &mut selection, &output);

    let selected = selection.count_in(&entries);
    eprintln!("Found {} files, {} selected", entries.len(), selected);

    let pb = create_progress_bar();
    let archive = build(
        &entries,
        &selection,
        options.preserve_names,
        Some(&|percent, name| {
            pb.set_position(percent as u64);
            pb.set_message(display_name(name));
        }),
    );
    pb.finish_and_clear();
    let archive = archive?;

    eprintln!("Writing {}...", output.display());
    let bytes = write_archive(&archive, options.compression_level)?;
    fs::write(&output, &bytes)?;

    let mut lines = vec![
        format!("Output: {}", output.display()),
        format!("Entries: {}", archive.len()),
        format!("Content: {}", format_bytes(archive.total_size())),
        format!("Archive size: {}", format_bytes(bytes.len() as u64)),
        format!(
            "Naming: {}",
            if options.preserve_names {
                "original"
            } else {
                "sequential"
            }
        ),
    ];
    if !archive.skipped.is_empty() {
        lines.push(format!("Skipped (unreadable): {}", archive.skipped.len()));
    }

    let color = if archive.skipped.is_empty() {
        "\x1b[32m"
    } else {
        "\x1b[33m"
    };
    let line_refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
    print_box("Pack Complete", &line_refs, color);

    Ok(())
}

pub fn print_box(title: &str, lines: &[&str], color: &str) {
    let reset = "\x1b[0m";
    let max_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(title.len() + 4);
    let width = max_width + 2;

    eprintln!(
        "{}┌─ {} {}─┐{}",
        color,
        title,
        "─".repeat(width.saturating_sub(title.len() + 4)),
        reset
    );
    for line in lines {
        eprintln!(
            "{}│{} {}{:<pad$} {}│{}",
            color,
            reset,
            line,
            "",
            color,
            reset,
            pad = width.saturating_sub(line.chars().count() + 1)
        );
    }
    eprintln!("{}└{}┘{}", color, "─".repeat(width), reset);
}
