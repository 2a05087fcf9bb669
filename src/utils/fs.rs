use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Refuse to clobber an existing file unless `force` is set.
pub fn check_output_file(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Output file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }
    Ok(())
}

pub fn is_empty_dir(path: &Path) -> Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.1} {}", size, UNITS[unit_index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0.0 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
        assert_eq!(format_bytes(1073741824), "1.0 GB");
    }

    #[test]
    fn test_check_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.cbz");
        assert!(check_output_file(&path, false).is_ok());
        fs::write(&path, b"x").unwrap();
        assert!(check_output_file(&path, false).is_err());
        assert!(check_output_file(&path, true).is_ok());
    }

    #[test]
    fn test_is_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(is_empty_dir(dir.path()).unwrap());
        ensure_dir(&dir.path().join("sub")).unwrap();
        assert!(!is_empty_dir(dir.path()).unwrap());
    }
}
