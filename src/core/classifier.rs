use crate::types::Classification;

/// Metadata files that keep their name through packing.
pub const SPECIAL_NAMES: [&str; 7] = [
    "comicinfo.xml",
    "comicbookinfo.json",
    "metadata.opf",
    "readme.txt",
    "readme.md",
    "credits.txt",
    "info.txt",
];

pub const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "avif"];

/// Last path segment. Both separators are accepted since archive paths
/// written on Windows sometimes carry backslashes.
pub fn basename(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path)
}

/// Substring after the last `.` of the basename, if any.
pub fn extension(name: &str) -> Option<&str> {
    let base = basename(name);
    base.rfind('.').map(|i| &base[i + 1..])
}

pub fn is_special(path: &str) -> bool {
    let base = basename(path);
    SPECIAL_NAMES.iter().any(|s| s.eq_ignore_ascii_case(base))
}

/// Shared image predicate for classification and extraction.
pub fn is_image(path: &str) -> bool {
    match extension(path) {
        Some(ext) => IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

pub fn classify(name: &str) -> Classification {
    if is_special(name) {
        Classification::Special
    } else if is_image(name) {
        Classification::Image
    } else {
        Classification::Ordinary
    }
}
