use indicatif::{ProgressBar, ProgressStyle};

/// Percentage bar; callers report 0-100.
pub fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::with_template(
        "[{bar:30.cyan/dim}] {pos:>3}% {elapsed_precise} - {msg}",
    ) {
        pb.set_style(style.progress_chars("█░░"));
    }
    pb
}

/// Clip long entry names for the status line.
pub fn display_name(name: &str) -> String {
    if name.chars().count() > 40 {
        name.chars().take(40).collect()
    } else {
        name.to_string()
    }
}

/// `done` out of `total` as a whole percentage. An empty job counts as done.
pub fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done.min(total) * 100) / total) as u8
}
