use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

const LABEL_WIDTH: usize = 12;

pub enum OutputColor {
    Green,
    Red,
}

/// Right-aligned bold status label, e.g. `    Archived`.
pub fn get_formatted_left_output(label: &str, color: &OutputColor) -> String {
    let padded = format!("{label:>width$}", width = LABEL_WIDTH);

    match color {
        OutputColor::Green => padded.green().bold().to_string(),
        OutputColor::Red => padded.red().bold().to_string(),
    }
}

pub fn create_new_pb(len: u64, prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);

    let style = ProgressStyle::with_template("{prefix:>12.cyan.bold} [{bar:25}] {pos}/{len}{msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");

    pb.set_style(style);
    pb.set_prefix(prefix.to_string());
    pb
}
