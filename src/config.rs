use std::path::PathBuf;

use chrono::{Local, NaiveDate};

/// Publishing locations and the date used for attribute defaults. Built
/// once in main and passed down explicitly; nothing reads ambient state.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    /// Directory the rendered post is written into.
    pub post_dir: PathBuf,
    /// Directory referenced images are copied into.
    pub asset_dir: PathBuf,
    /// Fallback for `pubDate` when the note does not set one.
    pub today: NaiveDate,
}

impl Config {
    pub fn new() -> Self {
        Self {
            post_dir: PathBuf::from("src/content/post"),
            asset_dir: PathBuf::from("src/assets/blog"),
            today: Local::now().date_naive(),
        }
    }
}
