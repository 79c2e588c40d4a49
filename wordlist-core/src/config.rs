use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

const APP_DIR: &str = "WordList";

#[derive(Debug, Parser)]
#[command(
    name = "wordlist-core",
    about = "Word list core: answers JSON requests on stdin, one per line"
)]
pub struct Cli {
    /// Directory holding the saved entries and theme
    #[arg(long, env = "WORDLIST_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "WORDLIST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

fn default_data_dir() -> PathBuf {
    if let Some(local) = dirs::data_local_dir() {
        return local.join(APP_DIR);
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(APP_DIR)
}

/// Creates `dir` if needed. A failure is logged; the core still runs and
/// every write-through will report it.
pub fn ensure_data_dir(dir: &Path) {
    if dir.exists() {
        return;
    }
    match fs::create_dir_all(dir) {
        Ok(()) => tracing::info!(path = %dir.display(), "created data directory"),
        Err(e) => tracing::warn!(path = %dir.display(), error = %e, "failed to create data directory"),
    }
}
