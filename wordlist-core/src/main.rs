#![windows_subsystem = "windows"]
use std::io::{self, BufRead, Write};
use std::panic::AssertUnwindSafe;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod config;
mod model;
mod protocol;
mod services;

use services::storage::FileStore;

fn main() {
    let cli = config::Cli::parse();

    // stdout carries protocol responses, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let data_dir = cli.resolved_data_dir();
    config::ensure_data_dir(&data_dir);
    let storage = FileStore::new(data_dir);
    tracing::info!(path = %storage.dir().display(), "starting wordlist-core");

    let mut session = protocol::Session::open(storage);
    if session.store().is_empty() {
        tracing::info!("ready, word list is empty");
    } else {
        tracing::info!(entries = session.store().len(), "ready");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => continue,
        };

        if line.trim().is_empty() {
            continue;
        }

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| session.handle(&line)));

        let response = match result {
            Ok(resp) => resp,
            Err(_) => {
                tracing::error!("request handler panicked");
                serde_json::json!({
                    "status": "error",
                    "message": "internal core error"
                })
                .to_string()
            }
        };

        if writeln!(stdout, "{response}").is_err() {
            break;
        }

        let _ = stdout.flush();
    }

    tracing::info!("stdin closed, exiting");
}
