use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use color_eyre::eyre::{Result, eyre};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Install the global subscriber. The terminal UI owns stdout, so
/// interactive runs log to a file.
pub fn init_tracing(level: &str, json: bool, target: LogTarget) -> Result<()> {
    let level = parse_level(level)?;
    match target {
        LogTarget::Stderr => install(level, json, std::io::stderr),
        LogTarget::File(path) => {
            ensure_parent_dir(&path)?;
            let file = File::options().create(true).append(true).open(&path)?;
            install(level, json, Mutex::new(file))
        }
    }
}

pub fn parse_level(level: &str) -> Result<Level> {
    level
        .trim()
        .parse::<Level>()
        .map_err(|_| eyre!("unknown log level `{level}` (expected trace, debug, info, warn or error)"))
}

fn install<W>(level: Level, json: bool, writer: W) -> Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(level)
        .with_thread_names(true)
        .with_writer(writer);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| eyre!("failed to set tracing subscriber: {e}"))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
