use anyhow::{Context, Result};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DATA_FILE_NAME: &str = "mood_data.json";

/// Resolves and creates the data directory, `$HOME/.moodiary` unless overridden.
pub(crate) fn data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match override_dir {
        Some(dir) => dir,
        None => {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".moodiary")
        }
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("couldn't create data dir {}", dir.display()))?;
    Ok(dir)
}

pub(crate) fn data_file_path(dir: &Path) -> PathBuf {
    dir.join(DATA_FILE_NAME)
}

pub(crate) fn log_dir(dir: &Path) -> PathBuf {
    dir.join("logs")
}
