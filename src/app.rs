use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::{config, store::MoodStore};

/// Knows where the diary lives; the store itself is only read after login.
pub(crate) struct AppContext {
    data_file: PathBuf,
}

impl AppContext {
    pub(crate) fn new(data_dir: &Path) -> Self {
        Self {
            data_file: config::data_file_path(data_dir),
        }
    }

    pub(crate) fn open_store(&self) -> Result<MoodStore> {
        MoodStore::load(&self.data_file)
    }
}
