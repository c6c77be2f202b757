use anyhow::{Context, Result};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::domain::entry::DiaryEntry;

mod file;

/// Date-keyed mood journal mirrored to a JSON file.
///
/// Keys are the raw `YYYY-MM-DD` strings as written; the store itself never
/// validates dates or mood labels.
pub(crate) struct MoodStore {
    path: PathBuf,
    entries: BTreeMap<String, DiaryEntry>,
}

impl MoodStore {
    /// Loads the mapping from `path`, starting empty when the file is absent.
    pub(crate) fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match file::read_if_exists(&path)? {
            Some(content) => serde_json::from_str(&content)
                .with_context(|| format!("malformed mood data in {}", path.display()))?,
            None => {
                info!(path = %path.display(), "no mood data file, starting empty");
                BTreeMap::new()
            }
        };
        let store = Self { path, entries };
        debug!(entries = store.len(), "mood store loaded");
        Ok(store)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn get(&self, date: &str) -> Option<&DiaryEntry> {
        self.entries.get(date)
    }

    pub(crate) fn upsert(
        &mut self,
        date: impl Into<String>,
        mood: impl Into<String>,
        note: impl Into<String>,
    ) {
        self.entries
            .insert(date.into(), DiaryEntry::new(mood, note));
    }

    /// Rewrites the whole file with the current mapping.
    pub(crate) fn save(&self) -> Result<()> {
        let contents = file::to_pretty_json(&self.entries)?;
        file::write_atomic(&self.path, &contents)?;
        debug!(entries = self.len(), path = %self.path().display(), "mood data saved");
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in date-string order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &DiaryEntry)> {
        self.entries
            .iter()
            .map(|(date, entry)| (date.as_str(), entry))
    }
}
