use serde::{Deserialize, Serialize};

use super::mood;

pub(crate) const NO_ENTRY_TEXT: &str = "No data saved for this date.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DiaryEntry {
    pub(crate) mood: String,
    #[serde(default)]
    pub(crate) note: String,
}

impl DiaryEntry {
    pub(crate) fn new(mood: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            mood: mood.into(),
            note: note.into(),
        }
    }

    pub(crate) fn summary(&self) -> String {
        format!(
            "Mood: {}\nNote: {}",
            mood::display_label(&self.mood),
            self.note
        )
    }
}

/// Panel text for a date, whether or not anything was saved for it.
pub(crate) fn describe(entry: Option<&DiaryEntry>) -> String {
    entry.map_or_else(|| NO_ENTRY_TEXT.to_string(), DiaryEntry::summary)
}
