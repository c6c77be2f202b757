use chrono::{Datelike, Days, NaiveDate};
use ratatui::layout::Rect;
use std::collections::BTreeMap;
use unicode_width::UnicodeWidthChar;

use crate::{
    auth::LoginGate,
    calendar::{self, DayMark},
    domain::{entry, mood::Mood},
    store::MoodStore,
};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Status {
    pub(crate) kind: StatusKind,
    pub(crate) message: String,
}

impl Status {
    pub(crate) fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    pub(crate) fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            message: message.into(),
        }
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum LoginField {
    Username,
    Password,
}

pub(crate) struct LoginState {
    pub(crate) username: LineInput,
    pub(crate) password: LineInput,
    pub(crate) focus: LoginField,
    pub(crate) status: Option<Status>,
    pub(crate) gate: LoginGate,
}

impl LoginState {
    pub(crate) fn new() -> Self {
        Self {
            username: LineInput::new(),
            password: LineInput::new(),
            focus: LoginField::Username,
            status: None,
            gate: LoginGate::new(),
        }
    }

    pub(crate) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub(crate) fn focused_input(&mut self) -> &mut LineInput {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Focus {
    Calendar,
    Mood,
    Note,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Calendar => Focus::Mood,
            Focus::Mood => Focus::Note,
            Focus::Note => Focus::Calendar,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Calendar => Focus::Note,
            Focus::Mood => Focus::Calendar,
            Focus::Note => Focus::Mood,
        }
    }
}

pub(crate) struct JournalState {
    pub(crate) today: NaiveDate,
    pub(crate) selected: NaiveDate,
    pub(crate) mood: Option<Mood>,
    pub(crate) note: LineInput,
    pub(crate) focus: Focus,
    pub(crate) status: Option<Status>,
    pub(crate) saved_text: String,
    pub(crate) marks: BTreeMap<u32, DayMark>,
}

impl JournalState {
    pub(crate) fn new(today: NaiveDate, store: &MoodStore) -> Self {
        let mut state = Self {
            today,
            selected: today,
            mood: None,
            note: LineInput::new(),
            focus: Focus::Calendar,
            status: None,
            saved_text: String::new(),
            marks: BTreeMap::new(),
        };
        state.refresh(store);
        state
    }

    /// Recomputes the calendar decoration and the saved-entry panel.
    pub(crate) fn refresh(&mut self, store: &MoodStore) {
        self.marks = calendar::month_marks(store, self.selected.year(), self.selected.month());
        self.saved_text = entry::describe(store.get(&calendar::date_key(self.selected)));
    }

    pub(crate) fn selected_key(&self) -> String {
        calendar::date_key(self.selected)
    }

    pub(crate) fn select_date(&mut self, store: &MoodStore, date: NaiveDate) {
        self.selected = date;
        self.refresh(store);
    }

    pub(crate) fn move_days(&mut self, store: &MoodStore, delta: i64) {
        let days = Days::new(delta.unsigned_abs());
        let moved = if delta >= 0 {
            self.selected.checked_add_days(days)
        } else {
            self.selected.checked_sub_days(days)
        };
        if let Some(date) = moved {
            self.select_date(store, date);
        }
    }

    pub(crate) fn move_months(&mut self, store: &MoodStore, delta: i32) {
        let date = calendar::shift_months(self.selected, delta);
        self.select_date(store, date);
    }

    pub(crate) fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub(crate) fn previous_focus(&mut self) {
        self.focus = self.focus.previous();
    }

    pub(crate) fn next_mood(&mut self) {
        self.mood = Some(self.mood.map_or(Mood::Happy, Mood::next));
    }

    pub(crate) fn previous_mood(&mut self) {
        self.mood = Some(self.mood.map_or(Mood::Depressed, Mood::previous));
    }

    pub(crate) fn clear_form(&mut self) {
        self.mood = None;
        self.note.clear();
    }
}

/// Single-line text field with a character cursor.
pub(crate) struct LineInput {
    text: String,
    cursor: usize,
}

impl LineInput {
    fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    pub(crate) fn insert_char(&mut self, ch: char) {
        self.clamp_cursor();
        let byte_index = byte_index_at_char(&self.text, self.cursor);
        self.text.insert(byte_index, ch);
        self.cursor = self.cursor.saturating_add(1);
    }

    pub(crate) fn backspace(&mut self) {
        self.clamp_cursor();
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.remove_at_cursor();
    }

    pub(crate) fn delete_char(&mut self) {
        self.clamp_cursor();
        self.remove_at_cursor();
    }

    pub(crate) fn move_left(&mut self) {
        self.clamp_cursor();
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(crate) fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub(crate) fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn masked(&self) -> String {
        "*".repeat(self.len())
    }

    /// Terminal cursor position inside a bordered one-line box.
    pub(crate) fn cursor_position(&self, area: Rect, masked: bool) -> (u16, u16) {
        let col = if masked {
            self.cursor
        } else {
            width_up_to_char(&self.text, self.cursor)
        };
        let max_col = area.width.saturating_sub(2) as usize;
        (area.x + col.min(max_col) as u16 + 1, area.y + 1)
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.len());
    }

    fn remove_at_cursor(&mut self) {
        let remove_at = byte_index_at_char(&self.text, self.cursor);
        if let Some(ch) = self.text[remove_at..].chars().next() {
            self.text
                .replace_range(remove_at..remove_at + ch.len_utf8(), "");
        }
    }
}

fn byte_index_at_char(value: &str, char_index: usize) -> usize {
    if char_index == 0 {
        return 0;
    }
    value
        .char_indices()
        .nth(char_index)
        .map(|(idx, _)| idx)
        .unwrap_or_else(|| value.len())
}

fn width_up_to_char(value: &str, char_index: usize) -> usize {
    value
        .chars()
        .take(char_index)
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum()
}
