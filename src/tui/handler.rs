use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{error, info};

use super::state::{Focus, JournalState, LoginState, Status};
use crate::{
    auth::{INVALID_CREDENTIALS, LoginOutcome},
    domain::mood::Mood,
    store::MoodStore,
};

pub(crate) const NO_MOOD_WARNING: &str = "Please select a mood!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoginStep {
    Stay,
    Granted,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Quit,
    NextFocus,
    PreviousFocus,
    Submit,
    Save,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PreviousMonth,
    NextMonth,
    Home,
    End,
    Today,
    PickMood(Mood),
    Backspace,
    Delete,
    InsertChar(char),
}

pub(crate) fn handle_login_key(login: &mut LoginState, key: KeyEvent) -> LoginStep {
    if key.kind == KeyEventKind::Release {
        return LoginStep::Stay;
    }
    let Some(action) = key_to_action(&key, true) else {
        return LoginStep::Stay;
    };
    match action {
        Action::Quit => return LoginStep::Quit,
        Action::Submit => return submit_login(login),
        Action::NextFocus | Action::PreviousFocus | Action::MoveUp | Action::MoveDown => {
            login.toggle_focus()
        }
        Action::MoveLeft => login.focused_input().move_left(),
        Action::MoveRight => login.focused_input().move_right(),
        Action::Home => login.focused_input().move_home(),
        Action::End => login.focused_input().move_end(),
        Action::Backspace => login.focused_input().backspace(),
        Action::Delete => login.focused_input().delete_char(),
        Action::InsertChar(ch) => login.focused_input().insert_char(ch),
        _ => {}
    }
    LoginStep::Stay
}

/// Applies one key press to the journal; returns `true` when the UI should exit.
pub(crate) fn handle_journal_key(
    store: &mut MoodStore,
    journal: &mut JournalState,
    key: KeyEvent,
) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    let typing = matches!(journal.focus, Focus::Note);
    match key_to_action(&key, typing) {
        Some(Action::Quit) => true,
        Some(action) => {
            apply_journal_action(store, journal, action);
            false
        }
        None => false,
    }
}

fn key_to_action(key: &KeyEvent, typing: bool) -> Option<Action> {
    let code = key.code;
    let modifiers = key.modifiers;

    if matches!(
        (code, modifiers),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _)
    ) {
        return Some(Action::Quit);
    }

    if matches!(
        (code, modifiers),
        (KeyCode::Char('s'), KeyModifiers::CONTROL)
    ) {
        return Some(Action::Save);
    }

    match code {
        KeyCode::Tab => Some(Action::NextFocus),
        KeyCode::BackTab => Some(Action::PreviousFocus),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Left => Some(Action::MoveLeft),
        KeyCode::Right => Some(Action::MoveRight),
        KeyCode::PageUp => Some(Action::PreviousMonth),
        KeyCode::PageDown => Some(Action::NextMonth),
        KeyCode::Home => Some(Action::Home),
        KeyCode::End => Some(Action::End),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Delete => Some(Action::Delete),
        KeyCode::Char(_) if modifiers.contains(KeyModifiers::CONTROL) => None,
        KeyCode::Char(ch) if typing => Some(Action::InsertChar(ch)),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(Action::Today),
        KeyCode::Char(ch) => Mood::from_digit(ch).map(Action::PickMood),
        _ => None,
    }
}

fn submit_login(login: &mut LoginState) -> LoginStep {
    let outcome = login
        .gate
        .attempt(login.username.text(), login.password.text());
    match outcome {
        LoginOutcome::Granted => {
            login.status = None;
            login.password.clear();
            LoginStep::Granted
        }
        LoginOutcome::Rejected => {
            login.status = Some(Status::error(INVALID_CREDENTIALS));
            LoginStep::Stay
        }
        LoginOutcome::Closed => LoginStep::Stay,
    }
}

fn apply_journal_action(store: &mut MoodStore, journal: &mut JournalState, action: Action) {
    match action {
        Action::NextFocus => journal.next_focus(),
        Action::PreviousFocus => journal.previous_focus(),
        Action::Submit | Action::Save => save_entry(store, journal),
        Action::MoveUp => {
            if matches!(journal.focus, Focus::Calendar) {
                journal.move_days(store, -7);
            }
        }
        Action::MoveDown => {
            if matches!(journal.focus, Focus::Calendar) {
                journal.move_days(store, 7);
            }
        }
        Action::MoveLeft => match journal.focus {
            Focus::Calendar => journal.move_days(store, -1),
            Focus::Mood => journal.previous_mood(),
            Focus::Note => journal.note.move_left(),
        },
        Action::MoveRight => match journal.focus {
            Focus::Calendar => journal.move_days(store, 1),
            Focus::Mood => journal.next_mood(),
            Focus::Note => journal.note.move_right(),
        },
        Action::PreviousMonth => journal.move_months(store, -1),
        Action::NextMonth => journal.move_months(store, 1),
        Action::Home => journal.note.move_home(),
        Action::End => journal.note.move_end(),
        Action::Today => {
            let today = journal.today;
            journal.select_date(store, today);
        }
        Action::PickMood(mood) => journal.mood = Some(mood),
        Action::Backspace => journal.note.backspace(),
        Action::Delete => journal.note.delete_char(),
        Action::InsertChar(ch) => journal.note.insert_char(ch),
        Action::Quit => {}
    }
}

fn save_entry(store: &mut MoodStore, journal: &mut JournalState) {
    let Some(mood) = journal.mood else {
        journal.status = Some(Status::warning(NO_MOOD_WARNING));
        return;
    };

    let date = journal.selected_key();
    store.upsert(date.as_str(), mood.label(), journal.note.text());
    match store.save() {
        Ok(()) => {
            info!(date = %date, %mood, "mood saved");
            journal.status = Some(Status::info(format!(
                "Mood for {} saved with your note!",
                date
            )));
            journal.clear_form();
        }
        Err(err) => {
            error!(date = %date, "failed to save mood data: {err:#}");
            journal.status = Some(Status::error(format!("Couldn't save: {err:#}")));
        }
    }
    journal.refresh(store);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::state::{LoginField, StatusKind};
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_login(login: &mut LoginState, text: &str) {
        for ch in text.chars() {
            handle_login_key(login, key(KeyCode::Char(ch)));
        }
    }

    fn press(store: &mut MoodStore, journal: &mut JournalState, code: KeyCode) -> bool {
        handle_journal_key(store, journal, key(code))
    }

    fn type_note(store: &mut MoodStore, journal: &mut JournalState, text: &str) {
        for ch in text.chars() {
            press(store, journal, KeyCode::Char(ch));
        }
    }

    fn journal() -> Result<(TempDir, MoodStore, JournalState)> {
        let dir = tempdir()?;
        let store = MoodStore::load(dir.path().join("mood_data.json"))?;
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let journal = JournalState::new(today, &store);
        Ok((dir, store, journal))
    }

    #[test]
    fn wrong_credentials_keep_login_form() {
        let mut login = LoginState::new();
        type_login(&mut login, "Chatrine");
        handle_login_key(&mut login, key(KeyCode::Tab));
        assert_eq!(login.focus, LoginField::Password);
        type_login(&mut login, "wrong");

        assert_eq!(handle_login_key(&mut login, key(KeyCode::Enter)), LoginStep::Stay);
        assert_eq!(login.status, Some(Status::error(INVALID_CREDENTIALS)));
        assert_eq!(login.username.text(), "Chatrine");
    }

    #[test]
    fn correct_credentials_grant_once() {
        let mut login = LoginState::new();
        type_login(&mut login, "Chatrine");
        handle_login_key(&mut login, key(KeyCode::Tab));
        type_login(&mut login, "nailong");

        assert_eq!(handle_login_key(&mut login, key(KeyCode::Enter)), LoginStep::Granted);
        assert_eq!(login.password.text(), "");
        type_login(&mut login, "nailong");
        assert_eq!(handle_login_key(&mut login, key(KeyCode::Enter)), LoginStep::Stay);
    }

    #[test]
    fn q_is_typed_on_login_but_quits_journal() -> Result<()> {
        let mut login = LoginState::new();
        assert_eq!(handle_login_key(&mut login, key(KeyCode::Char('q'))), LoginStep::Stay);
        assert_eq!(login.username.text(), "q");
        assert_eq!(handle_login_key(&mut login, key(KeyCode::Esc)), LoginStep::Quit);

        let (_dir, mut store, mut journal) = journal()?;
        assert!(press(&mut store, &mut journal, KeyCode::Char('q')));
        Ok(())
    }

    #[test]
    fn save_without_mood_warns_and_writes_nothing() -> Result<()> {
        let (dir, mut store, mut journal) = journal()?;

        press(&mut store, &mut journal, KeyCode::Tab);
        press(&mut store, &mut journal, KeyCode::Tab);
        type_note(&mut store, &mut journal, "no mood today");
        press(&mut store, &mut journal, KeyCode::Enter);

        assert_eq!(journal.status, Some(Status::warning(NO_MOOD_WARNING)));
        assert!(store.is_empty());
        assert!(!dir.path().join("mood_data.json").exists());
        assert_eq!(journal.note.text(), "no mood today");
        Ok(())
    }

    #[test]
    fn save_writes_entry_and_clears_form() -> Result<()> {
        let (dir, mut store, mut journal) = journal()?;

        press(&mut store, &mut journal, KeyCode::Char('1'));
        press(&mut store, &mut journal, KeyCode::Tab);
        press(&mut store, &mut journal, KeyCode::Right);
        assert_eq!(journal.mood, Some(Mood::Good));
        press(&mut store, &mut journal, KeyCode::Tab);
        type_note(&mut store, &mut journal, "Great day");
        press(&mut store, &mut journal, KeyCode::Enter);

        let status = journal.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Info);
        assert_eq!(status.message, "Mood for 2024-03-01 saved with your note!");
        assert_eq!(journal.mood, None);
        assert_eq!(journal.note.text(), "");
        assert_eq!(journal.saved_text, "Mood: Good\nNote: Great day");
        assert!(journal.marks.contains_key(&1));

        let reloaded = MoodStore::load(dir.path().join("mood_data.json"))?;
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get("2024-03-01").map(|e| e.note.as_str()), Some("Great day"));
        Ok(())
    }

    #[test]
    fn failed_write_keeps_form_and_reports_error() -> Result<()> {
        let (dir, mut store, mut journal) = journal()?;
        // A directory where the temp file should go makes the write fail.
        fs::create_dir(dir.path().join("mood_data.json.tmp"))?;

        press(&mut store, &mut journal, KeyCode::Char('4'));
        press(&mut store, &mut journal, KeyCode::Tab);
        press(&mut store, &mut journal, KeyCode::Tab);
        type_note(&mut store, &mut journal, "rainy");
        let quit = handle_journal_key(
            &mut store,
            &mut journal,
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
        );

        assert!(!quit);
        let status = journal.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.message.starts_with("Couldn't save"));
        assert_eq!(journal.mood, Some(Mood::Sad));
        assert_eq!(journal.note.text(), "rainy");
        assert!(!dir.path().join("mood_data.json").exists());
        Ok(())
    }

    #[test]
    fn calendar_keys_move_selection() -> Result<()> {
        let (_dir, mut store, mut journal) = journal()?;

        press(&mut store, &mut journal, KeyCode::Down);
        press(&mut store, &mut journal, KeyCode::Right);
        assert_eq!(journal.selected_key(), "2024-03-09");
        press(&mut store, &mut journal, KeyCode::PageDown);
        assert_eq!(journal.selected_key(), "2024-04-09");
        press(&mut store, &mut journal, KeyCode::Char('t'));
        assert_eq!(journal.selected_key(), "2024-03-01");
        Ok(())
    }

    #[test]
    fn key_release_is_ignored() {
        let mut login = LoginState::new();
        let mut release = key(KeyCode::Char('x'));
        release.kind = KeyEventKind::Release;
        assert_eq!(handle_login_key(&mut login, release), LoginStep::Stay);
        assert_eq!(login.username.text(), "");
    }
}
