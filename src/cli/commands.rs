use anyhow::Result;
use chrono::NaiveDate;
use crossterm::terminal;
use tracing::info;

use crate::{
    app::AppContext,
    auth, calendar,
    cli::args::{Cli, Command, Credentials},
    domain::{entry, mood::Mood},
    format,
    store::MoodStore,
    tui,
};

pub(crate) fn dispatch(app: &AppContext, cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Log {
            credentials,
            date,
            mood,
            note,
        }) => {
            let mut store = open_authenticated(app, &credentials)?;
            log_mood(&mut store, date, mood, &note)
        }
        Some(Command::Show { credentials, date }) => {
            let store = open_authenticated(app, &credentials)?;
            println!("{}", show_entry(&store, date));
            Ok(())
        }
        Some(Command::List { credentials }) => {
            let store = open_authenticated(app, &credentials)?;
            list_entries(&store);
            Ok(())
        }
        Some(Command::Version) => {
            println!("moodiary {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => tui::run_tui(app),
    }
}

/// The data file is not touched until the credentials check out.
fn open_authenticated(app: &AppContext, credentials: &Credentials) -> Result<MoodStore> {
    auth::login(&credentials.username, &credentials.password)?;
    app.open_store()
}

fn log_mood(store: &mut MoodStore, date: NaiveDate, mood: Mood, note: &str) -> Result<()> {
    let key = calendar::date_key(date);
    store.upsert(key.as_str(), mood.label(), note);
    store.save()?;
    info!(date = %key, %mood, path = %store.path().display(), "mood logged from command line");
    println!("Mood for {} saved with your note!", key);
    Ok(())
}

fn show_entry(store: &MoodStore, date: NaiveDate) -> String {
    entry::describe(store.get(&calendar::date_key(date)))
}

fn list_entries(store: &MoodStore) {
    if store.is_empty() {
        println!("No moods saved yet.");
        return;
    }
    let terminal_width = terminal::size()
        .map(|(width, _)| width as usize)
        .unwrap_or(80);
    for (date, entry) in store.iter() {
        let line = format::format_entry_line(date, &entry.mood, &entry.note, terminal_width);
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::INVALID_CREDENTIALS;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn run(app: &AppContext, args: &[&str]) -> Result<()> {
        let cli = Cli::try_parse_from(["moodiary"].iter().chain(args).copied())?;
        dispatch(app, cli)
    }

    #[test]
    fn logged_mood_is_shown_and_persisted() -> Result<()> {
        let dir = tempdir()?;
        let app = AppContext::new(dir.path());
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let mut store = app.open_store()?;
        assert_eq!(show_entry(&store, date), entry::NO_ENTRY_TEXT);
        log_mood(&mut store, date, Mood::Happy, "Great day")?;
        assert_eq!(show_entry(&store, date), "Mood: Happy\nNote: Great day");

        let reopened = app.open_store()?;
        assert_eq!(show_entry(&reopened, date), "Mood: Happy\nNote: Great day");
        Ok(())
    }

    #[test]
    fn wrong_credentials_are_reported_before_reading_data() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("mood_data.json"), "{ not json")?;
        let app = AppContext::new(dir.path());

        for args in [
            &["show", "--username", "x", "--password", "y", "2024-03-01"][..],
            &["list", "--username", "x", "--password", "y"][..],
            &["log", "--username", "x", "--password", "y", "2024-03-01", "sad"][..],
        ] {
            let err = run(&app, args).unwrap_err();
            assert_eq!(err.to_string(), INVALID_CREDENTIALS);
        }
        assert_eq!(
            fs::read_to_string(dir.path().join("mood_data.json"))?,
            "{ not json"
        );

        let err = run(
            &app,
            &["show", "--username", "Chatrine", "--password", "nailong", "2024-03-01"],
        )
        .unwrap_err();
        assert!(err.to_string().contains("malformed mood data"));
        Ok(())
    }

    #[test]
    fn log_command_writes_through_dispatch() -> Result<()> {
        let dir = tempdir()?;
        let app = AppContext::new(dir.path());

        run(
            &app,
            &[
                "log", "--username", "Chatrine", "--password", "nailong", "2024-03-01", "Good",
                "walked",
            ],
        )?;

        let store = app.open_store()?;
        assert_eq!(
            show_entry(&store, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            "Mood: Good\nNote: walked"
        );
        Ok(())
    }
}
