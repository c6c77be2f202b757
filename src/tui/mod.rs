use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::debug;

use crate::app::AppContext;

mod handler;
mod state;
mod view;

use handler::{LoginStep, handle_journal_key, handle_login_key};
use state::{JournalState, LoginState};
use view::{draw_journal, draw_login};

const TUI_POLL_MS: u64 = 200;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub(crate) fn run_tui(app: &AppContext) -> Result<()> {
    let mut terminal = setup_terminal()?;
    debug!("terminal ui started");

    let result = run_session(&mut terminal, app);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Login first; the diary file is only read once the gate is passed.
fn run_session(terminal: &mut Term, app: &AppContext) -> Result<()> {
    let mut login = LoginState::new();
    loop {
        terminal.draw(|frame| draw_login(frame, &login))?;
        let Some(key) = next_key()? else {
            continue;
        };
        match handle_login_key(&mut login, key) {
            LoginStep::Stay => {}
            LoginStep::Quit => return Ok(()),
            LoginStep::Granted => break,
        }
    }

    let mut store = app.open_store()?;
    let mut journal = JournalState::new(Local::now().date_naive(), &store);
    debug!(entries = store.len(), "journal opened");
    loop {
        terminal.draw(|frame| draw_journal(frame, &journal))?;
        let Some(key) = next_key()? else {
            continue;
        };
        if handle_journal_key(&mut store, &mut journal, key) {
            break;
        }
    }
    Ok(())
}

fn next_key() -> Result<Option<KeyEvent>> {
    if !poll_event()? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) => Ok(Some(key)),
        _ => Ok(None),
    }
}

fn poll_event() -> Result<bool> {
    Ok(event::poll(std::time::Duration::from_millis(TUI_POLL_MS))?)
}
