use chrono::Datelike;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::state::{Focus, JournalState, LoginField, LoginState, Status, StatusKind};
use crate::{calendar, domain::mood::Mood, format};

const ACCENT: Color = Color::Rgb(0xF0, 0x47, 0x70);
const WEEKDAYS: &str = "Mo Tu We Th Fr Sa Su";

pub(crate) fn draw_login(frame: &mut Frame<'_>, login: &LoginState) {
    let area = centered(frame.area(), 44, 14);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Login to Moodiary ")
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let hint = Paragraph::new("Ini rahasia, login dulu!").alignment(Alignment::Center);
    frame.render_widget(hint, rows[0]);

    draw_field(
        frame,
        rows[1],
        "Username",
        login.username.text().to_string(),
        login.focus == LoginField::Username,
    );
    draw_field(
        frame,
        rows[2],
        "Password",
        login.password.masked(),
        login.focus == LoginField::Password,
    );

    if let Some(status) = &login.status {
        frame.render_widget(status_line(status), rows[3]);
    } else {
        let help = Paragraph::new("Enter login, Tab switch, Esc exit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[3]);
    }

    let (input, area, masked) = match login.focus {
        LoginField::Username => (&login.username, rows[1], false),
        LoginField::Password => (&login.password, rows[2], true),
    };
    frame.set_cursor_position(input.cursor_position(area, masked));
}

fn draw_field(frame: &mut Frame<'_>, area: Rect, title: &str, value: String, active: bool) {
    let widget = Paragraph::new(value).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(active_style(active)),
    );
    frame.render_widget(widget, area);
}

pub(crate) fn draw_journal(frame: &mut Frame<'_>, journal: &JournalState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let header = Paragraph::new(Line::from(Span::styled(
        "MOODIARY",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(header, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(rows[1]);
    draw_calendar(frame, journal, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(columns[1]);
    draw_moods(frame, journal, right[0]);
    draw_note_input(frame, journal, right[1]);
    draw_saved(frame, journal, right[2]);

    let footer = match &journal.status {
        Some(status) => status_line(status),
        None => Paragraph::new(
            "Tab focus, arrows move, PgUp/PgDn month, t today, 1-5 mood, Enter/Ctrl+S save, q quit",
        )
        .style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(footer, rows[2]);
}

fn draw_calendar(frame: &mut Frame<'_>, journal: &JournalState, area: Rect) {
    let selected = journal.selected;
    let mut lines = vec![Line::from(Span::styled(
        WEEKDAYS,
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for week in calendar::month_grid(selected.year(), selected.month()) {
        let mut spans = Vec::with_capacity(week.len() * 2);
        for (slot, day) in week.iter().enumerate() {
            if slot > 0 {
                spans.push(Span::raw(" "));
            }
            match day {
                Some(day) => {
                    spans.push(Span::styled(format!("{:>2}", day), day_style(journal, *day)))
                }
                None => spans.push(Span::raw("  ")),
            }
        }
        lines.push(Line::from(spans));
    }

    let widget = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format::format_month_title(selected))
            .border_style(active_style(journal.focus == Focus::Calendar)),
    );
    frame.render_widget(widget, area);
}

fn day_style(journal: &JournalState, day: u32) -> Style {
    let mut style = match journal.marks.get(&day) {
        Some(mark) => Style::default().bg(mark.color).fg(Color::Black),
        None => Style::default(),
    };
    if journal.today.year() == journal.selected.year()
        && journal.today.month() == journal.selected.month()
        && journal.today.day() == day
    {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if journal.selected.day() == day {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }
    style
}

fn draw_moods(frame: &mut Frame<'_>, journal: &JournalState, area: Rect) {
    let mut spans = Vec::new();
    for (index, mood) in Mood::ALL.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        let mut style = Style::default().bg(mood.color()).fg(Color::Black);
        let label = if journal.mood == Some(mood) {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            format!("[{} {}]", index + 1, mood.display_name())
        } else {
            format!(" {} {} ", index + 1, mood.display_name())
        };
        spans.push(Span::styled(label, style));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("How are you feeling")
            .border_style(active_style(journal.focus == Focus::Mood)),
    );
    frame.render_widget(widget, area);
}

fn draw_note_input(frame: &mut Frame<'_>, journal: &JournalState, area: Rect) {
    let active = journal.focus == Focus::Note;
    let widget = Paragraph::new(journal.note.text()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Write about it")
            .border_style(active_style(active)),
    );
    frame.render_widget(widget, area);
    if active {
        frame.set_cursor_position(journal.note.cursor_position(area, false));
    }
}

fn draw_saved(frame: &mut Frame<'_>, journal: &JournalState, area: Rect) {
    let title = format!("Notes: {}", format::format_display_date(journal.selected));
    let title = format::truncate_with_ellipsis(&title, area.width.saturating_sub(2) as usize);
    let widget = Paragraph::new(journal.saved_text.as_str())
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn status_line(status: &Status) -> Paragraph<'_> {
    let color = match status.kind {
        StatusKind::Info => Color::Green,
        StatusKind::Warning => Color::Yellow,
        StatusKind::Error => Color::Red,
    };
    Paragraph::new(status.message.as_str()).style(Style::default().fg(color))
}

fn active_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MoodStore;
    use anyhow::Result;
    use chrono::NaiveDate;
    use ratatui::{Terminal, backend::TestBackend};
    use tempfile::tempdir;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_login_then_journal() -> Result<()> {
        let dir = tempdir()?;
        let mut store = MoodStore::load(dir.path().join("mood_data.json"))?;
        store.upsert("2024-03-01", "happy", "Great day");
        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;

        let login = LoginState::new();
        terminal.draw(|frame| draw_login(frame, &login))?;
        assert!(buffer_text(&terminal).contains("Login to Moodiary"));

        let journal = JournalState::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), &store);
        terminal.draw(|frame| draw_journal(frame, &journal))?;
        let text = buffer_text(&terminal);
        assert!(text.contains("MOODIARY"));
        assert!(text.contains("March 2024"));
        assert!(text.contains("Mood: Happy"));
        assert!(text.contains("Note: Great day"));
        Ok(())
    }

    #[test]
    fn centered_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 44, 14), area);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
    }
}
