use chrono::{Datelike, Months, NaiveDate};
use ratatui::style::Color;
use std::collections::BTreeMap;
use tracing::warn;

use crate::{domain::mood, store::MoodStore};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) type Week = [Option<u32>; 7];

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DayMark {
    pub(crate) label: String,
    pub(crate) color: Color,
}

pub(crate) fn parse_date_key(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub(crate) fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Day numbers of a month laid out in Monday-first weeks.
pub(crate) fn month_grid(year: i32, month: u32) -> Vec<Week> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let offset = first.weekday().num_days_from_monday() as usize;
    let days = days_in_month(first);

    let mut weeks = Vec::new();
    let mut week: Week = [None; 7];
    let mut slot = offset;
    for day in 1..=days {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}

/// Mood decoration for each day of the month that has an entry.
///
/// Keys that are not valid dates are logged and skipped.
pub(crate) fn month_marks(store: &MoodStore, year: i32, month: u32) -> BTreeMap<u32, DayMark> {
    let mut marks = BTreeMap::new();
    for (key, entry) in store.iter() {
        let Some(date) = parse_date_key(key) else {
            warn!(date = key, "skipping entry with malformed date");
            continue;
        };
        if date.year() != year || date.month() != month {
            continue;
        }
        marks.insert(
            date.day(),
            DayMark {
                label: mood::display_label(&entry.mood),
                color: mood::label_color(&entry.mood),
            },
        );
    }
    marks
}

/// Moves by whole months, clamping the day to the target month's length.
pub(crate) fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

fn days_in_month(first: NaiveDate) -> u32 {
    shift_months(first, 1)
        .pred_opt()
        .map(|last| last.day())
        .unwrap_or(31)
}
