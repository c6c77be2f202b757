use std::{fmt, str::FromStr};

use anyhow::{Result, bail};
use clap::ValueEnum;
use ratatui::style::Color;

/// Fallback color for labels outside the known set.
pub(crate) const UNKNOWN_MOOD_COLOR: Color = Color::Rgb(0xFF, 0xFF, 0xFF);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub(crate) enum Mood {
    Happy,
    Good,
    Neutral,
    Sad,
    Depressed,
}

impl Mood {
    pub(crate) const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Good,
        Mood::Neutral,
        Mood::Sad,
        Mood::Depressed,
    ];

    /// Persisted form of the mood.
    pub(crate) fn label(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Good => "good",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Depressed => "depressed",
        }
    }

    pub(crate) fn display_name(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Good => "Good",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::Depressed => "Depressed",
        }
    }

    pub(crate) fn color(self) -> Color {
        match self {
            Mood::Happy => Color::Rgb(0xFF, 0xD7, 0x00),
            Mood::Good => Color::Rgb(0xFF, 0xC1, 0xCC),
            Mood::Neutral => Color::Rgb(0xF2, 0xDD, 0xDC),
            Mood::Sad => Color::Rgb(0xB3, 0xE5, 0xFC),
            Mood::Depressed => Color::Rgb(0xE3, 0xD8, 0xF1),
        }
    }

    pub(crate) fn next(self) -> Self {
        let index = self.index();
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub(crate) fn previous(self) -> Self {
        let index = self.index();
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Picks a mood by its 1-based position in the selector.
    pub(crate) fn from_digit(ch: char) -> Option<Self> {
        let digit = ch.to_digit(10)? as usize;
        digit.checked_sub(1).and_then(|index| Self::ALL.get(index).copied())
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|mood| *mood == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mood {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let needle = value.trim().to_lowercase();
        match Self::ALL.into_iter().find(|mood| mood.label() == needle) {
            Some(mood) => Ok(mood),
            None => bail!("unknown mood `{}`", value),
        }
    }
}

/// Capitalizes a stored label for display, whether or not it is a known mood.
pub(crate) fn display_label(label: &str) -> String {
    if let Ok(mood) = label.parse::<Mood>() {
        return mood.display_name().to_string();
    }
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn label_color(label: &str) -> Color {
    label
        .parse::<Mood>()
        .map(Mood::color)
        .unwrap_or(UNKNOWN_MOOD_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_case_insensitively() -> Result<()> {
        assert_eq!("happy".parse::<Mood>()?, Mood::Happy);
        assert_eq!(" Depressed ".parse::<Mood>()?, Mood::Depressed);
        assert!("ecstatic".parse::<Mood>().is_err());
        Ok(())
    }

    #[test]
    fn cycles_through_all_moods() {
        assert_eq!(Mood::Happy.next(), Mood::Good);
        assert_eq!(Mood::Depressed.next(), Mood::Happy);
        assert_eq!(Mood::Happy.previous(), Mood::Depressed);
    }

    #[test]
    fn digits_pick_selector_position() {
        assert_eq!(Mood::from_digit('1'), Some(Mood::Happy));
        assert_eq!(Mood::from_digit('5'), Some(Mood::Depressed));
        assert_eq!(Mood::from_digit('0'), None);
        assert_eq!(Mood::from_digit('6'), None);
        assert_eq!(Mood::from_digit('x'), None);
    }

    #[test]
    fn unknown_labels_fall_back_to_white() {
        assert_eq!(label_color("sad"), Mood::Sad.color());
        assert_eq!(label_color("bored"), UNKNOWN_MOOD_COLOR);
        assert_eq!(display_label("bored"), "Bored");
        assert_eq!(display_label("good"), "Good");
        assert_eq!(display_label(""), "");
    }
}
