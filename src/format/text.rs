use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::mood;

const ELLIPSIS: &str = "...";

/// One `list` line: date, mood name, then the note squeezed onto the rest.
pub(crate) fn format_entry_line(date: &str, mood: &str, note: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let prefix = format!("{}  {:<9}  ", date, mood::display_label(mood));
    let prefix_width = UnicodeWidthStr::width(prefix.as_str());
    let clean_note = sanitize_content(note);
    if max_width <= prefix_width {
        return truncate_with_ellipsis(prefix.trim_end(), max_width);
    }

    let note_width = max_width.saturating_sub(prefix_width);
    let truncated = truncate_with_ellipsis(&clean_note, note_width);
    format!("{}{}", prefix, truncated).trim_end().to_string()
}

/// Collapses line breaks, tabs and runs of spaces into single spaces.
fn sanitize_content(content: &str) -> String {
    content.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cuts `value` to at most `max_width` terminal columns, marking the cut with dots.
pub(crate) fn truncate_with_ellipsis(value: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(value) <= max_width {
        return value.to_string();
    }
    let Some(budget) = max_width.checked_sub(ELLIPSIS.len()).filter(|budget| *budget > 0) else {
        return ".".repeat(max_width);
    };

    let mut used = 0;
    let kept: String = value
        .chars()
        .take_while(|ch| {
            used += UnicodeWidthChar::width(*ch).unwrap_or(1);
            used <= budget
        })
        .collect();
    kept + ELLIPSIS
}
