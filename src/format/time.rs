use chrono::NaiveDate;

/// Long form used in panel titles, e.g. `Friday, 01 March 2024`.
pub(crate) fn format_display_date(date: NaiveDate) -> String {
    date.format("%A, %d %B %Y").to_string()
}

pub(crate) fn format_month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
