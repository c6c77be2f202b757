mod text;
mod time;

pub(crate) use text::{format_entry_line, truncate_with_ellipsis};
pub(crate) use time::{format_display_date, format_month_title};
