use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::{calendar, domain::mood::Mood};

#[derive(Parser)]
#[command(name = "moodiary")]
#[command(about = "A tiny mood diary", version)]
pub(crate) struct Cli {
    /// Directory holding mood_data.json and logs
    #[arg(long, global = true)]
    pub(crate) data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Args)]
pub(crate) struct Credentials {
    #[arg(long)]
    pub(crate) username: String,
    #[arg(long)]
    pub(crate) password: String,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Record the mood and note for a date
    Log {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        #[arg(value_enum, ignore_case = true)]
        mood: Mood,
        #[arg(default_value = "")]
        note: String,
    },
    /// Print the saved entry for a date
    Show {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        credentials: Credentials,
    },
    Version,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    calendar::parse_date_key(value).ok_or_else(|| format!("`{value}` is not a YYYY-MM-DD date"))
}
