use std::{fmt, path::PathBuf, str::FromStr};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::warn;
use serde::{Deserialize, Serialize};

pub mod week_model;

/// Identifier of one report week.
/// Consists of:
/// 1. Week-numbering year
/// 2. Week number, normally 1..=53
///
/// Its canonical string form `"{year}-{week:02}"` (e.g. `2025-01`) is the
/// lookup key of the week cache and the stem of the week files on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn new(year: i32, week: u32) -> Self {
        Self { year, week }
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.week)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWeekKeyError(String);

impl fmt::Display for ParseWeekKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected YEAR-WW, got `{}`", self.0)
    }
}

impl std::error::Error for ParseWeekKeyError {}

impl FromStr for WeekKey {
    type Err = ParseWeekKeyError;

    /* split on the last dash so that negative years still parse */
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseWeekKeyError(s.to_owned());
        let (year, week) = s.rsplit_once('-').ok_or_else(err)?;
        Ok(WeekKey {
            year: year.parse().map_err(|_| err())?,
            week: week.parse().map_err(|_| err())?,
        })
    }
}

/// A model for describing configuration of the report book.
/// Consists of:
/// 1. Trainee, department and company names printed on every report
/// 2. Directory into which generated reports are written
/// 3. Training start date as `YYYY-MM-DD`, empty if unknown
/// 4. UI language code and an optional directory with custom language files
/// 5. Optional banner image and company logo paths
/// 6. Output format of generated reports
///
/// Every field has a default so config files written by older versions load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub trainee_name: String,
    pub department_name: String,
    pub company_name: String,
    pub output_directory: String,
    pub start_date: String,
    pub language: String,
    pub custom_language_directory: String,
    pub banner_image: String,
    pub company_logo: String,
    pub output_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trainee_name: String::new(),
            department_name: String::new(),
            company_name: String::new(),
            output_directory: dirs::desktop_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .to_string_lossy()
                .into_owned(),
            start_date: String::new(),
            language: "de".to_owned(),
            custom_language_directory: String::new(),
            banner_image: String::new(),
            company_logo: String::new(),
            output_format: "pdf".to_owned(),
        }
    }
}

impl Config {
    /// Parsed training start date. Empty or malformed values count as unknown.
    pub fn training_start(&self) -> Option<NaiveDate> {
        let raw = self.start_date.trim();
        if raw.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(e) => {
                warn!("Ignoring training start date `{}`: {}", raw, e);
                None
            }
        }
    }
}

/// A model for describing ARGS of the tool.
/// Consists of:
/// 1. Directory holding config.json and the week files. Defaults to `BerichtGen` inside the platform data directory.
/// 2. The command to run.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

/// Upper bound for `weeks --before`/`--after`, ten years of reports.
pub const MAX_LISTED_WEEKS: i64 = 530;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show the current calendar week, its workdays and the report number
    Current,
    /// List the weeks around the current one
    Weeks {
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(..=MAX_LISTED_WEEKS))]
        before: u32,
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(..=MAX_LISTED_WEEKS))]
        after: u32,
    },
    /// Print every day entry of a week, e.g. `show 2025-01`
    Show { week: WeekKey },
    /// Save the entry of one weekday
    Save {
        week: WeekKey,
        weekday: String,
        #[arg(long)]
        area: String,
        #[arg(long, default_value = "")]
        notes: String,
        /// Defaults to the weekday's date inside the week
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
    /// Print the configuration, updating the given fields first
    Config(ConfigUpdate),
}

#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct ConfigUpdate {
    #[arg(long)]
    pub trainee_name: Option<String>,
    #[arg(long)]
    pub department_name: Option<String>,
    #[arg(long)]
    pub company_name: Option<String>,
    #[arg(long)]
    pub start_date: Option<String>,
    #[arg(long)]
    pub output_directory: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub output_format: Option<String>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ConfigUpdate::default()
    }

    /// Overwrites the fields of `config` that were given.
    pub fn apply_to(self, config: &mut Config) {
        let fields = [
            (self.trainee_name, &mut config.trainee_name),
            (self.department_name, &mut config.department_name),
            (self.company_name, &mut config.company_name),
            (self.start_date, &mut config.start_date),
            (self.output_directory, &mut config.output_directory),
            (self.language, &mut config.language),
            (self.output_format, &mut config.output_format),
        ];
        for (update, field) in fields {
            if let Some(value) = update {
                *field = value;
            }
        }
    }
}
