//! Module with the weekly report records as they are stored on disk
use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::week_sync::models::WeekKey;

/// Weekdays that get a report entry, in report order.
pub const WEEKDAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Offset of `weekday` from Monday, if it is one of [`WEEKDAYS`].
pub fn weekday_offset(weekday: &str) -> Option<u32> {
    WEEKDAYS
        .iter()
        .position(|day| day.eq_ignore_ascii_case(weekday))
        .map(|index| index as u32)
}

/// Where the trainee spent the day. Unknown names are stored as they came.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Area {
    Department,
    School,
    Seminar,
    Holiday,
    Other(String),
}

impl From<String> for Area {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Department" => Area::Department,
            "School" => Area::School,
            "Seminar" => Area::Seminar,
            "Holiday" => Area::Holiday,
            _ => Area::Other(value),
        }
    }
}

impl From<&str> for Area {
    fn from(value: &str) -> Self {
        Area::from(value.to_owned())
    }
}

impl From<Area> for String {
    fn from(area: Area) -> Self {
        area.to_string()
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Area::Department => f.write_str("Department"),
            Area::School => f.write_str("School"),
            Area::Seminar => f.write_str("Seminar"),
            Area::Holiday => f.write_str("Holiday"),
            Area::Other(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub area: Area,
    pub notes: String,
}

/// All entries of one report week, keyed by weekday name. A weekday without
/// an entry is simply missing from `entries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekData {
    pub year: i32,
    pub week: u32,
    #[serde(default)]
    pub entries: BTreeMap<String, DayEntry>,
}

impl WeekData {
    /// A week nobody has written anything for yet.
    pub fn empty(key: WeekKey) -> Self {
        Self {
            year: key.year,
            week: key.week,
            entries: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> WeekKey {
        WeekKey::new(self.year, self.week)
    }
}
