use std::collections::HashMap;

use super::models::{week_model::WeekData, WeekKey};

/// Every week record the session has touched, keyed by the canonical
/// `"{year}-{week:02}"` string. Lives as long as the session, no eviction.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WeekDataCache {
    weeks: HashMap<String, WeekData>,
}

impl WeekDataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &WeekKey) -> Option<&WeekData> {
        self.weeks.get(&key.to_string())
    }

    /// Inserts or replaces the record of `key`, returning the replaced one.
    pub fn put(&mut self, key: &WeekKey, data: WeekData) -> Option<WeekData> {
        self.weeks.insert(key.to_string(), data)
    }

    /// The stored record, or an empty week for `key`.
    pub fn get_or_default(&self, key: &WeekKey) -> WeekData {
        self.get(key)
            .cloned()
            .unwrap_or_else(|| WeekData::empty(*key))
    }

    /// Mutable record of `key`, inserting an empty week first when missing.
    pub fn entry(&mut self, key: &WeekKey) -> &mut WeekData {
        self.weeks
            .entry(key.to_string())
            .or_insert_with(|| WeekData::empty(*key))
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

/// The record shown for the selected week. Depends only on its two inputs,
/// so it is recomputed whenever either of them changes.
pub fn project_week(selected: &WeekKey, cache: &WeekDataCache) -> WeekData {
    cache.get_or_default(selected)
}
