use std::cell::{Cell, RefCell};

use log::{error, info, warn};
use tokio::sync::watch;

use crate::calendar::training_week::training_week_number;

use super::{
    backend::PersistenceBackend,
    cache::{project_week, WeekDataCache},
    error::BackendError,
    helpers::{diff_weeks, log_week},
    models::{
        week_model::{DayEntry, WeekData},
        Config, WeekKey,
    },
};

/// Keeps the week cache in step with a [`PersistenceBackend`] and publishes
/// the state a presentation layer renders:
/// 1. the selected week
/// 2. the record of the selected week, recomputed from selection and cache
/// 3. whether a week load is in flight
///
/// All of it lives on a single task. Only backend calls suspend, and no
/// cache borrow is held across them.
pub struct Synchronizer<B: PersistenceBackend> {
    backend: B,
    config: RefCell<Config>,
    cache: RefCell<WeekDataCache>,
    current_week: watch::Sender<WeekKey>,
    current_week_data: watch::Sender<WeekData>,
    loading: watch::Sender<bool>,
    loads_in_flight: Cell<usize>,
}

/// Marks one load as in flight until dropped, on every exit path.
struct LoadingGuard<'a> {
    in_flight: &'a Cell<usize>,
    loading: &'a watch::Sender<bool>,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(in_flight: &'a Cell<usize>, loading: &'a watch::Sender<bool>) -> Self {
        in_flight.set(in_flight.get() + 1);
        loading.send_if_modified(|busy| !std::mem::replace(busy, true));
        Self { in_flight, loading }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let remaining = self.in_flight.get().saturating_sub(1);
        self.in_flight.set(remaining);
        if remaining == 0 {
            self.loading.send_if_modified(|busy| std::mem::replace(busy, false));
        }
    }
}

impl<B: PersistenceBackend> Synchronizer<B> {
    /// Loads the config first, since the training start date feeds every
    /// report number, then selects the backend's current week.
    pub async fn init(backend: B) -> Result<Self, BackendError> {
        let config = backend
            .load_config()
            .await
            .inspect_err(|e| error!("Failed to load config: {}", e))?;
        let current_week = backend
            .get_current_week_info()
            .await
            .inspect_err(|e| error!("Failed to get current week info: {}", e))?;
        info!("Starting at week {}", current_week);
        Ok(Self::with_config(backend, config, current_week))
    }

    pub fn with_config(backend: B, config: Config, current_week: WeekKey) -> Self {
        Self {
            backend,
            config: RefCell::new(config),
            cache: RefCell::new(WeekDataCache::new()),
            current_week: watch::channel(current_week).0,
            current_week_data: watch::channel(WeekData::empty(current_week)).0,
            loading: watch::channel(false).0,
            loads_in_flight: Cell::new(0),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> Config {
        self.config.borrow().clone()
    }

    /// Writes `config` to the backend, then makes it the session config.
    pub async fn save_config(&self, config: Config) -> Result<(), BackendError> {
        self.backend
            .save_config(&config)
            .await
            .inspect_err(|e| error!("Failed to save config: {}", e))?;
        *self.config.borrow_mut() = config;
        Ok(())
    }

    /// Report number of `key` relative to the configured training start.
    pub fn training_week_number(&self, key: WeekKey) -> u32 {
        let start = self.config.borrow().training_start();
        training_week_number(start, key.year, key.week)
    }

    pub fn current_week(&self) -> WeekKey {
        *self.current_week.borrow()
    }

    pub fn select_week(&self, key: WeekKey) {
        self.current_week.send_replace(key);
        self.refresh_projection();
    }

    /// Asks the backend which week is current and selects it.
    pub async fn select_current_week(&self) -> Result<WeekKey, BackendError> {
        let key = self
            .backend
            .get_current_week_info()
            .await
            .inspect_err(|e| error!("Failed to get current week info: {}", e))?;
        self.select_week(key);
        Ok(key)
    }

    pub async fn weeks_around_current(
        &self,
        before: u32,
        after: u32,
    ) -> Result<Vec<WeekKey>, BackendError> {
        self.backend
            .get_weeks_around_current(before, after)
            .await
            .inspect_err(|e| error!("Failed to get weeks around current: {}", e))
    }

    pub fn current_week_data(&self) -> WeekData {
        self.current_week_data.borrow().clone()
    }

    pub fn subscribe_current_week(&self) -> watch::Receiver<WeekKey> {
        self.current_week.subscribe()
    }

    pub fn subscribe_current_week_data(&self) -> watch::Receiver<WeekData> {
        self.current_week_data.subscribe()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn cached_week(&self, key: &WeekKey) -> Option<WeekData> {
        self.cache.borrow().get(key).cloned()
    }

    /// Fetches `key` from the backend and caches the result. Always refetches,
    /// so changes made to the backend outside this session show up.
    pub async fn load_week(&self, key: WeekKey) -> Result<WeekData, BackendError> {
        let _loading = LoadingGuard::acquire(&self.loads_in_flight, &self.loading);

        let data = self
            .backend
            .get_week_data(key)
            .await
            .inspect_err(|e| error!("Failed to load week data for {}: {}", key, e))?;
        info!("Loaded week {} with {} entries", key, data.entries.len());
        log_week(&data);

        let previous = self.cache.borrow_mut().put(&key, data.clone());
        if let Some(previous) = previous {
            match diff_weeks(&previous, &data) {
                Ok(Some(diff)) => info!("Week {} changed in the backend:\n{}", key, diff),
                Ok(None) => {}
                Err(e) => warn!("Could not diff week {}: {}", key, e),
            }
        }
        self.refresh_projection();
        Ok(data)
    }

    /// Write-through save of one weekday. The cache only changes after the
    /// backend accepted the entry.
    pub async fn save_day_entry(
        &self,
        key: WeekKey,
        weekday: &str,
        entry: DayEntry,
    ) -> Result<(), BackendError> {
        self.backend
            .save_day_entry(key, weekday, &entry)
            .await
            .inspect_err(|e| error!("Failed to save day entry {} {}: {}", key, weekday, e))?;

        self.cache
            .borrow_mut()
            .entry(&key)
            .entries
            .insert(weekday.to_owned(), entry);
        info!("Saved {} of week {}", weekday, key);
        self.refresh_projection();
        Ok(())
    }

    fn refresh_projection(&self) {
        let data = project_week(&self.current_week.borrow(), &self.cache.borrow());
        self.current_week_data.send_if_modified(|shown| {
            if *shown == data {
                false
            } else {
                *shown = data;
                true
            }
        });
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
