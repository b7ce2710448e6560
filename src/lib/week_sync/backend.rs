use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use log::info;
use tokio::sync::Mutex;

use crate::calendar::week_calc::{week_key_of, weeks_around};

use super::{
    error::BackendError,
    helpers::{default_data_dir, read_json, week_file_name, write_json},
    models::{
        week_model::{DayEntry, WeekData},
        Config, WeekKey,
    },
};

/// Durable storage of the configuration and the week records.
/// The week sync layer treats every implementation as the source of truth.
#[allow(async_fn_in_trait)]
pub trait PersistenceBackend {
    async fn load_config(&self) -> Result<Config, BackendError>;

    async fn save_config(&self, config: &Config) -> Result<(), BackendError>;

    /// Stored record of `key`; an empty week when nothing was stored yet.
    async fn get_week_data(&self, key: WeekKey) -> Result<WeekData, BackendError>;

    async fn save_day_entry(
        &self,
        key: WeekKey,
        weekday: &str,
        entry: &DayEntry,
    ) -> Result<(), BackendError>;

    async fn get_current_week_info(&self) -> Result<WeekKey, BackendError>;

    /// `before` weeks before the current one, the current one and `after`
    /// weeks after it, oldest first.
    async fn get_weeks_around_current(
        &self,
        before: u32,
        after: u32,
    ) -> Result<Vec<WeekKey>, BackendError>;
}

/// Keeps `config.json` and one `week_YYYY-WW.json` per week in a directory.
/// Clones share the write lock, so read-modify-write of a week file never
/// interleaves between them.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    data_dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileBackend {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Backend rooted at `BerichtGen` inside the platform data directory.
    pub fn in_default_dir() -> Result<Self, BackendError> {
        Ok(Self::new(default_data_dir()?))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    pub fn week_path(&self, key: &WeekKey) -> PathBuf {
        self.data_dir.join(week_file_name(key))
    }

    async fn read_week(&self, key: WeekKey) -> Result<WeekData, BackendError> {
        Ok(read_json(&self.week_path(&key))
            .await?
            .unwrap_or_else(|| WeekData::empty(key)))
    }
}

impl PersistenceBackend for JsonFileBackend {
    /* defaults, then config.json, then BERICHT_* environment variables */
    async fn load_config(&self) -> Result<Config, BackendError> {
        let config_path = self.config_path();
        info!("Reading config from {}", config_path.display());
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Json::file(&config_path))
            .merge(Env::prefixed("BERICHT_"))
            .extract()?;
        Ok(config)
    }

    async fn save_config(&self, config: &Config) -> Result<(), BackendError> {
        write_json(&self.config_path(), config).await
    }

    async fn get_week_data(&self, key: WeekKey) -> Result<WeekData, BackendError> {
        self.read_week(key).await
    }

    async fn save_day_entry(
        &self,
        key: WeekKey,
        weekday: &str,
        entry: &DayEntry,
    ) -> Result<(), BackendError> {
        let _write = self.write_lock.lock().await;
        let mut week = self.read_week(key).await?;
        week.entries.insert(weekday.to_owned(), entry.clone());
        write_json(&self.week_path(&key), &week).await
    }

    async fn get_current_week_info(&self) -> Result<WeekKey, BackendError> {
        Ok(week_key_of(chrono::Local::now().date_naive()))
    }

    async fn get_weeks_around_current(
        &self,
        before: u32,
        after: u32,
    ) -> Result<Vec<WeekKey>, BackendError> {
        Ok(weeks_around(chrono::Local::now().date_naive(), before, after))
    }
}
