use std::{error::Error, io::Write};

use futures::future;
use log::info;

use crate::calendar::week_calc::{date_range_of_week, shift_days};

use super::{
    backend::PersistenceBackend,
    models::{
        week_model::{weekday_offset, Area, DayEntry, WeekData, WEEKDAYS},
        Command, WeekKey, MAX_LISTED_WEEKS,
    },
    synchronizer::Synchronizer,
};

pub async fn run<B: PersistenceBackend, W: Write>(
    backend: B,
    command: Command,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let sync = Synchronizer::init(backend).await?;

    match command {
        Command::Current => {
            let key = sync.current_week();
            let week = sync.load_week(key).await?;
            writeln!(out, "{}", week_line(&sync, &week, true))?;
        }
        Command::Weeks { before, after } => {
            if i64::from(before.max(after)) > MAX_LISTED_WEEKS {
                return Err(
                    format!("can list at most {} weeks on either side", MAX_LISTED_WEEKS).into(),
                );
            }
            let current = sync.current_week();
            let keys = sync.weeks_around_current(before, after).await?;
            /* loads run concurrently, each one lands in the cache on its own */
            let weeks = future::join_all(keys.into_iter().map(|key| sync.load_week(key)))
                .await
                .into_iter()
                .collect::<Result<Vec<_>, _>>()?;
            info!("Listed {} weeks around {}", weeks.len(), current);
            for week in weeks.iter() {
                writeln!(out, "{}", week_line(&sync, week, week.key() == current))?;
            }
        }
        Command::Show { week } => {
            sync.select_week(week);
            sync.load_week(week).await?;
            let week = sync.current_week_data();
            writeln!(out, "{}", week_line(&sync, &week, false))?;
            for weekday in WEEKDAYS {
                match week.entries.get(weekday) {
                    Some(entry) => writeln!(
                        out,
                        "{}: {} [{}] {}",
                        weekday,
                        entry.date.format("%d.%m.%Y"),
                        entry.area,
                        entry.notes
                    )?,
                    None => writeln!(out, "{}: no entry", weekday)?,
                }
            }
        }
        Command::Save {
            week,
            weekday,
            area,
            notes,
            date,
        } => {
            let offset = weekday_offset(&weekday)
                .ok_or_else(|| format!("`{}` is not one of {}", weekday, WEEKDAYS.join(", ")))?;
            let weekday = WEEKDAYS[offset as usize];
            let date = date.unwrap_or_else(|| {
                shift_days(
                    date_range_of_week(week.year, week.week).start,
                    i64::from(offset),
                )
            });
            let entry = DayEntry {
                date,
                area: Area::from(area),
                notes,
            };
            sync.save_day_entry(week, weekday, entry).await?;
            writeln!(out, "Saved {} of week {}", weekday, week)?;
        }
        Command::Config(update) => {
            let mut config = sync.config();
            if !update.is_empty() {
                update.apply_to(&mut config);
                sync.save_config(config).await?;
            }
            writeln!(out, "{}", serde_json::to_string_pretty(&sync.config())?)?;
        }
    }
    Ok(())
}

/* e.g. `* 2025-02  06.01.2025 - 10.01.2025  report 23  3/5 days` */
fn week_line<B: PersistenceBackend>(sync: &Synchronizer<B>, week: &WeekData, current: bool) -> String {
    let key: WeekKey = week.key();
    format!(
        "{} {}  {}  report {}  {}/{} days",
        if current { "*" } else { " " },
        key,
        date_range_of_week(key.year, key.week),
        sync.training_week_number(key),
        WEEKDAYS
            .iter()
            .filter(|day| week.entries.contains_key(**day))
            .count(),
        WEEKDAYS.len()
    )
}
