pub mod calendar;
pub mod week_sync;
