//! Date arithmetic for report weeks: ISO-style week numbers, Monday–Friday spans
//! and the apprenticeship-relative training week.
pub mod training_week;
pub mod week_calc;
