//! This crate converts Toronto's solid waste pickup schedule into iCalendar calendars.
//! There is one calendar per collection zone, with one all-day event per pickup day.
//!
//! The schedule is the city's open data CSV: a `Calendar` column naming the zone,
//! a `WeekStarting` column holding the week's Sunday, and one column per collection type.

pub use ical;

pub mod calendar;
pub mod error;
pub mod pickup;
pub mod schedule;
