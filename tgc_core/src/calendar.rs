//! This module builds iCalendar events and calendars from schedule rows.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, Utc};
use ical::{
    generator::{IcalCalendar, IcalCalendarBuilder, IcalEvent, IcalEventBuilder, Property},
    ical_property,
};
use uuid::Uuid;

use crate::{error::Result, pickup::parse_pickups, schedule::ScheduleRow};

static VERSION: &str = "2.0";
static PROD_ID: [&str; 3] = ["Great Ape Synergies", "Toronto Waste Collection", "EN"];
/// Required by the event builder. All-day dates and the UTC stamp do not carry it.
static TIMEZONE: &str = "UTC";
static DATE_FORMAT: &str = "%Y%m%d";
static TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";
static CLASS: &str = "PUBLIC";

/// Build every calendar of a schedule.
///
/// All rows are consumed before the first calendar is yielded, so a bad row fails the whole run.
/// Calendars come in no particular order.
pub fn parse_garbage_file<I>(rows: I) -> Result<impl Iterator<Item = (String, IcalCalendar)>>
where
    I: IntoIterator<Item = Result<ScheduleRow>>,
{
    let mut events_by_calendar: HashMap<String, Vec<IcalEvent>> = HashMap::new();
    for row_result in rows {
        let row = row_result?;
        let events: Vec<IcalEvent> = parse_row(row.week_starting, &row.pickups)?.collect();
        if events.is_empty() {
            continue;
        }
        events_by_calendar
            .entry(row.calendar)
            .or_default()
            .extend(events);
    }
    Ok(events_by_calendar.into_iter().map(|(name, events)| {
        let calendar = get_calendar(&name, events);
        (name, calendar)
    }))
}

/// Build one event per pickup day of the week starting at `week_starting`.
pub fn parse_row(
    week_starting: NaiveDate,
    pickups: &HashMap<String, String>,
) -> Result<impl Iterator<Item = IcalEvent>> {
    let pickups = parse_pickups(pickups)?;
    Ok(pickups.into_iter().map(move |(weekday, summary)| {
        // Sunday counts as day zero of the week.
        let date = week_starting + Duration::days(i64::from(weekday.num_days_from_sunday()));
        get_event(date, &summary)
    }))
}

/// Wrap the events of one calendar with the calendar metadata.
fn get_calendar(name: &str, events: Vec<IcalEvent>) -> IcalCalendar {
    let mut calendar = IcalCalendarBuilder::version(VERSION)
        .gregorian()
        .prodid(prod_id(name))
        .build();
    calendar.events = events;
    calendar
}

/// Build a public all-day event.
fn get_event(date: NaiveDate, summary: &str) -> IcalEvent {
    let date = date.format(DATE_FORMAT).to_string();
    let changed = Utc::now().format(TIMESTAMP_FORMAT).to_string();
    IcalEventBuilder::tzid(TIMEZONE)
        .uid(uid())
        .changed_utc(changed)
        .start_day(date.clone())
        .end_day(date)
        .set(ical_property!("SUMMARY", escape_text(summary)))
        .set(ical_property!("CLASS", CLASS))
        .build()
}

/// Get the product identifier of a zone's calendar.
pub fn prod_id(calendar_name: &str) -> String {
    let [organization, product, language] = PROD_ID;
    format!("-//{organization}//{product} {calendar_name}//{language}")
}

/// Escape a TEXT property value, which the emitter writes verbatim.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '\\' | ';' | ',' => {
                escaped.push('\\');
                escaped.push(character);
            }
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(character),
        }
    }
    escaped
}

/// Get a fresh unique id for an event.
fn uid() -> String {
    Uuid::new_v4().to_string()
}
