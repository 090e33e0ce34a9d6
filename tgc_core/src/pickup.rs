//! This module groups a week's collection types by the day they are picked up.

use std::{collections::HashMap, sync::OnceLock};

use chrono::Weekday;
use regex::Regex;

use crate::error::{Result, ScheduleError};

/// The city's day codes. There is no letter for Sunday.
static DAY_CODES: [(&str, Weekday); 6] = [
    ("M", Weekday::Mon),
    ("T", Weekday::Tue),
    ("W", Weekday::Wed),
    ("R", Weekday::Thu),
    ("F", Weekday::Fri),
    ("S", Weekday::Sat),
];

/// Value of a collection type column in a week without that pickup.
static NO_PICKUP: &str = "0";

/// Look up the weekday of a day code.
pub fn day_code(code: &str) -> Option<Weekday> {
    DAY_CODES
        .iter()
        .find(|(day_code, _)| *day_code == code)
        .map(|(_, weekday)| *weekday)
}

/// Group the collection types of one week by weekday.
///
/// Each item is a weekday with at least one pickup and its label, e.g. `Garbage, Green Bin pickup`.
/// The weekdays come in no particular order.
pub fn parse_pickups(pickups: &HashMap<String, String>) -> Result<Vec<(Weekday, String)>> {
    let mut pickups_by_day: HashMap<Weekday, Vec<String>> = HashMap::new();
    for (pickup, code) in pickups {
        if code == NO_PICKUP {
            continue;
        }
        let weekday = day_code(code).ok_or_else(|| ScheduleError::UnknownDayCode {
            pickup: pickup.clone(),
            code: code.clone(),
        })?;
        pickups_by_day
            .entry(weekday)
            .or_default()
            .push(un_camel_case(pickup));
    }
    Ok(pickups_by_day
        .into_iter()
        .map(|(weekday, mut labels)| {
            labels.sort();
            (weekday, format!("{} pickup", labels.join(", ")))
        })
        .collect())
}

/// Split a CamelCase name into space-separated words.
///
/// A space goes before every capitalized word, then between a lowercase letter or digit and a
/// following capital: `YardWaste` becomes `Yard Waste`, `SOMEAllCaps` becomes `SOME All Caps`.
pub fn un_camel_case(name: &str) -> String {
    static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    static BOUNDARY_REGEX: OnceLock<Regex> = OnceLock::new();
    let word_regex = WORD_REGEX.get_or_init(|| Regex::new(r"(.)([A-Z][a-z]+)").unwrap());
    let boundary_regex = BOUNDARY_REGEX.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
    let name = word_regex.replace_all(name, "${1} ${2}");
    boundary_regex.replace_all(&name, "${1} ${2}").into_owned()
}
