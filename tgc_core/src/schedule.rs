//! This reader turns the schedule CSV into typed rows.

use std::{collections::HashMap, fs::File, io::Read, path::Path};

use chrono::{Datelike, NaiveDate, Weekday};
use csv::{Reader, StringRecord};

use crate::error::{Result, ScheduleError};

pub static COLUMN_CALENDAR: &str = "Calendar";
pub static COLUMN_WEEK_STARTING: &str = "WeekStarting";
static FORMAT: &str = "%m/%d/%Y";

/// One week of pickups for one calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    /// Name of the destination calendar, e.g. `Tuesday1`.
    pub calendar: String,
    /// The Sunday the week starts on.
    pub week_starting: NaiveDate,
    /// Collection type column name to day code (or `0`).
    pub pickups: HashMap<String, String>,
}

/// Reads schedule rows from any CSV source with a header row.
pub struct ScheduleReader<R> {
    reader: Reader<R>,
}

/// Open a schedule file.
pub fn open(path: &Path) -> Result<ScheduleReader<File>> {
    let file = File::open(path).map_err(|source| ScheduleError::MissingFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ScheduleReader::new(file))
}

impl<R: Read> ScheduleReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Reader::from_reader(reader),
        }
    }

    /// Lazily parse every data row, in file order.
    ///
    /// The header is read up front, so a missing reserved column fails before any row is produced.
    pub fn rows(mut self) -> Result<impl Iterator<Item = Result<ScheduleRow>>> {
        let headers = self.reader.headers()?.clone();
        let calendar_index = column_index(&headers, COLUMN_CALENDAR)?;
        let week_starting_index = column_index(&headers, COLUMN_WEEK_STARTING)?;
        Ok(self.reader.into_records().map(move |record_result| {
            let record = record_result?;
            parse_record(&headers, &record, calendar_index, week_starting_index)
        }))
    }
}

fn column_index(headers: &StringRecord, column: &'static str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or(ScheduleError::MissingColumn { column })
}

fn parse_record(
    headers: &StringRecord,
    record: &StringRecord,
    calendar_index: usize,
    week_starting_index: usize,
) -> Result<ScheduleRow> {
    let mut calendar = String::new();
    let mut week_starting = "";
    let mut pickups = HashMap::new();
    for (index, (header, value)) in headers.iter().zip(record.iter()).enumerate() {
        match index {
            _ if index == calendar_index => calendar = value.to_string(),
            _ if index == week_starting_index => week_starting = value,
            _ => {
                pickups.insert(header.to_string(), value.to_string());
            }
        }
    }
    let week_starting = parse_week_starting(week_starting)?;
    tracing::debug!(%calendar, %week_starting, "parsed schedule row");
    Ok(ScheduleRow {
        calendar,
        week_starting,
        pickups,
    })
}

/// Parse a week start strictly as `MM/DD/YYYY`.
pub fn parse_week_starting(value: &str) -> Result<NaiveDate> {
    let date =
        NaiveDate::parse_from_str(value, FORMAT).map_err(|source| ScheduleError::MalformedDate {
            value: value.to_string(),
            source,
        })?;
    if date.weekday() != Weekday::Sun {
        tracing::warn!(%date, weekday = %date.weekday(), "week does not start on a Sunday");
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::Path};

    use chrono::NaiveDate;

    use crate::{
        error::ScheduleError,
        schedule::{open, parse_week_starting, ScheduleReader, ScheduleRow},
    };

    fn read(csv: &str) -> Vec<ScheduleRow> {
        ScheduleReader::new(csv.as_bytes())
            .rows()
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_rows() {
        let rows = read(
            "Calendar,WeekStarting,Garbage,YardWaste\n\
             ZoneA,04/07/2013,M,0\n\
             ZoneB,04/14/2013,0,W\n",
        );
        assert_eq!(
            rows,
            vec![
                ScheduleRow {
                    calendar: "ZoneA".to_string(),
                    week_starting: NaiveDate::from_ymd_opt(2013, 4, 7).unwrap(),
                    pickups: HashMap::from([
                        ("Garbage".to_string(), "M".to_string()),
                        ("YardWaste".to_string(), "0".to_string()),
                    ]),
                },
                ScheduleRow {
                    calendar: "ZoneB".to_string(),
                    week_starting: NaiveDate::from_ymd_opt(2013, 4, 14).unwrap(),
                    pickups: HashMap::from([
                        ("Garbage".to_string(), "0".to_string()),
                        ("YardWaste".to_string(), "W".to_string()),
                    ]),
                },
            ]
        );
    }

    #[test]
    fn test_reserved_columns_anywhere() {
        let rows = read("Garbage,WeekStarting,Calendar\nT,12/29/2013,ZoneC\n");
        assert_eq!(rows[0].calendar, "ZoneC");
        assert_eq!(
            rows[0].week_starting,
            NaiveDate::from_ymd_opt(2013, 12, 29).unwrap()
        );
        assert_eq!(rows[0].pickups.len(), 1);
    }

    #[test]
    fn test_missing_column() {
        let result = ScheduleReader::new("Calendar,Garbage\nZoneA,M\n".as_bytes()).rows();
        assert!(matches!(
            result,
            Err(ScheduleError::MissingColumn {
                column: "WeekStarting"
            })
        ));
    }

    #[test]
    fn test_malformed_date() {
        for value in ["2013-04-07", "April 7 2013", "13/07/2013", ""] {
            let result = parse_week_starting(value);
            assert!(
                matches!(result, Err(ScheduleError::MalformedDate { .. })),
                "{value} should not parse"
            );
        }
    }

    #[test]
    fn test_malformed_date_row() {
        let mut rows = ScheduleReader::new("Calendar,WeekStarting\nZoneA,2013-04-07\n".as_bytes())
            .rows()
            .unwrap();
        assert!(matches!(
            rows.next(),
            Some(Err(ScheduleError::MalformedDate { .. }))
        ));
    }

    #[test]
    fn test_uneven_row() {
        let mut rows =
            ScheduleReader::new("Calendar,WeekStarting,Garbage\nZoneA,04/07/2013\n".as_bytes())
                .rows()
                .unwrap();
        assert!(matches!(rows.next(), Some(Err(ScheduleError::Csv(_)))));
    }

    #[test]
    fn test_open_missing_file() {
        let result = open(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(ScheduleError::MissingFile { .. })));
    }
}
