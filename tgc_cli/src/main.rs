use std::{
    env::current_dir,
    fs::write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use tgc_core::{calendar, ical::generator::Emitter, schedule};

mod logging;

/// Convert a Toronto waste pickup schedule into one iCalendar file per zone.
#[derive(Debug, Parser)]
pub struct Arguments {
    /// the schedule CSV
    pub schedule: PathBuf,
}

fn main() -> Result<()> {
    logging::init();
    let args = Arguments::parse();
    run(&args, &current_dir()?)
}

/// Write `<calendar>.ics` into `directory` for every calendar in the schedule.
fn run(args: &Arguments, directory: &Path) -> Result<()> {
    let rows = schedule::open(&args.schedule)?.rows()?;
    let mut written = 0;
    for (name, calendar) in calendar::parse_garbage_file(rows)? {
        let mut path = directory.to_path_buf();
        path.push(format!("{name}.ics"));
        write(&path, calendar.generate())
            .with_context(|| format!("could not write calendar {}", path.display()))?;
        tracing::info!(
            calendar = %name,
            events = calendar.events.len(),
            path = %path.display(),
            "wrote calendar"
        );
        written += 1;
    }
    tracing::info!(calendars = written, schedule = %args.schedule.display(), "done");
    Ok(())
}
