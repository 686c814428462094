// src/cli.rs
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use color_eyre::eyre::eyre;

use crate::config::{AppOptions, CampusSelector};
use crate::config::consts::DEFAULT_CAMPUS;
use crate::fetch::Admission;
use crate::progress::Progress;
use crate::report;
use crate::runner::{self, Sources};
use crate::schedule::Weekday;

const DEPT_ARG: &str = "dept";
const CAMPUS_ARG: &str = "campus";
const SCHEDULE_ARG: &str = "schedule";
const EXTRA_ARG: &str = "extra";
const DAY_ARG: &str = "day";
const SEATS_ARG: &str = "seats";
const WAITLIST_ARG: &str = "waitlist";
const REFRESH_ARG: &str = "refresh";
const NO_SEATS_ARG: &str = "no-seats";

pub fn command() -> Command {
    Command::new("course_scout")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Lists enrollable course sections that fit your weekly schedule")
        .arg(
            Arg::new(DEPT_ARG)
                .help("Department code(s), comma separated (e.g. cmpt,psyc)")
                .long(DEPT_ARG)
                .required(true),
        )
        .arg(
            Arg::new(CAMPUS_ARG)
                .help("Campus of the first meeting, or 'any' for Burnaby or Surrey")
                .long(CAMPUS_ARG)
                .default_value(DEFAULT_CAMPUS),
        )
        .arg(
            Arg::new(SCHEDULE_ARG)
                .help("Rules file: one rule per line, e.g. -Mo10:30-13:30 or +Tu9:00-10:00")
                .long(SCHEDULE_ARG)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(EXTRA_ARG)
                .help("One more rule, applied after the rules file")
                .long(EXTRA_ARG)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new(DAY_ARG)
                .help("Only sections meeting on this weekday (Mo, Tu, We, Th, Fr)")
                .long(DAY_ARG)
                .value_parser(|s: &str| Weekday::from_code(s).map_err(|e| e.to_string())),
        )
        .arg(
            Arg::new(SEATS_ARG)
                .help("Minimum open seats (capacity - enrolled)")
                .long(SEATS_ARG)
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new(WAITLIST_ARG)
                .help("Maximum waitlist length")
                .long(WAITLIST_ARG)
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new(REFRESH_ARG)
                .help("Ignore cached departments and fetch again")
                .long(REFRESH_ARG)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(NO_SEATS_ARG)
                .help("Skip live seat lookup (seat thresholds are then ignored)")
                .long(NO_SEATS_ARG)
                .action(ArgAction::SetTrue),
        )
}

pub fn options_from_matches(m: &ArgMatches) -> AppOptions {
    let mut opts = AppOptions::default();

    if let Some(depts) = m.get_one::<String>(DEPT_ARG) {
        opts.fetch.set_departments(depts);
    }
    opts.fetch.refresh = m.get_flag(REFRESH_ARG);

    if let Some(campus) = m.get_one::<String>(CAMPUS_ARG) {
        opts.filter.campus = CampusSelector::parse(campus);
    }
    opts.filter.rules_file = m.get_one::<PathBuf>(SCHEDULE_ARG).cloned();
    opts.filter.extra_rule = m.get_one::<String>(EXTRA_ARG).cloned();
    opts.filter.weekday = m.get_one::<Weekday>(DAY_ARG).copied();

    opts.seats.lookup = !m.get_flag(NO_SEATS_ARG);
    opts.seats.min_open_seats = m.get_one::<u32>(SEATS_ARG).copied();
    opts.seats.max_waitlist = m.get_one::<u32>(WAITLIST_ARG).copied();

    opts
}

pub fn parse_options<I, T>(args: I) -> Result<AppOptions, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let m = command().try_get_matches_from(args)?;
    Ok(options_from_matches(&m))
}

/// `Loaded: NAME` in green, or `Filtered: NAME (reason)` in yellow.
pub fn status_line(name: &str, admission: Admission) -> String {
    match admission.reason() {
        None => join!(&paint!("1;32", "Loaded:"), " ", name),
        Some(reason) => format!("{} {name} ({reason})", paint!("1;33", "Filtered:")),
    }
}

/// Console progress: one status line per course, a rewriting counter in between.
#[derive(Default)]
pub struct ConsoleProgress {
    done: usize,
    total: usize,
}

impl ConsoleProgress {
    fn counter(&self) {
        let mut err = io::stderr();
        let _ = write!(err, "\x1b[KLoading: {}/{}\r", self.done, self.total);
        let _ = err.flush();
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.done = 0;
        self.total = total;
        self.counter();
    }
    fn log(&mut self, msg: &str) {
        eprintln!("\x1b[K{}", paint!("32", "{msg}"));
    }
    fn item_done(&mut self, name: &str, admission: Admission) {
        self.done += 1;
        eprintln!("\x1b[K{}", status_line(name, admission));
        self.counter();
    }
    fn item_failed(&mut self, label: &str, reason: &str) {
        self.done += 1;
        eprintln!("\x1b[K{} {label} ({reason})", paint!("31", "Failed. Skipping."));
        self.counter();
    }
    fn finish(&mut self) {
        eprint!("\x1b[K");
    }
}

pub fn run() -> color_eyre::Result<()> {
    let options = match parse_options(std::env::args_os()) {
        Ok(o) => o,
        Err(e) => e.exit(),
    };
    if options.fetch.departments.is_empty() {
        return Err(eyre!("no department given"));
    }
    logf!("run: {:?}", options);

    let mut progress = ConsoleProgress::default();
    let summary = runner::run(&options, &Sources::default(), Some(&mut progress))
        .map_err(|e| eyre!("{e}"))?;

    let mut out = io::stdout().lock();
    for dept in &summary.departments {
        write!(out, "{}", report::render_department(dept))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_color_follows_admission() {
        assert_eq!(status_line("CMPT 225 D100", Admission::Loaded), "\x1b[1;32mLoaded:\x1b[0m CMPT 225 D100");
        assert_eq!(
            status_line("CMPT 705 G100", Admission::NotUndergrad),
            "\x1b[1;33mFiltered:\x1b[0m CMPT 705 G100 (not ugrad)"
        );
        assert!(status_line("Loaded: X", Admission::NotEnrollable).starts_with("\x1b[1;33m"));
    }
}
