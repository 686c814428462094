// src/schedule/mod.rs
//! # Schedule rules
//!
//! The time-conflict model used to decide whether a section fits the student's week.
//!
//! - `time`: weekday codes, clock parsing, half-open minute windows.
//! - `constraint`: one `+`/`-` rule for one weekday.
//! - `constraint_set`: the ordered rule list loaded from a rules file plus one extra rule.
//!
//! Everything here is pure. Parse errors are returned to the caller and never
//! skipped: a dropped rule would quietly widen the schedule.

mod constraint;
mod constraint_set;
mod time;

pub use constraint::{Constraint, Polarity};
pub use constraint_set::{is_not_violated, parse_rules, ConstraintSet, RuleOrigin};
pub use time::{format_time, parse_time, TimeWindow, Weekday, LAST_MINUTE};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintError {
    #[error("malformed time '{0}' (expected H:MM or HH:MM)")]
    MalformedTime(String),
    #[error("unknown weekday '{0}' (expected one of Mo, Tu, We, Th, Fr)")]
    UnknownWeekday(String),
    #[error("rule '{0}' must start with '+' or '-'")]
    InvalidPolarity(String),
    #[error("malformed time range '{0}' (expected <start>-<end>)")]
    MalformedTimeRange(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConstraintSetError {
    #[error("cannot read rules file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{origin}: {source}")]
    Rule {
        origin: RuleOrigin,
        #[source]
        source: ConstraintError,
    },
}
