// src/schedule/constraint.rs
//! A single schedule rule, written as `<+|-><day><start>-<end>`:
//!
//! - `-Mo10:30-13:30`: keep Monday 10:30 to 13:30 free. Sections meeting then are rejected.
//! - `+Tu9:00-10:00`: Tuesday sections must fall inside 9:00 to 10:00.

use std::{fmt, str::FromStr};

use super::{ConstraintError, TimeWindow, Weekday};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// `-`: the window must stay free.
    RequiredFree,
    /// `+`: on that day, only the window is available.
    RequiredBusy,
}

impl Polarity {
    fn symbol(self) -> char {
        match self {
            Polarity::RequiredFree => '-',
            Polarity::RequiredBusy => '+',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constraint {
    pub polarity: Polarity,
    pub day: Weekday,
    pub window: TimeWindow,
}

impl Constraint {
    pub fn new(polarity: Polarity, day: Weekday, window: TimeWindow) -> Self {
        Self { polarity, day, window }
    }

    /// Whether a meeting on `days` during `window` is compatible with this rule.
    /// Rules for other weekdays never apply.
    pub fn is_not_violated(&self, days: &str, window: &TimeWindow) -> bool {
        if !self.day.is_in(days) {
            return true;
        }
        let overlap = window.overlaps(&self.window);
        (self.polarity == Polarity::RequiredBusy) == overlap
    }
}

impl FromStr for Constraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let polarity = match chars.next() {
            Some('+') => Polarity::RequiredBusy,
            Some('-') => Polarity::RequiredFree,
            _ => return Err(ConstraintError::InvalidPolarity(s!(s))),
        };

        // Polarity is ASCII, so byte 1 is a char boundary.
        let rest = &s[1..];
        let day = rest
            .get(..2)
            .ok_or_else(|| ConstraintError::UnknownWeekday(s!(rest)))
            .and_then(Weekday::from_code)?;

        let range = &rest[2..];
        let (start, end) = match range.split('-').collect::<Vec<_>>().as_slice() {
            [a, b] if !a.is_empty() && !b.is_empty() => (*a, *b),
            _ => return Err(ConstraintError::MalformedTimeRange(s!(range))),
        };

        let window = TimeWindow::parse(start, end)?;
        Ok(Constraint::new(polarity, day, window))
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.polarity.symbol(), self.day, self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(a: u16, b: u16) -> TimeWindow {
        TimeWindow::new(a, b).unwrap()
    }

    #[test]
    fn parses_free_and_busy_forms() {
        let c: Constraint = "-Mo10:30-13:30".parse().unwrap();
        assert_eq!(c, Constraint::new(Polarity::RequiredFree, Weekday::Monday, w(630, 810)));

        let c: Constraint = "+Tu9:00-10:00".parse().unwrap();
        assert_eq!(c, Constraint::new(Polarity::RequiredBusy, Weekday::Tuesday, w(540, 600)));
    }

    #[test]
    fn display_is_canonical() {
        let c: Constraint = "+Th8:05-9:50".parse().unwrap();
        assert_eq!(c.to_string(), "+Th8:05-9:50");
    }

    #[test]
    fn error_kinds() {
        let p = |s: &str| s.parse::<Constraint>();
        assert!(matches!(p("Mo10:30-13:30"), Err(ConstraintError::InvalidPolarity(_))));
        assert!(matches!(p(""), Err(ConstraintError::InvalidPolarity(_))));
        assert!(matches!(p("-Xx10:30-13:30"), Err(ConstraintError::UnknownWeekday(_))));
        assert!(matches!(p("-M"), Err(ConstraintError::UnknownWeekday(_))));
        assert!(matches!(p("-Mo10:30"), Err(ConstraintError::MalformedTimeRange(_))));
        assert!(matches!(p("-Mo10:30-"), Err(ConstraintError::MalformedTimeRange(_))));
        assert!(matches!(p("-Mo10:30-11:00-12:00"), Err(ConstraintError::MalformedTimeRange(_))));
        assert!(matches!(p("-Mo10.30-13:30"), Err(ConstraintError::MalformedTime(_))));
    }

    #[test]
    fn multibyte_day_is_rejected_not_panicking() {
        assert!(matches!("-é10:00-11:00".parse::<Constraint>(), Err(ConstraintError::UnknownWeekday(_))));
    }
}
