// src/config/options.rs
use std::collections::HashMap;
use std::path::PathBuf;

use super::consts::*;
use crate::schedule::Weekday;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub filter: FilterOptions,
    pub seats: SeatOptions,
}

/* ---------------- Fetch ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    pub year: String,
    pub name: String,
}

impl Default for Term {
    fn default() -> Self {
        Self { year: s!(TERM_YEAR), name: s!(TERM_NAME) }
    }
}

impl Term {
    /// Cache subdirectory for this term, e.g. `2025-registration`.
    pub fn store_key(&self) -> String {
        join!(&self.year, "-", &self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    /// Lowercase department codes, in the order given.
    pub departments: Vec<String>,
    pub term: Term,
    /// Ignore cached departments and fetch again.
    pub refresh: bool,
    pub workers: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            departments: Vec::new(),
            term: Term::default(),
            refresh: false,
            workers: WORKERS,
        }
    }
}

impl FetchOptions {
    /// `"CMPT, psyc,,"` -> `["cmpt", "psyc"]`
    pub fn set_departments(&mut self, list: &str) {
        self.departments = list
            .split(',')
            .map(|d| d.trim().to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
    }
}

/* ---------------- Filter ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CampusSelector {
    Named(String),
    /// Either of `ANY_CAMPUS_ACCEPTS`.
    Any,
}

impl Default for CampusSelector {
    fn default() -> Self {
        CampusSelector::Named(s!(DEFAULT_CAMPUS))
    }
}

impl CampusSelector {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case(ANY_CAMPUS) {
            CampusSelector::Any
        } else {
            CampusSelector::Named(s!(s))
        }
    }

    pub fn accepts(&self, campus: &str) -> bool {
        match self {
            CampusSelector::Named(name) => name == campus,
            CampusSelector::Any => ANY_CAMPUS_ACCEPTS.contains(&campus),
        }
    }
}

/// Course numbers already completed, keyed by lowercase department code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TakenCourses {
    by_dept: HashMap<String, Vec<String>>,
}

impl Default for TakenCourses {
    fn default() -> Self {
        let by_dept = TAKEN_COURSES
            .iter()
            .map(|(dept, numbers)| (s!(*dept), numbers.iter().map(|n| s!(*n)).collect()))
            .collect();
        Self { by_dept }
    }
}

impl TakenCourses {
    pub fn none() -> Self {
        Self { by_dept: HashMap::new() }
    }

    pub fn with(mut self, dept: &str, numbers: &[&str]) -> Self {
        self.by_dept
            .insert(dept.to_ascii_lowercase(), numbers.iter().map(|n| s!(*n)).collect());
        self
    }

    /// `None` when the department has no taken list (nothing is filtered).
    pub fn for_dept(&self, dept: &str) -> Option<&[String]> {
        self.by_dept.get(&dept.to_ascii_lowercase()).map(Vec::as_slice)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub campus: CampusSelector,
    pub weekday: Option<Weekday>,
    pub rules_file: Option<PathBuf>,
    pub extra_rule: Option<String>,
    pub taken: TakenCourses,
}

/* ---------------- Seats ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatOptions {
    /// Look up live seat counts after filtering.
    pub lookup: bool,
    pub min_open_seats: Option<u32>,
    pub max_waitlist: Option<u32>,
}

impl Default for SeatOptions {
    fn default() -> Self {
        Self { lookup: true, min_open_seats: None, max_waitlist: None }
    }
}

impl SeatOptions {
    pub fn has_thresholds(&self) -> bool {
        self.min_open_seats.is_some() || self.max_waitlist.is_some()
    }
}
