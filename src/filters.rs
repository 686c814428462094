// src/filters.rs
//! # Filter pipeline
//!
//! Narrows one department's outlines down to the sections that fit the student.
//! Stages run in a fixed order, each one a pure predicate over a single outline:
//!
//! 1. `HasSchedule`: the outline lists at least one meeting.
//! 2. `CampusMatch`: the first meeting is on the requested campus.
//! 3. `AlreadyTaken`: the course number is not on the department's taken list.
//! 4. `WeekdayMatch`: some meeting falls on the requested weekday (if any).
//! 5. `ConstraintSatisfaction`: every timed meeting satisfies the `ConstraintSet`.
//!    Meetings without recorded times are exempt.
//!
//! Every stage only removes outlines, so running the pipeline on its own output
//! changes nothing. Seat thresholds are applied later (`seats::SeatGate`).

use std::fmt;

use crate::config::{CampusSelector, FilterOptions, TakenCourses};
use crate::outline::Outline;
use crate::schedule::{ConstraintSet, Weekday};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    HasSchedule,
    CampusMatch,
    AlreadyTaken,
    WeekdayMatch,
    ConstraintSatisfaction,
}

impl Stage {
    pub const ORDER: [Stage; 5] = [
        Stage::HasSchedule,
        Stage::CampusMatch,
        Stage::AlreadyTaken,
        Stage::WeekdayMatch,
        Stage::ConstraintSatisfaction,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::HasSchedule => "has-schedule",
            Stage::CampusMatch => "campus",
            Stage::AlreadyTaken => "already-taken",
            Stage::WeekdayMatch => "weekday",
            Stage::ConstraintSatisfaction => "schedule-rules",
        };
        f.write_str(name)
    }
}

pub fn has_schedule(outline: &Outline) -> bool {
    !outline.meetings().is_empty()
}

pub fn campus_match(outline: &Outline, campus: &CampusSelector) -> bool {
    outline.primary_campus().is_some_and(|c| campus.accepts(c))
}

pub fn not_taken(outline: &Outline, dept: &str, taken: &TakenCourses) -> bool {
    match taken.for_dept(dept) {
        Some(numbers) => !numbers.iter().any(|n| *n == outline.number),
        None => true,
    }
}

pub fn weekday_match(outline: &Outline, weekday: Option<Weekday>) -> bool {
    match weekday {
        Some(day) => outline.meetings().iter().any(|m| day.is_in(&m.days)),
        None => true,
    }
}

pub fn satisfies_constraints(outline: &Outline, constraints: &ConstraintSet) -> bool {
    outline
        .meetings()
        .iter()
        .filter_map(|m| m.window.as_ref().map(|w| (m.days.as_str(), w)))
        .all(|(days, window)| constraints.satisfies(days, window))
}

/// Result of one pipeline run: the survivors and how many each stage dropped.
#[derive(Clone, Debug)]
pub struct FilterReport {
    pub kept: Vec<Outline>,
    pub dropped: Vec<(Stage, usize)>,
}

impl FilterReport {
    pub fn dropped_by(&self, stage: Stage) -> usize {
        self.dropped
            .iter()
            .find(|(s, _)| *s == stage)
            .map_or(0, |(_, n)| *n)
    }
}

#[derive(Clone, Debug, Default)]
pub struct FilterPipeline {
    pub campus: CampusSelector,
    pub taken: TakenCourses,
    pub weekday: Option<Weekday>,
    pub constraints: ConstraintSet,
}

impl FilterPipeline {
    pub fn new(options: &FilterOptions, constraints: ConstraintSet) -> Self {
        Self {
            campus: options.campus.clone(),
            taken: options.taken.clone(),
            weekday: options.weekday,
            constraints,
        }
    }

    fn keeps(&self, stage: Stage, outline: &Outline, dept: &str) -> bool {
        match stage {
            Stage::HasSchedule => has_schedule(outline),
            Stage::CampusMatch => campus_match(outline, &self.campus),
            Stage::AlreadyTaken => not_taken(outline, dept, &self.taken),
            Stage::WeekdayMatch => weekday_match(outline, self.weekday),
            Stage::ConstraintSatisfaction => satisfies_constraints(outline, &self.constraints),
        }
    }

    /// Run all stages over `dept`'s outlines, preserving input order.
    pub fn run(&self, dept: &str, outlines: Vec<Outline>) -> FilterReport {
        let mut kept = outlines;
        let mut dropped = Vec::with_capacity(Stage::ORDER.len());

        for stage in Stage::ORDER {
            let before = kept.len();
            kept.retain(|o| self.keeps(stage, o, dept));
            let n = before - kept.len();
            if n > 0 {
                logd!("{dept}: {stage} dropped {n}");
            }
            dropped.push((stage, n));
        }

        FilterReport { kept, dropped }
    }

    pub fn apply(&self, dept: &str, outlines: Vec<Outline>) -> Vec<Outline> {
        self.run(dept, outlines).kept
    }
}
