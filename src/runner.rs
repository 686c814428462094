// src/runner.rs
use std::error::Error;
use std::sync::Arc;

use crate::{
    config::AppOptions,
    fetch::{self, Pace},
    filters::{FilterPipeline, Stage},
    outline::Outline,
    progress::Progress,
    schedule::ConstraintSet,
    seats::{SeatGate, Seating},
    specs::{Coursys, OutlineSource, SeatSource, SfuOutlines},
    store::Store,
};

/// The collaborators a run talks to. `Sources::default()` is the live setup.
#[derive(Clone)]
pub struct Sources {
    pub outlines: Arc<dyn OutlineSource>,
    pub seats: Arc<dyn SeatSource>,
    pub store: Store,
    pub pace: Pace,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            outlines: Arc::new(SfuOutlines::default()),
            seats: Arc::new(Coursys::default()),
            store: Store::default(),
            pace: Pace::default(),
        }
    }
}

/// One surviving section, with live seats when they were looked up.
#[derive(Clone, Debug)]
pub struct Shortlisted {
    pub outline: Outline,
    pub seating: Option<Seating>,
}

#[derive(Clone, Debug, Default)]
pub struct DepartmentResult {
    pub dept: String,
    pub from_cache: bool,
    /// Outlines handed to the filter pipeline.
    pub candidates: usize,
    /// Courses whose outline could not be fetched (course, reason).
    pub fetch_failures: Vec<(String, String)>,
    pub dropped: Vec<(Stage, usize)>,
    /// Sections whose seat lookup failed (name, reason).
    pub seat_failures: Vec<(String, String)>,
    /// Sections rejected by the seat gate (including unknown seats under a threshold).
    pub seat_rejected: usize,
    pub shortlist: Vec<Shortlisted>,
}

/// Summary of what was produced.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub departments: Vec<DepartmentResult>,
}

impl RunSummary {
    pub fn shortlisted(&self) -> usize {
        self.departments.iter().map(|d| d.shortlist.len()).sum()
    }
}

/// Top-level runner: rules first (a bad rule aborts before any request),
/// then per department: cache or fetch, filter, seats.
pub fn run(
    options: &AppOptions,
    sources: &Sources,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<RunSummary, Box<dyn Error>> {
    let filter = &options.filter;
    let constraints = ConstraintSet::load(filter.rules_file.as_deref(), filter.extra_rule.as_deref())?;
    logf!("{} schedule rules active", constraints.len());

    let pipeline = FilterPipeline::new(filter, constraints);
    let gate = SeatGate::from(&options.seats);

    if !options.seats.lookup && options.seats.has_thresholds() {
        logw!("seat thresholds ignored: seat lookup disabled");
        if let Some(p) = progress.as_deref_mut() {
            p.log("Seat thresholds ignored (seat lookup disabled).");
        }
    }

    let mut summary = RunSummary::default();
    for dept in &options.fetch.departments {
        let mut result = DepartmentResult { dept: dept.clone(), ..Default::default() };

        let outlines = load_or_fetch(options, sources, dept, &mut result, progress.as_deref_mut())?;
        result.candidates = outlines.len();

        let report = pipeline.run(dept, outlines);
        result.dropped = report.dropped;

        for outline in report.kept {
            if !options.seats.lookup {
                result.shortlist.push(Shortlisted { outline, seating: None });
                continue;
            }
            match sources.seats.seating(&outline.name, &outline.section) {
                Ok(seating) if gate.admits(&seating) => {
                    result.shortlist.push(Shortlisted { outline, seating: Some(seating) });
                }
                Ok(_) => result.seat_rejected += 1,
                Err(e) => {
                    let msg = e.to_string();
                    loge!("seats for {}: {msg}", outline.name);
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(&format!("seats for {}", outline.name), &msg);
                    }
                    result.seat_failures.push((outline.name.clone(), msg));
                    if gate.admits_unknown() {
                        result.shortlist.push(Shortlisted { outline, seating: None });
                    } else {
                        result.seat_rejected += 1;
                    }
                }
            }
        }

        logf!("{dept}: {} of {} shortlisted", result.shortlist.len(), result.candidates);
        summary.departments.push(result);
    }

    Ok(summary)
}

fn load_or_fetch(
    options: &AppOptions,
    sources: &Sources,
    dept: &str,
    result: &mut DepartmentResult,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<Vec<Outline>, Box<dyn Error>> {
    let term = &options.fetch.term;

    if !options.fetch.refresh {
        if let Some(cached) = sources.store.load_department(term, dept)? {
            if let Some(p) = progress.as_deref_mut() {
                p.log(&format!(
                    "Found cached data: {}",
                    sources.store.department_path(term, dept).display()
                ));
            }
            result.from_cache = true;
            return Ok(cached);
        }
    }

    let fetched = fetch::collect_department(
        Arc::clone(&sources.outlines),
        &options.fetch,
        sources.pace,
        dept,
        progress.as_deref_mut(),
    )?;
    result.fetch_failures = fetched.failed;

    if !fetched.outlines.is_empty() {
        // best-effort: a failed write only costs a refetch next time
        match sources.store.save_department(term, dept, &fetched.outlines) {
            Ok(path) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!("Wrote cache: {}", path.display()));
                }
            }
            Err(e) => loge!("{dept}: cache write failed: {e}"),
        }
    }
    Ok(fetched.outlines)
}
