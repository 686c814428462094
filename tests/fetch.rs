// tests/fetch.rs
//
// Department fetch and the full run against in-memory sources.
//
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use course_scout::config::{AppOptions, FetchOptions, TakenCourses};
use course_scout::fetch::{collect_department, Admission, Pace};
use course_scout::progress::RecordingProgress;
use course_scout::runner::{self, Sources};
use course_scout::seats::Seating;
use course_scout::specs::{OutlineSource, SeatSource};
use course_scout::store::Store;

/// Canned JSON keyed by the query path (`2025/registration/cmpt/201`).
#[derive(Default)]
struct Fixtures {
    docs: HashMap<String, String>,
    queries: AtomicUsize,
}

impl Fixtures {
    fn with(mut self, path: &str, json: &str) -> Self {
        self.docs.insert(path.to_string(), json.to_string());
        self
    }
}

impl OutlineSource for Fixtures {
    fn query(&self, segments: &[&str]) -> Result<String, Box<dyn Error>> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let key = segments.join("/");
        self.docs
            .get(&key)
            .cloned()
            .ok_or_else(|| format!("HTTP 404 for {key}").into())
    }
}

/// Panics on one query path, like a worker hitting a bug mid-department.
struct PanicsOn {
    inner: Fixtures,
    path: &'static str,
}

impl OutlineSource for PanicsOn {
    fn query(&self, segments: &[&str]) -> Result<String, Box<dyn Error>> {
        if segments.join("/") == self.path {
            panic!("fixture panic on {}", self.path);
        }
        self.inner.query(segments)
    }
}

/// Seat counts by outline name; anything else fails like a missing page.
struct FixedSeats(HashMap<&'static str, Seating>);

impl SeatSource for FixedSeats {
    fn seating(&self, name: &str, _section: &str) -> Result<Seating, Box<dyn Error>> {
        self.0.get(name).copied().ok_or_else(|| format!("{name}: HTTP 404").into())
    }
}

fn outline_json(number: &str, level: &str, kind: &str, days: &str, start: &str, end: &str) -> String {
    format!(
        r#"{{
            "info": {{
                "name": "CMPT {number} D100", "title": "Course {number}", "number": "{number}",
                "section": "D100", "type": "{kind}", "dept": "CMPT", "degreeLevel": "{level}",
                "outlinePath": "2025/spring/cmpt/{number}/d100", "prerequisites": "CMPT 125"
            }},
            "courseSchedule": [
                {{"campus": "Burnaby", "days": "{days}", "sectionCode": "LEC", "startTime": "{start}", "endTime": "{end}"}}
            ]
        }}"#
    )
}

fn sections_json() -> &'static str {
    r#"[{"value": "d100", "title": "D100", "classType": "e", "sectionCode": "LEC"},
        {"value": "d101", "title": "D101", "classType": "n", "sectionCode": "TUT"}]"#
}

fn fixtures() -> Fixtures {
    Fixtures::default()
        .with(
            "2025/registration/cmpt",
            r#"[{"value": "201", "title": "Course 201"},
                {"value": "295", "title": "Course 295"},
                {"title": "record without a value"},
                {"value": "300", "title": "Course 300"},
                {"value": "412", "title": "Course 412"},
                {"value": "705", "title": "Course 705"}]"#,
        )
        .with("2025/registration/cmpt/201", sections_json())
        .with("2025/registration/cmpt/201/d100", &outline_json("201", "UGRD", "e", "Mo, We", "10:30", "11:20"))
        .with("2025/registration/cmpt/295", sections_json())
        .with("2025/registration/cmpt/295/d100", &outline_json("295", "UGRD", "e", "Tu, Th", "14:30", "16:20"))
        // 300 lists sections but its outline is missing
        .with("2025/registration/cmpt/300", sections_json())
        .with("2025/registration/cmpt/412", sections_json())
        .with("2025/registration/cmpt/412/d100", &outline_json("412", "UGRD", "n", "Fr", "", ""))
        .with("2025/registration/cmpt/705", sections_json())
        .with("2025/registration/cmpt/705/d100", &outline_json("705", "GRAD", "e", "Mo", "9:30", "10:20"))
}

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("course_scout_{}", name));
    let _ = fs::remove_dir_all(&p);
    p
}

fn fetch_opts() -> FetchOptions {
    let mut opts = FetchOptions::default();
    opts.set_departments("CMPT");
    opts.workers = 3;
    opts
}

fn seats() -> FixedSeats {
    FixedSeats(HashMap::from([
        ("CMPT 201 D100", Seating::new(12, 30, 0)),
        ("CMPT 295 D100", Seating::new(30, 30, 5)),
    ]))
}

fn sources(outlines: Arc<Fixtures>, store: &str) -> Sources {
    Sources {
        outlines,
        seats: Arc::new(seats()),
        store: Store::at(tmp_dir(store)),
        pace: Pace::none(),
    }
}

fn app_options() -> AppOptions {
    let mut opts = AppOptions::default();
    opts.fetch = fetch_opts();
    opts.filter.taken = TakenCourses::none();
    opts
}

#[test]
fn department_fetch_sorts_outcomes_in_upstream_order() {
    let source = Arc::new(fixtures());
    let mut progress = RecordingProgress::default();

    let got = collect_department(source, &fetch_opts(), Pace::none(), "cmpt", Some(&mut progress)).unwrap();

    let loaded: Vec<&str> = got.outlines.iter().map(|o| o.number.as_str()).collect();
    assert_eq!(loaded, vec!["201", "295"]);

    let filtered: Vec<(&str, Admission)> = got.filtered.iter().map(|(o, a)| (o.number.as_str(), *a)).collect();
    assert_eq!(filtered, vec![("412", Admission::NotEnrollable), ("705", Admission::NotUndergrad)]);

    assert_eq!(got.failed.len(), 1);
    assert_eq!(got.failed[0].0, "300");
    assert!(got.failed[0].1.contains("404"));

    assert_eq!(got.skipped.len(), 1);
    assert_eq!(got.skipped[0].index, 2);

    assert_eq!(progress.total, Some(5));
    assert_eq!(progress.done.len(), 4);
    assert_eq!(progress.failed.len(), 1);
    let done = |name: &str| progress.done.iter().find(|(n, _)| n == name).map(|(_, a)| *a);
    assert_eq!(done("CMPT 201 D100"), Some(Admission::Loaded));
    assert_eq!(done("CMPT 705 D100"), Some(Admission::NotUndergrad));
    assert_eq!(done("CMPT 412 D100"), Some(Admission::NotEnrollable));
    assert!(progress.finished);
}

#[test]
fn panicking_worker_is_reported_as_failure() {
    let source = Arc::new(PanicsOn { inner: fixtures(), path: "2025/registration/cmpt/295" });
    let mut progress = RecordingProgress::default();

    let got = collect_department(source, &fetch_opts(), Pace::none(), "cmpt", Some(&mut progress)).unwrap();

    let loaded: Vec<&str> = got.outlines.iter().map(|o| o.number.as_str()).collect();
    assert_eq!(loaded, vec!["201"]);
    assert_eq!(got.filtered.len(), 2);
    let failed: Vec<&str> = got.failed.iter().map(|(c, _)| c.as_str()).collect();
    assert_eq!(failed, vec!["295", "300"]);
    assert!(got.failed[0].1.contains("stopped"));
    assert_eq!(progress.done.len() + progress.failed.len(), 5);
}

#[test]
fn missing_course_list_aborts_department() {
    let source = Arc::new(Fixtures::default());
    let mut opts = fetch_opts();
    opts.set_departments("math");
    assert!(collect_department(source, &opts, Pace::none(), "math", None).is_err());
}

#[test]
fn run_shortlists_with_seats_and_reuses_cache() {
    let outlines = Arc::new(fixtures());
    let src = sources(Arc::clone(&outlines), "run_cache");
    let opts = app_options();

    let first = runner::run(&opts, &src, None).unwrap();
    assert_eq!(first.departments.len(), 1);
    let dept = &first.departments[0];
    assert!(!dept.from_cache);
    assert_eq!(dept.candidates, 2);
    assert_eq!(dept.fetch_failures.len(), 1);
    let names: Vec<&str> = dept.shortlist.iter().map(|s| s.outline.name.as_str()).collect();
    assert_eq!(names, vec!["CMPT 201 D100", "CMPT 295 D100"]);
    assert_eq!(dept.shortlist[1].seating, Some(Seating::new(30, 30, 5)));
    assert!(src.store.department_path(&opts.fetch.term, "cmpt").exists());

    let queries = outlines.queries.load(Ordering::Relaxed);
    let second = runner::run(&opts, &src, None).unwrap();
    assert_eq!(outlines.queries.load(Ordering::Relaxed), queries);

    let again = &second.departments[0];
    assert!(again.from_cache);
    let cached: Vec<_> = again.shortlist.iter().map(|s| s.outline.clone()).collect();
    let fresh: Vec<_> = dept.shortlist.iter().map(|s| s.outline.clone()).collect();
    assert_eq!(cached, fresh);
}

#[test]
fn run_reports_progress_for_every_department() {
    let outlines = Arc::new(fixtures().with("2025/registration/psyc", "[]"));
    let src = sources(outlines, "run_progress");
    let mut opts = app_options();
    opts.fetch.set_departments("cmpt,psyc");
    opts.seats.lookup = false;

    let mut progress = RecordingProgress::default();
    let summary = runner::run(&opts, &src, Some(&mut progress)).unwrap();
    assert_eq!(summary.departments.len(), 2);
    assert_eq!(summary.shortlisted(), 2);
    assert_eq!(progress.done.len(), 4);
    assert!(progress.lines.iter().any(|l| l.starts_with("Wrote cache")));

    let mut progress = RecordingProgress::default();
    runner::run(&opts, &src, Some(&mut progress)).unwrap();
    assert!(progress.lines.iter().any(|l| l.starts_with("Found cached data")));
}

#[test]
fn refresh_ignores_cache() {
    let outlines = Arc::new(fixtures());
    let src = sources(Arc::clone(&outlines), "run_refresh");
    let mut opts = app_options();
    runner::run(&opts, &src, None).unwrap();

    opts.fetch.refresh = true;
    let before = outlines.queries.load(Ordering::Relaxed);
    let summary = runner::run(&opts, &src, None).unwrap();
    assert!(!summary.departments[0].from_cache);
    assert!(outlines.queries.load(Ordering::Relaxed) > before);
}

#[test]
fn seat_thresholds_reject_full_and_unknown_sections() {
    let outlines = Arc::new(fixtures());
    let mut src = sources(outlines, "run_thresholds");
    src.seats = Arc::new(FixedSeats(HashMap::from([("CMPT 201 D100", Seating::new(12, 30, 0))])));

    let mut opts = app_options();
    opts.seats.min_open_seats = Some(1);
    let summary = runner::run(&opts, &src, None).unwrap();
    let dept = &summary.departments[0];
    assert_eq!(dept.shortlist.len(), 1);
    assert_eq!(dept.shortlist[0].outline.number, "201");
    assert_eq!(dept.seat_failures.len(), 1);
    assert_eq!(dept.seat_rejected, 1);

    // Without thresholds an unknown seat count is still listed.
    opts.seats.min_open_seats = None;
    let summary = runner::run(&opts, &src, None).unwrap();
    let dept = &summary.departments[0];
    assert_eq!(dept.shortlist.len(), 2);
    assert_eq!(dept.shortlist[1].seating, None);
}

#[test]
fn schedule_rules_apply_to_fetched_outlines() {
    let src = sources(Arc::new(fixtures()), "run_rules");
    let mut opts = app_options();
    opts.filter.extra_rule = Some("-Mo10:00-11:00".into());
    opts.seats.lookup = false;

    let summary = runner::run(&opts, &src, None).unwrap();
    let dept = &summary.departments[0];
    let names: Vec<&str> = dept.shortlist.iter().map(|s| s.outline.name.as_str()).collect();
    assert_eq!(names, vec!["CMPT 295 D100"]);
    assert!(dept.shortlist[0].seating.is_none());
}

#[test]
fn bad_rule_aborts_before_any_request() {
    let outlines = Arc::new(fixtures());
    let src = sources(Arc::clone(&outlines), "run_bad_rule");
    let mut opts = app_options();
    opts.filter.extra_rule = Some("Mo10:00-11:00".into());

    assert!(runner::run(&opts, &src, None).is_err());
    assert_eq!(outlines.queries.load(Ordering::Relaxed), 0);
}
