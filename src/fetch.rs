// src/fetch.rs
use std::{
    error::Error, thread, time::Duration,
    sync::{ mpsc, Arc, atomic::{ AtomicUsize, Ordering }}
};

use crate::{
    config::consts::{ JITTER_MS, REQUEST_PAUSE_MS },
    config::FetchOptions,
    outline::{ Outline, Skipped },
    progress::Progress,
    specs::{ outlines, OutlineSource },
};

const LOST_RESULT: &str = "fetch worker stopped before returning a result";

/// Why a fetched outline is (not) kept for filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    Loaded,
    NotUndergrad,
    NotEnrollable,
}

impl Admission {
    /// Why the outline was dropped, `None` when it was kept.
    pub fn reason(self) -> Option<&'static str> {
        match self {
            Admission::Loaded => None,
            Admission::NotUndergrad => Some("not ugrad"),
            Admission::NotEnrollable => Some("not enrollable"),
        }
    }
}

pub fn admit(outline: &Outline) -> Admission {
    if !outline.is_undergrad() {
        Admission::NotUndergrad
    } else if !outline.is_enrollable() {
        Admission::NotEnrollable
    } else {
        Admission::Loaded
    }
}

/// Everything learned while fetching one department, in upstream course order.
#[derive(Clone, Debug, Default)]
pub struct DepartmentFetch {
    /// Enrollable undergraduate outlines.
    pub outlines: Vec<Outline>,
    /// Fetched fine but not wanted.
    pub filtered: Vec<(Outline, Admission)>,
    /// Course value and error message.
    pub failed: Vec<(String, String)>,
    /// Course list records that did not decode.
    pub skipped: Vec<Skipped>,
}

/// Pacing between requests of one worker.
#[derive(Clone, Copy, Debug)]
pub struct Pace {
    pub pause_ms: u64,
    pub jitter_ms: u64,
}

impl Default for Pace {
    fn default() -> Self {
        Self { pause_ms: REQUEST_PAUSE_MS, jitter_ms: JITTER_MS }
    }
}

impl Pace {
    pub fn none() -> Self {
        Self { pause_ms: 0, jitter_ms: 0 }
    }

    fn delay_for(&self, i: usize) -> Duration {
        let jitter = if self.jitter_ms == 0 { 0 } else { (i as u64) % self.jitter_ms };
        Duration::from_millis(self.pause_ms + jitter)
    }
}

/// Fetch every course outline of `dept`.
/// Courses are spread over `opts.workers` threads; per-course failures are
/// collected, only a failing course list aborts.
pub fn collect_department(
    source: Arc<dyn OutlineSource>,
    opts: &FetchOptions,
    pace: Pace,
    dept: &str,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<DepartmentFetch, Box<dyn Error>> {
    let courses = outlines::list_courses(source.as_ref(), &opts.term, dept)?;
    for skip in &courses.skipped {
        loge!("{dept}: course record {} skipped: {}", skip.index, skip.reason);
    }

    let course_ids: Vec<String> = courses.parsed.iter().map(|c| c.value.clone()).collect();
    logf!("{dept}: {} courses listed", course_ids.len());

    if let Some(p) = progress.as_deref_mut() {
        p.begin(course_ids.len());
    }

    // Concurrency
    type FetchOk = (usize, Outline);
    type FetchErr = (usize, String);

    let ids_arc = Arc::new(course_ids);
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<Result<FetchOk, FetchErr>>();

    let workers = opts.workers.min(ids_arc.len()).max(1);

    for _ in 0..workers {
        let ids = Arc::clone(&ids_arc);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();
        let src = Arc::clone(&source);
        let term = opts.term.clone();
        let dept = s!(dept);

        thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= ids.len() {
                    break;
                }
                let result = match outlines::fetch_course(src.as_ref(), &term, &dept, &ids[i]) {
                    Ok(outline) => Ok((i, outline)),
                    Err(e) => Err((i, e.to_string())),
                };
                if tx.send(result).is_err() {
                    break; // receiver gone
                }
                thread::sleep(pace.delay_for(i)); // be polite
            }
        });
    }
    drop(res_tx); // main thread is sole receiver now

    // Aggregate results
    let mut fetched: Vec<(usize, Outline)> = Vec::with_capacity(ids_arc.len());
    let mut failed: Vec<(usize, String)> = Vec::new();
    let mut arrived = vec![false; ids_arc.len()];

    for _ in 0..ids_arc.len() {
        match res_rx.recv() {
            Ok(Ok((i, outline))) => {
                arrived[i] = true;
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&outline.name, admit(&outline));
                }
                fetched.push((i, outline));
            }
            Ok(Err((i, msg))) => {
                arrived[i] = true;
                let course = &ids_arc[i];
                loge!("{dept} {course}: {msg}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&format!("{dept} {course}"), &msg);
                }
                failed.push((i, msg));
            }
            Err(_) => break, // every worker is gone
        }
    }

    // A worker that panicked takes its course with it; report those as failures.
    for i in (0..ids_arc.len()).filter(|&i| !arrived[i]) {
        let course = &ids_arc[i];
        let msg = s!(LOST_RESULT);
        loge!("{dept} {course}: {msg}");
        if let Some(p) = progress.as_deref_mut() {
            p.item_failed(&format!("{dept} {course}"), &msg);
        }
        failed.push((i, msg));
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    // Back to upstream order
    fetched.sort_by_key(|(i, _)| *i);
    failed.sort_by_key(|(i, _)| *i);

    let mut out = DepartmentFetch { skipped: courses.skipped, ..Default::default() };
    for (_, outline) in fetched {
        match admit(&outline) {
            Admission::Loaded => out.outlines.push(outline),
            other => out.filtered.push((outline, other)),
        }
    }
    out.failed = failed
        .into_iter()
        .map(|(i, msg)| (ids_arc[i].clone(), msg))
        .collect();

    logf!(
        "{dept}: {} loaded, {} filtered, {} failed",
        out.outlines.len(),
        out.filtered.len(),
        out.failed.len()
    );
    Ok(out)
}
