// src/progress.rs
use crate::fetch::Admission;

/// Lightweight progress reporting used by long-running operations (department fetches).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One outline fetched; `admission` says whether it is kept for filtering.
    fn item_done(&mut self, _name: &str, _admission: Admission) {}

    /// One item could not be processed.
    fn item_failed(&mut self, _label: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Records every call; handy for tests and for summaries.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub total: Option<usize>,
    pub lines: Vec<String>,
    pub done: Vec<(String, Admission)>,
    pub failed: Vec<(String, String)>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, total: usize) { self.total = Some(total); }
    fn log(&mut self, msg: &str) { self.lines.push(s!(msg)); }
    fn item_done(&mut self, name: &str, admission: Admission) { self.done.push((s!(name), admission)); }
    fn item_failed(&mut self, label: &str, reason: &str) {
        self.failed.push((s!(label), s!(reason)));
    }
    fn finish(&mut self) { self.finished = true; }
}
