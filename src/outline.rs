// src/outline.rs
//
// Course outline model.
//
// - Wire* types mirror the outlines backend JSON (all fields tolerant/optional).
// - Outline / MeetingPattern are the canonical shapes the filters and the cache use.
//   Meeting times are parsed once here, so the filters never see clock strings.
//
// Record-level parsing is lenient but never silent: every record that fails to
// decode ends up in `ParseReport::skipped`.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::consts::{ENROLLABLE_TYPE, UNDERGRAD_LEVEL};
use crate::schedule::{ConstraintError, TimeWindow};

/* ---------------- Wire types ---------------- */

/// Entry of `?<year>/<term>/<dept>`.
#[derive(Clone, Debug, Deserialize)]
pub struct CourseRef {
    pub value: String,
    pub title: String,
}

/// Entry of `?<year>/<term>/<dept>/<course>`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRef {
    pub value: String,
    pub title: String,
    pub class_type: String,
    pub section_code: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOutline {
    pub info: WireInfo,
    #[serde(default)]
    pub course_schedule: Option<Vec<WireSchedule>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireInfo {
    pub name: Option<String>,
    pub title: Option<String>,
    pub number: Option<String>,
    pub description: Option<String>,
    pub section: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub outline_path: Option<String>,
    pub corequisites: Option<String>,
    pub prerequisites: Option<String>,
    #[serde(alias = "dep")]
    pub dept: Option<String>,
    pub degree_level: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireSchedule {
    pub campus: Option<String>,
    pub days: Option<String>,
    pub section_code: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/* ---------------- Canonical types ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingPattern {
    pub campus: Option<String>,
    pub days: String,
    pub section_code: Option<String>,
    /// `None` when the backend lists the meeting without times.
    pub window: Option<TimeWindow>,
}

impl MeetingPattern {
    pub fn new(campus: Option<&str>, days: &str, window: Option<TimeWindow>) -> Self {
        Self {
            campus: campus.map(String::from),
            days: s!(days),
            section_code: None,
            window,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    pub name: String,
    pub title: String,
    pub number: String,
    pub dept: String,
    pub section: String,
    pub kind: String,
    pub degree_level: String,
    pub outline_path: String,
    pub description: Option<String>,
    pub prerequisites: Option<String>,
    pub corequisites: Option<String>,
    /// `None` when the backend sent no schedule at all.
    pub schedule: Option<Vec<MeetingPattern>>,
}

impl Outline {
    /// Schedule entries, empty when none were recorded.
    pub fn meetings(&self) -> &[MeetingPattern] {
        self.schedule.as_deref().unwrap_or(&[])
    }

    pub fn primary_campus(&self) -> Option<&str> {
        self.meetings().first().and_then(|m| m.campus.as_deref())
    }

    pub fn is_undergrad(&self) -> bool {
        self.degree_level == UNDERGRAD_LEVEL
    }

    /// The backend marks enrollable sections with type `e`.
    pub fn is_enrollable(&self) -> bool {
        self.kind == ENROLLABLE_TYPE
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("meeting '{days}' has an unusable time: {source}")]
    MeetingTime {
        days: String,
        #[source]
        source: ConstraintError,
    },
    #[error("meeting '{0}' has a start time but no end time (or the reverse)")]
    HalfOpenMeeting(String),
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl TryFrom<WireSchedule> for MeetingPattern {
    type Error = RecordError;

    fn try_from(w: WireSchedule) -> Result<Self, Self::Error> {
        let days = w.days.unwrap_or_default();
        let window = match (non_empty(w.start_time), non_empty(w.end_time)) {
            (None, None) => None,
            (Some(start), Some(end)) => Some(
                TimeWindow::parse(&start, &end)
                    .map_err(|source| RecordError::MeetingTime { days: days.clone(), source })?,
            ),
            _ => return Err(RecordError::HalfOpenMeeting(days)),
        };
        Ok(Self {
            campus: non_empty(w.campus),
            days,
            section_code: non_empty(w.section_code),
            window,
        })
    }
}

impl TryFrom<WireOutline> for Outline {
    type Error = RecordError;

    fn try_from(w: WireOutline) -> Result<Self, Self::Error> {
        let info = w.info;
        let schedule = match w.course_schedule {
            Some(list) if !list.is_empty() => Some(
                list.into_iter()
                    .map(MeetingPattern::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            _ => None,
        };
        Ok(Self {
            name: info.name.unwrap_or_default(),
            title: info.title.unwrap_or_default(),
            number: info.number.unwrap_or_default(),
            dept: info.dept.unwrap_or_default(),
            section: info.section.unwrap_or_default(),
            kind: info.kind.unwrap_or_default(),
            degree_level: info.degree_level.unwrap_or_default(),
            outline_path: info.outline_path.unwrap_or_default(),
            description: non_empty(info.description),
            prerequisites: non_empty(info.prerequisites),
            corequisites: non_empty(info.corequisites),
            schedule,
        })
    }
}

/* ---------------- Lenient list parsing ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skipped {
    pub index: usize,
    pub reason: String,
}

/// Records that decoded, plus the ones that did not.
#[derive(Clone, Debug)]
pub struct ParseReport<T> {
    pub parsed: Vec<T>,
    pub skipped: Vec<Skipped>,
}

impl<T> Default for ParseReport<T> {
    fn default() -> Self {
        Self { parsed: Vec::new(), skipped: Vec::new() }
    }
}

/// Decode a JSON array record by record. Only a document that is not an array is an error.
pub fn parse_records<T: DeserializeOwned>(json: &str) -> Result<ParseReport<T>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let mut report = ParseReport::default();
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<T>(value) {
            Ok(v) => report.parsed.push(v),
            Err(e) => report.skipped.push(Skipped { index, reason: e.to_string() }),
        }
    }
    Ok(report)
}

/// Decode one outline document into its canonical form.
pub fn parse_outline(json: &str) -> Result<Outline, Box<dyn std::error::Error>> {
    let wire: WireOutline = serde_json::from_str(json)?;
    Ok(Outline::try_from(wire)?)
}
