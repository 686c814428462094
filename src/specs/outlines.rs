// src/specs/outlines.rs
//! Reading the course-outlines REST backend.
//!
//! The backend answers `?<year>/<term>/<dept>[/<course>[/<section>]]` with JSON:
//! - department level: array of courses (`value`, `title`)
//! - course level: array of sections (`value`, `title`, `classType`, `sectionCode`)
//! - section level: one outline document (`info`, `courseSchedule`)
//!
//! This module only knows URLs and document shapes. It does not cache, pace
//! requests, or decide which outlines are wanted (see `fetch`).

use std::error::Error;

use crate::config::consts::{OUTLINES_HOST, OUTLINES_PREFIX};
use crate::config::Term;
use crate::core::net;
use crate::outline::{self, CourseRef, Outline, ParseReport, SectionRef};

/// Where outline JSON comes from. The HTTP backend in production, fixtures in tests.
pub trait OutlineSource: Send + Sync {
    /// Raw JSON for the query made of `segments` joined by `/`.
    fn query(&self, segments: &[&str]) -> Result<String, Box<dyn Error>>;
}

/// The live backend over HTTPS.
#[derive(Clone, Debug)]
pub struct SfuOutlines {
    pub host: String,
    pub prefix: String,
}

impl Default for SfuOutlines {
    fn default() -> Self {
        Self { host: s!(OUTLINES_HOST), prefix: s!(OUTLINES_PREFIX) }
    }
}

impl SfuOutlines {
    pub fn path_for(&self, segments: &[&str]) -> String {
        let query: Vec<String> = segments.iter().map(|s| net::encode_segment(s)).collect();
        format!("{}?{}", self.prefix, query.join("/"))
    }
}

impl OutlineSource for SfuOutlines {
    fn query(&self, segments: &[&str]) -> Result<String, Box<dyn Error>> {
        let path = self.path_for(segments);
        logd!("GET https://{}{}", self.host, path);
        net::http_get(&self.host, &path)
    }
}

pub fn list_courses(
    src: &dyn OutlineSource,
    term: &Term,
    dept: &str,
) -> Result<ParseReport<CourseRef>, Box<dyn Error>> {
    let json = src.query(&[term.year.as_str(), term.name.as_str(), dept])?;
    Ok(outline::parse_records(&json)?)
}

pub fn list_sections(
    src: &dyn OutlineSource,
    term: &Term,
    dept: &str,
    course: &str,
) -> Result<ParseReport<SectionRef>, Box<dyn Error>> {
    let json = src.query(&[term.year.as_str(), term.name.as_str(), dept, course])?;
    Ok(outline::parse_records(&json)?)
}

pub fn fetch_outline(
    src: &dyn OutlineSource,
    term: &Term,
    dept: &str,
    course: &str,
    section: &str,
) -> Result<Outline, Box<dyn Error>> {
    let json = src.query(&[term.year.as_str(), term.name.as_str(), dept, course, section])?;
    outline::parse_outline(&json)
}

/// Outline of the first listed section of `course` (normally the lecture).
pub fn fetch_course(
    src: &dyn OutlineSource,
    term: &Term,
    dept: &str,
    course: &str,
) -> Result<Outline, Box<dyn Error>> {
    let sections = list_sections(src, term, dept, course)?;
    for skip in &sections.skipped {
        logw!("{dept} {course}: section record {} skipped: {}", skip.index, skip.reason);
    }
    let first = sections
        .parsed
        .first()
        .ok_or_else(|| format!("{dept} {course}: no sections listed"))?;
    fetch_outline(src, term, dept, course, &first.value)
}
