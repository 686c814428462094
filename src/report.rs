// src/report.rs
//
// Terminal rendering of the shortlist. ANSI colors, no layout contract.

use crate::config::consts::OUTLINE_PAGE_URL;
use crate::outline::{MeetingPattern, Outline};
use crate::runner::{DepartmentResult, Shortlisted};
use crate::schedule::format_time;
use crate::seats::{SeatTier, Seating};

const SEAT_COLUMN: usize = 24;

fn tier_color(tier: SeatTier) -> &'static str {
    match tier {
        SeatTier::Comfortable => "32",
        SeatTier::Tight => "33",
        SeatTier::Crowded => "31",
    }
}

/// `12/30` or `30(+5)/30`, colored by tier.
pub fn seat_str(s: &Seating) -> String {
    let text = if s.waitlisted == 0 {
        format!("{}/{}", s.enrolled, s.capacity)
    } else {
        format!("{}(+{})/{}", s.enrolled, s.waitlisted, s.capacity)
    };
    paint!(tier_color(s.tier()), "{text}")
}

/// Bracketed, padded seat column; empty when seats are unknown.
pub fn seat_column(seating: Option<&Seating>) -> String {
    match seating {
        Some(s) => format!("{:<width$}", format!("[{}]", seat_str(s)), width = SEAT_COLUMN),
        None => s!(),
    }
}

pub fn outline_url(outline: &Outline) -> String {
    join!(OUTLINE_PAGE_URL, "?", &outline.outline_path)
}

pub fn meeting_str(m: &MeetingPattern) -> String {
    match &m.window {
        Some(w) => format!("{}: {}-{}", m.days, format_time(w.start()), format_time(w.end())),
        None => format!("{}: TBA", m.days),
    }
}

pub fn schedule_str(outline: &Outline) -> String {
    let parts: Vec<String> = outline.meetings().iter().map(meeting_str).collect();
    format!("[{}]", parts.join(", "))
}

pub fn prereq_line(outline: &Outline) -> String {
    format!("\t\tPrereq: {}", outline.prerequisites.as_deref().unwrap_or("None"))
}

/// Four lines: seats + name + title, outline URL, meetings, prerequisites.
pub fn render(item: &Shortlisted) -> String {
    let o = &item.outline;
    format!(
        "{}{} {}\n{:16}{}\n{:20}{}\n{}",
        seat_column(item.seating.as_ref()),
        paint!("1;35", "{}", o.name),
        o.title,
        "",
        outline_url(o),
        "",
        schedule_str(o),
        prereq_line(o)
    )
}

/// Heading with the department's counters, then every shortlisted section.
pub fn render_department(result: &DepartmentResult) -> String {
    let mut out = paint!(
        "1;32",
        "{}: {} of {} sections fit{}",
        result.dept.to_uppercase(),
        result.shortlist.len(),
        result.candidates,
        if result.from_cache { " (cached)" } else { "" }
    );
    out.push('\n');

    if !result.fetch_failures.is_empty() {
        out.push_str(&paint!("31", "{} course(s) could not be fetched", result.fetch_failures.len()));
        out.push('\n');
    }
    if !result.seat_failures.is_empty() {
        out.push_str(&paint!("33", "{} seat lookup(s) failed", result.seat_failures.len()));
        out.push('\n');
    }

    for item in &result.shortlist {
        out.push_str(&render(item));
        out.push('\n');
    }
    out
}
