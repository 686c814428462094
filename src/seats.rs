// src/seats.rs
//! Live seat counts: the classifier, the post-filter seat gate and the
//! text parser for the coursys "N out of M (W on waitlist)" cell.

use crate::config::consts::{COMFORTABLE_FILL_RATIO, CROWDED_WAITLIST};
use crate::config::SeatOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seating {
    pub enrolled: u32,
    pub capacity: u32,
    pub waitlisted: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeatTier {
    Comfortable,
    Tight,
    Crowded,
}

impl SeatTier {
    pub fn classify(enrolled: u32, capacity: u32, waitlisted: u32) -> Self {
        if waitlisted == 0 {
            return SeatTier::Comfortable;
        }
        if (enrolled as f64) < COMFORTABLE_FILL_RATIO * capacity as f64 {
            // Waitlisted but mostly empty; usually a scheduling artifact.
            return SeatTier::Comfortable;
        }
        if waitlisted < CROWDED_WAITLIST {
            SeatTier::Tight
        } else {
            SeatTier::Crowded
        }
    }
}

impl Seating {
    pub fn new(enrolled: u32, capacity: u32, waitlisted: u32) -> Self {
        Self { enrolled, capacity, waitlisted }
    }

    pub fn tier(&self) -> SeatTier {
        SeatTier::classify(self.enrolled, self.capacity, self.waitlisted)
    }

    /// Negative when over-enrolled.
    pub fn open_seats(&self) -> i64 {
        self.capacity as i64 - self.enrolled as i64
    }
}

/// Final accept/reject thresholds applied after the filter pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeatGate {
    pub min_open_seats: Option<u32>,
    pub max_waitlist: Option<u32>,
}

impl From<&SeatOptions> for SeatGate {
    fn from(o: &SeatOptions) -> Self {
        Self { min_open_seats: o.min_open_seats, max_waitlist: o.max_waitlist }
    }
}

impl SeatGate {
    pub fn is_open(&self) -> bool {
        self.min_open_seats.is_none() && self.max_waitlist.is_none()
    }

    pub fn admits(&self, seating: &Seating) -> bool {
        let seats_ok = self
            .min_open_seats
            .is_none_or(|min| seating.open_seats() >= min as i64);
        let waitlist_ok = self
            .max_waitlist
            .is_none_or(|max| seating.waitlisted <= max);
        seats_ok && waitlist_ok
    }

    /// Unknown seat data only passes when no threshold is set.
    pub fn admits_unknown(&self) -> bool {
        self.is_open()
    }
}

/// Parse `"12 out of 30"`, `"30 out of 30 (5 on waitlist)"`, optionally followed by `*`.
pub fn parse_seating_text(text: &str) -> Option<Seating> {
    let text = text.trim();
    let (enrolled, rest) = split_number(text)?;
    let rest = rest.trim_start().strip_prefix("out of")?.trim_start();
    let (capacity, rest) = split_number(rest)?;

    let rest = rest.trim_start();
    let waitlisted = match rest.strip_prefix('(') {
        Some(inner) => {
            let (w, tail) = split_number(inner.trim_start())?;
            tail.trim_start().strip_prefix("on waitlist)")?;
            w
        }
        None => 0,
    };
    Some(Seating::new(enrolled, capacity, waitlisted))
}

/// Leading decimal digits and whatever follows them.
fn split_number(s: &str) -> Option<(u32, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let n = s[..end].parse().ok()?;
    Some((n, &s[end..]))
}
