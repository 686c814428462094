// src/specs/seats.rs
//! Live seat counts from coursys.
//!
//! The course info page carries `table#courseinfo`; its third row's second cell reads
//! `"<enrolled> out of <capacity>"`, optionally followed by `" (<n> on waitlist)"`.

use std::error::Error;

use crate::config::consts::{SEATS_HOST, SEATS_PREFIX, SEATS_SEMESTER};
use crate::core::{html, net, sanitize};
use crate::seats::{parse_seating_text, Seating};

/// Live seat lookup for one section.
pub trait SeatSource: Send + Sync {
    /// `name` is the outline name (`"CMPT 225 D100"`), `section` its section code.
    fn seating(&self, name: &str, section: &str) -> Result<Seating, Box<dyn Error>>;
}

#[derive(Clone, Debug)]
pub struct Coursys {
    pub host: String,
    pub semester: String,
}

impl Default for Coursys {
    fn default() -> Self {
        Self { host: s!(SEATS_HOST), semester: s!(SEATS_SEMESTER) }
    }
}

impl Coursys {
    /// `/browse/info/2025sp-cmpt-225-d1`
    pub fn path_for(&self, name: &str, section: &str) -> String {
        format!(
            "{}{}-{}-{}",
            SEATS_PREFIX,
            self.semester,
            sanitize::course_slug(name),
            sanitize::section_slug(section)
        )
    }
}

impl SeatSource for Coursys {
    fn seating(&self, name: &str, section: &str) -> Result<Seating, Box<dyn Error>> {
        let path = self.path_for(name, section);
        logd!("GET https://{}{}", self.host, path);
        let page = net::http_get(&self.host, &path)?;
        parse_seat_page(&page).map_err(|e| format!("{name}: {e}").into())
    }
}

pub fn parse_seat_page(page: &str) -> Result<Seating, Box<dyn Error>> {
    let table = html::element_by_id_ci(page, "table", "courseinfo")
        .ok_or("couldn't find the course info table")?;
    let row = html::nth_tag_block_ci(table, "tr", 2).ok_or("couldn't find the seating row")?;
    let cells = html::row_cells(row);
    let text = cells.get(1).ok_or("couldn't find the seating field")?;
    parse_seating_text(text).ok_or_else(|| format!("couldn't read seating from {text:?}").into())
}
