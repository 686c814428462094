// src/specs/mod.rs
//! # Remote source specs
//!
//! One module per upstream endpoint. Each spec encodes *where the data lives*
//! (URL shape, JSON document shape, HTML cell) and *how to read it*.
//!
//! ## What lives here
//! - `outlines`: the course-outlines JSON backend (courses, sections, one outline).
//! - `seats`: the coursys course-info page and its enrolment cell.
//! - The `OutlineSource` / `SeatSource` seams, so higher layers can run against
//!   captured fixtures instead of the network.
//!
//! ## What does **not** live here
//! - Caching (`store`), request pacing and concurrency (`fetch`).
//! - Filtering or presentation (`filters`, `report`).
//!
//! ## Typical call chain
//! ```text
//! runner → store::load_department ─(miss)→ fetch::collect_department → specs::outlines
//!        → filters::FilterPipeline → specs::seats → seats::SeatGate → report
//! ```
pub mod outlines;
pub mod seats;

pub use outlines::{OutlineSource, SfuOutlines};
pub use seats::{Coursys, SeatSource};
