// src/config/consts.rs

// Outlines backend
pub const OUTLINES_HOST: &str = "www.sfu.ca";
pub const OUTLINES_PREFIX: &str = "/bin/wcm/course-outlines";
pub const OUTLINE_PAGE_URL: &str = "https://www.sfu.ca/outlines.html";
pub const TERM_YEAR: &str = "2025";
pub const TERM_NAME: &str = "registration";

// Seat counts
pub const SEATS_HOST: &str = "coursys.sfu.ca";
pub const SEATS_PREFIX: &str = "/browse/info/";
pub const SEATS_SEMESTER: &str = "2025sp";

// Local cache
pub const STORE_DIR: &str = ".store";

// Campus
pub const DEFAULT_CAMPUS: &str = "Burnaby";
pub const ANY_CAMPUS: &str = "any";
pub const ANY_CAMPUS_ACCEPTS: [&str; 2] = ["Burnaby", "Surrey"];

// Enrollment filters
pub const UNDERGRAD_LEVEL: &str = "UGRD";
pub const ENROLLABLE_TYPE: &str = "e";

// Seat tiers: a waitlist on a section under 90% full is not real pressure.
pub const COMFORTABLE_FILL_RATIO: f64 = 0.9;
pub const CROWDED_WAITLIST: u32 = 20;

// Courses already completed, per department code (lowercase).
pub const TAKEN_COURSES: &[(&str, &[&str])] = &[
    ("cmpt", &["105W", "120", "125", "210", "225", "276", "307", "310", "354", "361", "383", "471"]),
    ("psyc", &["100", "102"]),
];

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
pub const NET_TIMEOUT_SECS: u64 = 15;
pub const MAX_REDIRECTS: u32 = 5;
