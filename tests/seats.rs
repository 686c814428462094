// tests/seats.rs
use course_scout::config::SeatOptions;
use course_scout::seats::{parse_seating_text, SeatGate, SeatTier, Seating};
use course_scout::specs::seats::parse_seat_page;

#[test]
fn classifier_examples() {
    assert_eq!(SeatTier::classify(0, 30, 0), SeatTier::Comfortable);
    assert_eq!(SeatTier::classify(30, 30, 5), SeatTier::Tight);
    assert_eq!(SeatTier::classify(30, 30, 25), SeatTier::Crowded);
    assert_eq!(SeatTier::classify(25, 30, 5), SeatTier::Comfortable);
}

#[test]
fn classifier_boundaries() {
    // 27 of 30 is exactly the 0.9 fill ratio: no longer "mostly empty".
    assert_eq!(SeatTier::classify(27, 30, 1), SeatTier::Tight);
    assert_eq!(SeatTier::classify(26, 30, 1), SeatTier::Comfortable);
    assert_eq!(SeatTier::classify(30, 30, 19), SeatTier::Tight);
    assert_eq!(SeatTier::classify(30, 30, 20), SeatTier::Crowded);
    // Over-enrolled without waitlist is still comfortable.
    assert_eq!(SeatTier::classify(35, 30, 0), SeatTier::Comfortable);
}

#[test]
fn gate_without_thresholds_admits_everything() {
    let gate = SeatGate::from(&SeatOptions::default());
    assert!(gate.is_open());
    assert!(gate.admits(&Seating::new(40, 30, 99)));
    assert!(gate.admits_unknown());
}

#[test]
fn gate_applies_both_thresholds() {
    let gate = SeatGate { min_open_seats: Some(3), max_waitlist: Some(0) };
    assert!(gate.admits(&Seating::new(27, 30, 0)));
    assert!(!gate.admits(&Seating::new(28, 30, 0)));
    assert!(!gate.admits(&Seating::new(10, 30, 1)));
    assert!(!gate.admits(&Seating::new(31, 30, 0)));
    assert!(!gate.admits_unknown());
}

#[test]
fn seating_cells_parse() {
    assert_eq!(parse_seating_text("12 out of 30"), Some(Seating::new(12, 30, 0)));
    assert_eq!(
        parse_seating_text("30 out of 30 (5 on waitlist) *"),
        Some(Seating::new(30, 30, 5))
    );
    assert_eq!(parse_seating_text("no data"), None);
}

#[test]
fn seat_page_without_table_is_an_error() {
    assert!(parse_seat_page("<html><body>Not found</body></html>").is_err());
}
