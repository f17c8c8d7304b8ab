use crate::core::conflict::{
    audit, count_assignable_days, find_conflict, is_within_availability, ranges_overlap,
    ConflictChecker,
};
use crate::core::types::{Assignment, Availability, Day, Subject, TimeRange};

/// Helper to build a range from "HH:MM-HH:MM"
fn range(s: &str) -> TimeRange {
    s.parse().unwrap()
}

/// Helper to create a committed assignment
fn held(faculty: &str, code: &str, slots: &str) -> Assignment {
    Assignment::new(
        faculty,
        Subject::new(code, &format!("{} lecture", code)),
        crate::core::parser::parse_slot_list(slots).unwrap(),
    )
}

#[test]
fn test_touching_ranges_do_not_overlap() {
    let a = range("09:30-11:00");
    let b = range("11:00-12:30");

    assert!(!ranges_overlap(&a, &b));
    assert!(!ranges_overlap(&b, &a));
}

#[test]
fn test_disjoint_ranges_do_not_overlap() {
    assert!(!ranges_overlap(&range("08:00-09:00"), &range("13:00-14:30")));
}

#[test]
fn test_partial_overlap_detected_both_ways() {
    let a = range("09:30-11:00");
    let b = range("10:30-12:00");

    assert!(ranges_overlap(&a, &b));
    assert!(ranges_overlap(&b, &a));
}

#[test]
fn test_nested_and_identical_ranges_overlap() {
    assert!(ranges_overlap(&range("09:00-12:00"), &range("10:00-10:30")));
    assert!(ranges_overlap(&range("10:00-10:30"), &range("09:00-12:00")));
    assert!(ranges_overlap(&range("09:00-10:00"), &range("09:00-10:00")));
}

#[test]
fn test_one_minute_overlap_counts() {
    assert!(ranges_overlap(&range("09:00-10:01"), &range("10:00-11:00")));
}

#[test]
fn test_overlap_matches_definition_exhaustively() {
    // Every pair of ranges on a coarse half-hour grid over one morning
    let grid: Vec<u16> = (0..=8).map(|i| 8 * 60 + i * 30).collect();
    let mut ranges = Vec::new();
    for (i, &start) in grid.iter().enumerate() {
        for &end in &grid[i + 1..] {
            ranges.push(
                TimeRange::new(
                    crate::core::types::TimeOfDay::from_minutes(start).unwrap(),
                    crate::core::types::TimeOfDay::from_minutes(end).unwrap(),
                )
                .unwrap(),
            );
        }
    }

    for a in &ranges {
        for b in &ranges {
            let expected = a.start() < b.end() && b.start() < a.end();
            assert_eq!(ranges_overlap(a, b), expected, "{} vs {}", a, b);
        }
    }
}

#[test]
fn test_no_conflict_without_assignments_on_day() {
    let assignments = vec![held("F-001", "CS101", "Tuesday 09:30-11:00")];

    assert!(find_conflict(&assignments, Day::Monday, &range("09:30-11:00")).is_none());
    assert!(find_conflict(&Vec::<Assignment>::new(), Day::Monday, &range("09:30-11:00")).is_none());
}

#[test]
fn test_back_to_back_slot_is_not_a_conflict() {
    // Faculty holds Monday 09:30-11:00; Monday 11:00-12:30 is fine
    let assignments = vec![held("F-001", "CS101", "Monday 09:30-11:00")];

    assert!(find_conflict(&assignments, Day::Monday, &range("11:00-12:30")).is_none());
}

#[test]
fn test_conflict_identifies_existing_slot() {
    // Faculty holds Monday 09:30-11:00; Monday 10:00-10:30 collides
    let assignments = vec![held("F-001", "CS101", "Monday 09:30-11:00")];

    let conflict = find_conflict(&assignments, Day::Monday, &range("10:00-10:30")).unwrap();
    assert_eq!(conflict.subject_code, "CS101");
    assert_eq!(conflict.subject_name, "CS101 lecture");
    assert_eq!(conflict.day, Day::Monday);
    assert_eq!(conflict.range, range("09:30-11:00"));
}

#[test]
fn test_first_overlap_in_iteration_order_wins() {
    let assignments = vec![
        held("F-001", "CS101", "Monday 08:00-09:00"),
        held("F-001", "CS102", "Monday 10:00-11:00"),
        held("F-001", "CS103", "Monday 10:30-12:00"),
    ];

    let conflict = find_conflict(&assignments, Day::Monday, &range("09:30-11:30")).unwrap();
    assert_eq!(conflict.subject_code, "CS102");

    // Reversed order reports the other overlapping subject
    let reversed: Vec<_> = assignments.iter().rev().collect();
    let conflict = find_conflict(reversed, Day::Monday, &range("09:30-11:30")).unwrap();
    assert_eq!(conflict.subject_code, "CS103");
}

#[test]
fn test_multi_slot_assignment_checked_per_day() {
    let assignments = vec![held(
        "F-001",
        "CS101",
        "Monday 09:30-11:00; Wednesday 13:00-14:30",
    )];

    assert!(find_conflict(&assignments, Day::Wednesday, &range("14:00-15:00")).is_some());
    assert!(find_conflict(&assignments, Day::Monday, &range("14:00-15:00")).is_none());
}

#[test]
fn test_availability_full_containment() {
    // Tuesday: ["09:30-12:30"]; candidate 09:30-11:00 is available
    let windows = vec![range("09:30-12:30")];

    assert!(is_within_availability(&windows, &range("09:30-11:00")));
    assert!(is_within_availability(&windows, &range("09:30-12:30")));
    assert!(!is_within_availability(&windows, &range("09:00-10:00")));
    assert!(!is_within_availability(&windows, &range("12:00-13:00")));
}

#[test]
fn test_availability_does_not_union_adjacent_windows() {
    // Friday: ["11:00-12:30", "13:00-14:30"]; candidate 12:00-13:30 straddles the gap
    let windows = vec![range("11:00-12:30"), range("13:00-14:30")];
    assert!(!is_within_availability(&windows, &range("12:00-13:30")));

    // Even windows that touch are not merged
    let touching = vec![range("09:00-10:00"), range("10:00-11:00")];
    assert!(!is_within_availability(&touching, &range("09:30-10:30")));
}

#[test]
fn test_availability_empty_windows() {
    assert!(!is_within_availability(&[], &range("09:00-10:00")));
}

#[test]
fn test_checks_are_idempotent() {
    let assignments = vec![held("F-001", "CS101", "Monday 09:30-11:00")];
    let windows = vec![range("09:30-12:30")];
    let candidate = range("10:00-10:30");

    let first = find_conflict(&assignments, Day::Monday, &candidate);
    let second = find_conflict(&assignments, Day::Monday, &candidate);
    assert_eq!(first, second);

    assert_eq!(
        is_within_availability(&windows, &candidate),
        is_within_availability(&windows, &candidate)
    );
}

#[test]
fn test_count_assignable_days_skips_rejected_days() {
    let plan = count_assignable_days(
        vec![Day::Monday, Day::Wednesday, Day::Friday],
        |day| day != Day::Friday,
        |day| day == Day::Wednesday,
    );

    assert_eq!(plan.count, 1);
    assert_eq!(plan.assignable_days.into_iter().collect::<Vec<_>>(), vec![Day::Monday]);
}

#[test]
fn test_count_assignable_days_dedups_selection() {
    let plan = count_assignable_days(vec![Day::Monday, Day::Monday], |_| true, |_| false);

    assert_eq!(plan.count, 1);
    assert!(!plan.is_empty());
}

#[test]
fn test_count_assignable_days_empty_selection() {
    let plan = count_assignable_days(Vec::<Day>::new(), |_| true, |_| false);
    assert!(plan.is_empty());
}

#[test]
fn test_checker_plan_batch() {
    let assignments = vec![held("F-001", "CS101", "Tuesday 09:30-11:00")];
    let availability = Availability::new()
        .with_window(Day::Monday, range("08:00-12:00"))
        .with_window(Day::Tuesday, range("08:00-12:00"))
        .with_window(Day::Thursday, range("13:00-17:00"));
    let checker = ConflictChecker::new(&assignments, &availability);

    // Tuesday conflicts, Thursday is outside availability, Saturday has none declared
    let plan = checker.plan_batch(
        vec![Day::Monday, Day::Tuesday, Day::Thursday, Day::Saturday],
        &range("10:00-11:00"),
    );

    assert_eq!(plan.count, 1);
    assert!(plan.assignable_days.contains(&Day::Monday));
}

#[test]
fn test_checker_subject_count_and_teaches() {
    let assignments = vec![
        held("F-001", "CS101", "Monday 09:30-11:00"),
        held("F-001", "CS101", "Wednesday 09:30-11:00"),
        held("F-001", "CS102", "Friday 09:30-11:00"),
    ];
    let availability = Availability::new();
    let checker = ConflictChecker::new(&assignments, &availability);

    assert_eq!(checker.subject_count(), 2);
    assert!(checker.teaches("CS102"));
    assert!(!checker.teaches("CS999"));
}

#[test]
fn test_audit_reports_every_double_booking() {
    let assignments = vec![
        held("F-001", "CS101", "Monday 09:00-11:00"),
        held("F-001", "CS102", "Monday 10:00-12:00"),
        held("F-001", "CS103", "Monday 10:30-11:30"),
        held("F-002", "CS104", "Monday 10:00-12:00"),
    ];

    let bookings = audit(&assignments);

    // CS101/CS102, CS101/CS103, CS102/CS103; F-002 is on its own
    assert_eq!(bookings.len(), 3);
    assert!(bookings.iter().all(|b| b.faculty_id == "F-001"));
    assert_eq!(bookings[0].first.subject_code, "CS101");
    assert_eq!(bookings[0].second.subject_code, "CS102");
}

#[test]
fn test_audit_clean_roster() {
    let assignments = vec![
        held("F-001", "CS101", "Monday 09:30-11:00"),
        held("F-001", "CS102", "Monday 11:00-12:30"),
        held("F-002", "CS103", "Monday 09:30-11:00"),
    ];

    assert!(audit(&assignments).is_empty());
}
