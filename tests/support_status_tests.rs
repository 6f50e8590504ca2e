//! Support status boundaries and monotonicity.

use chrono::{Duration, NaiveDate};
use lifecycle_roadmap::lifecycle::{calculate_support_status, near_retirement_window};
use lifecycle_roadmap::{LifecycleDate, SupportStatus};
use proptest::prelude::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_threshold_boundaries() {
    let start = LifecycleDate::from(day(2020, 1, 1));
    let end_day = day(2026, 5, 31);
    let end = LifecycleDate::from(end_day);
    let boundary = end_day - near_retirement_window(6);

    assert_eq!(calculate_support_status(start, end, boundary, 6), SupportStatus::NearRetirement);
    assert_eq!(
        calculate_support_status(start, end, boundary - Duration::days(1), 6),
        SupportStatus::Supported
    );
    assert_eq!(calculate_support_status(start, end, end_day, 6), SupportStatus::NearRetirement);
    assert_eq!(
        calculate_support_status(start, end, end_day + Duration::days(1), 6),
        SupportStatus::Retired
    );
}

#[test]
fn test_unknown_dates() {
    let today = day(2025, 3, 27);
    assert_eq!(
        calculate_support_status(LifecycleDate::from(day(2020, 1, 1)), LifecycleDate::Unknown, today, 3),
        SupportStatus::Unknown
    );
    assert_eq!(
        calculate_support_status(LifecycleDate::Unknown, LifecycleDate::from(day(2027, 12, 31)), today, 3),
        SupportStatus::Supported
    );
    assert_eq!(
        calculate_support_status(LifecycleDate::Unknown, LifecycleDate::Unknown, today, 3),
        SupportStatus::Unknown
    );
    assert_eq!(
        calculate_support_status(LifecycleDate::from(day(2026, 1, 1)), LifecycleDate::Unknown, today, 3),
        SupportStatus::Upcoming
    );
}

proptest! {
    #[test]
    fn status_never_improves_over_time(
        start_offset in 0i64..3000,
        length in 1i64..4000,
        months in 0u32..24,
        first in 0i64..8000,
        step in 0i64..2000,
    ) {
        let origin = day(2015, 1, 1);
        let start = origin + Duration::days(start_offset);
        let end = start + Duration::days(length);
        let earlier = origin + Duration::days(first);
        let later = earlier + Duration::days(step);

        let before = calculate_support_status(start.into(), end.into(), earlier, months);
        let after = calculate_support_status(start.into(), end.into(), later, months);
        prop_assert!(before <= after, "{before:?} then {after:?}");
    }
}
