//! Support status state machine.

use crate::model::{LifecycleDate, SupportStatus};
use chrono::{Duration, NaiveDate};

/// Length of the near-retirement window: `months` of 30 days.
#[must_use]
pub fn near_retirement_window(months: u32) -> Duration {
    Duration::days(i64::from(months) * 30)
}

/// Support status of a lifecycle window on a given day.
///
/// Priority:
/// 1. start after `today` → `Upcoming`
/// 2. end before `today` → `Retired`
/// 3. `today` inside the last `months` × 30 days → `NearRetirement`
/// 4. end known → `Supported`
/// 5. otherwise → `Unknown`
#[must_use]
pub fn calculate_support_status(
    start: LifecycleDate,
    end: LifecycleDate,
    today: NaiveDate,
    months: u32,
) -> SupportStatus {
    if let Some(start) = start.as_date() {
        if start > today {
            return SupportStatus::Upcoming;
        }
    }

    let Some(end) = end.as_date() else {
        return SupportStatus::Unknown;
    };

    if end < today {
        return SupportStatus::Retired;
    }

    let near_retirement = end
        .checked_sub_signed(near_retirement_window(months))
        .unwrap_or(NaiveDate::MIN);
    if near_retirement <= today {
        SupportStatus::NearRetirement
    } else {
        SupportStatus::Supported
    }
}
