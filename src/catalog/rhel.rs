//! Built-in RHEL lifecycle table.

use crate::error::{CatalogErrorKind, Result, RoadmapError};
use crate::model::{CatalogRhelLifecycle, LifecycleDate};

/// `(major, minor, start, end, eus end, e4s end, els end)`; empty means no date.
type RhelRow = (u32, Option<u32>, &'static str, &'static str, &'static str, &'static str, &'static str);

const RHEL_LIFECYCLES: &[RhelRow] = &[
    (8, None, "2019-05-07", "2029-05-31", "", "", "2032-05-31"),
    (8, Some(0), "2019-05-07", "2019-11-30", "", "", ""),
    (8, Some(1), "2019-11-05", "2020-05-31", "", "2023-11-30", ""),
    (8, Some(2), "2020-04-28", "2020-10-31", "", "2024-04-30", ""),
    (8, Some(3), "2020-11-03", "2021-05-31", "", "", ""),
    (8, Some(4), "2021-05-18", "2021-11-30", "2023-05-31", "", ""),
    (8, Some(5), "2021-11-09", "2022-05-31", "", "", ""),
    (8, Some(6), "2022-05-10", "2022-11-30", "2024-05-31", "2026-05-31", ""),
    (8, Some(7), "2022-11-09", "2023-05-31", "", "", ""),
    (8, Some(8), "2023-05-16", "2023-11-30", "2025-05-31", "2027-05-31", ""),
    (8, Some(9), "2023-11-14", "2024-05-31", "", "", ""),
    (8, Some(10), "2024-05-22", "2029-05-31", "", "", "2032-05-31"),
    (9, None, "2022-05-18", "2032-05-31", "", "", "2035-05-31"),
    (9, Some(0), "2022-05-18", "2022-11-30", "2024-05-31", "2026-05-31", ""),
    (9, Some(1), "2022-11-15", "2023-05-31", "", "", ""),
    (9, Some(2), "2023-05-10", "2023-11-30", "2025-05-31", "2027-05-31", ""),
    (9, Some(3), "2023-11-07", "2024-05-31", "", "", ""),
    (9, Some(4), "2024-04-30", "2024-10-31", "2026-04-30", "2028-04-30", ""),
    (9, Some(5), "2024-11-12", "2025-05-31", "", "", ""),
    (9, Some(6), "2025-05-15", "2025-11-30", "2027-05-30", "2029-05-30", ""),
    (9, Some(7), "2025-11-01", "2026-05-31", "", "", ""),
    (9, Some(8), "2026-05-15", "2026-11-30", "2028-05-30", "2030-05-30", ""),
    (9, Some(9), "2026-11-01", "2027-05-31", "", "", ""),
    (9, Some(10), "2027-05-15", "2032-05-31", "", "", "2035-05-31"),
    (10, Some(1), "2025-11-01", "2026-05-31", "", "", ""),
    (10, Some(2), "2026-05-15", "2026-11-30", "2028-05-30", "2030-05-30", ""),
];

/// Build the RHEL table.
pub fn builtin_rhel_lifecycles() -> Result<Vec<CatalogRhelLifecycle>> {
    RHEL_LIFECYCLES
        .iter()
        .map(|&(major, minor, start, end, eus, e4s, els)| {
            Ok(CatalogRhelLifecycle {
                name: "RHEL".to_string(),
                major,
                minor,
                start_date: date(start)?,
                end_date: date(end)?,
                end_date_eus: date(eus)?,
                end_date_e4s: date(e4s)?,
                end_date_els: date(els)?,
            })
        })
        .collect()
}

fn date(value: &str) -> Result<LifecycleDate> {
    LifecycleDate::parse(value).map_err(|message| {
        RoadmapError::catalog("built-in RHEL table", CatalogErrorKind::InvalidDate(message))
    })
}
