#![no_main]
use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use lifecycle_roadmap::aggregate::CancelFlag;
use lifecycle_roadmap::inventory::{HostQuery, MemoryInventory};
use lifecycle_roadmap::{relevant_app_streams, relevant_rhel, Catalog, HostAccess, RelevanceOptions};

// Arbitrary feed lines through both relevance reports.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(inventory) = MemoryInventory::from_jsonl_str(s) else {
        return;
    };
    let Ok(catalog) = Catalog::builtin() else {
        return;
    };
    let Some(today) = NaiveDate::from_ymd_opt(2025, 1, 15) else {
        return;
    };
    let query = HostQuery::new(HostAccess::Unrestricted);
    let options = RelevanceOptions::new(today).related(true);

    if let Ok(report) = relevant_app_streams(&catalog, &inventory, &query, &options, &CancelFlag::new()) {
        assert_eq!(report.meta.count, report.data.len());
    }
    if let Ok(report) = relevant_rhel(&catalog, &inventory, &query, &options, &CancelFlag::new()) {
        assert_eq!(report.meta.count, report.data.len());
    }
});
