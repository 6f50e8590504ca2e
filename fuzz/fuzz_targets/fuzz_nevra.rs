#![no_main]
use libfuzzer_sys::fuzz_target;
use lifecycle_roadmap::Nevra;

/// Fuzz the NEVRA parser.
///
/// A successful parse always has a name, and the cached parse agrees with
/// the direct one.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parsed = Nevra::parse(s);
        if let Ok(nevra) = &parsed {
            assert!(!nevra.name.is_empty());
        }
        assert_eq!(Nevra::parse_cached(s), parsed);
    }
});
