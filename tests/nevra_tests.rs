//! NEVRA parser behavior on real package strings and arbitrary input.

use lifecycle_roadmap::parsers::{Nevra, NevraError};
use proptest::prelude::*;

fn fields(package: &str) -> [String; 7] {
    let n = Nevra::parse(package).unwrap();
    [n.name, n.epoch, n.major, n.minor, n.z, n.release, n.arch]
}

#[test]
fn test_known_packages() {
    let cases = [
        (
            "NetworkManager-1:1.46.0-26.el9_4.x86_64",
            ["NetworkManager", "1", "1", "46", "0", "26.el9_4", "x86_64"],
        ),
        (
            "cairo-1.15.12-3.el8.x86_64",
            ["cairo", "0", "1", "15", "12", "3.el8", "x86_64"],
        ),
        (
            "ansible-core-1:2.14.17-1.el9.x86_64",
            ["ansible-core", "1", "2", "14", "17", "1.el9", "x86_64"],
        ),
        (
            "basesystem-0:11-13.el9.noarch",
            ["basesystem", "0", "11", "", "", "13.el9", "noarch"],
        ),
        (
            "abattis-cantarell-fonts-0:0.301-4.el9.noarch",
            ["abattis-cantarell-fonts", "0", "0", "301", "", "4.el9", "noarch"],
        ),
        // Without an epoch the name ends at the first '-'
        (
            "ansible-core-2.14.17-1.el9.x86_64",
            ["ansible", "0", "core-2", "14", "17", "1.el9", "x86_64"],
        ),
        (
            "python3-pip-wheel-21.3.1-1.el9.noarch",
            ["python3", "0", "pip-wheel-21", "3", "1", "1.el9", "noarch"],
        ),
    ];

    for (package, expected) in cases {
        assert_eq!(fields(package), expected.map(String::from), "parsing {package}");
    }
}

#[test]
fn test_malformed_packages() {
    assert!(matches!(Nevra::parse("kernel"), Err(NevraError::MissingArch(_))));
    assert!(matches!(Nevra::parse("kernel-5.14.x86_64"), Err(NevraError::MissingRelease(_))));
    assert!(matches!(Nevra::parse(":1.0-1.x86_64"), Err(NevraError::MissingEpochSeparator(_))));
    assert!(matches!(Nevra::parse("-1:1.0-1.x86_64"), Err(NevraError::EmptyName(_))));
}

#[test]
fn test_cached_parse_matches_direct() {
    let package = "python3.11-3.11.7-1.el9.x86_64";
    assert_eq!(Nevra::parse_cached(package), Nevra::parse(package));
    assert_eq!(Nevra::parse_cached(package), Nevra::parse(package));
    assert!(Nevra::parse_cached("garbage").is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn parse_doesnt_panic(s in "\\PC{0,200}") {
        let _ = Nevra::parse(&s);
    }

    #[test]
    fn release_never_contains_dash(s in "[a-z0-9.:_-]{0,60}") {
        if let Ok(nevra) = Nevra::parse(&s) {
            prop_assert!(!nevra.release.contains('-'), "release {:?} from {:?}", nevra.release, s);
        }
    }

    #[test]
    fn epochless_release_split(
        name in "[a-z][a-z0-9_+]{0,15}",
        version in "[0-9]{1,3}(\\.[0-9]{1,3}){0,2}",
        release in "[0-9]{1,3}\\.el[89](_[0-9])?",
        arch in "(x86_64|noarch|aarch64)",
    ) {
        let package = format!("{name}-{version}-{release}.{arch}");
        let nevra = Nevra::parse(&package).unwrap();
        prop_assert_eq!(nevra.name, name);
        prop_assert_eq!(nevra.epoch, "0");
        prop_assert_eq!(nevra.release, release);
        prop_assert_eq!(nevra.arch, arch);
    }

    #[test]
    fn well_formed_packages_parse(
        name in "[a-z][a-z0-9_+]{0,15}(-[a-z][a-z0-9]{0,8}){0,2}",
        epoch in 0u32..5,
        major in 0u32..100,
        minor in 0u32..100,
        release in "[0-9]{1,3}\\.el[89]",
        arch in "(x86_64|noarch|aarch64)",
    ) {
        let package = format!("{name}-{epoch}:{major}.{minor}-{release}.{arch}");
        let nevra = Nevra::parse(&package).unwrap();
        prop_assert_eq!(nevra.name, name);
        prop_assert_eq!(nevra.epoch, epoch.to_string());
        prop_assert_eq!(nevra.major, major.to_string());
        prop_assert_eq!(nevra.minor, minor.to_string());
        prop_assert_eq!(nevra.release, release);
        prop_assert_eq!(nevra.arch, arch);
    }
}
