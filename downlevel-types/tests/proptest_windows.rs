//! Property-based tests for version ordering and window inclusivity.

use downlevel_types::{ProhibitionWindow, Version, VersionWindow};
use proptest::prelude::*;

fn arb_version() -> impl Strategy<Value = Version> {
    (0u16..5, 0u16..15, 0u16..4).prop_map(|(a, b, c)| Version::with_patch(a, b, c))
}

/// Two versions `(lo, hi)` with `lo <= hi`.
fn arb_ordered_pair() -> impl Strategy<Value = (Version, Version)> {
    (arb_version(), arb_version()).prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

proptest! {
    /// Display then parse yields the same version.
    #[test]
    fn display_parse_is_stable(v in arb_version()) {
        let parsed: Version = v.to_string().parse().unwrap();
        prop_assert_eq!(parsed, v);
    }

    /// Textual numeric comparison matches component comparison.
    #[test]
    fn ordering_matches_components(a in arb_version(), b in arb_version()) {
        let ka = (a.major(), a.minor(), a.patch());
        let kb = (b.major(), b.minor(), b.patch());
        prop_assert_eq!(a.cmp(&b), ka.cmp(&kb));
    }

    /// Both ends of the apply window are required; anything strictly outside is not.
    #[test]
    fn apply_window_is_inclusive(
        (since, until) in arb_ordered_pair(),
        probe in arb_version(),
    ) {
        let w = VersionWindow::new(since, until);
        prop_assert!(w.is_required(since));
        prop_assert!(w.is_required(until));
        if probe < since || probe > until {
            prop_assert!(!w.is_required(probe));
        } else {
            prop_assert!(w.is_required(probe));
        }
    }

    /// A source older than `works_since` is never applicable, whatever the target.
    #[test]
    fn old_source_is_never_applicable(
        (since, until) in arb_ordered_pair(),
        works_since in arb_version(),
        source in arb_version(),
        target in arb_version(),
    ) {
        let w = VersionWindow::new(since, until).works_since(works_since);
        if source < works_since {
            prop_assert!(!w.is_applicable(source, target));
        }
    }

    /// An unbounded prohibition applies to every target.
    #[test]
    fn unbounded_prohibition_is_total(target in arb_version()) {
        prop_assert!(ProhibitionWindow::always().is_prohibited(target));
    }

    #[test]
    fn bounded_prohibition_matches_comparison(until in arb_version(), target in arb_version()) {
        prop_assert_eq!(ProhibitionWindow::until(until).is_prohibited(target), target <= until);
    }
}
