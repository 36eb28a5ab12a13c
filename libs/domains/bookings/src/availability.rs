//! Overlap rule for bookings on the same room.

use crate::models::DateRange;

/// Inclusive interval intersection: an existing stay that ends on the day a
/// new one starts still conflicts, so same-day turnover is refused.
pub fn ranges_overlap(existing: &DateRange, requested: &DateRange) -> bool {
    existing.check_in <= requested.check_out && existing.check_out >= requested.check_in
}

/// True when no booking in `existing` conflicts with `requested`.
pub fn is_free<'a, I>(existing: I, requested: &DateRange) -> bool
where
    I: IntoIterator<Item = &'a DateRange>,
{
    !existing
        .into_iter()
        .any(|range| ranges_overlap(range, requested))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn range(from: (i32, u32, u32), to: (i32, u32, u32)) -> DateRange {
        DateRange::new(
            Utc.with_ymd_and_hms(from.0, from.1, from.2, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(to.0, to.1, to.2, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_boundary_touch_conflicts() {
        let existing = range((2024, 1, 10), (2024, 1, 15));
        let requested = range((2024, 1, 15), (2024, 1, 20));
        assert!(ranges_overlap(&existing, &requested));
    }

    #[test]
    fn test_day_after_checkout_is_free() {
        let existing = range((2024, 1, 10), (2024, 1, 15));
        let requested = range((2024, 1, 16), (2024, 1, 20));
        assert!(!ranges_overlap(&existing, &requested));
    }

    #[test]
    fn test_checkout_on_existing_checkin_conflicts() {
        let existing = range((2024, 1, 10), (2024, 1, 15));
        let requested = range((2024, 1, 5), (2024, 1, 10));
        assert!(ranges_overlap(&existing, &requested));
    }

    #[test]
    fn test_containment_conflicts_both_ways() {
        let outer = range((2024, 1, 1), (2024, 1, 31));
        let inner = range((2024, 1, 10), (2024, 1, 12));
        assert!(ranges_overlap(&outer, &inner));
        assert!(ranges_overlap(&inner, &outer));
    }

    #[test]
    fn test_disjoint_before_and_after() {
        let existing = range((2024, 3, 10), (2024, 3, 15));
        assert!(!ranges_overlap(&existing, &range((2024, 3, 1), (2024, 3, 9))));
        assert!(!ranges_overlap(&existing, &range((2024, 3, 16), (2024, 3, 18))));
    }

    #[test]
    fn test_is_free_over_many() {
        let booked = [
            range((2024, 1, 1), (2024, 1, 3)),
            range((2024, 1, 10), (2024, 1, 15)),
        ];
        assert!(is_free(&booked, &range((2024, 1, 4), (2024, 1, 9))));
        assert!(!is_free(&booked, &range((2024, 1, 14), (2024, 1, 16))));
        assert!(is_free(std::iter::empty::<&DateRange>(), &range((2024, 1, 14), (2024, 1, 16))));
    }
}
