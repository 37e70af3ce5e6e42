//! Property-based tests for period windows.
//!
//! - Property 1: Window Consistency
//! - Property 2: Window Adjacency

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use super::window::{ClosingDay, compute_period};

/// Strategy for generating closing days across the full 1-31 range.
fn closing_day_strategy() -> impl Strategy<Value = ClosingDay> {
    (ClosingDay::MIN..=ClosingDay::MAX).prop_map(|d| ClosingDay::new(d).unwrap())
}

/// Strategy for generating dates between 1900 and 2200.
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..110_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1900, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// **Property 1.1: The reference date lies inside its own window.**
    #[test]
    fn prop_reference_inside_window(
        date in date_strategy(),
        closing_day in closing_day_strategy(),
    ) {
        let period = compute_period(date, closing_day).unwrap();
        prop_assert!(period.contains_date(date), "{date} not inside {period}");
    }

    /// **Property 1.2: Any two dates of one window map to the same window.**
    #[test]
    fn prop_same_window_same_period(
        date in date_strategy(),
        closing_day in closing_day_strategy(),
        offset in 0u64..31,
    ) {
        let period = compute_period(date, closing_day).unwrap();
        let span = u64::try_from(period.days()).unwrap();
        let other = period.start.checked_add_days(Days::new(offset % span)).unwrap();
        prop_assert_eq!(compute_period(other, closing_day).unwrap(), period);
    }

    /// **Property 2.1: The day after a window starts the next window.**
    ///
    /// No gap and no overlap between consecutive periods.
    #[test]
    fn prop_day_after_end_starts_next_window(
        date in date_strategy(),
        closing_day in closing_day_strategy(),
    ) {
        let period = compute_period(date, closing_day).unwrap();
        let day_after = period.end.succ_opt().unwrap();
        let next = compute_period(day_after, closing_day).unwrap();
        prop_assert_eq!(next.start, day_after);
        prop_assert!(next.end > period.end);
    }

    /// **Property 2.2: Consecutive periods have distinct keys.**
    #[test]
    fn prop_consecutive_keys_increase(
        date in date_strategy(),
        closing_day in closing_day_strategy(),
    ) {
        let period = compute_period(date, closing_day).unwrap();
        let next = period.next(closing_day).unwrap();
        prop_assert!(next.key() > period.key());
    }

    /// **Property 2.3: previous() undoes next().**
    #[test]
    fn prop_previous_inverts_next(
        date in date_strategy(),
        closing_day in closing_day_strategy(),
    ) {
        let period = compute_period(date, closing_day).unwrap();
        prop_assert_eq!(period.next(closing_day).unwrap().previous(closing_day).unwrap(), period);
    }

    /// **Property 2.4: Windows never exceed one calendar month plus a day.**
    #[test]
    fn prop_window_length_bounded(
        date in date_strategy(),
        closing_day in closing_day_strategy(),
    ) {
        let period = compute_period(date, closing_day).unwrap();
        prop_assert!((28..=31).contains(&period.days()), "unexpected length {}", period.days());
    }
}
