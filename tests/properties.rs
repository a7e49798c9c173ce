//! Property tests for the calculation invariants.

use chrono::NaiveDate;
use proptest::prelude::*;
use uuid::Uuid;

use worktime_engine::calculation::{apply_rounding, calculate_day, pair_bookings};
use worktime_engine::models::{
    BookingCategory, BookingEvent, BreakKind, BreakRule, DayInput, RoundingMode, RoundingPolicy,
    ScheduleConfig, TimeWindow,
};

fn arb_mode() -> impl Strategy<Value = RoundingMode> {
    prop_oneof![
        Just(RoundingMode::None),
        Just(RoundingMode::Up),
        Just(RoundingMode::Down),
        Just(RoundingMode::Nearest),
    ]
}

fn arb_category() -> impl Strategy<Value = BookingCategory> {
    prop_oneof![
        Just(BookingCategory::Come),
        Just(BookingCategory::Go),
        Just(BookingCategory::BreakStart),
        Just(BookingCategory::BreakEnd),
    ]
}

prop_compose! {
    fn arb_bookings()(
        raw in prop::collection::vec((arb_category(), 0..1440i32), 0..12),
    ) -> Vec<BookingEvent> {
        raw.into_iter()
            .enumerate()
            .map(|(i, (category, minutes))| BookingEvent {
                id: Uuid::from_u128(i as u128 + 1),
                category,
                original_minutes: minutes,
                edited_minutes: None,
            })
            .collect()
    }
}

fn arb_break_rule() -> impl Strategy<Value = BreakRule> {
    prop_oneof![
        (0..1380i32, 1..60i32, any::<bool>()).prop_map(|(from, duration, is_paid)| BreakRule {
            kind: BreakKind::Fixed {
                window: TimeWindow { from, to: from + 60 },
            },
            duration_minutes: duration,
            is_paid,
        }),
        (any::<bool>(), 1..60i32).prop_map(|(auto_deduct, duration)| BreakRule {
            kind: BreakKind::Variable { auto_deduct },
            duration_minutes: duration,
            is_paid: false,
        }),
        (0..720i32, 1..60i32, any::<bool>()).prop_map(|(after, duration, proportional)| {
            BreakRule {
                kind: BreakKind::Minimum {
                    after_work_minutes: after,
                    proportional,
                },
                duration_minutes: duration,
                is_paid: false,
            }
        }),
    ]
}

prop_compose! {
    fn arb_plan()(
        target in 0..=600i32,
        breaks in prop::collection::vec(arb_break_rule(), 0..4),
        come_mode in arb_mode(),
        go_mode in arb_mode(),
        interval in 1..=30i32,
        max_net in prop::option::of(240..=720i32),
    ) -> ScheduleConfig {
        ScheduleConfig {
            id: "PROP".to_string(),
            target_minutes: target,
            come_rounding: RoundingPolicy {
                mode: come_mode,
                interval_minutes: Some(interval),
                offset_minutes: None,
            },
            go_rounding: RoundingPolicy {
                mode: go_mode,
                interval_minutes: Some(interval),
                offset_minutes: None,
            },
            breaks,
            max_net_minutes: max_net,
            ..Default::default()
        }
    }
}

proptest! {
    #[test]
    fn test_rounding_is_idempotent(
        minutes in 0..=1440i32,
        mode in arb_mode(),
        interval in 1..=120i32,
    ) {
        let once = apply_rounding(minutes, mode, interval);
        prop_assert_eq!(apply_rounding(once, mode, interval), once);
    }

    #[test]
    fn test_pairing_ignores_input_order(
        (bookings, shuffled) in arb_bookings().prop_flat_map(|b| (Just(b.clone()), Just(b).prop_shuffle())),
    ) {
        let expected = pair_bookings(&bookings);
        let actual = pair_bookings(&shuffled);
        prop_assert_eq!(actual.pairs, expected.pairs);
        prop_assert_eq!(actual.errors, expected.errors);
    }

    #[test]
    fn test_net_never_exceeds_gross(
        plan in arb_plan(),
        bookings in arb_bookings(),
    ) {
        let mut input = DayInput::new("emp_001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), Some(plan));
        input.bookings = bookings;

        if let Some(result) = calculate_day(&input).unwrap() {
            prop_assert!(result.break_minutes >= 0);
            prop_assert!(result.net_minutes >= 0);
            prop_assert!(result.net_minutes <= result.gross_minutes);
        }
    }
}
