//! Property tests for the temporal and spatial value types.

use chrono::{TimeZone, Utc};
use geopipe_core::models::time::{MAX_INSTANT_MS, MIN_INSTANT_MS};
use geopipe_core::models::{BoundingBox2D, Time, TimeStep, TimeStepGranularity};
use proptest::prelude::*;

fn granularity() -> impl Strategy<Value = TimeStepGranularity> {
    prop::sample::select(TimeStepGranularity::ALL.to_vec())
}

proptest! {
    #[test]
    fn time_dict_roundtrips_exactly(
        start in MIN_INSTANT_MS..=MAX_INSTANT_MS,
        end in MIN_INSTANT_MS..=MAX_INSTANT_MS,
    ) {
        prop_assume!(start <= end);

        let time = Time::from_millis(start, end).unwrap();
        let json = serde_json::to_string(&time).unwrap();
        let parsed: Time = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(parsed, time);
        prop_assert_eq!(parsed.start_millis(), start);
        prop_assert_eq!(parsed.end_millis(), end);
    }

    // Days of month are capped at 28 so that calendar steps never clamp at a
    // month end, where add/subtract is not invertible.
    #[test]
    fn add_then_subtract_is_identity(
        year in 1902i32..2200,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
        amount in 1u32..=1000,
        granularity in granularity(),
    ) {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .expect("date components are in range");
        let time = Time::point(instant);
        let step = TimeStep::new(amount, granularity);

        let roundtrip = time.add(step).unwrap().subtract(step).unwrap();
        prop_assert_eq!(roundtrip, time);
    }

    #[test]
    fn shifting_preserves_interval_type(
        start in 0i64..1_000_000_000_000,
        length in 0i64..1_000_000_000,
        amount in 1u32..=100,
    ) {
        let time = Time::from_millis(start, start + length).unwrap();
        let shifted = time.add(TimeStep::new(amount, TimeStepGranularity::Hours)).unwrap();
        prop_assert_eq!(shifted.time_type(), time.time_type());
        prop_assert!(shifted.is_valid());
    }

    #[test]
    fn bbox_construction_fails_iff_bounds_flip(
        xmin in -1e9f64..1e9,
        ymin in -1e9f64..1e9,
        xmax in -1e9f64..1e9,
        ymax in -1e9f64..1e9,
    ) {
        let result = BoundingBox2D::new(xmin, ymin, xmax, ymax);
        prop_assert_eq!(result.is_err(), xmin > xmax || ymin > ymax);
    }

    #[test]
    fn bbox_union_covers_both(
        ax in -1e6f64..1e6, ay in -1e6f64..1e6, aw in 0f64..1e3, ah in 0f64..1e3,
        bx in -1e6f64..1e6, by in -1e6f64..1e6, bw in 0f64..1e3, bh in 0f64..1e3,
    ) {
        let a = BoundingBox2D::new(ax, ay, ax + aw, ay + ah).unwrap();
        let b = BoundingBox2D::new(bx, by, bx + bw, by + bh).unwrap();
        let union = a.union(&b);

        for corner in [a.lower_left(), a.upper_right(), b.lower_left(), b.upper_right()] {
            prop_assert!(union.contains_coordinate(corner));
        }
    }
}
