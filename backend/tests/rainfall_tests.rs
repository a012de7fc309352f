//! Rainfall data integration tests
//!
//! Tests for reading construction, the configured threshold, and the
//! independence of per-day classification from reading order.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{
    count_rainy_days, DateRange, RainfallReading, DEFAULT_RAINY_DAY_THRESHOLD_MM,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn test_default_threshold_is_five_millimeters() {
    assert_eq!(DEFAULT_RAINY_DAY_THRESHOLD_MM, dec("5"));
}

#[test]
fn test_reading_constructor_rejects_negative() {
    assert!(RainfallReading::new(date("2025-06-01"), dec("-0.5")).is_err());
    assert!(RainfallReading::new(date("2025-06-01"), dec("0")).is_ok());
}

#[test]
fn test_trace_rainfall_below_default_threshold() {
    let reading = RainfallReading::new(date("2025-06-01"), dec("0.2")).unwrap();
    let count = count_rainy_days(std::slice::from_ref(&reading), DEFAULT_RAINY_DAY_THRESHOLD_MM);
    assert_eq!(count.unwrap(), 0);
}

#[test]
fn test_count_is_order_independent() {
    let mut readings: Vec<RainfallReading> = ["8", "0", "5", "3.3", "12.7"]
        .iter()
        .enumerate()
        .map(|(i, mm)| {
            RainfallReading::new(
                date("2025-06-01") + chrono::Duration::days(i as i64),
                dec(mm),
            )
            .unwrap()
        })
        .collect();

    let forward = count_rainy_days(&readings, dec("5")).unwrap();
    readings.reverse();
    let backward = count_rainy_days(&readings, dec("5")).unwrap();

    assert_eq!(forward, 3);
    assert_eq!(forward, backward);
}

#[test]
fn test_date_range_length_inclusive() {
    let range = DateRange {
        start: date("2025-06-01"),
        end: date("2025-06-30"),
    };
    assert_eq!(range.len_days(), 30);
    assert!(range.contains(date("2025-06-01")));
    assert!(range.contains(date("2025-06-30")));
    assert!(!range.contains(date("2025-07-01")));
}

#[test]
fn test_higher_threshold_never_counts_more_days() {
    let readings: Vec<RainfallReading> = ["1", "4.9", "5", "5.1", "30"]
        .iter()
        .enumerate()
        .map(|(i, mm)| {
            RainfallReading::new(
                date("2025-06-01") + chrono::Duration::days(i as i64),
                dec(mm),
            )
            .unwrap()
        })
        .collect();

    let mut previous = i32::MAX;
    for threshold in ["0", "1", "5", "10", "50"] {
        let count = count_rainy_days(&readings, dec(threshold)).unwrap();
        assert!(count <= previous);
        previous = count;
    }
}
