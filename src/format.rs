//! Human-readable durations and distances.

pub fn format_duration(minutes: f64) -> String {
    let hours = (minutes / 60.0).floor() as i64;
    let remaining = (minutes % 60.0).round() as i64;

    if minutes >= 60.0 {
        format!("{}h {}m", hours, remaining)
    } else {
        format!("{}m", remaining)
    }
}

pub fn format_distance(miles: f64) -> String {
    format!("{:.1} miles", miles)
}

#[test]
fn durations_split_into_hours_and_minutes() {
    assert_eq!(format_duration(125.0), "2h 5m");
    assert_eq!(format_duration(45.0), "45m");
    assert_eq!(format_duration(60.0), "1h 0m");
    assert_eq!(format_duration(0.0), "0m");
    assert_eq!(format_duration(12.4), "12m");
}

#[test]
fn fractional_minutes_round_without_carrying_into_hours() {
    assert_eq!(format_duration(59.6), "60m");
    assert_eq!(format_duration(119.7), "1h 60m");
    assert_eq!(format_duration(90.4), "1h 30m");
}

#[test]
fn distances_keep_one_decimal() {
    assert_eq!(format_distance(5.0), "5.0 miles");
    assert_eq!(format_distance(0.24), "0.2 miles");
    assert_eq!(format_distance(12.36), "12.4 miles");
}
