use super::*;

const JAN_5_2024: i64 = 1_704_412_800_000;

#[test]
fn plain_dates_are_utc_midnight() {
    assert_eq!(parse_date_millis("2024-01-05"), Some(JAN_5_2024));
    assert_eq!(parse_date_millis(" 2024/01/05 "), Some(JAN_5_2024));
    assert_eq!(parse_date_millis("January 5, 2024"), Some(JAN_5_2024));
    assert_eq!(parse_date_millis("Jan 5, 2024"), Some(JAN_5_2024));
}

#[test]
fn timestamps_with_and_without_zone() {
    assert_eq!(
        parse_date_millis("2024-01-05T01:00:00+01:00"),
        Some(JAN_5_2024)
    );
    assert_eq!(
        parse_date_millis("2024-01-05T00:00:01"),
        Some(JAN_5_2024 + 1000)
    );
    assert_eq!(
        parse_date_millis("Fri, 05 Jan 2024 00:00:00 +0000"),
        Some(JAN_5_2024)
    );
}

#[test]
fn garbage_is_none() {
    assert_eq!(parse_date_millis(""), None);
    assert_eq!(parse_date_millis("someday"), None);
    assert_eq!(parse_date_millis("2024-13-40"), None);
}
