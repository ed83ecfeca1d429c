use super::*;
use chrono::{TimeZone, Utc};

#[test]
fn cidr_info_summarises_ipv4_block() {
    let info = cidr_info_internal(" 10.1.2.3/8 ").expect("valid block");
    assert_eq!(info.kind, "v4");
    assert_eq!(info.expression, "10.1.2.3/8");
    assert_eq!(info.reserved_bit_count, 8);
    assert_eq!(info.bits.len(), 32);
    assert_eq!(info.segments, [10, 1, 2, 3]);
    assert_eq!(info.address_count, "16777216");
    assert_eq!(info.first_address, "10.0.0.0");
    assert_eq!(info.last_address, "10.255.255.255");
    assert_eq!(info.netmask, "255.0.0.0");
}

#[test]
fn cidr_info_keeps_large_ipv6_counts_exact() {
    let info = cidr_info_internal("abcd::f:1:2/32").expect("valid block");
    assert_eq!(info.kind, "v6");
    assert_eq!(info.bits.len(), 128);
    assert_eq!(info.address_count, "79228162514264337593543950336");
}

#[test]
fn cidr_info_reports_sentinel_for_oversized_prefix() {
    let info = cidr_info_internal("1.2.3.4/40").expect("prefix is syntactically valid");
    assert_eq!(info.reserved_bit_count, 40);
    assert_eq!(info.address_count, "-1");
}

#[test]
fn cidr_errors_carry_the_input() {
    let err = cidr_info_internal("300.1.1.1/8").unwrap_err();
    assert!(err.contains("300.1.1.1"), "msg: {err}");
    let err = cidr_includes_internal("nope", "1.2.3.4").unwrap_err();
    assert!(err.contains("nope"), "msg: {err}");
}

#[test]
fn cidr_includes_and_conflicts() {
    assert!(cidr_includes_internal("abcd::f:1:2/32", "abcd::f:1:2").unwrap());
    assert!(!cidr_includes_internal("abcd::f:1:2/32", "bcd::f:1:2").unwrap());
    assert_eq!(
        cidr_conflict_internal("a::1/0", "a::1/32").unwrap().as_deref(),
        Some("superset")
    );
    assert_eq!(
        cidr_conflict_internal("a::1/32", "a::1/0").unwrap().as_deref(),
        Some("subset")
    );
    assert_eq!(cidr_conflict_internal("10.0.0.0/8", "a::1/0").unwrap(), None);
}

#[test]
fn reformat_honours_indentation_argument() {
    assert_eq!(json_reformat_internal("[1]", "4").unwrap(), "[\n    1\n]");
    assert_eq!(json_reformat_internal("[1]", "tabs").unwrap(), "[\n\t1\n]");
    assert_eq!(json_reformat_internal("[1]", "2").unwrap(), "[\n  1\n]");
    let err = json_reformat_internal("[1]", "8").unwrap_err();
    assert!(err.contains("'8'"), "msg: {err}");
}

#[test]
fn date_point_renders_iso_and_epoch_numbers() {
    let date_time = Utc.with_ymd_and_hms(2024, 7, 1, 4, 0, 0).unwrap()
        + chrono::TimeDelta::milliseconds(600);
    let view = DateTextResult::from(DateParseResult::PointInTime { date_time });
    assert_eq!(
        view,
        DateTextResult::PointInTime {
            iso: "2024-07-01T04:00:00.600Z".into(),
            millis: 1_719_806_400_600,
            seconds: 1_719_806_400,
        }
    );
}

#[test]
fn date_point_seconds_round_down_before_the_epoch() {
    let date_time = Utc.timestamp_millis_opt(-1_500).unwrap();
    let view = DateTextResult::from(DateParseResult::PointInTime { date_time });
    let DateTextResult::PointInTime { millis, seconds, .. } = view else {
        panic!("expected a point in time, got {view:?}");
    };
    assert_eq!(millis, -1_500);
    assert_eq!(seconds, -2);
}

#[test]
fn date_conversion_passes_counts_through() {
    let now = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
    let parsed = datetime::parse_date_at("5m to s", now).expect("conversion");
    assert_eq!(
        DateTextResult::from(parsed),
        DateTextResult::UnitConversion {
            in_count: 5.0,
            in_unit: TimeUnit::Minutes,
            out_count: 300.0,
            out_unit: TimeUnit::Seconds,
        }
    );
}

#[test]
fn unrecognised_date_text_is_none() {
    assert_eq!(parse_date_text_internal("definitely not a date"), None);
    assert_eq!(parse_date_text_internal(""), None);
}

#[test]
fn date_view_serializes_with_type_tag() {
    let view = DateTextResult::Duration {
        count: 5.0,
        unit: TimeUnit::Minutes,
    };
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json, serde_json::json!({"type": "duration", "count": 5.0, "unit": "minutes"}));

    let view = DateTextResult::UnitConversion {
        in_count: 1.0,
        in_unit: TimeUnit::Hours,
        out_count: 60.0,
        out_unit: TimeUnit::Minutes,
    };
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["type"], "unitConversion");
    assert_eq!(json["outCount"], 60.0);
    assert_eq!(json["inUnit"], "hours");
}
