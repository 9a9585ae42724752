//! Tests for timeshape types and codecs.

use super::*;
use chrono::{FixedOffset, TimeZone, Utc};
use serde_json::json;

fn sample() -> chrono::DateTime<Utc> {
    // 2024-01-15 10:30:00 UTC == 1705314600000 ms
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
}

// ============================================================================
// Codec tests
// ============================================================================

#[test]
fn test_default_codec_is_shared() {
    assert!(std::ptr::eq(Instant::codec(), Instant::codec()));
    assert!(std::ptr::eq(OffsetTime::codec(), OffsetTime::codec()));
    assert!(std::ptr::eq(ZonedTime::codec(), ZonedTime::codec()));

    // The shared defaults carry no explicit settings.
    assert_eq!(Instant::codec().timestamps(), None);
    assert!(Instant::codec().pattern().is_none());
}

#[test]
fn test_with_format_overrides_flag_only() {
    let pattern = Pattern::new("%Y-%m-%d").unwrap();
    let base = Instant::codec().with_format(None, Some(pattern.clone()));

    let derived = base.with_format(Some(true), None);

    assert_eq!(derived.timestamps(), Some(true));
    assert_eq!(derived.pattern(), Some(&pattern));
}

#[test]
fn test_with_format_overrides_pattern_only() {
    let base = Instant::codec().with_format(Some(false), None);

    let pattern = Pattern::new("%H:%M").unwrap();
    let derived = base.with_format(None, Some(pattern.clone()));

    assert_eq!(derived.timestamps(), Some(false));
    assert_eq!(derived.pattern(), Some(&pattern));
}

#[test]
fn test_with_format_never_mutates_receiver() {
    let base = Instant::codec().with_format(Some(false), Some(Pattern::new("%Y").unwrap()));

    let _ = base.with_format(Some(true), Some(Pattern::new("%m").unwrap()));

    assert_eq!(base.timestamps(), Some(false));
    assert_eq!(base.pattern().unwrap().as_str(), "%Y");
    // And the shared default is still pristine.
    assert_eq!(Instant::codec().timestamps(), None);
    assert!(Instant::codec().pattern().is_none());
}

#[test]
fn test_decompose_consistent_across_copies() {
    let dt = sample();
    let base = Instant::codec();
    let derived = base
        .with_format(Some(false), Some(Pattern::new("%Y").unwrap()))
        .with_format(Some(true), None);

    assert_eq!(
        base.decompose().epoch_millis(&dt),
        derived.decompose().epoch_millis(&dt)
    );
    assert_eq!(
        base.decompose().epoch_secs(&dt),
        derived.decompose().epoch_secs(&dt)
    );
    assert_eq!(
        base.decompose().subsec_nanos(&dt),
        derived.decompose().subsec_nanos(&dt)
    );
}

#[test]
fn test_codec_flag_defers_to_config() {
    let numeric = Config {
        timestamps: true,
        ..Config::default()
    };
    let textual = Config {
        timestamps: false,
        ..Config::default()
    };

    let codec = TimeCodec::<Utc>::default();
    assert!(codec.writes_timestamps(&numeric));
    assert!(!codec.writes_timestamps(&textual));

    // An explicit flag wins over the ambient setting.
    let forced = codec.with_format(Some(true), None);
    assert!(forced.writes_timestamps(&textual));
}

#[test]
fn test_codec_serialize_precisions() {
    let dt = Utc.timestamp_opt(1705315800, 500_000_000).unwrap();
    let codec = TimeCodec::<Utc>::default();

    let cfg = |precision| Config {
        timestamps: true,
        precision,
    };

    let millis = codec
        .serialize(&dt, &cfg(Precision::Millis), serde_json::value::Serializer)
        .unwrap();
    assert_eq!(millis, json!(1705315800500i64));

    let secs = codec
        .serialize(&dt, &cfg(Precision::Seconds), serde_json::value::Serializer)
        .unwrap();
    assert_eq!(secs, json!(1705315800i64));

    let nanos = codec
        .serialize(&dt, &cfg(Precision::Nanos), serde_json::value::Serializer)
        .unwrap();
    let got = nanos.as_f64().unwrap();
    assert!((got - 1705315800.5).abs() < 1e-6);
}

#[test]
fn test_codec_serialize_textual() {
    let dt = sample();
    let codec = TimeCodec::<Utc>::default();
    let textual = Config {
        timestamps: false,
        ..Config::default()
    };

    let v = codec
        .serialize(&dt, &textual, serde_json::value::Serializer)
        .unwrap();
    assert_eq!(v, json!("2024-01-15T10:30:00Z"));

    let patterned = codec.with_format(None, Some(Pattern::new("%Y-%m-%d %H:%M:%S").unwrap()));
    let v = patterned
        .serialize(&dt, &textual, serde_json::value::Serializer)
        .unwrap();
    assert_eq!(v, json!("2024-01-15 10:30:00"));
}

#[test]
fn test_codec_deserialize_by_precision() {
    let codec = TimeCodec::<Utc>::default();

    let millis = Config {
        timestamps: true,
        precision: Precision::Millis,
    };
    let got = codec.deserialize(&millis, json!(1705315800500i64)).unwrap();
    assert_eq!(got.timestamp_millis(), 1705315800500);

    let secs = Config {
        timestamps: true,
        precision: Precision::Seconds,
    };
    let got = codec.deserialize(&secs, json!(1705315800i64)).unwrap();
    assert_eq!(got.timestamp(), 1705315800);

    // Floats are fractional seconds under any precision.
    let got = codec.deserialize(&millis, json!(1705315800.5)).unwrap();
    assert_eq!(got.timestamp_millis(), 1705315800500);
}

#[test]
fn test_codec_parse_text() {
    let codec = TimeCodec::<Utc>::default();

    // RFC 3339 by default, offset preserved.
    let got = codec.parse_text("2024-01-15T10:30:00+02:00").unwrap();
    assert_eq!(got.offset().local_minus_utc(), 7200);
    assert_eq!(got.timestamp(), sample().timestamp() - 7200);

    // Zone-less patterns read as UTC.
    let patterned = codec.with_format(None, Some(Pattern::new("%Y-%m-%d %H:%M:%S").unwrap()));
    let got = patterned.parse_text("2024-01-15 10:30:00").unwrap();
    assert_eq!(got.timestamp(), sample().timestamp());

    assert!(codec.parse_text("not a time").is_err());
}

#[test]
fn test_codec_date_pattern_round_trips() {
    let codec = TimeCodec::<Utc>::default()
        .with_format(Some(false), Some(Pattern::new("%Y/%m/%d").unwrap()));

    let text = codec.render(&sample());
    assert_eq!(text, "2024/01/15");

    // Date-only output parses back, completed to midnight UTC.
    let got = codec.parse_text(&text).unwrap();
    assert_eq!(got, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
    assert_eq!(got.offset().local_minus_utc(), 0);
}

// ============================================================================
// Instant tests
// ============================================================================

#[test]
fn test_instant_marshal_json() {
    let t = Instant::new(sample());

    let data = serde_json::to_string(&t).unwrap();
    let got: i64 = serde_json::from_str(&data).unwrap();

    assert_eq!(got, sample().timestamp_millis());
}

#[test]
fn test_instant_unmarshal_json() {
    let ms: i64 = 1705314600000;
    assert_eq!(sample().timestamp_millis(), ms);

    let t: Instant = serde_json::from_str(&ms.to_string()).unwrap();

    assert_eq!(t.datetime(), sample());
}

#[test]
fn test_instant_unmarshal_float_seconds() {
    let t: Instant = serde_json::from_str("1705315800.5").unwrap();
    assert_eq!(t.as_millis(), 1705315800500);
}

#[test]
fn test_instant_unmarshal_string() {
    let t: Instant = serde_json::from_str(r#""2024-01-15T10:30:00Z""#).unwrap();
    assert_eq!(t.datetime(), sample());

    // Offsets in the text are normalized to UTC.
    let t: Instant = serde_json::from_str(r#""2024-01-15T12:30:00+02:00""#).unwrap();
    assert_eq!(t.datetime(), sample());
}

#[test]
fn test_instant_round_trip() {
    let original = Instant::now();
    let data = serde_json::to_string(&original).unwrap();
    let restored: Instant = serde_json::from_str(&data).unwrap();

    // Compare at millisecond level
    assert_eq!(original.as_millis(), restored.as_millis());
}

#[test]
fn test_instant_methods() {
    let t = Instant::from_millis(1705314600500);

    assert_eq!(t.as_millis(), 1705314600500);
    assert_eq!(t.as_secs(), 1705314600);
    assert_eq!(t.subsec_nanos(), 500_000_000);
    assert!(!t.is_zero());
    assert!(Instant::default().is_zero());
    assert_eq!(t.to_string(), "2024-01-15T10:30:00.500Z");
}

#[test]
fn test_instant_from_conversions() {
    let ms: i64 = 1705314600000;
    let t1 = Instant::from(ms);
    let t2 = Instant::from_millis(ms);
    assert_eq!(t1, t2);

    let t3 = Instant::from(sample());
    assert_eq!(t1, t3);

    let back: chrono::DateTime<Utc> = t3.into();
    assert_eq!(back, sample());
}

#[test]
fn test_instant_negative_and_large() {
    let t: Instant = serde_json::from_str("-1000").unwrap();
    assert_eq!(t.as_millis(), -1000);

    // Year 3000
    let t = Instant::from_millis(32503680000000);
    let data = serde_json::to_string(&t).unwrap();
    let restored: Instant = serde_json::from_str(&data).unwrap();
    assert_eq!(restored.as_millis(), 32503680000000);
}

// ============================================================================
// OffsetTime tests
// ============================================================================

#[test]
fn test_offset_marshal_json() {
    let dt = FixedOffset::east_opt(7200)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 15, 12, 30, 0)
        .unwrap();
    let t = OffsetTime::new(dt);

    // Numeric shape drops the offset: same instant, same number.
    let data = serde_json::to_string(&t).unwrap();
    assert_eq!(data, sample().timestamp_millis().to_string());
}

#[test]
fn test_offset_unmarshal_string_keeps_offset() {
    let t: OffsetTime = serde_json::from_str(r#""2024-01-15T12:30:00+02:00""#).unwrap();

    assert_eq!(t.offset().local_minus_utc(), 7200);
    assert_eq!(t.as_secs(), sample().timestamp());
}

#[test]
fn test_offset_unmarshal_numeric_is_utc() {
    let t: OffsetTime = serde_json::from_str("1705315800000").unwrap();

    assert_eq!(t.offset().local_minus_utc(), 0);
    assert_eq!(t.as_millis(), 1705315800000);
}

#[test]
fn test_offset_display() {
    let dt = FixedOffset::east_opt(7200)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 15, 12, 30, 0)
        .unwrap();
    assert_eq!(OffsetTime::new(dt).to_string(), "2024-01-15T12:30:00+02:00");
}

// ============================================================================
// ZonedTime tests
// ============================================================================

#[test]
fn test_zoned_round_trip() {
    let original = ZonedTime::from_millis(1705315800000);

    let data = serde_json::to_string(&original).unwrap();
    assert_eq!(data, "1705315800000");

    let restored: ZonedTime = serde_json::from_str(&data).unwrap();
    assert_eq!(restored, original);
    assert_eq!(restored.as_millis(), 1705315800000);
}

#[test]
fn test_zoned_now_is_current() {
    let t = ZonedTime::now();
    assert!(t.as_millis() != 0);
    assert!(!t.to_string().is_empty());
}

// ============================================================================
// Duration tests
// ============================================================================

#[test]
fn test_duration_marshal_json() {
    // Default settings: numeric milliseconds.
    let d = Duration::from_secs(90);
    let data = serde_json::to_string(&d).unwrap();
    assert_eq!(data, "90000");
}

#[test]
fn test_duration_unmarshal_json_int() {
    // Integers read back in the ambient unit (milliseconds).
    let d: Duration = serde_json::from_str("90000").unwrap();
    assert_eq!(d.as_secs(), 90);
}

#[test]
fn test_duration_unmarshal_json_string() {
    let d: Duration = serde_json::from_str(r#""2h30m""#).unwrap();
    assert_eq!(d.as_secs(), 2 * 3600 + 30 * 60);
}

#[test]
fn test_duration_unmarshal_json_float() {
    let d: Duration = serde_json::from_str("1.5").unwrap();
    assert_eq!(d.as_millis(), 1500);
}

#[test]
fn test_duration_unmarshal_json_null() {
    let d: Duration = serde_json::from_str("null").unwrap();
    assert!(d.is_zero());
}

#[test]
fn test_duration_rejects_negative() {
    assert!(serde_json::from_str::<Duration>("-5").is_err());
}

#[test]
fn test_duration_marshal_saturates_huge_values() {
    // Milliseconds of Duration::MAX overflow u64; the written value
    // saturates instead of wrapping.
    let d = Duration::new(std::time::Duration::MAX);
    let data = serde_json::to_string(&d).unwrap();
    assert_eq!(data, u64::MAX.to_string());
}

#[test]
fn test_duration_round_trip() {
    let original = Duration::from_millis(3 * 3600 * 1000 + 45 * 60 * 1000 + 500);

    let data = serde_json::to_string(&original).unwrap();
    let restored: Duration = serde_json::from_str(&data).unwrap();

    assert_eq!(original, restored);
}

// ============================================================================
// Config tests
// ============================================================================

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert!(config.timestamps);
    assert_eq!(config.precision, Precision::Millis);

    // Nothing else in this suite installs settings, so global() reports the
    // built-ins (or the identical installed copy).
    assert_eq!(Config::global(), Config::default());
}

#[test]
fn test_config_install_once() {
    // Installing the built-in defaults is behavior-neutral for other tests
    // in this process; only the second call may fail.
    let first = Config::default().install();
    let second = Config::default().install();

    if first.is_ok() {
        assert_eq!(second, Err(AlreadyInstalled));
    }
    assert_eq!(Config::global(), Config::default());
}

// ============================================================================
// Struct embedding
// ============================================================================

#[test]
fn test_types_in_struct() {
    #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
    struct Record {
        at: Instant,
        timeout: Duration,
        #[serde(skip_serializing_if = "Option::is_none")]
        seen: Option<OffsetTime>,
    }

    let rec = Record {
        at: Instant::from_millis(1705315800000),
        timeout: Duration::from_secs(30),
        seen: None,
    };

    let data = serde_json::to_string(&rec).unwrap();
    let restored: Record = serde_json::from_str(&data).unwrap();

    assert_eq!(restored, rec);
}
