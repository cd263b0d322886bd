#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use pretty_assertions::assert_eq;
use recast_types::Pool;
use recast_value::{Extract, HookError, Opaque, OpaqueValue, Scan};

use super::*;

/// Extracts its seconds; zero means "no value", negative fails.
#[derive(Clone, Debug, PartialEq)]
struct Timestamp(i64);

impl Opaque for Timestamp {
    fn as_extract(&self) -> Option<&dyn Extract> {
        Some(self)
    }
}

impl Extract for Timestamp {
    fn extract(&self) -> Result<Option<Dynamic>, HookError> {
        match self.0 {
            0 => Ok(None),
            n if n < 0 => Err(HookError::new("negative timestamp")),
            n => Ok(Some(Dynamic::new(Idx::INT64, n))),
        }
    }
}

/// Collects string sources.
#[derive(Clone, Debug, Default, PartialEq)]
struct Collector(Vec<String>);

impl Opaque for Collector {
    fn as_scan(&mut self) -> Option<&mut dyn Scan> {
        Some(self)
    }
}

impl Scan for Collector {
    fn scan(&mut self, source: ValueRef<'_>) -> Result<(), HookError> {
        let text = source
            .value
            .as_str()
            .ok_or_else(|| HookError::new("expected a string"))?;
        self.0.push(text.to_owned());
        Ok(())
    }
}

fn timestamp_zero() -> Box<dyn Opaque> {
    Box::new(Timestamp(0))
}

fn collector_zero() -> Box<dyn Opaque> {
    Box::new(Collector::default())
}

struct Fixture {
    pool: Pool,
    timestamp: Idx,
    collector: Idx,
}

fn fixture() -> Fixture {
    let mut pool = Pool::new();
    let timestamp = pool.opaque("Timestamp", timestamp_zero);
    let collector = pool.opaque("Collector", collector_zero);
    Fixture {
        pool,
        timestamp,
        collector,
    }
}

fn stamp(seconds: i64) -> Value {
    Value::opaque(OpaqueValue::new(Timestamp(seconds)))
}

fn collected(value: &Value) -> &[String] {
    &value.as_opaque().unwrap().downcast_ref::<Collector>().unwrap().0
}

#[test]
fn test_extraction_is_off_by_default() {
    let f = fixture();
    let src = Dynamic::new(f.timestamp, stamp(5));
    let mut dst = Dynamic::new(Idx::INT, 1_i64);

    Transcoder::new(&f.pool).transcode(&src, &mut dst).unwrap();
    assert_eq!(dst.value, Value::Int(1));
}

#[test]
fn test_extracted_value_is_transcoded() {
    let f = fixture();
    let src = Dynamic::new(f.timestamp, stamp(5));
    let mut dst = Dynamic::new(Idx::INT32, 1_i64);

    Transcoder::new(&f.pool)
        .with_policy(Policy::EXTRACT)
        .transcode(&src, &mut dst)
        .unwrap();
    assert_eq!(dst.value, Value::Int(5));
}

#[test]
fn test_extracted_nothing_resets_destination() {
    let f = fixture();
    let src = Dynamic::new(f.timestamp, stamp(0));
    let mut dst = Dynamic::new(Idx::INT, 9_i64);

    Transcoder::new(&f.pool)
        .with_policy(Policy::EXTRACT)
        .transcode(&src, &mut dst)
        .unwrap();
    assert_eq!(dst.value, Value::Int(0));
}

#[test]
fn test_extraction_failure_is_reported() {
    let f = fixture();
    let src = Dynamic::new(f.timestamp, stamp(-1));
    let mut dst = Dynamic::new(Idx::INT, 9_i64);

    let err = Transcoder::new(&f.pool)
        .with_policy(Policy::EXTRACT)
        .transcode(&src, &mut dst)
        .unwrap_err();
    assert_eq!(
        err,
        TranscodeError::Extract {
            ty: "Timestamp".to_owned(),
            source: HookError::new("negative timestamp"),
        }
    );
    assert_eq!(
        err.to_string(),
        "recast: extracting a value from `Timestamp` failed: negative timestamp"
    );
    assert_eq!(err.hook_error().message(), "negative timestamp");
    assert_eq!(dst.value, Value::Int(9));
}

#[test]
fn test_same_opaque_type_is_assigned_without_hooks() {
    let f = fixture();
    let src = Dynamic::new(f.timestamp, stamp(-1));
    let mut dst = Dynamic::new(f.timestamp, stamp(3));

    Transcoder::new(&f.pool)
        .with_policy(Policy::all())
        .transcode(&src, &mut dst)
        .unwrap();
    assert_eq!(dst.value, stamp(-1));
}

#[test]
fn test_scan_is_off_by_default() {
    let f = fixture();
    let src = Dynamic::new(Idx::STR, "hello");
    let mut dst = Dynamic::new(f.collector, f.pool.zero(f.collector));

    Transcoder::new(&f.pool).transcode(&src, &mut dst).unwrap();
    assert!(collected(&dst.value).is_empty());
}

#[test]
fn test_scan_receives_raw_source() {
    let f = fixture();
    let src = Dynamic::new(Idx::STR, "hello");
    let mut dst = Dynamic::new(f.collector, f.pool.zero(f.collector));

    Transcoder::new(&f.pool)
        .with_policy(Policy::SCAN)
        .transcode(&src, &mut dst)
        .unwrap();
    assert_eq!(collected(&dst.value), ["hello"]);
}

#[test]
fn test_scan_failure_is_reported() {
    let f = fixture();
    let src = Dynamic::new(Idx::INT, 3_i64);
    let mut dst = Dynamic::new(f.collector, f.pool.zero(f.collector));

    let err = Transcoder::new(&f.pool)
        .with_policy(Policy::SCAN)
        .transcode(&src, &mut dst)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "recast: scanning into `Collector` failed: expected a string"
    );
}

#[test]
fn test_extraction_runs_before_scanning() {
    let f = fixture();
    let src = Dynamic::new(f.timestamp, stamp(5));
    let mut dst = Dynamic::new(f.collector, f.pool.zero(f.collector));

    // the extracted int64 reaches the collector, which rejects it
    let err = Transcoder::new(&f.pool)
        .with_policy(Policy::all())
        .transcode(&src, &mut dst)
        .unwrap_err();
    assert!(matches!(err, TranscodeError::Scan { .. }));
}

#[test]
fn test_run_hooks_reports_unhandled() {
    let f = fixture();
    let transcoder = Transcoder::new(&f.pool).with_policy(Policy::all());
    let src = Value::Int(1);
    let mut dst = Value::Int(0);

    let handled = transcoder
        .run_hooks(ValueRef::new(Idx::INT, &src), Idx::INT8, &mut dst)
        .unwrap();
    assert!(!handled);
}
