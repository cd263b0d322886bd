//! End-to-end copies across aliased, embedded and keyed schemas.

#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use pretty_assertions::assert_eq;
use recast::{transcode, Dynamic, FieldDef, Idx, Key, Opaque, OpaqueValue, Policy, Pool, Value};

#[derive(Clone, Debug, PartialEq)]
struct Time(i64);

impl Opaque for Time {}

fn time_zero() -> Box<dyn Opaque> {
    Box::new(Time(0))
}

/// `A`, `B` and their embedding wrappers `EmA`, `EmB`.
struct Schemas {
    pool: Pool,
    a: Idx,
    b: Idx,
    em_a: Idx,
    em_b: Idx,
}

fn schemas() -> Schemas {
    let mut pool = Pool::new();
    let time = pool.opaque("Time", time_zero);
    let date_time = pool.named("DateTime", time);
    let strings = pool.sequence(Idx::STR);

    let c = pool
        .record(
            "C",
            vec![FieldDef::new("C1", Idx::STR), FieldDef::new("C2", Idx::STR)],
        )
        .unwrap();
    let str_ptr = pool.indirect(Idx::STR);
    let d = pool
        .record(
            "D",
            vec![
                FieldDef::new("D1", Idx::STR).alias("C1"),
                FieldDef::new("D2", str_ptr).alias("C2"),
            ],
        )
        .unwrap();

    let cs = pool.sequence(c);
    let a = pool
        .record(
            "A",
            vec![
                FieldDef::new("F1", Idx::STR),
                FieldDef::new("S1", strings),
                FieldDef::new("C", cs),
                FieldDef::new("T", time),
            ],
        )
        .unwrap();

    let str_ptr_ptr = pool.indirect(str_ptr);
    let strings_ptr = pool.indirect(strings);
    let ds = pool.sequence(d);
    let d_ptr = pool.indirect(d);
    let d_ptrs = pool.sequence(d_ptr);
    let b = pool
        .record(
            "B",
            vec![
                FieldDef::new("F1", str_ptr_ptr),
                FieldDef::new("F2", Idx::STR).alias("F1"),
                FieldDef::new("S2", strings_ptr).alias("S1"),
                FieldDef::new("D", ds).alias("C"),
                FieldDef::new("E", d_ptrs).alias("C"),
                FieldDef::new("T", date_time),
            ],
        )
        .unwrap();

    let em_a = pool
        .record("EmA", vec![FieldDef::new("A", a).embedded()])
        .unwrap();
    let em_b = pool
        .record("EmB", vec![FieldDef::new("B", b).embedded()])
        .unwrap();

    Schemas {
        pool,
        a,
        b,
        em_a,
        em_b,
    }
}

fn sample_a() -> Value {
    Value::record(vec![
        Value::string("Danh"),
        Value::sequence(vec![Value::string("Danh")]),
        Value::sequence(vec![Value::record(vec![
            Value::string("OK"),
            Value::string("NO"),
        ])]),
        Value::opaque(OpaqueValue::new(Time(1_600_000_000))),
    ])
}

fn expected_b() -> Value {
    let d = Value::record(vec![Value::string("OK"), Value::some(Value::string("NO"))]);
    Value::record(vec![
        Value::some(Value::some(Value::string("Danh"))),
        Value::string("Danh"),
        Value::some(Value::sequence(vec![Value::string("Danh")])),
        Value::sequence(vec![d.clone()]),
        Value::sequence(vec![Value::some(d)]),
        Value::opaque(OpaqueValue::new(Time(1_600_000_000))),
    ])
}

#[test]
fn test_string_into_triple_indirection() {
    let mut pool = Pool::new();
    let p = pool.indirect(Idx::STR);
    let pp = pool.indirect(p);
    let ppp = pool.indirect(pp);

    let src = Dynamic::new(Idx::STR, "Danh");
    let mut dst = Dynamic::new(ppp, Value::some(Value::some(Value::some(Value::string("")))));
    transcode(&pool, &src, &mut dst, Policy::empty()).unwrap();
    assert_eq!(
        dst.value,
        Value::some(Value::some(Value::some(Value::string("Danh"))))
    );
}

#[test]
fn test_aliased_record_copy() {
    let s = schemas();
    let src = Dynamic::new(s.a, sample_a());
    let mut dst = Dynamic::new(s.b, s.pool.zero(s.b));

    transcode(&s.pool, &src, &mut dst, Policy::empty()).unwrap();
    assert_eq!(dst.value, expected_b());
}

#[test]
fn test_embedded_record_copy() {
    let s = schemas();
    let src = Dynamic::new(s.em_a, Value::record(vec![sample_a()]));
    let mut dst = Dynamic::new(s.em_b, s.pool.zero(s.em_b));

    transcode(&s.pool, &src, &mut dst, Policy::empty()).unwrap();
    assert_eq!(dst.value, Value::record(vec![expected_b()]));
}

#[test]
fn test_copy_is_idempotent() {
    let s = schemas();
    let src = Dynamic::new(s.a, sample_a());
    let mut once = Dynamic::new(s.b, s.pool.zero(s.b));
    transcode(&s.pool, &src, &mut once, Policy::empty()).unwrap();

    let mut twice = once.clone();
    transcode(&s.pool, &src, &mut twice, Policy::empty()).unwrap();
    assert_eq!(twice, once);
}

#[test]
fn test_int64_keys_into_int_keys() {
    let mut pool = Pool::new();
    let ma = pool.mapping(Idx::INT64, Idx::INT).unwrap();
    let mb = pool.mapping(Idx::INT, Idx::INT).unwrap();

    let src = Dynamic::new(
        ma,
        Value::mapping([
            (Key::Int(3), Value::Int(1)),
            (Key::Int(5), Value::Int(2)),
            (Key::Int(6), Value::Int(3)),
        ]),
    );
    let mut dst = Dynamic::new(mb, Value::Mapping(None));
    transcode(&pool, &src, &mut dst, Policy::empty()).unwrap();

    let entries = dst.value.as_mapping().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries.get(&Key::Int(5)), Some(&Value::Int(2)));
    assert_eq!(dst.value, src.value);
}

#[test]
fn test_mapping_of_records_into_mapping_of_other_records() {
    let mut s = schemas();
    let maa = s.pool.mapping(Idx::STR, s.a).unwrap();
    let mbb = s.pool.mapping(Idx::STR, s.b).unwrap();

    let src = Dynamic::new(maa, Value::mapping([(Key::from("A"), sample_a())]));
    let mut dst = Dynamic::new(mbb, Value::Mapping(None));
    transcode(&s.pool, &src, &mut dst, Policy::empty()).unwrap();

    assert_eq!(dst.value, Value::mapping([(Key::from("A"), expected_b())]));
}
