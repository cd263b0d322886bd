#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use pretty_assertions::assert_eq;
use recast_types::{FieldDef, Pool};
use recast_value::{Dynamic, Mapping};

use super::*;

fn run(pool: &Pool, src: &Dynamic, dst: &mut Dynamic) {
    Transcoder::new(pool).transcode(src, dst).unwrap();
}

fn ints(values: &[i64]) -> Value {
    Value::sequence(values.iter().copied().map(Value::Int).collect())
}

#[test]
fn test_sequence_grows_to_source_length() {
    let mut pool = Pool::new();
    let src_ty = pool.sequence(Idx::INT64);
    let dst_ty = pool.sequence(Idx::INT);

    let src = Dynamic::new(src_ty, ints(&[1, 2, 3]));
    let mut dst = Dynamic::new(dst_ty, ints(&[9]));
    run(&pool, &src, &mut dst);
    assert_eq!(dst.value, ints(&[1, 2, 3]));
}

#[test]
fn test_sequence_never_shrinks() {
    let mut pool = Pool::new();
    let src_ty = pool.sequence(Idx::INT64);
    let dst_ty = pool.sequence(Idx::INT);

    let src = Dynamic::new(src_ty, ints(&[1, 2]));
    let mut dst = Dynamic::new(dst_ty, ints(&[7, 8, 9, 10]));
    run(&pool, &src, &mut dst);
    assert_eq!(dst.value, ints(&[1, 2, 9, 10]));
}

#[test]
fn test_identical_sequence_types_are_replaced() {
    let mut pool = Pool::new();
    let seq = pool.sequence(Idx::INT);

    let src = Dynamic::new(seq, ints(&[1]));
    let mut dst = Dynamic::new(seq, ints(&[7, 8]));
    run(&pool, &src, &mut dst);
    assert_eq!(dst.value, ints(&[1]));
}

#[test]
fn test_non_sequence_source_copies_nothing() {
    let mut pool = Pool::new();
    let dst_ty = pool.sequence(Idx::STR);

    let src = Dynamic::new(Idx::STR, "x");
    let mut dst = Dynamic::new(dst_ty, Value::sequence(vec![]));
    run(&pool, &src, &mut dst);
    assert_eq!(dst.value, Value::sequence(vec![]));
}

#[test]
fn test_records_into_indirect_records() {
    let mut pool = Pool::new();
    let opt = pool
        .record(
            "Option",
            vec![FieldDef::new("ID", Idx::INT64), FieldDef::new("Label", Idx::STR)],
        )
        .unwrap();
    let opt_res = pool
        .record("OptionRes", vec![FieldDef::new("Label", Idx::STR)])
        .unwrap();
    let opt_res_ptr = pool.indirect(opt_res);
    let src_ty = pool.sequence(opt);
    let dst_ty = pool.sequence(opt_res_ptr);

    let src = Dynamic::new(
        src_ty,
        Value::sequence(vec![
            Value::record(vec![Value::Int(1), Value::string("yes")]),
            Value::record(vec![Value::Int(2), Value::string("no")]),
        ]),
    );
    let mut dst = Dynamic::new(dst_ty, Value::sequence(vec![]));
    run(&pool, &src, &mut dst);
    assert_eq!(
        dst.value,
        Value::sequence(vec![
            Value::some(Value::record(vec![Value::string("yes")])),
            Value::some(Value::record(vec![Value::string("no")])),
        ])
    );
}

#[test]
fn test_mapping_keys_are_converted() {
    let mut pool = Pool::new();
    let src_ty = pool.mapping(Idx::INT64, Idx::INT).unwrap();
    let dst_ty = pool.mapping(Idx::INT, Idx::INT).unwrap();

    let entries = [(3_i64, 1_i64), (5, 2), (6, 3)];
    let src = Dynamic::new(
        src_ty,
        Value::mapping(entries.iter().map(|&(k, v)| (Key::Int(k), Value::Int(v)))),
    );
    let mut dst = Dynamic::new(dst_ty, Value::Mapping(None));
    run(&pool, &src, &mut dst);
    assert_eq!(dst.value, src.value);
}

#[test]
fn test_mapping_key_width_conversion_wraps() {
    let mut pool = Pool::new();
    let src_ty = pool.mapping(Idx::INT, Idx::STR).unwrap();
    let dst_ty = pool.mapping(Idx::UINT8, Idx::STR).unwrap();

    let src = Dynamic::new(
        src_ty,
        Value::mapping([(Key::Int(257), Value::string("x"))]),
    );
    let mut dst = Dynamic::new(dst_ty, Value::Mapping(None));
    run(&pool, &src, &mut dst);
    assert_eq!(dst.value, Value::mapping([(Key::Uint(1), Value::string("x"))]));
}

#[test]
fn test_mapping_is_materialized_even_without_a_mapping_source() {
    let mut pool = Pool::new();
    let dst_ty = pool.mapping(Idx::STR, Idx::INT).unwrap();

    let src = Dynamic::new(Idx::INT, 1_i64);
    let mut dst = Dynamic::new(dst_ty, Value::Mapping(None));
    run(&pool, &src, &mut dst);
    assert_eq!(dst.value, Value::Mapping(Some(Mapping::default())));
}

#[test]
fn test_incompatible_key_types_stop_the_copy() {
    let mut pool = Pool::new();
    let src_ty = pool.mapping(Idx::INT, Idx::INT).unwrap();
    let dst_ty = pool.mapping(Idx::STR, Idx::INT).unwrap();

    let src = Dynamic::new(src_ty, Value::mapping([(Key::Int(1), Value::Int(1))]));
    let mut dst = Dynamic::new(
        dst_ty,
        Value::mapping([(Key::from("kept"), Value::Int(0))]),
    );
    run(&pool, &src, &mut dst);
    assert_eq!(dst.value, Value::mapping([(Key::from("kept"), Value::Int(0))]));
}

#[test]
fn test_mapping_values_start_from_zero() {
    let mut pool = Pool::new();
    let row = pool
        .record(
            "Row",
            vec![FieldDef::new("Name", Idx::STR), FieldDef::new("Age", Idx::INT)],
        )
        .unwrap();
    let dto = pool
        .record(
            "Dto",
            vec![FieldDef::new("Name", Idx::STR), FieldDef::new("Note", Idx::STR)],
        )
        .unwrap();
    let src_ty = pool.mapping(Idx::STR, row).unwrap();
    let dst_ty = pool.mapping(Idx::STR, dto).unwrap();

    let src = Dynamic::new(
        src_ty,
        Value::mapping([(
            Key::from("a"),
            Value::record(vec![Value::string("Ann"), Value::Int(30)]),
        )]),
    );
    // an existing entry is replaced by a fresh value, not merged into
    let mut dst = Dynamic::new(
        dst_ty,
        Value::mapping([(
            Key::from("a"),
            Value::record(vec![Value::string("old"), Value::string("note")]),
        )]),
    );
    run(&pool, &src, &mut dst);
    assert_eq!(
        dst.value,
        Value::mapping([(
            Key::from("a"),
            Value::record(vec![Value::string("Ann"), Value::string("")]),
        )])
    );
}
