//! Property-based tests for protodb-binary using proptest.

use protodb_binary::{DecodeOptions, RecordCodec};
use protodb_core::schema::{ColumnDescriptor, Schema};
use protodb_core::{DataType, Row};
use proptest::prelude::*;

fn schema() -> Schema {
    Schema::builder()
        .add_column(ColumnDescriptor::new("id", DataType::Long).primary_key(true))
        .add_column(ColumnDescriptor::new("part", DataType::Integer).primary_key(true))
        .add_column(ColumnDescriptor::string("name", 24).nullable(true))
        .add_column(ColumnDescriptor::binary("payload", 16).nullable(true))
        .add_column(ColumnDescriptor::new("score", DataType::Double).nullable(true))
        .add_column(ColumnDescriptor::new("ratio", DataType::Float))
        .add_column(ColumnDescriptor::new("flag", DataType::Boolean).nullable(true))
        .build()
        .unwrap()
}

#[derive(Debug, Clone)]
struct Record {
    id: i64,
    part: i32,
    name: Option<String>,
    payload: Option<Vec<u8>>,
    score: Option<f64>,
    ratio: f32,
    flag: Option<bool>,
}

impl Record {
    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set_long("id", self.id);
        row.set_int("part", self.part);
        if let Some(name) = &self.name {
            row.set_string("name", name.as_str());
        }
        if let Some(payload) = &self.payload {
            row.set_binary("payload", payload.clone());
        }
        if let Some(score) = self.score {
            row.set_double("score", score);
        }
        row.set_float("ratio", self.ratio);
        if let Some(flag) = self.flag {
            row.set_boolean("flag", flag);
        }
        row
    }
}

/// Text of at most `max` bytes, multibyte characters and NULs included.
fn text(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![any::<char>(), Just('\0')], 0..max).prop_map(move |chars| {
        let mut text = String::new();
        for c in chars {
            if text.len() + c.len_utf8() > max {
                break;
            }
            text.push(c);
        }
        text
    })
}

fn record() -> impl Strategy<Value = Record> {
    (
        any::<i64>(),
        any::<i32>(),
        prop::option::of(text(24)),
        prop::option::of(prop::collection::vec(any::<u8>(), 0..16)),
        prop::option::of(any::<f64>()),
        any::<f32>(),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(id, part, name, payload, score, ratio, flag)| Record {
            id,
            part,
            name,
            payload,
            score,
            ratio,
            flag,
        })
}

proptest! {
    /// Test that decode(encode(row)) restores every value.
    #[test]
    fn encode_decode_roundtrip(rec in record()) {
        let schema = schema();
        let row = rec.to_row();
        let bytes = schema.encode(&row).unwrap();
        prop_assert!(bytes.len() <= schema.layout().max_record_size());

        let decoded = schema.decode_row(&bytes).unwrap();
        prop_assert_eq!(decoded.len(), row.len());
        for (name, field) in row.iter() {
            prop_assert_eq!(decoded.get_value(name), Some(field.value()));
        }
    }

    /// Test that a projection returns the same values as a full decode.
    #[test]
    fn projection_matches_full_decode(
        rec in record(),
        mask in prop::collection::vec(any::<bool>(), 7)
    ) {
        let schema = schema();
        let bytes = schema.encode(&rec.to_row()).unwrap();
        let names: Vec<&str> = schema
            .columns()
            .iter()
            .zip(&mask)
            .filter(|(_, keep)| **keep)
            .map(|(c, _)| c.name())
            .collect();

        let full = schema.decode_row(&bytes).unwrap();
        let projected = schema
            .decode(&bytes, &DecodeOptions::new().project(&names))
            .unwrap();
        for (name, field) in projected.iter() {
            prop_assert!(names.contains(&name));
            prop_assert_eq!(full.get_value(name), Some(field.value()));
        }
        for name in &names {
            prop_assert_eq!(projected.contains_column(name), full.contains_column(name));
        }
    }

    /// Test that primary-key bytes have the key width and decode back.
    #[test]
    fn primary_key_bytes_roundtrip(rec in record()) {
        let schema = schema();
        let row = rec.to_row();
        let key = schema.extract_primary_key_bytes(&row).unwrap();
        prop_assert_eq!(key.len(), schema.layout().primary_key_size());

        let full = schema.encode(&row).unwrap();
        let header = schema.layout().header_size();
        prop_assert_eq!(&full[header..header + key.len()], &key[..]);

        let decoded = schema.decode_key(&key).unwrap();
        prop_assert_eq!(decoded.get_long("id").unwrap(), Some(rec.id));
        prop_assert_eq!(decoded.get_int("part").unwrap(), Some(rec.part));
    }

    /// Test that a row encoded under one schema is still checked by another.
    #[test]
    fn second_schema_checks_again(id in any::<i64>(), name in text(24)) {
        let wide = schema();
        let narrow = Schema::builder()
            .add_column(ColumnDescriptor::new("id", DataType::Long).primary_key(true))
            .add_column(ColumnDescriptor::string("name", 4))
            .build()
            .unwrap();

        let mut row = Row::new();
        row.set_long("id", id);
        row.set_int("part", 0);
        row.set_float("ratio", 0.0);
        row.set_string("name", name.as_str());
        row.bind_schema(&wide).unwrap();
        prop_assert!(wide.encode(&row).is_ok());

        match narrow.encode(&row) {
            Ok(bytes) => {
                prop_assert!(name.len() <= 4);
                prop_assert!(bytes.len() <= narrow.layout().max_record_size());
            }
            Err(_) => prop_assert!(name.len() > 4),
        }
    }

    /// Test that every strict prefix of a record fails to decode cleanly.
    #[test]
    fn truncated_records_are_errors(rec in record()) {
        let schema = schema();
        let bytes = schema.encode(&rec.to_row()).unwrap();
        for cut in 0..bytes.len() {
            prop_assert!(schema.decode_row(&bytes[..cut]).is_err());
        }
    }
}
