//! Cross-variant comparison of fields.
//!
//! - A NULL operand yields a null sentinel instead of an ordering.
//! - Numbers are promoted to the widest type involved
//!   (INTEGER < LONG < FLOAT < DOUBLE) and compared by value. NaN sorts
//!   above every other number.
//! - A STRING compared with a number or boolean renders the other value as
//!   text (`5`, `2.5`, `true`) and compares bytes. The non-string side
//!   delegates to the string side and reverses the result.
//! - STRING and BINARY compare bytes lexicographically.
//! - Everything else is incomparable.

use super::Field;
use crate::types::DataType;
use crate::value::Value;
use alloc::string::{String, ToString};
use core::cmp::Ordering;

/// Outcome of comparing two fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldOrdering {
    /// Both operands have values that can be ordered.
    Ordered(Ordering),
    /// The other operand is NULL and the receiver is not.
    NullOperand,
    /// The receiver is NULL and the other operand is not.
    NullReceiver,
    /// The operand types cannot be compared.
    Incomparable,
}

impl FieldOrdering {
    /// Returns the outcome seen from the other operand.
    pub fn reverse(self) -> Self {
        match self {
            FieldOrdering::Ordered(o) => FieldOrdering::Ordered(o.reverse()),
            FieldOrdering::NullOperand => FieldOrdering::NullReceiver,
            FieldOrdering::NullReceiver => FieldOrdering::NullOperand,
            FieldOrdering::Incomparable => FieldOrdering::Incomparable,
        }
    }

    /// Returns the ordering, or None for the sentinels.
    pub fn ordering(self) -> Option<Ordering> {
        match self {
            FieldOrdering::Ordered(o) => Some(o),
            _ => None,
        }
    }

    /// Returns true if the operands compare equal.
    #[inline]
    pub fn is_eq(self) -> bool {
        self == FieldOrdering::Ordered(Ordering::Equal)
    }
}

#[derive(Clone, Copy)]
enum Numeric {
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Numeric {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(v) => Some(Numeric::Integer(*v)),
            Value::Long(v) => Some(Numeric::Long(*v)),
            Value::Float(v) => Some(Numeric::Float(*v)),
            Value::Double(v) => Some(Numeric::Double(*v)),
            _ => None,
        }
    }

    fn rank(self) -> u8 {
        match self {
            Numeric::Integer(_) => 0,
            Numeric::Long(_) => 1,
            Numeric::Float(_) => 2,
            Numeric::Double(_) => 3,
        }
    }

    fn to_i64(self) -> i64 {
        match self {
            Numeric::Integer(v) => i64::from(v),
            Numeric::Long(v) => v,
            Numeric::Float(v) => v as i64,
            Numeric::Double(v) => v as i64,
        }
    }

    fn to_f32(self) -> f32 {
        match self {
            Numeric::Integer(v) => v as f32,
            Numeric::Long(v) => v as f32,
            Numeric::Float(v) => v,
            Numeric::Double(v) => v as f32,
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Numeric::Integer(v) => f64::from(v),
            Numeric::Long(v) => v as f64,
            Numeric::Float(v) => f64::from(v),
            Numeric::Double(v) => v,
        }
    }
}

fn compare_numeric(a: Numeric, b: Numeric) -> Ordering {
    match a.rank().max(b.rank()) {
        0 | 1 => a.to_i64().cmp(&b.to_i64()),
        // f32 -> f64 is exact, so this orders the f32-promoted values
        2 => compare_floats(f64::from(a.to_f32()), f64::from(b.to_f32())),
        _ => compare_floats(a.to_f64(), b.to_f64()),
    }
}

fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Text form of a number or boolean when compared against a string.
fn render(value: &Value) -> Option<String> {
    match value {
        Value::Integer(_)
        | Value::Long(_)
        | Value::Float(_)
        | Value::Double(_)
        | Value::Boolean(_) => Some(value.to_string()),
        _ => None,
    }
}

impl Field {
    /// Compares this field with another.
    pub fn compare_to(&self, other: &Field) -> FieldOrdering {
        match (self.data_type(), other.data_type()) {
            (DataType::Null, DataType::Null) => return FieldOrdering::Ordered(Ordering::Equal),
            (_, DataType::Null) => return FieldOrdering::NullOperand,
            (DataType::Null, _) => return FieldOrdering::NullReceiver,
            _ => {}
        }

        let (a, b) = (self.value(), other.value());
        if let (Some(x), Some(y)) = (Numeric::of(a), Numeric::of(b)) {
            return FieldOrdering::Ordered(compare_numeric(x, y));
        }

        match (a, b) {
            (Value::String(x), Value::String(y)) => {
                FieldOrdering::Ordered(x.as_bytes().cmp(y.as_bytes()))
            }
            (Value::String(x), y) => match render(y) {
                Some(text) => FieldOrdering::Ordered(x.as_bytes().cmp(text.as_bytes())),
                None => FieldOrdering::Incomparable,
            },
            (_, Value::String(_)) => other.compare_to(self).reverse(),
            (Value::Boolean(x), Value::Boolean(y)) => FieldOrdering::Ordered(x.cmp(y)),
            (Value::Binary(x), Value::Binary(y)) => FieldOrdering::Ordered(x.cmp(y)),
            _ => FieldOrdering::Incomparable,
        }
    }

    /// Total ordering for sorting: NULL first, incomparable types by category.
    pub fn sort_cmp(&self, other: &Field) -> Ordering {
        match self.compare_to(other) {
            FieldOrdering::Ordered(o) => o,
            FieldOrdering::NullOperand => Ordering::Greater,
            FieldOrdering::NullReceiver => Ordering::Less,
            FieldOrdering::Incomparable => self
                .data_type()
                .category_rank()
                .cmp(&other.data_type().category_rank()),
        }
    }
}
