//! Single-column comparison predicates.

use core::cmp::Ordering;
use core::fmt;
use protodb_core::{Field, FieldOrdering};

/// Comparison operator applied to a column value and an operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// `=`
    Equal,
    /// `<>`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
}

impl ComparisonOp {
    /// Returns true if a comparison outcome satisfies the operator.
    ///
    /// Only ordered outcomes can match: a NULL on either side or
    /// incomparable types never satisfy any operator, `<>` included.
    pub fn matches(self, outcome: FieldOrdering) -> bool {
        let Some(ordering) = outcome.ordering() else {
            return false;
        };
        match self {
            ComparisonOp::Equal => ordering == Ordering::Equal,
            ComparisonOp::NotEqual => ordering != Ordering::Equal,
            ComparisonOp::Less => ordering == Ordering::Less,
            ComparisonOp::LessEqual => ordering != Ordering::Greater,
            ComparisonOp::Greater => ordering == Ordering::Greater,
            ComparisonOp::GreaterEqual => ordering != Ordering::Less,
        }
    }

    /// Evaluates `value <op> operand`.
    #[inline]
    pub fn evaluate(self, value: &Field, operand: &Field) -> bool {
        self.matches(value.compare_to(operand))
    }

    /// Returns the operator symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "<>",
            ComparisonOp::Less => "<",
            ComparisonOp::LessEqual => "<=",
            ComparisonOp::Greater => ">",
            ComparisonOp::GreaterEqual => ">=",
        }
    }

    /// Parses an operator symbol. `!=` is accepted for `<>`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(ComparisonOp::Equal),
            "<>" | "!=" => Some(ComparisonOp::NotEqual),
            "<" => Some(ComparisonOp::Less),
            "<=" => Some(ComparisonOp::LessEqual),
            ">" => Some(ComparisonOp::Greater),
            ">=" => Some(ComparisonOp::GreaterEqual),
            _ => None,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
