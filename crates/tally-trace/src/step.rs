//! Steps of a narrated arithmetic trace.
//!
//! Each step kind carries only the payload relevant to it. Steps are
//! produced by the generators in [`crate::generator`] and never mutated
//! afterwards.

use serde::{Deserialize, Serialize};
use tally_types::{Column, Operation};

/// A single step of the column algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
    /// The problem being solved. Always the first step.
    Start { operation: Operation, a: u32, b: u32 },

    /// Attention moves to a column. For subtraction `digit_a` is the current
    /// value, which may already have been lent to a lower column. For
    /// multiplication `digit_b` is the single-digit multiplier.
    FocusColumn {
        column: Column,
        digit_a: u32,
        digit_b: u32,
    },

    /// The carry from the column to the right is added in. The terms say
    /// whether it joins a digit sum or a digit product.
    AddCarry {
        column: Column,
        carry: u32,
        #[serde(flatten)]
        terms: CarryTerms,
    },

    /// Column sum without an incoming carry.
    CalcSum {
        column: Column,
        digit_a: u32,
        digit_b: u32,
        sum: u32,
    },

    /// Column product without an incoming carry.
    CalcProd {
        column: Column,
        digit: u32,
        multiplier: u32,
        product: u32,
    },

    /// `total` reached 10 or more: `digit` is written, `carry` moves left.
    CarryOver {
        column: Column,
        total: u32,
        carry: u32,
        digit: u32,
    },

    /// The carry left after the last column becomes the leading digit.
    FinalCarry { column: Column, carry: u32 },

    /// `to` cannot cover the subtrahend digit and borrows from `from`.
    /// Every column strictly between the two was zero and becomes 9.
    BorrowStart {
        from: Column,
        to: Column,
        value_a: u32,
        digit_b: u32,
    },

    /// The borrowing column now holds `value_a` (its old value plus 10).
    BorrowDone {
        column: Column,
        value_a: u32,
        digit_b: u32,
    },

    /// Column difference.
    CalcDiff {
        column: Column,
        value_a: u32,
        digit_b: u32,
        diff: u32,
    },

    /// The assembled answer. Terminal.
    End { result: u64 },

    /// The problem cannot be worked with this algorithm. Terminal.
    Error { reason: ErrorReason },
}

/// What an incoming carry is added to.
///
/// Serialized flat inside the ADD_CARRY step, so both shapes share one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CarryTerms {
    /// Addition: `digit_a + digit_b + carry = sum`.
    Sum {
        digit_a: u32,
        digit_b: u32,
        sum: u32,
    },
    /// Multiplication: `digit * multiplier = base_product`, plus the carry
    /// makes `total`.
    Product {
        digit: u32,
        multiplier: u32,
        base_product: u32,
        total: u32,
    },
}

/// Why a trace terminated with an error step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorReason {
    /// Subtraction whose minuend is smaller than its subtrahend.
    MinuendTooSmall,
    /// Multiplication by a multiplier with more than one digit.
    MultiDigitMultiplier,
    /// A borrow found no non-zero column to the left. Only reachable through
    /// a defect, since the minuend was checked to be large enough.
    NothingToBorrow,
}

/// Fieldless discriminant of [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKind {
    Start,
    FocusColumn,
    AddCarry,
    CalcSum,
    CalcProd,
    CarryOver,
    FinalCarry,
    BorrowStart,
    BorrowDone,
    CalcDiff,
    End,
    Error,
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Start { .. } => StepKind::Start,
            Step::FocusColumn { .. } => StepKind::FocusColumn,
            Step::AddCarry { .. } => StepKind::AddCarry,
            Step::CalcSum { .. } => StepKind::CalcSum,
            Step::CalcProd { .. } => StepKind::CalcProd,
            Step::CarryOver { .. } => StepKind::CarryOver,
            Step::FinalCarry { .. } => StepKind::FinalCarry,
            Step::BorrowStart { .. } => StepKind::BorrowStart,
            Step::BorrowDone { .. } => StepKind::BorrowDone,
            Step::CalcDiff { .. } => StepKind::CalcDiff,
            Step::End { .. } => StepKind::End,
            Step::Error { .. } => StepKind::Error,
        }
    }

    /// The column this step works on. A borrow is attributed to the
    /// column that receives the ten.
    pub fn column(&self) -> Option<Column> {
        match self {
            Step::FocusColumn { column, .. }
            | Step::AddCarry { column, .. }
            | Step::CalcSum { column, .. }
            | Step::CalcProd { column, .. }
            | Step::CarryOver { column, .. }
            | Step::FinalCarry { column, .. }
            | Step::BorrowDone { column, .. }
            | Step::CalcDiff { column, .. } => Some(*column),
            Step::BorrowStart { to, .. } => Some(*to),
            Step::Start { .. } | Step::End { .. } | Step::Error { .. } => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::End { .. } | Step::Error { .. })
    }
}
