//! Entry points that map `(operation, a, b)` to a narrated [`Trace`].
//!
//! Generation is pure: identical inputs always give an identical trace.
//! Problems the column algorithm cannot handle (a negative difference, a
//! multi-digit multiplier) are reported inside the trace as an ERROR step.
//! Only a selector with no algorithm at all is rejected with [`TraceError`].

use tally_types::{Locale, Operation};

use crate::narration::{Narrator, narrator_for};
use crate::step::Step;
use crate::trace::Trace;
use crate::{addition, multiplication, subtraction};

/// Generates the trace narrated in the default locale.
pub fn generate_trace(operation: Operation, a: u32, b: u32) -> Result<Trace, TraceError> {
    generate_narrated_trace(operation, a, b, Locale::default())
}

/// Generates the trace narrated in `locale`.
pub fn generate_narrated_trace(
    operation: Operation,
    a: u32,
    b: u32,
    locale: Locale,
) -> Result<Trace, TraceError> {
    generate_trace_with(operation, a, b, narrator_for(locale))
}

/// Generates the trace using a caller-supplied narrator.
pub fn generate_trace_with(
    operation: Operation,
    a: u32,
    b: u32,
    narrator: &dyn Narrator,
) -> Result<Trace, TraceError> {
    let steps = generate_steps(operation, a, b)?;
    Ok(Trace::narrate(operation, a, b, steps, narrator))
}

/// Generates the raw, un-narrated steps.
pub fn generate_steps(operation: Operation, a: u32, b: u32) -> Result<Vec<Step>, TraceError> {
    match operation {
        Operation::Addition => Ok(addition::steps(a, b)),
        Operation::Subtraction => Ok(subtraction::steps(a, b)),
        Operation::Multiplication => Ok(multiplication::steps(a, b)),
        Operation::Division => Err(TraceError::UnsupportedOperation(operation)),
    }
}

/// Errors that prevent a trace from being generated at all.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceError {
    #[error("no column algorithm for operation '{0}'")]
    UnsupportedOperation(Operation),
}

// ============================================================================
// Digit helpers
// ============================================================================

/// Number of decimal digits in `value` (zero has one digit).
pub(crate) fn digit_count(value: u32) -> usize {
    let mut count = 1;
    let mut rest = value / 10;
    while rest > 0 {
        count += 1;
        rest /= 10;
    }
    count
}

/// Digits of `value`, ones first, zero-padded to `width`.
pub(crate) fn digits(value: u32, width: usize) -> Vec<u32> {
    debug_assert!(width >= digit_count(value));
    let mut out = Vec::with_capacity(width);
    let mut rest = value;
    for _ in 0..width {
        out.push(rest % 10);
        rest /= 10;
    }
    out
}

/// Folds digits (ones first) back into an integer. Leading zeros vanish.
pub(crate) fn assemble(digits: &[u32]) -> u64 {
    digits
        .iter()
        .rev()
        .fold(0u64, |acc, d| acc * 10 + u64::from(*d))
}
