//! # tally-trace: Narrated column-arithmetic traces
//!
//! Given an operation and two whole numbers, produces the ordered steps a
//! learner follows when working the problem on paper: column focus, sums,
//! carries, borrows (including borrowing through zero columns) and the
//! final answer.
//!
//! ## Key Principles
//!
//! - **Pure**: no IO, no clocks, no shared state
//! - **Deterministic**: identical inputs always yield an identical trace
//! - **Errors are steps**: an unworkable problem ends the trace with ERROR
//!
//! ## Example
//!
//! ```
//! use tally_trace::{StepKind, generate_trace};
//! use tally_types::Operation;
//!
//! let trace = generate_trace(Operation::Addition, 999, 1).unwrap();
//! assert_eq!(trace.result(), Some(1000));
//! assert_eq!(trace.count(StepKind::CarryOver), 3);
//! ```

mod addition;
pub mod generator;
mod multiplication;
pub mod narration;
pub mod step;
mod subtraction;
pub mod trace;


pub use generator::{
    TraceError, generate_narrated_trace, generate_steps, generate_trace, generate_trace_with,
};
pub use narration::{EnglishNarrator, JapaneseNarrator, Narrator, narrator_for};
pub use step::{CarryTerms, ErrorReason, Step, StepKind};
pub use trace::{NarratedStep, Trace};
