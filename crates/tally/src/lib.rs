//! # Tally
//!
//! Column-arithmetic tutoring core.
//!
//! Tally explains written (column) arithmetic one step at a time and lets a
//! learner reproduce it with counting objects:
//!
//! - **Narrated traces** - every digit, carry and borrow as an ordered step
//! - **Place-value model** - coins or blocks that regroup ten-for-one
//! - **Answer grid** - the carry row and answer row the learner fills in
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         Session                          │
//! │  ┌─────────┐   ┌──────────────────┐   ┌───────────────┐  │
//! │  │  Trace  │   │ PlaceValueModel  │ → │  AnswerGrid   │  │
//! │  │ (steps) │   │ (pure kernel)    │   │ (carry, sum)  │  │
//! │  └─────────┘   └──────────────────┘   └───────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use tally::{Column, Session, TallyConfig, Verdict};
//!
//! let config = TallyConfig::default();
//! let mut session = Session::from_input("add", "47", "38", &config)?;
//! assert_eq!(session.trace().result(), Some(85));
//!
//! session.enter_answer_digit(Column::new(1), 8)?;
//! session.enter_answer_digit(Column::ONES, 5)?;
//! assert_eq!(session.check_answer(), Verdict::Correct(85));
//! # Ok::<(), tally::SessionError>(())
//! ```

mod error;
mod grid;
mod session;

#[cfg(test)]
mod tests;

// Session facade
pub use error::{Result, SessionError};
pub use grid::{AnswerGrid, AnswerStatus};
pub use session::{Session, Verdict};

// Re-export shared vocabulary
pub use tally_types::{
    BucketId, Column, CountingObject, Denomination, Locale, Operand, Operation, ParseError,
    PlaceDigits, Role,
};

// Re-export the trace generator
pub use tally_trace::{
    ErrorReason, NarratedStep, Narrator, Step, StepKind, Trace, TraceError, generate_trace,
};

// Re-export the place-value model
pub use tally_model::{
    Command, Effect, ModelError, ModelObserver, PlaceValueModel, State, SubscriptionId,
};

// Re-export configuration
pub use tally_config::{
    ConfigError, ConfigLoader, DisplayMode, DisplaySettings, SessionSettings, TallyConfig,
};
