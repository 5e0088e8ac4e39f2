//! # tally-model: Place-value regrouping model
//!
//! Simulates the counting objects (coins or blocks) a learner moves while
//! working a problem: one bucket per operand and tier, plus a result area
//! per tier. Ten objects of one tier can be regrouped into one of the next;
//! in subtraction one object can be unbundled into ten of the tier below,
//! and matched minuend/subtrahend pairs can be taken away.
//!
//! ## Key Principles
//!
//! - **Pure kernel**: `apply_command(&state, command) -> (state, effects)`
//! - **Rejection is a no-op**: an invalid gesture never alters state
//! - **Value conservation**: addition keeps `total_value() == a + b`,
//!   subtraction keeps `difference_value() == a - b`
//! - **Explicit observers**: [`PlaceValueModel::subscribe`] replaces watching
//!   rendered zones for changes
//!
//! ## Architecture
//!
//! - [`command`]: learner actions (`MoveObject`, `Regroup`, ...)
//! - [`effects`]: what changed (`BucketChanged`, `Regrouped`, ...)
//! - [`state`]: bucket contents and derived values
//! - [`kernel`]: the `apply_command` function
//! - [`model`]: the session-owned driver with observer registration

pub mod command;
pub mod effects;
pub mod kernel;
pub mod model;
pub mod state;
mod state_hash;


pub use command::Command;
pub use effects::Effect;
pub use kernel::{ModelError, REGROUP_SIZE, apply_command};
pub use model::{ModelObserver, PlaceValueModel, SubscriptionId};
pub use state::{Bucket, State};
