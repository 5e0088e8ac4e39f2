//! Effects produced by the model.
//!
//! Effects describe what changed so the presentation layer can update the
//! affected drop zones and grid cells without diffing the whole state.

use serde::{Deserialize, Serialize};
use tally_types::{BucketId, Denomination, Operation};

/// A change reported after an accepted command.
///
/// Effects are produced by [`super::kernel::apply_command`]; a rejected
/// command produces none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// All buckets were reset for a new session.
    Initialized {
        operation: Operation,
        a: u32,
        b: u32,
    },

    /// A bucket now holds `count` objects.
    BucketChanged { bucket: BucketId, count: u32 },

    /// Ten objects left `from` and one arrived in `into`.
    ///
    /// In the column grid this is a carry into `into`'s column.
    Regrouped { from: BucketId, into: BucketId },

    /// One object left `from` and ten arrived in `into`.
    ///
    /// In the column grid this is a borrow from `from`'s column.
    Unbundled { from: BucketId, into: BucketId },

    /// One minuend and one subtrahend object of this denomination were
    /// taken away.
    PairCancelled { denomination: Denomination },

    /// The bucket holds ten or more objects and can be regrouped.
    RegroupAvailable { bucket: BucketId },
}
