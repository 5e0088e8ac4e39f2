//! Commands accepted by the place-value model.
//!
//! Each command corresponds to one discrete learner action reported by the
//! presentation layer.

use serde::{Deserialize, Serialize};
use tally_types::{BucketId, CountingObject, Denomination, Operation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Starts a session: source buckets get the operands' digit
    /// decomposition, result buckets are emptied. Replaces all prior state.
    Initialize {
        a: u32,
        b: u32,
        operation: Operation,
    },

    /// Moves one object between two buckets of its denomination.
    MoveObject {
        object: CountingObject,
        from: BucketId,
        to: BucketId,
    },

    /// Exchanges ten objects in `bucket` for one object of the next
    /// denomination in the next-tier result bucket. Never cascades.
    Regroup { bucket: BucketId },

    /// Breaks one object in `bucket` into ten objects of the previous
    /// denomination, placed in the same area one tier lower.
    Unbundle { bucket: BucketId },

    /// Takes away one minuend object together with one subtrahend object of
    /// the same denomination.
    CancelPair { denomination: Denomination },
}

impl Command {
    pub fn initialize(a: u32, b: u32, operation: Operation) -> Self {
        Command::Initialize { a, b, operation }
    }

    pub fn move_object(object: CountingObject, from: BucketId, to: BucketId) -> Self {
        Command::MoveObject { object, from, to }
    }

    pub fn regroup(bucket: BucketId) -> Self {
        Command::Regroup { bucket }
    }

    pub fn unbundle(bucket: BucketId) -> Self {
        Command::Unbundle { bucket }
    }

    pub fn cancel_pair(denomination: Denomination) -> Self {
        Command::CancelPair { denomination }
    }
}
