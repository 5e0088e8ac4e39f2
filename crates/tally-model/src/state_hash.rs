//! Deterministic fingerprint of the model state.
//!
//! Two states with the same operands, operation and bucket contents hash
//! identically, which makes re-initialization and replay easy to check.
//!
//! The hash covers, in this order:
//! 1. Operation tag and both operands
//! 2. Every bucket in [`BucketId::ALL`] order, with its per-role counts in
//!    [`Role::DRAIN_ORDER`] order
//!
//! Empty buckets contribute zeros, so a missing map entry and an empty
//! bucket are indistinguishable.

use blake3::Hasher;
use tally_types::{BucketId, Operation, Role};

use crate::state::State;

impl State {
    /// Computes a 32-byte BLAKE3 fingerprint of the state.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_model::State;
    /// use tally_types::Operation;
    ///
    /// let first = State::for_session(47, 38, Operation::Addition);
    /// let second = State::for_session(47, 38, Operation::Addition);
    /// assert_eq!(first.fingerprint(), second.fingerprint());
    /// ```
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Hasher::new();

        let tag: u8 = match self.operation() {
            Operation::Addition => 0,
            Operation::Subtraction => 1,
            Operation::Multiplication => 2,
            Operation::Division => 3,
        };
        hasher.update(&[tag]);

        let (a, b) = self.operands();
        hasher.update(&a.to_le_bytes());
        hasher.update(&b.to_le_bytes());

        for bucket in BucketId::ALL {
            hasher.update(bucket.to_string().as_bytes());
            for role in Role::DRAIN_ORDER {
                hasher.update(&self.count_of(bucket, role).to_le_bytes());
            }
        }

        *hasher.finalize().as_bytes()
    }
}
