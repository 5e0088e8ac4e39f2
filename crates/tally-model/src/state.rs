//! Bucket state of the place-value model.
//!
//! The state records, for each of the nine fixed buckets, how many objects
//! of each role it holds. Objects are fungible, so counts are all there is.
//! Mutation is crate-internal; external code goes through
//! [`crate::kernel::apply_command`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tally_types::{BucketId, Denomination, Operand, Operation, PlaceDigits, Role};

// ============================================================================
// Bucket
// ============================================================================

/// Objects held by one bucket, counted per role.
///
/// Roles with a zero count are not stored, so two buckets holding the same
/// objects always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Bucket {
    counts: BTreeMap<Role, u32>,
}

impl Bucket {
    /// Total number of objects.
    pub fn count(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn count_of(&self, role: Role) -> u32 {
        self.counts.get(&role).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Per-role counts, in role order.
    pub fn roles(&self) -> impl Iterator<Item = (Role, u32)> + '_ {
        self.counts.iter().map(|(role, count)| (*role, *count))
    }

    pub(crate) fn add(&mut self, role: Role, count: u32) {
        if count > 0 {
            *self.counts.entry(role).or_insert(0) += count;
        }
    }

    /// Removes one object of `role`. Returns false if there is none.
    pub(crate) fn remove_one(&mut self, role: Role) -> bool {
        match self.counts.get_mut(&role) {
            Some(count) => {
                *count -= 1;
                if *count == 0 {
                    self.counts.remove(&role);
                }
                true
            }
            None => false,
        }
    }

    /// Removes `count` fungible objects following [`Role::DRAIN_ORDER`].
    ///
    /// The caller checks that enough objects are present.
    pub(crate) fn drain(&mut self, count: u32) {
        debug_assert!(self.count() >= count, "drain past bucket contents");

        let mut remaining = count;
        for role in Role::DRAIN_ORDER {
            if remaining == 0 {
                break;
            }
            let held = self.count_of(role);
            let taken = held.min(remaining);
            if taken == held {
                self.counts.remove(&role);
            } else if let Some(left) = self.counts.get_mut(&role) {
                *left -= taken;
            }
            remaining -= taken;
        }
    }

    /// The role the next drained object would have.
    pub(crate) fn first_drainable(&self) -> Option<Role> {
        Role::DRAIN_ORDER
            .into_iter()
            .find(|role| self.count_of(*role) > 0)
    }
}

// ============================================================================
// Model State
// ============================================================================

/// The model's state for one practice session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    operation: Operation,
    a: u32,
    b: u32,
    buckets: BTreeMap<BucketId, Bucket>,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    /// Creates a state with every bucket empty (the problem `0 + 0`).
    pub fn new() -> Self {
        Self {
            operation: Operation::Addition,
            a: 0,
            b: 0,
            buckets: BucketId::ALL
                .into_iter()
                .map(|id| (id, Bucket::default()))
                .collect(),
        }
    }

    /// Creates the starting state for a session.
    ///
    /// Source buckets hold the operands' hundreds/tens/ones decomposition;
    /// result buckets are empty.
    pub fn for_session(a: u32, b: u32, operation: Operation) -> Self {
        let mut state = Self {
            operation,
            a,
            b,
            ..Self::new()
        };

        for (operand, value) in [(Operand::A, a), (Operand::B, b)] {
            let digits = PlaceDigits::of(value);
            for denomination in Denomination::ALL {
                state.bucket_mut(BucketId::source(operand, denomination)).add(
                    Role::of_operand(operand),
                    digits.count(denomination),
                );
            }
        }

        state
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn operands(&self) -> (u32, u32) {
        (self.a, self.b)
    }

    /// Returns the bucket's contents.
    pub fn bucket(&self, id: BucketId) -> Option<&Bucket> {
        self.buckets.get(&id)
    }

    /// Current number of objects in a bucket.
    pub fn count_at(&self, id: BucketId) -> u32 {
        self.bucket(id).map_or(0, Bucket::count)
    }

    /// Current number of objects of a role in a bucket.
    pub fn count_of(&self, id: BucketId, role: Role) -> u32 {
        self.bucket(id).map_or(0, |b| b.count_of(role))
    }

    /// All buckets with their contents, in identifier order.
    pub fn buckets(&self) -> impl Iterator<Item = (BucketId, &Bucket)> {
        self.buckets.iter().map(|(id, bucket)| (*id, bucket))
    }

    /// Combined value of every object in every bucket.
    pub fn total_value(&self) -> u64 {
        self.buckets()
            .map(|(id, bucket)| u64::from(bucket.count()) * u64::from(id.denomination().value()))
            .sum()
    }

    /// Value of the minuend-side objects minus the subtrahend-side objects.
    pub fn difference_value(&self) -> i64 {
        self.buckets()
            .flat_map(|(id, bucket)| {
                let unit = i64::from(id.denomination().value());
                bucket.roles().map(move |(role, count)| match role {
                    Role::OperandB => -i64::from(count) * unit,
                    Role::OperandA | Role::Exchange => i64::from(count) * unit,
                })
            })
            .sum()
    }

    /// Combined value of the result buckets.
    pub fn result_value(&self) -> u64 {
        Denomination::ALL
            .into_iter()
            .map(|d| u64::from(self.count_at(BucketId::result(d))) * u64::from(d.value()))
            .sum()
    }

    /// The value the manipulation must end up representing, if the
    /// operation has a manipulative model.
    pub fn target_value(&self) -> Option<u64> {
        match self.operation {
            Operation::Addition => Some(u64::from(self.a) + u64::from(self.b)),
            Operation::Subtraction => u64::from(self.a).checked_sub(u64::from(self.b)),
            Operation::Multiplication | Operation::Division => None,
        }
    }

    /// Total objects of a role across all buckets.
    pub fn role_count(&self, role: Role) -> u32 {
        self.buckets().map(|(_, bucket)| bucket.count_of(role)).sum()
    }

    /// Buckets that currently hold enough objects to regroup.
    pub fn regroup_candidates(&self) -> Vec<BucketId> {
        if !self.operation.carries() {
            return Vec::new();
        }
        self.buckets()
            .filter(|(id, bucket)| bucket.count() >= 10 && id.denomination().next().is_some())
            .map(|(id, _)| id)
            .collect()
    }

    /// The answer digits the objects currently spell out, once the learner
    /// has finished manipulating them.
    ///
    /// For addition every source object must have been moved into the
    /// result area and no result bucket may hold ten or more. For
    /// subtraction every subtrahend object must have been taken away; the
    /// remaining minuend objects in each tier, in whichever bucket they sit,
    /// must be fewer than ten.
    pub fn readable_digits(&self) -> Option<PlaceDigits> {
        let per_tier: Vec<u32> = match self.operation {
            Operation::Addition => {
                let sources_empty = BucketId::ALL
                    .into_iter()
                    .filter(|id| !id.is_result())
                    .all(|id| self.count_at(id) == 0);
                if !sources_empty {
                    return None;
                }
                Denomination::ALL
                    .into_iter()
                    .map(|d| self.count_at(BucketId::result(d)))
                    .collect()
            }
            Operation::Subtraction => {
                if self.role_count(Role::OperandB) > 0 {
                    return None;
                }
                // Minuend objects count wherever they were dropped
                Denomination::ALL
                    .into_iter()
                    .map(|d| {
                        self.buckets()
                            .filter(|(id, _)| id.denomination() == d)
                            .map(|(_, bucket)| {
                                bucket.count_of(Role::OperandA) + bucket.count_of(Role::Exchange)
                            })
                            .sum()
                    })
                    .collect()
            }
            Operation::Multiplication | Operation::Division => return None,
        };

        if per_tier.iter().any(|count| *count >= 10) {
            return None;
        }

        Some(PlaceDigits {
            ones: per_tier[0],
            tens: per_tier[1],
            hundreds: per_tier[2],
        })
    }

    pub(crate) fn bucket_mut(&mut self, id: BucketId) -> &mut Bucket {
        self.buckets.entry(id).or_default()
    }
}
