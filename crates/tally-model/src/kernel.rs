//! The kernel - pure core of the place-value model.
//!
//! The kernel applies a command to a state and returns the next state plus
//! the effects describing the change. It never mutates the state it is
//! given, so a rejected command is a no-op for the caller.
//!
//! # Example
//!
//! ```
//! use tally_model::{Command, State, apply_command};
//! use tally_types::{BucketId, Denomination, Operation};
//!
//! let (state, _) = apply_command(&State::new(), Command::initialize(47, 38, Operation::Addition))?;
//! assert_eq!(state.count_at("source-A-1".parse()?), 7);
//!
//! // Nothing to regroup yet: rejected, state unchanged
//! assert!(apply_command(&state, Command::regroup(BucketId::result(Denomination::One))).is_err());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use tally_types::{BucketId, Denomination, Operand, Operation, Role};

use crate::command::Command;
use crate::effects::Effect;
use crate::state::State;

/// Number of objects exchanged for one object of the next denomination.
pub const REGROUP_SIZE: u32 = 10;

/// Applies a command, producing the next state and its effects.
pub fn apply_command(state: &State, cmd: Command) -> Result<(State, Vec<Effect>), ModelError> {
    match cmd {
        Command::Initialize { a, b, operation } => Ok(initialize(a, b, operation)),

        Command::MoveObject { object, from, to } => {
            // Precondition: both buckets accept the object's denomination
            if to.denomination() != object.denomination {
                return Err(ModelError::DenominationMismatch {
                    denomination: object.denomination,
                    bucket: to,
                });
            }
            if from.denomination() != object.denomination {
                return Err(ModelError::DenominationMismatch {
                    denomination: object.denomination,
                    bucket: from,
                });
            }
            if from == to {
                return Err(ModelError::SameBucket(from));
            }

            let mut next = state.clone();
            if !next.bucket_mut(from).remove_one(object.role) {
                return Err(ModelError::ObjectNotPresent {
                    bucket: from,
                    role: object.role,
                });
            }
            next.bucket_mut(to).add(object.role, 1);

            // Postcondition: moving never changes value
            assert_eq!(
                next.total_value(),
                state.total_value(),
                "move from {from} to {to} changed total value"
            );

            let mut effects = vec![
                Effect::BucketChanged {
                    bucket: from,
                    count: next.count_at(from),
                },
                Effect::BucketChanged {
                    bucket: to,
                    count: next.count_at(to),
                },
            ];
            push_regroup_available(&next, to, &mut effects);

            Ok((next, effects))
        }

        Command::Regroup { bucket } => {
            // Precondition: carrying session
            if !state.operation().carries() {
                return Err(ModelError::WrongDirection {
                    operation: state.operation(),
                });
            }

            let Some(next_denomination) = bucket.denomination().next() else {
                return Err(ModelError::TopDenomination(bucket));
            };

            let count = state.count_at(bucket);
            if count < REGROUP_SIZE {
                return Err(ModelError::NotEnoughToRegroup { bucket, count });
            }

            let into = BucketId::result(next_denomination);
            let mut next = state.clone();
            next.bucket_mut(bucket).drain(REGROUP_SIZE);
            next.bucket_mut(into).add(Role::Exchange, 1);

            // Postcondition: exactly ten left, exactly one arrived
            assert_eq!(next.count_at(bucket), count - REGROUP_SIZE);
            assert_eq!(next.count_at(into), state.count_at(into) + 1);
            // Postcondition: value conserved
            assert_eq!(
                next.total_value(),
                state.total_value(),
                "regroup of {bucket} changed total value"
            );

            let mut effects = vec![
                Effect::BucketChanged {
                    bucket,
                    count: next.count_at(bucket),
                },
                Effect::BucketChanged {
                    bucket: into,
                    count: next.count_at(into),
                },
                Effect::Regrouped {
                    from: bucket,
                    into,
                },
            ];
            push_regroup_available(&next, bucket, &mut effects);
            push_regroup_available(&next, into, &mut effects);

            Ok((next, effects))
        }

        Command::Unbundle { bucket } => {
            // Precondition: borrowing session
            if state.operation() != Operation::Subtraction {
                return Err(ModelError::NotSubtraction(state.operation()));
            }

            let Some(lower) = bucket.denomination().previous() else {
                return Err(ModelError::BottomDenomination(bucket));
            };

            let Some(role) = state.bucket(bucket).and_then(|b| b.first_drainable()) else {
                return Err(ModelError::EmptyBucket(bucket));
            };

            let into = match bucket {
                BucketId::Source { operand, .. } => BucketId::source(operand, lower),
                BucketId::Result(_) => BucketId::result(lower),
            };

            let mut next = state.clone();
            next.bucket_mut(bucket).remove_one(role);
            next.bucket_mut(into).add(role, REGROUP_SIZE);

            // Postcondition: value and difference conserved
            assert_eq!(next.total_value(), state.total_value());
            assert_eq!(
                next.difference_value(),
                state.difference_value(),
                "unbundle of {bucket} changed the difference"
            );

            let effects = vec![
                Effect::BucketChanged {
                    bucket,
                    count: next.count_at(bucket),
                },
                Effect::BucketChanged {
                    bucket: into,
                    count: next.count_at(into),
                },
                Effect::Unbundled { from: bucket, into },
            ];

            Ok((next, effects))
        }

        Command::CancelPair { denomination } => {
            if state.operation() != Operation::Subtraction {
                return Err(ModelError::NotSubtraction(state.operation()));
            }

            let minuend = BucketId::source(Operand::A, denomination);
            let subtrahend = BucketId::source(Operand::B, denomination);

            if state.count_of(minuend, Role::OperandA) == 0 {
                return Err(ModelError::ObjectNotPresent {
                    bucket: minuend,
                    role: Role::OperandA,
                });
            }
            if state.count_of(subtrahend, Role::OperandB) == 0 {
                return Err(ModelError::ObjectNotPresent {
                    bucket: subtrahend,
                    role: Role::OperandB,
                });
            }

            let mut next = state.clone();
            next.bucket_mut(minuend).remove_one(Role::OperandA);
            next.bucket_mut(subtrahend).remove_one(Role::OperandB);

            // Postcondition: taking away a matched pair keeps the difference
            assert_eq!(next.difference_value(), state.difference_value());

            let effects = vec![
                Effect::BucketChanged {
                    bucket: minuend,
                    count: next.count_at(minuend),
                },
                Effect::BucketChanged {
                    bucket: subtrahend,
                    count: next.count_at(subtrahend),
                },
                Effect::PairCancelled { denomination },
            ];

            Ok((next, effects))
        }
    }
}

/// Builds a fresh session state. Never fails.
pub fn initialize(a: u32, b: u32, operation: Operation) -> (State, Vec<Effect>) {
    let state = State::for_session(a, b, operation);

    // Postcondition: sources hold exactly the operands
    debug_assert_eq!(state.total_value(), u64::from(a) + u64::from(b));
    debug_assert_eq!(state.result_value(), 0);

    let mut effects = vec![Effect::Initialized { operation, a, b }];
    effects.extend(BucketId::ALL.into_iter().map(|bucket| Effect::BucketChanged {
        bucket,
        count: state.count_at(bucket),
    }));

    (state, effects)
}

fn push_regroup_available(state: &State, bucket: BucketId, effects: &mut Vec<Effect>) {
    if state.operation().carries()
        && bucket.denomination().next().is_some()
        && state.count_at(bucket) >= REGROUP_SIZE
    {
        effects.push(Effect::RegroupAvailable { bucket });
    }
}

/// Reasons a command is rejected. The state is left unchanged; callers
/// treat a rejection as "that gesture was not a valid exchange".
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    #[error("bucket {bucket} does not accept denomination {denomination}")]
    DenominationMismatch {
        denomination: Denomination,
        bucket: BucketId,
    },

    #[error("object is already in bucket {0}")]
    SameBucket(BucketId),

    #[error("bucket {bucket} holds no {role:?} object")]
    ObjectNotPresent { bucket: BucketId, role: Role },

    #[error("bucket {bucket} holds {count} objects, regrouping needs 10")]
    NotEnoughToRegroup { bucket: BucketId, count: u32 },

    #[error("bucket {0} is already the highest denomination")]
    TopDenomination(BucketId),

    #[error("bucket {0} is already the lowest denomination")]
    BottomDenomination(BucketId),

    #[error("bucket {0} is empty")]
    EmptyBucket(BucketId),

    #[error("regrouping upwards is not part of '{operation}'")]
    WrongDirection { operation: Operation },

    #[error("only subtraction takes objects apart or away, not '{0}'")]
    NotSubtraction(Operation),
}
