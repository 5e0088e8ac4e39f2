//! The session-owned model that drives the kernel.
//!
//! [`PlaceValueModel`] holds the current [`State`], applies one command at a
//! time through [`apply_command`], and notifies registered observers after
//! every accepted mutation. Rejected commands leave the state untouched and
//! notify nobody.

use std::fmt;

use tally_types::{BucketId, CountingObject, Denomination, Operation};

use crate::command::Command;
use crate::effects::Effect;
use crate::kernel::{ModelError, apply_command, initialize};
use crate::state::State;

/// Receives the new state and its effects after every accepted command.
pub trait ModelObserver {
    fn on_change(&mut self, state: &State, effects: &[Effect]);
}

impl<F> ModelObserver for F
where
    F: FnMut(&State, &[Effect]),
{
    fn on_change(&mut self, state: &State, effects: &[Effect]) {
        self(state, effects);
    }
}

/// Handle returned by [`PlaceValueModel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Place-value buckets for one practice session.
pub struct PlaceValueModel {
    state: State,
    observers: Vec<(SubscriptionId, Box<dyn ModelObserver>)>,
    next_subscription: u64,
}

impl PlaceValueModel {
    /// Creates a model with every bucket empty.
    pub fn new() -> Self {
        Self {
            state: State::new(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Creates a model already initialized for a problem.
    pub fn for_session(a: u32, b: u32, operation: Operation) -> Self {
        let mut model = Self::new();
        model.state = State::for_session(a, b, operation);
        model
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn count_at(&self, bucket: BucketId) -> u32 {
        self.state.count_at(bucket)
    }

    /// Resets all buckets for a new problem. Fully replaces prior state;
    /// observers stay registered.
    pub fn initialize(&mut self, a: u32, b: u32, operation: Operation) -> Vec<Effect> {
        let (state, effects) = initialize(a, b, operation);
        tracing::debug!(a, b, operation = %operation, "model initialized");
        self.commit(state, &effects);
        effects
    }

    pub fn move_object(
        &mut self,
        object: CountingObject,
        from: BucketId,
        to: BucketId,
    ) -> Result<Vec<Effect>, ModelError> {
        self.apply(Command::move_object(object, from, to))
    }

    pub fn regroup(&mut self, bucket: BucketId) -> Result<Vec<Effect>, ModelError> {
        self.apply(Command::regroup(bucket))
    }

    pub fn unbundle(&mut self, bucket: BucketId) -> Result<Vec<Effect>, ModelError> {
        self.apply(Command::unbundle(bucket))
    }

    pub fn cancel_pair(&mut self, denomination: Denomination) -> Result<Vec<Effect>, ModelError> {
        self.apply(Command::cancel_pair(denomination))
    }

    /// Applies any command. On rejection the state is unchanged.
    pub fn apply(&mut self, cmd: Command) -> Result<Vec<Effect>, ModelError> {
        match apply_command(&self.state, cmd) {
            Ok((state, effects)) => {
                tracing::debug!(?cmd, effects = effects.len(), "model command applied");
                self.commit(state, &effects);
                Ok(effects)
            }
            Err(error) => {
                tracing::debug!(?cmd, %error, "model command rejected");
                Err(error)
            }
        }
    }

    /// Registers an observer notified after every accepted command.
    pub fn subscribe(&mut self, observer: impl ModelObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn commit(&mut self, state: State, effects: &[Effect]) {
        self.state = state;
        for (_, observer) in &mut self.observers {
            observer.on_change(&self.state, effects);
        }
    }
}

impl Default for PlaceValueModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlaceValueModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceValueModel")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}
