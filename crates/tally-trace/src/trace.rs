//! The immutable, narrated step sequence for one problem.

use serde::{Deserialize, Serialize};
use tally_types::{Column, Operation};

use crate::narration::Narrator;
use crate::step::{ErrorReason, Step, StepKind};

/// A step paired with the sentence shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarratedStep {
    pub step: Step,
    pub narration: String,
}

/// Ordered steps describing one execution of a column algorithm.
///
/// A trace always starts with [`Step::Start`] and ends with exactly one
/// terminal step: [`Step::End`] carrying the answer, or [`Step::Error`]
/// when the problem cannot be worked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    operation: Operation,
    a: u32,
    b: u32,
    steps: Vec<NarratedStep>,
}

impl Trace {
    /// Narrates raw generator output.
    pub(crate) fn narrate(
        operation: Operation,
        a: u32,
        b: u32,
        steps: Vec<Step>,
        narrator: &dyn Narrator,
    ) -> Self {
        // Invariant: START first, one terminal step last
        assert!(
            matches!(steps.first(), Some(Step::Start { .. })),
            "trace must begin with START"
        );
        assert!(
            steps.last().is_some_and(Step::is_terminal),
            "trace must end with END or ERROR"
        );
        debug_assert_eq!(steps.iter().filter(|s| s.is_terminal()).count(), 1);

        let steps = steps
            .into_iter()
            .map(|step| NarratedStep {
                narration: narrator.narrate(operation, &step),
                step,
            })
            .collect();

        Self {
            operation,
            a,
            b,
            steps,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn operands(&self) -> (u32, u32) {
        (self.a, self.b)
    }

    pub fn steps(&self) -> &[NarratedStep] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().map(|s| &s.step)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step kinds in order, convenient for comparing trace shapes.
    pub fn kinds(&self) -> Vec<StepKind> {
        self.iter().map(Step::kind).collect()
    }

    /// The narration sentences in order.
    pub fn narration(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.narration.as_str())
    }

    /// The answer, if the trace reached [`Step::End`].
    pub fn result(&self) -> Option<u64> {
        match self.steps.last().map(|s| &s.step) {
            Some(Step::End { result }) => Some(*result),
            _ => None,
        }
    }

    /// The reason the trace stopped early, if it did.
    pub fn error(&self) -> Option<ErrorReason> {
        match self.steps.last().map(|s| &s.step) {
            Some(Step::Error { reason }) => Some(*reason),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.result().is_some()
    }

    /// Steps that work on the given column, in order.
    pub fn steps_for(&self, column: Column) -> impl Iterator<Item = &Step> {
        self.iter().filter(move |s| s.column() == Some(column))
    }

    /// Number of steps of the given kind.
    pub fn count(&self, kind: StepKind) -> usize {
        self.iter().filter(|s| s.kind() == kind).count()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a NarratedStep;
    type IntoIter = std::slice::Iter<'a, NarratedStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
