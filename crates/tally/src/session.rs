//! One practice problem: trace, manipulative model and written grid.
//!
//! A [`Session`] is the explicit context the presentation layer holds. It
//! generates the narrated trace once, owns the place-value model, and keeps
//! the answer grid in step with the learner's gestures when the settings
//! ask for it.

use tally_config::{SessionSettings, TallyConfig};
use tally_model::{Effect, ModelObserver, PlaceValueModel, SubscriptionId};
use tally_trace::{ErrorReason, Trace, generate_narrated_trace};
use tally_types::{BucketId, Column, CountingObject, Denomination, Operand, Operation};

use crate::error::{Result, SessionError};
use crate::grid::{AnswerGrid, AnswerStatus};

/// Outcome of checking the answer row against the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct(u64),
    Incorrect { entered: u64, expected: u64 },
    /// The answer row has a blank below its leading digit.
    Incomplete,
    /// Nothing entered yet.
    Empty,
    /// The trace ended in ERROR, so there is no answer to compare with.
    Unworkable(ErrorReason),
}

/// A practice session for one problem.
#[derive(Debug)]
pub struct Session {
    config: TallyConfig,
    operation: Operation,
    a: u32,
    b: u32,
    trace: Trace,
    model: PlaceValueModel,
    grid: AnswerGrid,
    /// Columns whose carry cell holds the "1" written when a ten was lent in.
    received: Vec<bool>,
    /// Whether the answer row currently holds digits read off the model.
    auto_filled: bool,
}

impl Session {
    /// Starts a session for `a <op> b`.
    ///
    /// Division has no column algorithm and is rejected. Other unworkable
    /// problems (a negative difference, a multi-digit multiplier) still
    /// start: their trace ends with an ERROR step.
    pub fn start(operation: Operation, a: u32, b: u32, config: &TallyConfig) -> Result<Self> {
        if operation == Operation::Division {
            return Err(SessionError::UnsupportedOperation(operation));
        }

        let trace = generate_narrated_trace(operation, a, b, config.display.locale)?;
        let model = PlaceValueModel::for_session(a, b, operation);

        tracing::info!(operation = %operation, a, b, steps = trace.len(), "session started");

        let grid = AnswerGrid::new(a, b);
        Ok(Self {
            config: config.clone(),
            operation,
            a,
            b,
            trace,
            model,
            received: vec![false; grid.width()],
            auto_filled: false,
            grid,
        })
    }

    /// Starts a session from raw text fields.
    ///
    /// Rejects blank or non-numeric operands, unknown or unsupported
    /// operations, and subtractions whose answer would be negative.
    pub fn from_input(operation: &str, a: &str, b: &str, config: &TallyConfig) -> Result<Self> {
        let operation: Operation = operation.trim().parse()?;
        let a = parse_operand(a)?;
        let b = parse_operand(b)?;

        if operation == Operation::Subtraction && a < b {
            return Err(SessionError::MinuendTooSmall { a, b });
        }

        Self::start(operation, a, b, config)
    }

    /// Starts a session with the configured default operation.
    pub fn with_default_operation(a: u32, b: u32, config: &TallyConfig) -> Result<Self> {
        Self::start(config.session.default_operation, a, b, config)
    }

    /// Replaces the operands, keeping operation, settings and observers.
    pub fn restart(&mut self, a: u32, b: u32) -> Result<()> {
        self.trace = generate_narrated_trace(self.operation, a, b, self.config.display.locale)?;
        self.model.initialize(a, b, self.operation);
        self.grid = AnswerGrid::new(a, b);
        self.received = vec![false; self.grid.width()];
        self.auto_filled = false;
        self.a = a;
        self.b = b;

        tracing::info!(operation = %self.operation, a, b, "session restarted");
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn operands(&self) -> (u32, u32) {
        (self.a, self.b)
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn model(&self) -> &PlaceValueModel {
        &self.model
    }

    pub fn grid(&self) -> &AnswerGrid {
        &self.grid
    }

    pub fn settings(&self) -> SessionSettings {
        self.config.session
    }

    pub fn config(&self) -> &TallyConfig {
        &self.config
    }

    pub fn count_at(&self, bucket: BucketId) -> u32 {
        self.model.count_at(bucket)
    }

    /// Registers a model observer; it stays registered across restarts.
    pub fn subscribe(&mut self, observer: impl ModelObserver + 'static) -> SubscriptionId {
        self.model.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.model.unsubscribe(id)
    }

    // ========================================================================
    // Model gestures
    // ========================================================================

    pub fn move_object(
        &mut self,
        object: CountingObject,
        from: BucketId,
        to: BucketId,
    ) -> Result<Vec<Effect>> {
        let effects = self.model.move_object(object, from, to)?;
        self.mirror(&effects);
        Ok(effects)
    }

    pub fn regroup(&mut self, bucket: BucketId) -> Result<Vec<Effect>> {
        let effects = self.model.regroup(bucket)?;
        self.mirror(&effects);
        Ok(effects)
    }

    pub fn unbundle(&mut self, bucket: BucketId) -> Result<Vec<Effect>> {
        let effects = self.model.unbundle(bucket)?;
        self.mirror(&effects);
        Ok(effects)
    }

    pub fn cancel_pair(&mut self, denomination: Denomination) -> Result<Vec<Effect>> {
        let effects = self.model.cancel_pair(denomination)?;
        self.mirror(&effects);
        Ok(effects)
    }

    // ========================================================================
    // Grid editing
    // ========================================================================

    pub fn enter_answer_digit(&mut self, column: Column, digit: u8) -> Result<()> {
        self.grid.set_answer(column, digit)?;
        self.auto_filled = false;
        Ok(())
    }

    pub fn clear_answer_digit(&mut self, column: Column) -> Result<()> {
        self.grid.clear_answer(column)?;
        self.auto_filled = false;
        Ok(())
    }

    pub fn enter_carry_digit(&mut self, column: Column, digit: u8) -> Result<()> {
        self.grid.set_carry(column, digit)?;
        self.set_received(column, false);
        Ok(())
    }

    pub fn answer_status(&self) -> AnswerStatus {
        self.grid.answer_status()
    }

    /// Compares the answer row with the trace's END value.
    pub fn check_answer(&self) -> Verdict {
        let Some(expected) = self.trace.result() else {
            return self
                .trace
                .error()
                .map_or(Verdict::Empty, Verdict::Unworkable);
        };

        match self.grid.answer_status() {
            AnswerStatus::Empty => Verdict::Empty,
            AnswerStatus::Incomplete => Verdict::Incomplete,
            AnswerStatus::Complete(entered) if entered == expected => {
                tracing::info!(
                    operation = %self.operation,
                    a = self.a,
                    b = self.b,
                    answer = entered,
                    "answer correct"
                );
                Verdict::Correct(entered)
            }
            AnswerStatus::Complete(entered) => Verdict::Incorrect { entered, expected },
        }
    }

    /// Writes gesture effects into the grid according to the settings.
    fn mirror(&mut self, effects: &[Effect]) {
        if self.config.session.auto_carry {
            for effect in effects {
                match *effect {
                    Effect::Regrouped { into, .. } if self.operation == Operation::Addition => {
                        self.mark_carry(into.denomination().column(), 1);
                    }
                    Effect::Unbundled { from, into } if from.operand() == Some(Operand::A) => {
                        self.mark_lend(from.denomination().column());
                        let target = into.denomination().column();
                        self.mark_carry(target, 1);
                        self.set_received(target, true);
                    }
                    _ => {}
                }
            }
        }

        if self.config.session.auto_answer {
            self.fill_answer();
        }
    }

    /// Crosses out the lending column's digit and writes it one lower.
    ///
    /// Starts from the mark already in the cell, or the minuend's digit when
    /// the cell is blank. A column that was itself lent a ten counts from
    /// its digit plus ten.
    fn mark_lend(&mut self, column: Column) {
        let digit = u64::from(self.a) / column.place_value() % 10;
        let current = match self.grid.carry_digit(column) {
            Some(_) if self.received.get(column.index()).copied().unwrap_or(false) => digit + 10,
            Some(mark) => u64::from(mark),
            None => digit,
        };

        let Some(lowered) = current.checked_sub(1).and_then(|d| u8::try_from(d).ok()) else {
            tracing::debug!(column = column.index(), "no digit left to lend from");
            return;
        };
        self.mark_carry(column, lowered);
        self.set_received(column, false);
    }

    fn mark_carry(&mut self, column: Column, digit: u8) {
        if let Err(error) = self.grid.set_carry(column, digit) {
            tracing::debug!(%error, "carry mark outside grid");
        }
    }

    fn set_received(&mut self, column: Column, received: bool) {
        if let Some(flag) = self.received.get_mut(column.index()) {
            *flag = received;
        }
    }

    /// Copies the model's readable value into the answer row, or blanks
    /// the digits it copied earlier once the model is no longer readable.
    fn fill_answer(&mut self) {
        let Some(digits) = self.model.state().readable_digits() else {
            if self.auto_filled {
                for index in 0..self.grid.width() {
                    if let Err(error) = self.grid.clear_answer(Column::new(index)) {
                        tracing::debug!(%error, "answer cell not cleared");
                    }
                }
                self.auto_filled = false;
            }
            return;
        };

        let by_column = [digits.ones, digits.tens, digits.hundreds];
        let top = by_column.iter().rposition(|d| *d > 0).unwrap_or(0);

        for index in 0..self.grid.width() {
            let column = Column::new(index);
            let cell = match by_column.get(index) {
                Some(digit) if index <= top => self.grid.set_answer(column, *digit as u8),
                _ => self.grid.clear_answer(column),
            };
            if let Err(error) = cell {
                tracing::debug!(%error, "answer cell not filled");
            }
        }
        self.auto_filled = true;
    }
}

fn parse_operand(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    trimmed
        .parse()
        .map_err(|_| SessionError::InvalidOperand(trimmed.to_string()))
}
