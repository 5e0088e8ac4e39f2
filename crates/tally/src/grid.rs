//! The written-out problem: a carry/borrow row and an answer row.
//!
//! Both rows have one cell per column, ones first. Cells are blank or hold a
//! single digit. The grid is one column wider than the longer operand so a
//! final carry has somewhere to go.

use tally_types::Column;

use crate::error::{Result, SessionError};

/// What the answer row currently spells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    /// No digit entered.
    Empty,
    /// A blank cell sits below the leading digit.
    Incomplete,
    /// Contiguous digits from the leading digit down to the ones column.
    Complete(u64),
}

/// Carry and answer rows for one problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerGrid {
    carries: Vec<Option<u8>>,
    answer: Vec<Option<u8>>,
}

impl AnswerGrid {
    /// Creates a blank grid sized for `a` and `b`.
    pub fn new(a: u32, b: u32) -> Self {
        let width = digit_count(a).max(digit_count(b)) + 1;
        Self::with_width(width)
    }

    pub fn with_width(width: usize) -> Self {
        Self {
            carries: vec![None; width],
            answer: vec![None; width],
        }
    }

    pub fn width(&self) -> usize {
        self.answer.len()
    }

    pub fn answer_digit(&self, column: Column) -> Option<u8> {
        self.answer.get(column.index()).copied().flatten()
    }

    pub fn carry_digit(&self, column: Column) -> Option<u8> {
        self.carries.get(column.index()).copied().flatten()
    }

    pub fn set_answer(&mut self, column: Column, digit: u8) -> Result<()> {
        let cell = self.cell(Row::Answer, column)?;
        *cell = Some(check_digit(digit)?);
        Ok(())
    }

    pub fn clear_answer(&mut self, column: Column) -> Result<()> {
        *self.cell(Row::Answer, column)? = None;
        Ok(())
    }

    pub fn set_carry(&mut self, column: Column, digit: u8) -> Result<()> {
        let cell = self.cell(Row::Carry, column)?;
        *cell = Some(check_digit(digit)?);
        Ok(())
    }

    pub fn clear_carry(&mut self, column: Column) -> Result<()> {
        *self.cell(Row::Carry, column)? = None;
        Ok(())
    }

    /// Reads the answer row from the most significant column down.
    ///
    /// Blank cells above the leading digit are ignored; a blank below it
    /// makes the answer incomplete rather than silently closing the gap.
    pub fn answer_status(&self) -> AnswerStatus {
        let mut value: Option<u64> = None;
        for cell in self.answer.iter().rev() {
            match (cell, value) {
                (None, None) => {}
                (None, Some(_)) => return AnswerStatus::Incomplete,
                (Some(d), acc) => {
                    value = Some(acc.unwrap_or(0) * 10 + u64::from(*d));
                }
            }
        }
        value.map_or(AnswerStatus::Empty, AnswerStatus::Complete)
    }

    /// Blanks both rows.
    pub fn clear(&mut self) {
        self.carries.fill(None);
        self.answer.fill(None);
    }

    fn cell(&mut self, row: Row, column: Column) -> Result<&mut Option<u8>> {
        let width = self.width();
        let cells = match row {
            Row::Carry => &mut self.carries,
            Row::Answer => &mut self.answer,
        };
        cells
            .get_mut(column.index())
            .ok_or(SessionError::ColumnOutOfRange { column, width })
    }
}

#[derive(Clone, Copy)]
enum Row {
    Carry,
    Answer,
}

fn check_digit(digit: u8) -> Result<u8> {
    if digit > 9 {
        return Err(SessionError::InvalidDigit(digit));
    }
    Ok(digit)
}

fn digit_count(value: u32) -> usize {
    value.checked_ilog10().map_or(1, |log| log as usize + 1)
}
