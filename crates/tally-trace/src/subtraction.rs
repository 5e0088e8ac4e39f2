//! Column subtraction with borrowing.
//!
//! Borrowing is simulated on a private array of current column values.
//! A borrow skips over zero columns to the nearest non-zero one, decrements
//! it and turns every skipped zero into 9, exactly as done on paper.

use tally_types::{Column, Operation};

use crate::generator::{assemble, digit_count, digits};
use crate::step::{ErrorReason, Step};

pub(crate) fn steps(a: u32, b: u32) -> Vec<Step> {
    let mut steps = vec![Step::Start {
        operation: Operation::Subtraction,
        a,
        b,
    }];

    if a < b {
        steps.push(Step::Error {
            reason: ErrorReason::MinuendTooSmall,
        });
        return steps;
    }

    let width = digit_count(a).max(digit_count(b));
    let mut current = digits(a, width);
    let digits_b = digits(b, width);
    let mut answer = Vec::with_capacity(width);

    for (index, &digit_b) in digits_b.iter().enumerate() {
        let column = Column::new(index);
        let mut value_a = current[index];

        steps.push(Step::FocusColumn {
            column,
            digit_a: value_a,
            digit_b,
        });

        if value_a < digit_b {
            let Some(source) = (index + 1..width).find(|&k| current[k] != 0) else {
                tracing::warn!(a, b, column = %column, "no column left to borrow from");
                steps.push(Step::Error {
                    reason: ErrorReason::NothingToBorrow,
                });
                return steps;
            };

            steps.push(Step::BorrowStart {
                from: Column::new(source),
                to: column,
                value_a,
                digit_b,
            });

            current[source] -= 1;
            for skipped in &mut current[index + 1..source] {
                // Only zeros are skipped
                debug_assert_eq!(*skipped, 0);
                *skipped = 9;
            }

            value_a += 10;
            current[index] = value_a;

            steps.push(Step::BorrowDone {
                column,
                value_a,
                digit_b,
            });
        }

        let diff = value_a - digit_b;
        steps.push(Step::CalcDiff {
            column,
            value_a,
            digit_b,
            diff,
        });
        answer.push(diff);
    }

    let result = assemble(&answer);

    // Postcondition: column algorithm agrees with integer subtraction
    debug_assert_eq!(result, u64::from(a - b));

    steps.push(Step::End { result });
    steps
}
