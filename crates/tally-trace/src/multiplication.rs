//! Column multiplication by a single-digit multiplier.
//!
//! Multi-digit multipliers need partial-product rows, which the worksheet
//! does not lay out; they end the trace with an ERROR step.

use tally_types::{Column, Operation};

use crate::generator::{assemble, digit_count, digits};
use crate::step::{CarryTerms, ErrorReason, Step};

pub(crate) fn steps(a: u32, multiplier: u32) -> Vec<Step> {
    let mut steps = vec![Step::Start {
        operation: Operation::Multiplication,
        a,
        b: multiplier,
    }];

    if multiplier > 9 {
        steps.push(Step::Error {
            reason: ErrorReason::MultiDigitMultiplier,
        });
        return steps;
    }

    let width = digit_count(a);
    let mut answer = Vec::with_capacity(width + 1);
    let mut carry = 0;

    for (index, &digit) in digits(a, width).iter().enumerate() {
        let column = Column::new(index);

        steps.push(Step::FocusColumn {
            column,
            digit_a: digit,
            digit_b: multiplier,
        });

        let base_product = digit * multiplier;
        let total = base_product + carry;
        if carry > 0 {
            steps.push(Step::AddCarry {
                column,
                carry,
                terms: CarryTerms::Product {
                    digit,
                    multiplier,
                    base_product,
                    total,
                },
            });
        } else {
            steps.push(Step::CalcProd {
                column,
                digit,
                multiplier,
                product: total,
            });
        }

        let new_carry = total / 10;
        let written = total % 10;
        if new_carry > 0 {
            steps.push(Step::CarryOver {
                column,
                total,
                carry: new_carry,
                digit: written,
            });
        }

        answer.push(written);
        carry = new_carry;
    }

    if carry > 0 {
        answer.push(carry);
        steps.push(Step::FinalCarry {
            column: Column::new(width),
            carry,
        });
    }

    let result = assemble(&answer);
    debug_assert_eq!(result, u64::from(a) * u64::from(multiplier));

    steps.push(Step::End { result });
    steps
}
