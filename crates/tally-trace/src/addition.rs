//! Column addition with carries.

use tally_types::{Column, Operation};

use crate::generator::{assemble, digit_count, digits};
use crate::step::{CarryTerms, Step};

pub(crate) fn steps(a: u32, b: u32) -> Vec<Step> {
    let width = digit_count(a).max(digit_count(b));
    let digits_a = digits(a, width);
    let digits_b = digits(b, width);

    let mut steps = vec![Step::Start {
        operation: Operation::Addition,
        a,
        b,
    }];
    let mut answer = Vec::with_capacity(width + 1);
    let mut carry = 0;

    for (index, (&digit_a, &digit_b)) in digits_a.iter().zip(&digits_b).enumerate() {
        let column = Column::new(index);

        steps.push(Step::FocusColumn {
            column,
            digit_a,
            digit_b,
        });

        let sum = digit_a + digit_b + carry;
        if carry > 0 {
            steps.push(Step::AddCarry {
                column,
                carry,
                terms: CarryTerms::Sum {
                    digit_a,
                    digit_b,
                    sum,
                },
            });
        } else {
            steps.push(Step::CalcSum {
                column,
                digit_a,
                digit_b,
                sum,
            });
        }

        let new_carry = sum / 10;
        let digit = sum % 10;
        if new_carry > 0 {
            steps.push(Step::CarryOver {
                column,
                total: sum,
                carry: new_carry,
                digit,
            });
        }

        answer.push(digit);
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

    // Postcondition: column algorithm agrees with integer addition
    debug_assert_eq!(result, u64::from(a) + u64::from(b));

    steps.push(Step::End { result });
    steps
}
