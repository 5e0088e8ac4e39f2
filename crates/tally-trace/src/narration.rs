//! Human-readable narration of trace steps.
//!
//! The generators only produce [`Step`] payloads; wording lives here so a
//! presentation layer can plug in its own [`Narrator`].

use tally_types::{Column, Locale, Operation};

use crate::step::{CarryTerms, ErrorReason, Step};

/// Renders a step as a sentence addressed to the learner.
pub trait Narrator {
    fn narrate(&self, operation: Operation, step: &Step) -> String;
}

/// Returns the built-in narrator for a locale.
pub fn narrator_for(locale: Locale) -> &'static dyn Narrator {
    match locale {
        Locale::Japanese => &JapaneseNarrator,
        Locale::English => &EnglishNarrator,
    }
}

// ============================================================================
// Japanese
// ============================================================================

/// Narration in the phrasing used on the worksheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct JapaneseNarrator;

impl JapaneseNarrator {
    fn place(column: Column) -> String {
        if column == Column::ONES {
            "一".to_string()
        } else {
            column.place_value().to_string()
        }
    }
}

impl Narrator for JapaneseNarrator {
    fn narrate(&self, operation: Operation, step: &Step) -> String {
        let sym = operation.symbol();
        match step {
            Step::Start { a, b, .. } => format!("{a} {sym} {b} の計算をはじめます。"),
            Step::FocusColumn {
                column,
                digit_a,
                digit_b,
            } => {
                if operation == Operation::Multiplication {
                    format!("{digit_a} × {digit_b} を計算します。")
                } else {
                    format!(
                        "{}の位を計算します。{digit_a} {sym} {digit_b} です。",
                        Self::place(*column)
                    )
                }
            }
            Step::AddCarry {
                carry,
                terms:
                    CarryTerms::Sum {
                        digit_a,
                        digit_b,
                        sum,
                    },
                ..
            } => format!(
                "繰り上がりの {carry} も足して、{digit_a} + {digit_b} + {carry} = {sum} です。"
            ),
            Step::AddCarry {
                carry,
                terms:
                    CarryTerms::Product {
                        digit,
                        multiplier,
                        base_product,
                        total,
                    },
                ..
            } => format!(
                "{digit}×{multiplier}={base_product} に、繰り上がりの {carry} を足して {total} です。"
            ),
            Step::CalcSum {
                digit_a,
                digit_b,
                sum,
                ..
            } => format!("{digit_a} + {digit_b} = {sum} です。"),
            Step::CalcProd {
                digit,
                multiplier,
                product,
                ..
            } => format!("{digit}×{multiplier}={product} です。"),
            Step::CarryOver {
                total,
                carry,
                digit,
                ..
            } => {
                if operation == Operation::Multiplication {
                    format!("{total} なので、{digit} を書いて {carry} を繰り上げます。")
                } else {
                    format!("{total} なので、{carry} を繰り上げます。")
                }
            }
            Step::FinalCarry { carry, .. } => format!("最後に {carry} を書きます。"),
            Step::BorrowStart {
                value_a, digit_b, ..
            } => format!("{value_a} から {digit_b} は引けないので、上の位から借ります。"),
            Step::BorrowDone {
                value_a, digit_b, ..
            } => format!("借りました。{value_a} - {digit_b} になります。"),
            Step::CalcDiff {
                value_a,
                digit_b,
                diff,
                ..
            } => format!("{value_a} - {digit_b} = {diff} です。"),
            Step::End { result } => format!("答えは {result} です。"),
            Step::Error { reason } => match reason {
                ErrorReason::MinuendTooSmall => {
                    "ひかれる数がひく数より小さい計算は、まだできません。".to_string()
                }
                ErrorReason::MultiDigitMultiplier => {
                    "掛け数は1桁まで対応しています。".to_string()
                }
                ErrorReason::NothingToBorrow => "計算エラー".to_string(),
            },
        }
    }
}

// ============================================================================
// English
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishNarrator;

impl EnglishNarrator {
    fn place(column: Column) -> String {
        match column.index() {
            0 => "ones".to_string(),
            1 => "tens".to_string(),
            2 => "hundreds".to_string(),
            3 => "thousands".to_string(),
            _ => format!("{}s", column.place_value()),
        }
    }
}

impl Narrator for EnglishNarrator {
    fn narrate(&self, operation: Operation, step: &Step) -> String {
        let sym = operation.symbol();
        match step {
            Step::Start { a, b, .. } => format!("Let's work out {a} {sym} {b}."),
            Step::FocusColumn {
                column,
                digit_a,
                digit_b,
            } => {
                if operation == Operation::Multiplication {
                    format!("Multiply {digit_a} × {digit_b}.")
                } else {
                    format!(
                        "Now the {} column: {digit_a} {sym} {digit_b}.",
                        Self::place(*column)
                    )
                }
            }
            Step::AddCarry {
                carry,
                terms:
                    CarryTerms::Sum {
                        digit_a,
                        digit_b,
                        sum,
                    },
                ..
            } => format!(
                "Add the carried {carry} as well: {digit_a} + {digit_b} + {carry} = {sum}."
            ),
            Step::AddCarry {
                carry,
                terms:
                    CarryTerms::Product {
                        digit,
                        multiplier,
                        base_product,
                        total,
                    },
                ..
            } => format!(
                "{digit} × {multiplier} = {base_product}, plus the carried {carry} makes {total}."
            ),
            Step::CalcSum {
                digit_a,
                digit_b,
                sum,
                ..
            } => format!("{digit_a} + {digit_b} = {sum}."),
            Step::CalcProd {
                digit,
                multiplier,
                product,
                ..
            } => format!("{digit} × {multiplier} = {product}."),
            Step::CarryOver {
                total,
                carry,
                digit,
                ..
            } => format!("{total} is 10 or more, so write {digit} and carry {carry}."),
            Step::FinalCarry { carry, .. } => format!("Finally, write the {carry} in front."),
            Step::BorrowStart {
                from,
                value_a,
                digit_b,
                ..
            } => format!(
                "{value_a} is smaller than {digit_b}, so borrow from the {} column.",
                Self::place(*from)
            ),
            Step::BorrowDone {
                value_a, digit_b, ..
            } => format!("Borrowed. Now it is {value_a} - {digit_b}."),
            Step::CalcDiff {
                value_a,
                digit_b,
                diff,
                ..
            } => format!("{value_a} - {digit_b} = {diff}."),
            Step::End { result } => format!("The answer is {result}."),
            Step::Error { reason } => match reason {
                ErrorReason::MinuendTooSmall => {
                    "The first number must not be smaller than the second.".to_string()
                }
                ErrorReason::MultiDigitMultiplier => {
                    "Only single-digit multipliers are supported.".to_string()
                }
                ErrorReason::NothingToBorrow => "Calculation error.".to_string(),
            },
        }
    }
}
