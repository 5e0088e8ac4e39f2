//! Unit tests for the session facade

use std::cell::RefCell;
use std::rc::Rc;

use test_case::test_case;

use super::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn config() -> TallyConfig {
    TallyConfig::default()
}

fn config_with(auto_answer: bool, auto_carry: bool) -> TallyConfig {
    let mut config = TallyConfig::default();
    config.session.auto_answer = auto_answer;
    config.session.auto_carry = auto_carry;
    config
}

fn source(operand: Operand, denomination: Denomination) -> BucketId {
    BucketId::source(operand, denomination)
}

fn result(denomination: Denomination) -> BucketId {
    BucketId::result(denomination)
}

/// Moves every source object of one tier into the result bucket.
fn move_tier(session: &mut Session, denomination: Denomination) {
    for (operand, role) in [(Operand::A, Role::OperandA), (Operand::B, Role::OperandB)] {
        let from = source(operand, denomination);
        while session.count_at(from) > 0 {
            session
                .move_object(
                    CountingObject::new(denomination, role),
                    from,
                    result(denomination),
                )
                .expect("move should succeed");
        }
    }
}

fn enter_number(session: &mut Session, value: u64) {
    let text = value.to_string();
    for (index, ch) in text.chars().rev().enumerate() {
        let digit = ch.to_digit(10).expect("decimal digit") as u8;
        session
            .enter_answer_digit(Column::new(index), digit)
            .expect("digit fits the grid");
    }
}

// ============================================================================
// Starting a session
// ============================================================================

#[test]
fn start_generates_trace_and_model() {
    let session = Session::start(Operation::Addition, 47, 38, &config()).expect("start");

    assert_eq!(session.operands(), (47, 38));
    assert_eq!(session.trace().result(), Some(85));
    assert_eq!(session.count_at(source(Operand::A, Denomination::One)), 7);
    assert_eq!(session.count_at(source(Operand::B, Denomination::Ten)), 3);
    assert_eq!(session.grid().width(), 3);
    assert_eq!(session.answer_status(), AnswerStatus::Empty);
}

#[test]
fn start_rejects_division() {
    assert_eq!(
        Session::start(Operation::Division, 8, 2, &config()).err(),
        Some(SessionError::UnsupportedOperation(Operation::Division))
    );
}

#[test]
fn default_operation_comes_from_settings() {
    let mut config = config();
    config.session.default_operation = Operation::Multiplication;

    let session = Session::with_default_operation(27, 3, &config).expect("start");

    assert_eq!(session.operation(), Operation::Multiplication);
    assert_eq!(session.trace().result(), Some(81));
}

#[test]
fn narration_follows_locale() {
    let mut config = config();
    config.display.locale = Locale::English;

    let session = Session::start(Operation::Addition, 47, 38, &config).expect("start");

    assert_eq!(
        session.trace().narration().next(),
        Some("Let's work out 47 + 38.")
    );
}

#[test]
fn from_input_trims_and_parses() {
    let session = Session::from_input(" sub ", " 100", "1 ", &config()).expect("start");

    assert_eq!(session.operation(), Operation::Subtraction);
    assert_eq!(session.operands(), (100, 1));
    assert_eq!(session.trace().result(), Some(99));
}

#[test_case("add", "", "3"; "blank first operand")]
#[test_case("add", "4", "  "; "blank second operand")]
#[test_case("add", "four", "3"; "word operand")]
#[test_case("add", "-4", "3"; "negative operand")]
#[test_case("add", "4.5", "3"; "fractional operand")]
fn from_input_rejects_non_numeric(op: &str, a: &str, b: &str) {
    assert!(matches!(
        Session::from_input(op, a, b, &config()),
        Err(SessionError::InvalidOperand(_))
    ));
}

#[test]
fn from_input_rejects_unknown_operation() {
    assert!(matches!(
        Session::from_input("pow", "2", "3", &config()),
        Err(SessionError::UnknownOperation(_))
    ));
    assert_eq!(
        Session::from_input("div", "8", "2", &config()).err(),
        Some(SessionError::UnsupportedOperation(Operation::Division))
    );
}

#[test]
fn from_input_rejects_negative_difference() {
    assert_eq!(
        Session::from_input("sub", "5", "7", &config()).err(),
        Some(SessionError::MinuendTooSmall { a: 5, b: 7 })
    );
}

// ============================================================================
// Answer grid
// ============================================================================

#[test_case(0, 0, 2)]
#[test_case(9, 9, 2)]
#[test_case(47, 38, 3)]
#[test_case(999, 1, 4)]
#[test_case(1, 999, 4)]
fn grid_is_one_wider_than_longest_operand(a: u32, b: u32, width: usize) {
    assert_eq!(AnswerGrid::new(a, b).width(), width);
}

#[test]
fn leading_blanks_are_ignored() {
    let mut grid = AnswerGrid::new(999, 1);
    grid.set_answer(Column::new(1), 8).expect("in range");
    grid.set_answer(Column::ONES, 5).expect("in range");

    assert_eq!(grid.answer_status(), AnswerStatus::Complete(85));
}

#[test]
fn blank_gap_is_incomplete() {
    let mut grid = AnswerGrid::new(999, 1);
    grid.set_answer(Column::new(2), 1).expect("in range");
    grid.set_answer(Column::ONES, 5).expect("in range");

    assert_eq!(grid.answer_status(), AnswerStatus::Incomplete);
}

#[test]
fn blank_ones_is_incomplete() {
    let mut grid = AnswerGrid::new(47, 38);
    grid.set_answer(Column::new(1), 8).expect("in range");

    assert_eq!(grid.answer_status(), AnswerStatus::Incomplete);
}

#[test]
fn zero_answer_is_complete() {
    let mut grid = AnswerGrid::new(5, 5);
    grid.set_answer(Column::ONES, 0).expect("in range");

    assert_eq!(grid.answer_status(), AnswerStatus::Complete(0));
}

#[test]
fn grid_rejects_bad_cells() {
    let mut session = Session::start(Operation::Addition, 47, 38, &config()).expect("start");

    assert_eq!(
        session.enter_answer_digit(Column::ONES, 10),
        Err(SessionError::InvalidDigit(10))
    );
    assert_eq!(
        session.enter_carry_digit(Column::new(3), 1),
        Err(SessionError::ColumnOutOfRange {
            column: Column::new(3),
            width: 3
        })
    );
}

#[test]
fn clearing_a_digit_reopens_the_answer() {
    let mut session = Session::start(Operation::Addition, 47, 38, &config()).expect("start");
    enter_number(&mut session, 85);
    assert_eq!(session.answer_status(), AnswerStatus::Complete(85));

    session
        .clear_answer_digit(Column::ONES)
        .expect("in range");

    assert_eq!(session.answer_status(), AnswerStatus::Incomplete);
    assert_eq!(session.check_answer(), Verdict::Incomplete);
}

// ============================================================================
// Checking answers
// ============================================================================

#[test]
fn check_answer_verdicts() {
    let mut session = Session::start(Operation::Addition, 47, 38, &config()).expect("start");
    assert_eq!(session.check_answer(), Verdict::Empty);

    enter_number(&mut session, 75);
    assert_eq!(
        session.check_answer(),
        Verdict::Incorrect {
            entered: 75,
            expected: 85
        }
    );

    enter_number(&mut session, 85);
    assert_eq!(session.check_answer(), Verdict::Correct(85));
}

#[test_case(Operation::Subtraction, 5, 7, ErrorReason::MinuendTooSmall)]
#[test_case(Operation::Multiplication, 27, 13, ErrorReason::MultiDigitMultiplier)]
fn unworkable_problems_have_no_answer(operation: Operation, a: u32, b: u32, reason: ErrorReason) {
    let mut session = Session::start(operation, a, b, &config()).expect("start");
    enter_number(&mut session, 1);

    assert_eq!(session.check_answer(), Verdict::Unworkable(reason));
}

// ============================================================================
// Mirroring gestures into the grid
// ============================================================================

#[test]
fn regroup_marks_carry() {
    let mut session = Session::start(Operation::Addition, 47, 38, &config()).expect("start");
    move_tier(&mut session, Denomination::One);
    assert_eq!(session.grid().carry_digit(Column::new(1)), None);

    session
        .regroup(result(Denomination::One))
        .expect("regroup should succeed");

    assert_eq!(session.grid().carry_digit(Column::new(1)), Some(1));
    assert_eq!(session.grid().carry_digit(Column::ONES), None);
}

#[test]
fn carry_not_marked_when_disabled() {
    let mut session =
        Session::start(Operation::Addition, 47, 38, &config_with(false, false)).expect("start");
    move_tier(&mut session, Denomination::One);

    session
        .regroup(result(Denomination::One))
        .expect("regroup should succeed");

    assert_eq!(session.grid().carry_digit(Column::new(1)), None);
}

#[test]
fn unbundle_marks_borrow() {
    let mut session = Session::start(Operation::Subtraction, 52, 7, &config()).expect("start");

    session
        .unbundle(source(Operand::A, Denomination::Ten))
        .expect("unbundle should succeed");

    assert_eq!(session.grid().carry_digit(Column::new(1)), Some(4));
    assert_eq!(session.grid().carry_digit(Column::ONES), Some(1));
}

#[test]
fn borrowing_through_zero_marks_each_column() {
    let mut session = Session::start(Operation::Subtraction, 100, 1, &config()).expect("start");

    session
        .unbundle(source(Operand::A, Denomination::Hundred))
        .expect("unbundle should succeed");
    assert_eq!(session.grid().carry_digit(Column::new(2)), Some(0));
    assert_eq!(session.grid().carry_digit(Column::new(1)), Some(1));

    session
        .unbundle(source(Operand::A, Denomination::Ten))
        .expect("unbundle should succeed");
    assert_eq!(session.grid().carry_digit(Column::new(1)), Some(9));
    assert_eq!(session.grid().carry_digit(Column::ONES), Some(1));
}

#[test]
fn lending_after_cancel_counts_from_minuend_digit() {
    let mut session = Session::start(Operation::Subtraction, 52, 17, &config()).expect("start");

    session
        .cancel_pair(Denomination::Ten)
        .expect("cancel should succeed");
    session
        .unbundle(source(Operand::A, Denomination::Ten))
        .expect("unbundle should succeed");

    // Five tens written, one lent: 4 even though three tens remain in the bucket
    assert_eq!(session.grid().carry_digit(Column::new(1)), Some(4));
    assert_eq!(session.grid().carry_digit(Column::ONES), Some(1));
}

#[test]
fn lending_counts_down_from_existing_mark() {
    let mut session = Session::start(Operation::Subtraction, 52, 7, &config()).expect("start");
    session
        .enter_carry_digit(Column::new(1), 3)
        .expect("carry digit fits");

    session
        .unbundle(source(Operand::A, Denomination::Ten))
        .expect("unbundle should succeed");

    assert_eq!(session.grid().carry_digit(Column::new(1)), Some(2));
}

#[test]
fn regroup_in_multiplication_leaves_carry_row_alone() {
    let mut session =
        Session::start(Operation::Multiplication, 9, 1, &config()).expect("start");
    move_tier(&mut session, Denomination::One);

    let effects = session
        .regroup(result(Denomination::One))
        .expect("regroup should succeed");

    let regrouped = effects
        .iter()
        .any(|effect| matches!(effect, Effect::Regrouped { .. }));
    assert!(regrouped);
    assert_eq!(session.grid().carry_digit(Column::new(1)), None);
    assert_eq!(session.grid().carry_digit(Column::ONES), None);
}

#[test]
fn rejected_gesture_leaves_grid_alone() {
    let mut session = Session::start(Operation::Addition, 47, 38, &config()).expect("start");
    let before = session.grid().clone();

    let rejected = session.regroup(result(Denomination::One));

    assert!(matches!(
        rejected,
        Err(SessionError::Model(ModelError::NotEnoughToRegroup { .. }))
    ));
    assert_eq!(session.grid(), &before);
}

#[test]
fn auto_answer_fills_addition() {
    let mut session =
        Session::start(Operation::Addition, 47, 38, &config_with(true, true)).expect("start");

    move_tier(&mut session, Denomination::One);
    assert_eq!(session.answer_status(), AnswerStatus::Empty);

    session
        .regroup(result(Denomination::One))
        .expect("regroup should succeed");
    move_tier(&mut session, Denomination::Ten);

    assert_eq!(session.answer_status(), AnswerStatus::Complete(85));
    assert_eq!(session.grid().answer_digit(Column::new(2)), None);
    assert_eq!(session.check_answer(), Verdict::Correct(85));
}

#[test]
fn auto_answer_fills_subtraction() {
    let mut session =
        Session::start(Operation::Subtraction, 52, 7, &config_with(true, true)).expect("start");

    session
        .unbundle(source(Operand::A, Denomination::Ten))
        .expect("unbundle should succeed");
    for _ in 0..7 {
        session
            .cancel_pair(Denomination::One)
            .expect("cancel should succeed");
    }

    assert_eq!(session.answer_status(), AnswerStatus::Complete(45));
    assert_eq!(session.check_answer(), Verdict::Correct(45));
}

#[test]
fn auto_answer_clears_when_model_stops_reading() {
    let mut session =
        Session::start(Operation::Addition, 4, 3, &config_with(true, true)).expect("start");
    move_tier(&mut session, Denomination::One);
    assert_eq!(session.check_answer(), Verdict::Correct(7));

    session
        .move_object(
            CountingObject::new(Denomination::One, Role::OperandA),
            result(Denomination::One),
            source(Operand::A, Denomination::One),
        )
        .expect("move back should succeed");

    assert_eq!(session.model().state().readable_digits(), None);
    assert_eq!(session.answer_status(), AnswerStatus::Empty);
    assert_eq!(session.check_answer(), Verdict::Empty);
}

#[test]
fn typed_answer_survives_unreadable_model() {
    let mut session =
        Session::start(Operation::Addition, 4, 3, &config_with(true, true)).expect("start");
    move_tier(&mut session, Denomination::One);
    enter_number(&mut session, 8);

    session
        .move_object(
            CountingObject::new(Denomination::One, Role::OperandA),
            result(Denomination::One),
            source(Operand::A, Denomination::One),
        )
        .expect("move back should succeed");

    assert_eq!(session.answer_status(), AnswerStatus::Complete(8));
}

#[test]
fn answer_left_blank_without_auto_answer() {
    let mut session = Session::start(Operation::Addition, 4, 3, &config()).expect("start");

    move_tier(&mut session, Denomination::One);

    assert_eq!(session.answer_status(), AnswerStatus::Empty);
}

// ============================================================================
// Restart and observers
// ============================================================================

#[test]
fn restart_replaces_problem_and_keeps_observers() {
    let mut session = Session::start(Operation::Addition, 47, 38, &config()).expect("start");
    let calls = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&calls);
    session.subscribe(move |_: &State, _: &[Effect]| *sink.borrow_mut() += 1);
    enter_number(&mut session, 85);

    session.restart(12, 30).expect("restart");

    assert_eq!(session.operands(), (12, 30));
    assert_eq!(session.operation(), Operation::Addition);
    assert_eq!(session.trace().result(), Some(42));
    assert_eq!(session.answer_status(), AnswerStatus::Empty);
    assert_eq!(session.count_at(source(Operand::B, Denomination::Ten)), 3);
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn unsubscribed_observer_is_silent() {
    let mut session = Session::start(Operation::Addition, 4, 3, &config()).expect("start");
    let calls = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&calls);
    let id = session.subscribe(move |_: &State, _: &[Effect]| *sink.borrow_mut() += 1);

    move_tier(&mut session, Denomination::One);
    assert_eq!(*calls.borrow(), 7);

    assert!(session.unsubscribe(id));
    session.restart(1, 1).expect("restart");
    assert_eq!(*calls.borrow(), 7);
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn entering_the_trace_answer_is_correct(a in 0u32..10_000, b in 0u32..10_000) {
            let mut session = Session::start(Operation::Addition, a, b, &config()).expect("start");
            let expected = u64::from(a) + u64::from(b);

            enter_number(&mut session, expected);

            prop_assert_eq!(session.check_answer(), Verdict::Correct(expected));
        }

        #[test]
        fn from_input_accepts_every_valid_subtraction(a in 0u32..10_000, b in 0u32..10_000) {
            let (a, b) = if a >= b { (a, b) } else { (b, a) };

            let session = Session::from_input("-", &a.to_string(), &b.to_string(), &config())
                .expect("start");

            prop_assert_eq!(session.trace().result(), Some(u64::from(a - b)));
        }
    }
}
