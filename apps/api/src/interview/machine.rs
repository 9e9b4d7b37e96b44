//! Pure decision rules for the thread state machine.
//!
//! A thread asks exactly `total_questions` questions. The decision for an
//! incoming answer is taken on the `asked_count` read *before* that answer
//! is processed: once the count has reached the target, the answer to the
//! final question triggers evaluation instead of another question.

/// What to do with the user's answer that was just appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    /// Ask follow-up question number `question_number` (1-based).
    FollowUp { question_number: i32 },
    /// All questions have been answered; score the submission.
    Evaluate,
}

pub fn decide_turn(asked_count: i32, total_questions: i32) -> TurnAction {
    if asked_count >= total_questions {
        TurnAction::Evaluate
    } else {
        TurnAction::FollowUp {
            question_number: asked_count + 1,
        }
    }
}

/// The order of the next message given how many exist. Orders are 1-based,
/// strictly increasing, no gaps.
pub fn next_order(message_count: usize) -> i32 {
    message_count as i32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_to_final_question_evaluates() {
        // total_questions = 3: the thread starts with asked_count = 1
        // (first question asked at creation).
        assert_eq!(
            decide_turn(1, 3),
            TurnAction::FollowUp { question_number: 2 }
        );
        assert_eq!(
            decide_turn(2, 3),
            TurnAction::FollowUp { question_number: 3 }
        );
        // Third answer: count already reached the target, so no 4th
        // question is ever asked.
        assert_eq!(decide_turn(3, 3), TurnAction::Evaluate);
    }

    #[test]
    fn test_count_past_target_still_evaluates() {
        assert_eq!(decide_turn(4, 3), TurnAction::Evaluate);
    }

    #[test]
    fn test_follow_up_numbering_is_one_based() {
        assert_eq!(
            decide_turn(0, 5),
            TurnAction::FollowUp { question_number: 1 }
        );
    }

    #[test]
    fn test_asked_count_never_exceeds_total() {
        // Drive a simulated thread from creation to completion and check
        // the counter invariant at every step.
        for total in 3..=5 {
            let mut asked = 1; // first question asked at creation
            loop {
                assert!(asked >= 0 && asked <= total);
                match decide_turn(asked, total) {
                    TurnAction::FollowUp { question_number } => {
                        assert_eq!(question_number, asked + 1);
                        asked += 1;
                    }
                    TurnAction::Evaluate => break,
                }
            }
            assert_eq!(asked, total, "exactly {total} questions asked");
        }
    }

    #[test]
    fn test_message_order_is_sequential() {
        assert_eq!(next_order(0), 1);
        assert_eq!(next_order(1), 2);
        assert_eq!(next_order(7), 8);
    }
}
