use rand::Rng;

use crate::quiz::{self, Feedback, GameOver, LOWER_BOUND};

/// Draws both operands independently from `LOWER_BOUND..=upper_bound`.
/// The operands may repeat.
///
/// `upper_bound` must already be validated (`QuizEngine::start` checks it);
/// an empty range panics.
pub fn draw_question<R: Rng>(rng: &mut R, upper_bound: u32) -> quiz::Question {
    let a = rng.gen_range(LOWER_BOUND..=upper_bound);
    let b = rng.gen_range(LOWER_BOUND..=upper_bound);
    quiz::Question::new(a, b)
}

pub fn prompt(question: &quiz::Question) -> String {
    format!("How much is {} times {}?", question.a, question.b)
}

pub fn feedback_title(feedback: &Feedback) -> &'static str {
    if feedback.correct {
        "Correct!"
    } else {
        "Wrong!"
    }
}

pub fn feedback_message(feedback: &Feedback) -> String {
    if feedback.correct {
        return format!(
            "You were right! {} x {} = {}. Current score is {}.",
            feedback.a, feedback.b, feedback.guess, feedback.score
        );
    }
    let expected = i64::from(feedback.a) * i64::from(feedback.b);
    format!(
        "{} x {} = {}, not {}. Current score is {}.",
        feedback.a, feedback.b, expected, feedback.guess, feedback.score
    )
}

pub const GAME_OVER_TITLE: &str = "Game Over!";

pub fn game_over_message(game_over: &GameOver) -> String {
    format!(
        "Congrats! You scored {} out of {}. So far so good! Press enter to play again.",
        game_over.score, game_over.question_count
    )
}
