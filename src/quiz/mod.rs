pub mod engine;
pub mod error;
pub mod multiplication;

pub use engine::QuizEngine;
pub use error::{ConfigError, QuizError};

/// Smallest operand that can ever be drawn.
pub const LOWER_BOUND: u32 = 2;
pub const MIN_UPPER_BOUND: u32 = 4;
pub const MAX_UPPER_BOUND: u32 = 20;

pub const DEFAULT_UPPER_BOUND: u32 = 4;
pub const DEFAULT_QUESTION_COUNT: u32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingAnswer,
    ShowingFeedback,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub a: u32,
    pub b: u32,
}
impl Question {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    pub fn answer(&self) -> i64 {
        i64::from(self.a) * i64::from(self.b)
    }

    pub fn is_correct(&self, guess: i64) -> bool {
        self.answer() == guess
    }
}

/// The choices offered for the length of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum QuestionCount {
    Two,
    Five,
    Ten,
    /// One question per value above the lower bound.
    All,
}
impl QuestionCount {
    pub const CHOICES: [QuestionCount; 4] = [
        QuestionCount::Two,
        QuestionCount::Five,
        QuestionCount::Ten,
        QuestionCount::All,
    ];

    pub fn resolve(self, upper_bound: u32) -> u32 {
        match self {
            QuestionCount::Two => 2,
            QuestionCount::Five => 5,
            QuestionCount::Ten => 10,
            QuestionCount::All => upper_bound.saturating_sub(LOWER_BOUND),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuestionCount::Two => "2",
            QuestionCount::Five => "5",
            QuestionCount::Ten => "10",
            QuestionCount::All => "all",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::CHOICES
            .into_iter()
            .find(|choice| choice.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// Everything a UI binding needs to render the current screen.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub upper_bound: u32,
    pub question_count: u32,
    pub current_question_index: u32,
    pub score: u32,
    pub current_question: Option<Question>,
}
impl Default for GameState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            upper_bound: DEFAULT_UPPER_BOUND,
            question_count: DEFAULT_QUESTION_COUNT,
            current_question_index: 0,
            score: 0,
            current_question: None,
        }
    }
}
impl GameState {
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn header(&self) -> String {
        format!(
            "Question {} out of {}",
            self.current_question_index, self.question_count
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnswerOutcome {
    Feedback(Feedback),
    GameOver(GameOver),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Feedback {
    pub correct: bool,
    pub a: u32,
    pub b: u32,
    pub guess: i64,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameOver {
    pub score: u32,
    pub question_count: u32,
    pub was_last_correct: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_count_all_tracks_upper_bound() {
        assert_eq!(QuestionCount::All.resolve(4), 2);
        assert_eq!(QuestionCount::All.resolve(20), 18);
        assert_eq!(QuestionCount::Ten.resolve(4), 10);
    }

    #[test]
    fn test_question_count_from_label() {
        assert_eq!(QuestionCount::from_label("5"), Some(QuestionCount::Five));
        assert_eq!(QuestionCount::from_label(" ALL "), Some(QuestionCount::All));
        assert_eq!(QuestionCount::from_label("3"), None);
    }

    #[test]
    fn test_question_answer_and_check() {
        let question = Question::new(7, 8);
        assert_eq!(question.answer(), 56);
        assert!(question.is_correct(56));
        assert!(!question.is_correct(57));
    }

    #[test]
    fn test_game_state_snapshot_serializes() {
        let state = GameState {
            phase: Phase::AwaitingAnswer,
            current_question_index: 1,
            current_question: Some(Question::new(3, 4)),
            ..GameState::default()
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"phase\":\"AwaitingAnswer\""));
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
        assert_eq!(back.header(), "Question 1 out of 2");
    }
}
