use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::quiz::multiplication::draw_question;
use crate::quiz::{
    AnswerOutcome, ConfigError, Feedback, GameOver, GameState, Phase, Question, QuizError,
    LOWER_BOUND, MAX_UPPER_BOUND, MIN_UPPER_BOUND,
};

/// Drives one quiz session: configuration, questions, scoring and reset.
///
/// The engine only mutates its [`GameState`]; callers render it through
/// [`QuizEngine::state`] and react to the returned outcomes.
pub struct QuizEngine<R = StdRng> {
    state: GameState,
    rng: R,
}

impl QuizEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for QuizEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> QuizEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            state: GameState::default(),
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Stores the configuration. Values are checked by [`QuizEngine::start`].
    pub fn configure(&mut self, upper_bound: u32, question_count: u32) -> Result<(), QuizError> {
        self.expect_phase(Phase::Idle, "configure")?;
        self.state.upper_bound = upper_bound;
        self.state.question_count = question_count;
        Ok(())
    }

    pub fn start(&mut self) -> Result<Question, QuizError> {
        self.expect_phase(Phase::Idle, "start")?;
        self.validate()?;

        self.state.score = 0;
        self.state.current_question_index = 1;
        let question = self.next_question();
        info!(
            "Starting quiz: {} questions, operands {}..={}",
            self.state.question_count, LOWER_BOUND, self.state.upper_bound
        );
        Ok(question)
    }

    pub fn submit_answer(&mut self, guess: i64) -> Result<AnswerOutcome, QuizError> {
        self.expect_phase(Phase::AwaitingAnswer, "submit an answer")?;
        let question = match self.state.current_question {
            Some(question) => question,
            None => {
                return Err(QuizError::OutOfPhase {
                    operation: "submit an answer",
                    phase: self.state.phase,
                })
            }
        };

        let correct = question.is_correct(guess);
        if correct {
            self.state.score += 1;
        }
        debug!(
            "Question {}: {} x {} answered {} ({})",
            self.state.current_question_index,
            question.a,
            question.b,
            guess,
            if correct { "correct" } else { "wrong" }
        );

        // The last answer goes straight to the summary, without feedback.
        if self.state.current_question_index >= self.state.question_count {
            self.state.phase = Phase::Finished;
            info!(
                "Quiz finished: {} out of {}",
                self.state.score, self.state.question_count
            );
            return Ok(AnswerOutcome::GameOver(GameOver {
                score: self.state.score,
                question_count: self.state.question_count,
                was_last_correct: correct,
            }));
        }

        self.state.phase = Phase::ShowingFeedback;
        Ok(AnswerOutcome::Feedback(Feedback {
            correct,
            a: question.a,
            b: question.b,
            guess,
            score: self.state.score,
        }))
    }

    pub fn advance(&mut self) -> Result<Question, QuizError> {
        self.expect_phase(Phase::ShowingFeedback, "advance")?;
        self.state.current_question_index += 1;
        Ok(self.next_question())
    }

    pub fn reset(&mut self) {
        if self.state.is_active() {
            info!("Resetting quiz from {:?}", self.state.phase);
        }
        self.state = GameState::default();
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let upper_bound = self.state.upper_bound;
        if !(MIN_UPPER_BOUND..=MAX_UPPER_BOUND).contains(&upper_bound) {
            return Err(ConfigError::UpperBoundOutOfRange {
                upper_bound,
                min: MIN_UPPER_BOUND,
                max: MAX_UPPER_BOUND,
            });
        }
        if self.state.question_count == 0 {
            return Err(ConfigError::NoQuestions);
        }
        let available = upper_bound - LOWER_BOUND;
        if self.state.question_count > available {
            return Err(ConfigError::TooManyQuestions {
                question_count: self.state.question_count,
                available,
            });
        }
        Ok(())
    }

    fn next_question(&mut self) -> Question {
        let question = draw_question(&mut self.rng, self.state.upper_bound);
        self.state.current_question = Some(question);
        self.state.phase = Phase::AwaitingAnswer;
        debug!(
            "Question {} of {}: {} x {}",
            self.state.current_question_index, self.state.question_count, question.a, question.b
        );
        question
    }

    fn expect_phase(&self, expected: Phase, operation: &'static str) -> Result<(), QuizError> {
        if self.state.phase == expected {
            return Ok(());
        }
        warn!("Rejected {}: quiz is {:?}", operation, self.state.phase);
        Err(QuizError::OutOfPhase {
            operation,
            phase: self.state.phase,
        })
    }
}
