use std::io::{BufRead, Write};

use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

use crate::quiz::multiplication::{
    feedback_message, feedback_title, game_over_message, prompt, GAME_OVER_TITLE,
};
use crate::quiz::{
    AnswerOutcome, Phase, QuestionCount, QuizEngine, QuizError, LOWER_BOUND, MAX_UPPER_BOUND,
    MIN_UPPER_BOUND,
};

pub type HandlerResult = Result<Flow, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

const GREETING_TEXT: &str =
    "Welcome to Edutainment!\nThe perfect place to master multiplication table";
const QUIT_COMMAND: &str = "quit";
const RESTART_COMMAND: &str = "restart";
const CONFIG_ERROR_TITLE: &str = "Something went wrong...";

/// Line-oriented front end for a [`QuizEngine`].
///
/// Typing `restart` during a game starts over, `quit` (or end of input)
/// leaves the loop.
pub struct Console<I, O, R = StdRng> {
    input: I,
    output: O,
    engine: QuizEngine<R>,
}

impl<I: BufRead, O: Write, R: Rng> Console<I, O, R> {
    pub fn new(input: I, output: O, engine: QuizEngine<R>) -> Self {
        Self {
            input,
            output,
            engine,
        }
    }

    pub fn engine(&self) -> &QuizEngine<R> {
        &self.engine
    }

    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        writeln!(self.output, "{}", GREETING_TEXT)?;
        loop {
            let flow = match self.engine.state().phase {
                Phase::Idle => self.receive_settings()?,
                Phase::AwaitingAnswer => self.receive_answer()?,
                Phase::ShowingFeedback => self.acknowledge_feedback()?,
                Phase::Finished => self.acknowledge_game_over()?,
            };
            if flow == Flow::Quit {
                writeln!(self.output, "Bye!")?;
                return Ok(());
            }
        }
    }

    fn receive_settings(&mut self) -> HandlerResult {
        let current = self.engine.state().upper_bound;
        let upper_bound = loop {
            let question = format!(
                "Choose the range: from {} up to? ({}-{}, enter keeps {})",
                LOWER_BOUND, MIN_UPPER_BOUND, MAX_UPPER_BOUND, current
            );
            let text = match self.ask(&question)? {
                Some(text) => text,
                None => return Ok(Flow::Quit),
            };
            if text.is_empty() {
                break current;
            }
            match text.parse::<u32>() {
                Ok(value) if (MIN_UPPER_BOUND..=MAX_UPPER_BOUND).contains(&value) => break value,
                _ => writeln!(
                    self.output,
                    "Please enter a number between {} and {}",
                    MIN_UPPER_BOUND, MAX_UPPER_BOUND
                )?,
            }
        };

        let labels = QuestionCount::CHOICES
            .iter()
            .map(|choice| choice.label())
            .collect::<Vec<_>>()
            .join(", ");
        let count = loop {
            let question = format!("Choose the number of questions ({})", labels);
            let text = match self.ask(&question)? {
                Some(text) => text,
                None => return Ok(Flow::Quit),
            };
            match QuestionCount::from_label(&text) {
                Some(choice) => break choice,
                None => writeln!(self.output, "Please choose one of: {}", labels)?,
            }
        };

        self.engine
            .configure(upper_bound, count.resolve(upper_bound))?;
        match self.engine.start() {
            Ok(_) => writeln!(self.output, "Start the Game!")?,
            Err(QuizError::Config(error)) => {
                debug!("Configuration rejected: {}", error);
                writeln!(self.output, "{}\n{}", CONFIG_ERROR_TITLE, error)?;
                // Dismissing the error starts over from the default settings.
                self.engine.reset();
            }
            Err(error) => return Err(error.into()),
        }
        Ok(Flow::Continue)
    }

    fn receive_answer(&mut self) -> HandlerResult {
        let state = self.engine.state();
        let question = match state.current_question {
            Some(question) => question,
            None => return Err("no question to answer".into()),
        };
        let header = format!("{} | Score: {}", state.header(), state.score);
        writeln!(self.output, "\n{}", header)?;

        let guess = loop {
            let text = match self.ask(&prompt(&question))? {
                Some(text) => text,
                None => return Ok(Flow::Quit),
            };
            if text.eq_ignore_ascii_case(RESTART_COMMAND) {
                self.engine.reset();
                return Ok(Flow::Continue);
            }
            match text.parse::<i64>() {
                Ok(guess) => break guess,
                Err(_) => writeln!(self.output, "Please enter a number")?,
            }
        };

        match self.engine.submit_answer(guess)? {
            AnswerOutcome::Feedback(feedback) => {
                writeln!(
                    self.output,
                    "{}\n{}",
                    feedback_title(&feedback),
                    feedback_message(&feedback)
                )?;
            }
            AnswerOutcome::GameOver(game_over) => {
                writeln!(
                    self.output,
                    "{}\n{}",
                    GAME_OVER_TITLE,
                    game_over_message(&game_over)
                )?;
            }
        }
        Ok(Flow::Continue)
    }

    fn acknowledge_feedback(&mut self) -> HandlerResult {
        match self.ask("Press enter for the next question")? {
            None => Ok(Flow::Quit),
            Some(text) if text.eq_ignore_ascii_case(RESTART_COMMAND) => {
                self.engine.reset();
                Ok(Flow::Continue)
            }
            Some(_) => {
                self.engine.advance()?;
                Ok(Flow::Continue)
            }
        }
    }

    fn acknowledge_game_over(&mut self) -> HandlerResult {
        match self.ask("Continue")? {
            None => Ok(Flow::Quit),
            Some(_) => {
                self.engine.reset();
                Ok(Flow::Continue)
            }
        }
    }

    /// Prints `question` and reads one trimmed line. `None` means the player
    /// is gone: end of input or the quit command.
    fn ask(&mut self, question: &str) -> Result<Option<String>, std::io::Error> {
        writeln!(self.output, "{}", question)?;
        self.output.flush()?;

        // Raw bytes, so a line that is not UTF-8 fails the parse instead of the session.
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&line);
        let text = line.trim();
        if text.eq_ignore_ascii_case(QUIT_COMMAND) {
            return Ok(None);
        }
        Ok(Some(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SEED: u64 = 5;

    fn play(script: &str) -> (String, Console<Cursor<Vec<u8>>, Vec<u8>>) {
        play_bytes(script.as_bytes())
    }

    fn play_bytes(script: &[u8]) -> (String, Console<Cursor<Vec<u8>>, Vec<u8>>) {
        let mut console = Console::new(
            Cursor::new(script.to_vec()),
            Vec::new(),
            QuizEngine::from_seed(SEED),
        );
        console.run().unwrap();
        let output = String::from_utf8(console.output.clone()).unwrap();
        (output, console)
    }

    #[test]
    fn test_full_game_with_correct_answers() {
        // Same seed and same calls draw the same questions.
        let mut twin = QuizEngine::from_seed(SEED);
        twin.configure(6, 2).unwrap();
        let first = twin.start().unwrap();
        twin.submit_answer(first.answer()).unwrap();
        let second = twin.advance().unwrap();

        let script = format!("6\n2\n{}\n\n{}\n", first.answer(), second.answer());
        let (output, console) = play(&script);

        assert!(output.starts_with("Welcome to Edutainment!"));
        assert!(output.contains("Question 1 out of 2 | Score: 0"));
        assert!(output.contains(&prompt(&first)));
        assert!(output.contains("Correct!"));
        assert!(output.contains("Question 2 out of 2 | Score: 1"));
        assert!(output.contains("Congrats! You scored 2 out of 2."));
        assert!(output.ends_with("Bye!\n"));
        // Input ran out on the game over screen.
        assert_eq!(console.engine().state().phase, Phase::Finished);
    }

    #[test]
    fn test_wrong_answer_and_bad_input() {
        // Every product is at least 4, so 0 is always wrong.
        let (output, console) = play("4\n2\nabc\n0\n");
        assert!(output.contains("Please enter a number\n"));
        assert!(output.contains("Wrong!"));
        assert!(output.contains("not 0. Current score is 0."));
        assert_eq!(console.engine().state().phase, Phase::ShowingFeedback);
    }

    #[test]
    fn test_too_many_questions_returns_to_settings() {
        let (output, console) = play("5\n10\n\nall\n");
        assert!(output.contains("Something went wrong...\nNumber of questions cannot be higher than the upper range."));
        // The error reset the range to 4, enter keeps it, so "all" means 2 questions.
        assert_eq!(output.matches("enter keeps 4").count(), 2);
        let state = console.engine().state();
        assert_eq!(state.phase, Phase::AwaitingAnswer);
        assert_eq!(state.question_count, 2);
        assert_eq!(state.upper_bound, 4);
    }

    #[test]
    fn test_rejected_settings_are_reset() {
        let (output, console) = play("5\n10\n");
        assert!(output.contains("Something went wrong..."));
        let state = console.engine().state();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.upper_bound, 4);
        assert_eq!(state.question_count, 2);
    }

    #[test]
    fn test_invalid_utf8_line_reprompts() {
        let (output, console) = play_bytes(b"\xff\n7\n5\n");
        assert_eq!(
            output.matches("Please enter a number between 4 and 20").count(),
            1
        );
        let state = console.engine().state();
        assert_eq!(state.phase, Phase::AwaitingAnswer);
        assert_eq!(state.upper_bound, 7);
        assert_eq!(state.question_count, 5);

        let (output, console) = play_bytes(b"\xff\xfe\n");
        assert!(output.ends_with("Bye!\n"));
        assert_eq!(console.engine().state().phase, Phase::Idle);
    }

    #[test]
    fn test_invalid_settings_reprompt() {
        let (output, console) = play("3\n21\nseven\n8\n7\n5\n");
        assert_eq!(
            output.matches("Please enter a number between 4 and 20").count(),
            3
        );
        assert!(output.contains("Please choose one of: 2, 5, 10, all"));
        assert_eq!(console.engine().state().question_count, 5);
        assert_eq!(console.engine().state().upper_bound, 8);
    }

    #[test]
    fn test_restart_and_quit() {
        let (output, console) = play("9\n5\nrestart\nquit\n");
        assert!(output.contains("Question 1 out of 5"));
        let state = console.engine().state();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.upper_bound, 4);
        assert_eq!(state.question_count, 2);
        // After the restart the range prompt shows the default again.
        assert_eq!(output.matches("enter keeps 4").count(), 2);
    }

    #[test]
    fn test_game_over_continue_resets() {
        let (output, console) = play("4\n2\n0\n\n0\n\n");
        assert!(output.contains("Game Over!\nCongrats! You scored 0 out of 2."));
        assert_eq!(console.engine().state().phase, Phase::Idle);
    }
}
