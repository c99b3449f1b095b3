use std::io::{self, Write};

use itertools::Itertools;

use crate::{
    difficulty::CustomEntry,
    round::{Feedback, GuessRequest},
    runtime::{InputError, InputSource},
    session::SessionStats,
};

const QUIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

/// A player's answer to a guess prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessInput {
    Guess(i64),
    Quit,
}

/// Everything the session tells the player
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Welcome,
    Instructions,
    RoundStarted {
        min: i64,
        max: i64,
        max_attempts: u32,
    },
    Hint {
        feedback: Feedback,
        remaining: u32,
    },
    OutOfRange {
        min: i64,
        max: i64,
    },
    Won {
        secret: i64,
        attempts: u32,
    },
    GameOver {
        secret: i64,
        guesses: Vec<i64>,
        exhausted: bool,
    },
    Stats(SessionStats),
    Goodbye,
    Interrupted,
}

/// Where guesses and answers come from
pub trait GuessSource {
    /// Ask for the guess described by `request`. Text that is not a number is
    /// handled here and never reaches the round.
    fn next_guess(&mut self, request: &GuessRequest) -> Result<GuessInput, InputError>;

    fn play_again(&mut self) -> Result<bool, InputError>;

    fn custom_settings(&mut self) -> Result<CustomEntry, InputError>;
}

/// Where feedback goes
pub trait FeedbackSink {
    fn notify(&mut self, notice: &Notice) -> io::Result<()>;
}

pub fn parse_guess(text: &str) -> Option<GuessInput> {
    let text = text.trim();
    if QUIT_WORDS.iter().any(|w| text.eq_ignore_ascii_case(w)) {
        return Some(GuessInput::Quit);
    }
    text.parse::<i64>().ok().map(GuessInput::Guess)
}

pub fn parse_yes_no(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Prompts the player over any `InputSource`, re-asking until the answer is usable
pub struct ConsolePrompter<I: InputSource, W: Write> {
    input: I,
    out: W,
}

impl<I: InputSource, W: Write> ConsolePrompter<I, W> {
    pub fn new(input: I, out: W) -> Self {
        Self { input, out }
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn into_parts(self) -> (I, W) {
        (self.input, self.out)
    }
}

impl<I: InputSource, W: Write> GuessSource for ConsolePrompter<I, W> {
    fn next_guess(&mut self, request: &GuessRequest) -> Result<GuessInput, InputError> {
        let prompt = format!(
            "Attempt {}/{}. Enter your guess: ",
            request.attempt, request.max_attempts
        );
        loop {
            let line = self.input.require_line(&prompt)?;
            match parse_guess(&line) {
                Some(input) => return Ok(input),
                None => {
                    log::warn!("invalid guess input {line:?}");
                    writeln!(self.out, "Please enter a valid number.")?;
                }
            }
        }
    }

    fn play_again(&mut self) -> Result<bool, InputError> {
        loop {
            let line = self
                .input
                .require_line("\nWould you like to play again? (y/n): ")?;
            match parse_yes_no(&line) {
                Some(answer) => return Ok(answer),
                None => writeln!(self.out, "Please enter 'y' or 'n'.")?,
            }
        }
    }

    fn custom_settings(&mut self) -> Result<CustomEntry, InputError> {
        writeln!(self.out, "\n=== Custom Difficulty Settings ===")?;
        let min = self.input.require_line("Enter minimum number: ")?;
        let max = self.input.require_line("Enter maximum number: ")?;
        let attempts = self.input.require_line("Enter maximum attempts: ")?;
        Ok(CustomEntry { min, max, attempts })
    }
}

/// Renders notices as plain text
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FeedbackSink for ConsoleSink<W> {
    fn notify(&mut self, notice: &Notice) -> io::Result<()> {
        write!(self.out, "{}", render(notice))?;
        self.out.flush()
    }
}

/// Keeps every notice, for tests and replays
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub notices: Vec<Notice>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeedbackSink for RecordingSink {
    fn notify(&mut self, notice: &Notice) -> io::Result<()> {
        self.notices.push(notice.clone());
        Ok(())
    }
}

fn format_guesses(guesses: &[i64]) -> String {
    format!("[{}]", guesses.iter().join(", "))
}

/// Text for a notice, newline terminated
pub fn render(notice: &Notice) -> String {
    match notice {
        Notice::Welcome => "\n===== NUMBER GUESSING GAME =====\n".to_string(),
        Notice::Instructions => [
            "",
            "=== NUMBER GUESSING GAME INSTRUCTIONS ===",
            "1. The computer will select a random number within a range.",
            "2. You need to guess that number within the allowed attempts.",
            "3. After each guess, you'll get feedback (too high/too low).",
            "4. Type 'q', 'quit', or 'exit' at any time to end the game.",
            "5. Different difficulty levels provide different challenges.",
            "   - Easy: 1-50, 10 attempts",
            "   - Medium: 1-100, 7 attempts",
            "   - Hard: 1-200, 5 attempts",
            "   - Custom: You define the parameters",
            "6. Have fun and good luck!",
            "",
            "",
        ]
        .join("\n"),
        Notice::RoundStarted {
            min,
            max,
            max_attempts,
        } => format!(
            "\nI'm thinking of a number between {min} and {max}.\nYou have {max_attempts} attempts to guess it.\n\n"
        ),
        Notice::Hint {
            feedback,
            remaining,
        } => {
            let mut text = match feedback {
                Feedback::TooLow => "Too low!\n".to_string(),
                Feedback::TooHigh => "Too high!\n".to_string(),
                Feedback::Correct => String::new(),
            };
            if *remaining > 0 {
                text.push_str(&format!("You have {remaining} attempts remaining.\n"));
            }
            text
        }
        Notice::OutOfRange { min, max } => {
            format!("Please enter a number between {min} and {max}.\n")
        }
        Notice::Won { secret, attempts } => format!(
            "\nCongratulations! You guessed the number {secret} in {attempts} attempts!\n"
        ),
        Notice::GameOver {
            secret,
            guesses,
            exhausted,
        } => {
            let headline = if *exhausted {
                "Game over! You've used all your attempts.".to_string()
            } else {
                format!("The number was {secret}. Better luck next time!")
            };
            format!(
                "\n{headline}\nThe number was {secret}.\nYour guesses: {}\n",
                format_guesses(guesses)
            )
        }
        Notice::Stats(stats) => match stats.win_rate() {
            Some(rate) => format!(
                "\nGame Statistics:\nGames Played: {}\nWins: {}\nLosses: {}\nWin Rate: {rate:.1}%\n",
                stats.games_played(),
                stats.wins,
                stats.losses
            ),
            None => "\nNo games played yet.\n".to_string(),
        },
        Notice::Goodbye => "\nThanks for playing Number Guessing Game!\n".to_string(),
        Notice::Interrupted => "\nGame interrupted. Goodbye!\n".to_string(),
    }
}
