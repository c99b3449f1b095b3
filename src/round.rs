use crate::difficulty::DifficultySetting;
use rand::Rng;

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    TooLow,
    TooHigh,
}

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Won,
    Lost,
    Quit,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    #[error("guess {value} is outside {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },
    #[error("round is already over ({0:?})")]
    RoundOver(Outcome),
}

/// What the player is being asked for: attempt N of M within [min, max]
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct GuessRequest {
    pub attempt: u32,
    pub max_attempts: u32,
    pub min: i64,
    pub max: i64,
}

/// one secret number and everything guessed at it so far
#[derive(Debug, Clone)]
pub struct GameRound {
    setting: DifficultySetting,
    secret: i64,
    attempts_used: u32,
    guesses: Vec<i64>,
    outcome: Outcome,
}

impl GameRound {
    /// Draw a secret uniformly from the inclusive range of `setting`.
    pub fn start<R: Rng>(setting: DifficultySetting, rng: &mut R) -> Self {
        let secret = rng.gen_range(setting.min..=setting.max);
        Self::new(setting, secret)
    }

    /// Start a round with a known secret.
    pub fn with_secret(setting: DifficultySetting, secret: i64) -> Result<Self, GuessError> {
        if !setting.contains(secret) {
            return Err(GuessError::OutOfRange {
                value: secret,
                min: setting.min,
                max: setting.max,
            });
        }
        Ok(Self::new(setting, secret))
    }

    fn new(setting: DifficultySetting, secret: i64) -> Self {
        Self {
            setting,
            secret,
            attempts_used: 0,
            guesses: Vec::new(),
            outcome: Outcome::Ongoing,
        }
    }

    /// Evaluate a guess. Out-of-range values are rejected without using up
    /// an attempt.
    pub fn submit_guess(&mut self, value: i64) -> Result<Feedback, GuessError> {
        if self.outcome.is_terminal() {
            return Err(GuessError::RoundOver(self.outcome));
        }
        if !self.setting.contains(value) {
            return Err(GuessError::OutOfRange {
                value,
                min: self.setting.min,
                max: self.setting.max,
            });
        }

        self.attempts_used += 1;
        self.guesses.push(value);

        let feedback = match value.cmp(&self.secret) {
            std::cmp::Ordering::Equal => Feedback::Correct,
            std::cmp::Ordering::Less => Feedback::TooLow,
            std::cmp::Ordering::Greater => Feedback::TooHigh,
        };

        if feedback == Feedback::Correct {
            self.outcome = Outcome::Won;
        } else if self.attempts_used >= self.setting.max_attempts {
            self.outcome = Outcome::Lost;
        }

        Ok(feedback)
    }

    pub fn quit(&mut self) -> Result<(), GuessError> {
        if self.outcome.is_terminal() {
            return Err(GuessError::RoundOver(self.outcome));
        }
        self.outcome = Outcome::Quit;
        Ok(())
    }

    pub fn next_request(&self) -> GuessRequest {
        GuessRequest {
            attempt: self.attempts_used + 1,
            max_attempts: self.setting.max_attempts,
            min: self.setting.min,
            max: self.setting.max,
        }
    }

    pub fn setting(&self) -> &DifficultySetting {
        &self.setting
    }

    pub fn secret(&self) -> i64 {
        self.secret
    }

    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    pub fn remaining_attempts(&self) -> u32 {
        self.setting.max_attempts.saturating_sub(self.attempts_used)
    }

    pub fn guesses(&self) -> &[i64] {
        &self.guesses
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_terminal()
    }
}
