use rand::Rng;

use crate::{
    config::GameConfig,
    difficulty::{settings_for, Difficulty, DifficultySetting},
    round::{Feedback, GameRound, GuessError, Outcome},
    runtime::InputError,
    ui::{FeedbackSink, GuessInput, GuessSource, Notice},
    util::percentage,
};

/// Win/loss tally for the current process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub wins: u32,
    pub losses: u32,
}

impl SessionStats {
    /// Count a finished round. Quitting counts as a loss.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won => self.wins += 1,
            Outcome::Lost | Outcome::Quit => self.losses += 1,
            Outcome::Ongoing => log::debug!("ignoring unfinished round in stats"),
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn win_rate(&self) -> Option<f64> {
        percentage(self.wins, self.games_played())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("console output failed: {0}")]
    Output(#[from] std::io::Error),
    #[error(transparent)]
    Round(#[from] GuessError),
}

impl SessionError {
    fn is_interrupt(&self) -> bool {
        matches!(self, SessionError::Input(InputError::Interrupted))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Interrupted,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Interrupted => 1,
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}

/// Plays rounds back to back until the player stops
#[derive(Debug)]
pub struct Session<R: Rng> {
    config: GameConfig,
    stats: SessionStats,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, rng: R) -> Self {
        Self {
            config,
            stats: SessionStats::default(),
            rng,
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Run the whole session. Errors never escape: an interrupted or broken
    /// console ends the session with `ExitStatus::Interrupted`.
    pub fn run<S, K>(&mut self, source: &mut S, sink: &mut K) -> ExitStatus
    where
        S: GuessSource,
        K: FeedbackSink,
    {
        match self.play(source, sink) {
            Ok(()) => ExitStatus::Success,
            Err(err) => {
                if err.is_interrupt() {
                    log::info!("session interrupted after {} games", self.stats.games_played());
                } else {
                    log::error!("session aborted: {err}");
                }
                if let Err(err) = sink.notify(&Notice::Interrupted) {
                    log::error!("could not report interrupt: {err}");
                }
                ExitStatus::Interrupted
            }
        }
    }

    fn play<S, K>(&mut self, source: &mut S, sink: &mut K) -> Result<(), SessionError>
    where
        S: GuessSource,
        K: FeedbackSink,
    {
        sink.notify(&Notice::Welcome)?;
        if self.config.show_instructions {
            sink.notify(&Notice::Instructions)?;
        }

        loop {
            let setting = self.next_setting(source)?;
            let round = self.play_round(setting, source, sink)?;

            self.stats.record(round.outcome());
            log::info!(
                "round finished: {:?}, wins={} losses={}",
                round.outcome(),
                self.stats.wins,
                self.stats.losses
            );
            sink.notify(&Notice::Stats(self.stats))?;

            let again = source.play_again()?;
            log::info!("play again: {again}");
            if !again {
                break;
            }
        }

        sink.notify(&Notice::Goodbye)?;
        Ok(())
    }

    fn next_setting<S: GuessSource>(
        &mut self,
        source: &mut S,
    ) -> Result<DifficultySetting, SessionError> {
        let custom = match self.config.difficulty {
            Difficulty::Custom => Some(source.custom_settings()?),
            _ => None,
        };
        Ok(settings_for(self.config.difficulty, custom.as_ref()))
    }

    /// Play one round to a terminal outcome and hand it back.
    pub fn play_round<S, K>(
        &mut self,
        setting: DifficultySetting,
        source: &mut S,
        sink: &mut K,
    ) -> Result<GameRound, SessionError>
    where
        S: GuessSource,
        K: FeedbackSink,
    {
        let mut round = GameRound::start(setting, &mut self.rng);
        log::info!(
            "new {} round: {}..={} with {} attempts",
            setting.difficulty,
            setting.min,
            setting.max,
            setting.max_attempts
        );
        log::debug!("secret number is {}", round.secret());

        sink.notify(&Notice::RoundStarted {
            min: setting.min,
            max: setting.max,
            max_attempts: setting.max_attempts,
        })?;

        while !round.is_finished() {
            let value = match source.next_guess(&round.next_request())? {
                GuessInput::Quit => {
                    log::info!("player quit after {} attempts", round.attempts_used());
                    round.quit()?;
                    break;
                }
                GuessInput::Guess(value) => value,
            };

            match round.submit_guess(value) {
                Ok(Feedback::Correct) => {
                    sink.notify(&Notice::Won {
                        secret: round.secret(),
                        attempts: round.attempts_used(),
                    })?;
                }
                Ok(feedback) => {
                    log::info!("guess {value}: {feedback:?}");
                    sink.notify(&Notice::Hint {
                        feedback,
                        remaining: round.remaining_attempts(),
                    })?;
                }
                Err(GuessError::OutOfRange { min, max, .. }) => {
                    log::warn!("guess {value} out of range");
                    sink.notify(&Notice::OutOfRange { min, max })?;
                }
                Err(err) => return Err(err.into()),
            }
        }

        if matches!(round.outcome(), Outcome::Lost | Outcome::Quit) {
            sink.notify(&Notice::GameOver {
                secret: round.secret(),
                guesses: round.guesses().to_vec(),
                exhausted: round.outcome() == Outcome::Lost,
            })?;
        }

        Ok(round)
    }
}
