use clap::Parser;
use crossterm::tty::IsTty;
use hilo::{
    config::GameConfig,
    difficulty::Difficulty,
    runtime::{install_interrupt_handler, LineSource, TerminalSource},
    session::{ExitStatus, Session},
    ui::{ConsolePrompter, ConsoleSink},
};
use std::{
    io::{self, stdin},
    process::ExitCode,
};

/// classic higher/lower number guessing game
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "The computer picks a secret number and you try to find it. After every guess you are told whether it was too high or too low, until you hit it or run out of attempts."
)]
pub struct Cli {
    /// difficulty level, picks the number range and attempt budget
    #[clap(short = 'd', long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// show game instructions before the first round
    #[clap(short = 'i', long)]
    instructions: bool,
}

impl From<&Cli> for GameConfig {
    fn from(cli: &Cli) -> Self {
        GameConfig::new(cli.difficulty, cli.instructions)
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let config = GameConfig::from(&cli);
    log::debug!("starting with {config:?}");

    if let Err(err) = install_interrupt_handler() {
        log::warn!("could not install interrupt handler: {err}");
    }

    let status = run(config);
    log::debug!("exiting with {status:?}");
    status.into()
}

fn run(config: GameConfig) -> ExitStatus {
    let mut session = Session::new(config, rand::thread_rng());
    let mut sink = ConsoleSink::new(io::stdout());

    // ctrl+c only reaches us as a key press when we own the terminal
    if stdin().is_tty() {
        let mut source = ConsolePrompter::new(TerminalSource::new(), io::stdout());
        session.run(&mut source, &mut sink)
    } else {
        let mut source = ConsolePrompter::new(LineSource::stdin(), io::stdout());
        session.run(&mut source, &mut sink)
    }
}
