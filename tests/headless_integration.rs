use hilo::{
    config::GameConfig,
    difficulty::{Difficulty, DifficultySetting},
    round::{Feedback, GameRound},
    runtime::TestInputSource,
    session::{ExitStatus, Session, SessionStats},
    ui::{ConsolePrompter, ConsoleSink, Notice, RecordingSink},
};
use rand::{rngs::StdRng, SeedableRng};

// Headless sessions driven through the scripted input source, no TTY needed.

fn secret_for(seed: u64, setting: DifficultySetting) -> i64 {
    GameRound::start(setting, &mut StdRng::seed_from_u64(seed)).secret()
}

/// Lines that walk a binary search towards `secret`, ending on it.
fn binary_search_lines(secret: i64, setting: DifficultySetting) -> Vec<String> {
    let (mut lo, mut hi) = (setting.min, setting.max);
    let mut lines = Vec::new();
    loop {
        let mid = lo + (hi - lo) / 2;
        lines.push(mid.to_string());
        match mid.cmp(&secret) {
            std::cmp::Ordering::Equal => return lines,
            std::cmp::Ordering::Less => lo = mid + 1,
            std::cmp::Ordering::Greater => hi = mid - 1,
        }
    }
}

#[test]
fn headless_win_then_stop() {
    let seed = 2024;
    let secret = secret_for(seed, DifficultySetting::MEDIUM);
    let mut lines = binary_search_lines(secret, DifficultySetting::MEDIUM);
    let guesses = lines.len() as u32;
    assert!(guesses <= 7, "binary search fits in the medium budget");
    lines.push("n".to_string());

    let mut session = Session::new(GameConfig::default(), StdRng::seed_from_u64(seed));
    let mut source = ConsolePrompter::new(TestInputSource::new(lines), Vec::new());
    let mut sink = RecordingSink::new();

    assert_eq!(session.run(&mut source, &mut sink), ExitStatus::Success);
    assert_eq!(session.stats(), SessionStats { wins: 1, losses: 0 });
    assert!(sink.notices.contains(&Notice::Won {
        secret,
        attempts: guesses
    }));
    assert_eq!(
        sink.notices.iter().rev().take(2).collect::<Vec<_>>(),
        vec![
            &Notice::Goodbye,
            &Notice::Stats(SessionStats { wins: 1, losses: 0 })
        ]
    );
}

#[test]
fn headless_feedback_points_towards_secret() {
    let seed = 77;
    let secret = secret_for(seed, DifficultySetting::HARD);
    let lines = binary_search_lines(secret, DifficultySetting::HARD);

    let mut session = Session::new(
        GameConfig::new(Difficulty::Hard, false),
        StdRng::seed_from_u64(seed),
    );
    let mut source = ConsolePrompter::new(TestInputSource::new(lines.clone()), Vec::new());
    let mut sink = RecordingSink::new();

    let round = session
        .play_round(DifficultySetting::HARD, &mut source, &mut sink)
        .unwrap();

    for (guess, notice) in round.guesses().iter().zip(
        sink.notices
            .iter()
            .filter(|n| matches!(n, Notice::Hint { .. } | Notice::Won { .. })),
    ) {
        match notice {
            Notice::Hint {
                feedback: Feedback::TooLow,
                ..
            } => assert!(*guess < secret),
            Notice::Hint {
                feedback: Feedback::TooHigh,
                ..
            } => assert!(*guess > secret),
            Notice::Won { .. } => assert_eq!(*guess, secret),
            other => panic!("unexpected notice {other:?}"),
        }
    }
}

#[test]
fn headless_mixed_session_tallies_wins_and_losses() {
    let seed = 31;
    let mut rng = StdRng::seed_from_u64(seed);
    let first = GameRound::start(DifficultySetting::EASY, &mut rng).secret();

    let mut lines = binary_search_lines(first, DifficultySetting::EASY);
    lines.extend(["maybe", "yes", "exit", "n"].map(String::from));

    let mut session = Session::new(
        GameConfig::new(Difficulty::Easy, true),
        StdRng::seed_from_u64(seed),
    );
    let mut source = ConsolePrompter::new(TestInputSource::new(lines), Vec::new());
    let mut sink = RecordingSink::new();

    assert_eq!(session.run(&mut source, &mut sink), ExitStatus::Success);
    assert_eq!(session.stats(), SessionStats { wins: 1, losses: 1 });
    assert_eq!(session.stats().win_rate(), Some(50.0));

    let (_, out) = source.into_parts();
    assert!(String::from_utf8(out)
        .unwrap()
        .contains("Please enter 'y' or 'n'."));
}

#[test]
fn headless_console_transcript() {
    let seed = 4;
    let setting = DifficultySetting {
        difficulty: Difficulty::Custom,
        min: 8,
        max: 9,
        max_attempts: 2,
    };
    let secret = secret_for(seed, setting).to_string();

    let mut session = Session::new(
        GameConfig::new(Difficulty::Custom, false),
        StdRng::seed_from_u64(seed),
    );
    let mut source = ConsolePrompter::new(
        TestInputSource::new(["8", "9", "2", "100", secret.as_str(), "n"]),
        Vec::new(),
    );
    let mut sink = ConsoleSink::new(Vec::new());

    let status = session.run(&mut source, &mut sink);
    let transcript = String::from_utf8(sink.into_inner()).unwrap();

    assert_eq!(status, ExitStatus::Success);
    assert!(transcript.starts_with("\n===== NUMBER GUESSING GAME =====\n"));
    assert!(transcript.contains("I'm thinking of a number between 8 and 9."));
    assert!(transcript.contains("Please enter a number between 8 and 9."));
    assert!(transcript.contains(&format!(
        "Congratulations! You guessed the number {secret} in 1 attempts!"
    )));
    assert!(transcript.contains("Games Played: 1"));
    assert!(transcript.contains("Win Rate: 100.0%"));
    assert!(transcript.ends_with("\nThanks for playing Number Guessing Game!\n"));
}
