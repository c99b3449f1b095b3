use std::collections::VecDeque;
use std::io::{self, BufRead, Stdout, StdinLock, Write};

use crate::{
    session::ExitStatus,
    ui::{render, Notice},
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};

#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("input interrupted")]
    Interrupted,
    #[error("console i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// Source of raw lines typed by the player
pub trait InputSource {
    /// Show `prompt` and block until a full line is entered.
    /// Returns Ok(None) when the player interrupted input (ctrl+c, ctrl+d, end of stream).
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Like `read_line`, but an interrupt becomes an error.
    fn require_line(&mut self, prompt: &str) -> Result<String, InputError> {
        self.read_line(prompt)?.ok_or(InputError::Interrupted)
    }
}

/// Line-buffered source for piped or redirected input
pub struct LineSource<R: BufRead, W: Write> {
    reader: R,
    out: W,
}

impl<R: BufRead, W: Write> LineSource<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        Self { reader, out }
    }
}

impl LineSource<StdinLock<'static>, Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InputSource for LineSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Interactive source using crossterm so ctrl+c arrives as a key press
/// instead of killing the process.
#[derive(Debug, Default)]
pub struct TerminalSource;

impl TerminalSource {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for TerminalSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let _raw = RawModeGuard::enable()?;
        let mut line = String::new();

        loop {
            let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            else {
                continue;
            };

            match apply_key(&mut line, code, modifiers) {
                KeyAction::Interrupt => {
                    write!(stdout, "\r\n")?;
                    stdout.flush()?;
                    return Ok(None);
                }
                KeyAction::Submit => {
                    write!(stdout, "\r\n")?;
                    stdout.flush()?;
                    return Ok(Some(line));
                }
                KeyAction::Erase => write!(stdout, "\x08 \x08")?,
                KeyAction::Echo(c) => write!(stdout, "{c}")?,
                KeyAction::Ignore => {}
            }
            stdout.flush()?;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Echo(char),
    Erase,
    Submit,
    Interrupt,
    Ignore,
}

/// Apply one key press to the line being edited.
fn apply_key(line: &mut String, code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
    let control = modifiers.contains(KeyModifiers::CONTROL);
    match code {
        KeyCode::Char('c') | KeyCode::Char('d') if control => KeyAction::Interrupt,
        KeyCode::Char(_) if control => KeyAction::Ignore,
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Backspace => match line.pop() {
            Some(_) => KeyAction::Erase,
            None => KeyAction::Ignore,
        },
        KeyCode::Char(c) => {
            line.push(c);
            KeyAction::Echo(c)
        }
        _ => KeyAction::Ignore,
    }
}

/// Route SIGINT to the interrupt goodbye and exit status 1. Raw mode turns
/// ctrl+c into a key press, so this only fires for piped input or while
/// output is being written.
pub fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        let mut stdout = io::stdout();
        let written = write!(stdout, "{}", render(&Notice::Interrupted));
        if let Err(err) = written.and_then(|_| stdout.flush()) {
            log::error!("could not report interrupt: {err}");
        }
        std::process::exit(ExitStatus::Interrupted.code().into());
    })
}

/// Scripted source for tests. Running out of lines behaves like an interrupt.
#[derive(Debug, Default)]
pub struct TestInputSource {
    lines: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl TestInputSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for TestInputSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}
