//! Keyboard input for `tepang run`.
//!
//! On a terminal, keys are read one at a time in raw mode. Piped stdin is
//! read as one command per line so sessions can be scripted.

use std::io::{self, IsTerminal};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// An action the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleTimer,
    Reset,
    PlayMusic,
    StopMusic,
    ToggleTheme,
    Help,
    Quit,
}

impl Command {
    pub fn parse(word: &str) -> Option<Self> {
        match word.trim().to_ascii_lowercase().as_str() {
            "s" | "start" | "pause" => Some(Command::ToggleTimer),
            "r" | "reset" => Some(Command::Reset),
            "p" | "play" => Some(Command::PlayMusic),
            "x" | "stop" => Some(Command::StopMusic),
            "t" | "theme" => Some(Command::ToggleTheme),
            "h" | "?" | "help" => Some(Command::Help),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Unknown(String),
    Blank,
}

impl Input {
    pub fn from_line(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Input::Blank;
        }
        match Command::parse(line) {
            Some(command) => Input::Command(command),
            None => Input::Unknown(line.to_string()),
        }
    }

    pub fn from_key(key: KeyEvent) -> Self {
        // Raw mode swallows SIGINT, so Ctrl-C arrives as a key.
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('d') => Input::Command(Command::Quit),
                _ => Input::Blank,
            };
        }
        match key.code {
            KeyCode::Esc => Input::Command(Command::Quit),
            KeyCode::Char(' ') => Input::Command(Command::ToggleTimer),
            KeyCode::Char(c) => Input::from_line(c.encode_utf8(&mut [0; 4])),
            _ => Input::Blank,
        }
    }
}

/// Restores cooked mode when dropped.
pub struct RawMode(());

impl RawMode {
    pub fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawMode(()))
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!(error = %e, "could not restore terminal mode");
        }
    }
}

pub enum Keys {
    Terminal { events: EventStream, _raw: RawMode },
    Script(Lines<BufReader<Stdin>>),
}

impl Keys {
    pub fn open() -> io::Result<Self> {
        if io::stdin().is_terminal() {
            let raw = RawMode::enable()?;
            Ok(Keys::Terminal {
                events: EventStream::new(),
                _raw: raw,
            })
        } else {
            tracing::debug!("stdin is not a terminal, reading one command per line");
            Ok(Keys::Script(BufReader::new(tokio::io::stdin()).lines()))
        }
    }

    /// Next input, or `None` once stdin is closed. Cancel safe.
    pub async fn next(&mut self) -> io::Result<Option<Input>> {
        match self {
            Keys::Terminal { events, .. } => loop {
                match events.next().await {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        return Ok(Some(Input::from_key(key)));
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(e),
                    None => return Ok(None),
                }
            },
            Keys::Script(lines) => Ok(lines.next_line().await?.map(|line| Input::from_line(&line))),
        }
    }
}
