use std::collections::VecDeque;
use std::io::{self, Write};

use super::error::SessionError;

/// The interactive-input primitive, injected into the session at construction
/// so tests can script a run instead of patching process-global state.
pub trait Prompter {
    /// Shows `prompt` and returns one line of input with the terminator removed.
    fn read_line(&mut self, prompt: &str) -> Result<String, SessionError>;
}

/// Production prompter: prints to stdout and reads one line from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String, SessionError> {
        print!("{prompt}");
        io::stdout()
            .flush()
            .map_err(|e| SessionError::Input(e.to_string()))?;
        let mut line = String::new();
        let read = io::stdin()
            .read_line(&mut line)
            .map_err(|e| SessionError::Input(e.to_string()))?;
        if read == 0 {
            return Err(SessionError::Input("stdin closed".to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Replays a fixed sequence of responses. Used to script otherwise-interactive
/// sessions in tests; running past the script is an input error.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    responses: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, _prompt: &str) -> Result<String, SessionError> {
        self.responses
            .pop_front()
            .ok_or_else(|| SessionError::Input("scripted input exhausted".to_string()))
    }
}

/// One keystroke's worth of menu intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuAction {
    Select(usize),
    Reset,
    Confirm,
    Quit,
    Unknown,
}

pub(crate) fn parse_action(input: &str) -> MenuAction {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return MenuAction::Confirm;
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "q" | "quit" => MenuAction::Quit,
        "r" | "reset" => MenuAction::Reset,
        "n" | "next" => MenuAction::Confirm,
        other => other
            .parse::<usize>()
            .map(MenuAction::Select)
            .unwrap_or(MenuAction::Unknown),
    }
}
