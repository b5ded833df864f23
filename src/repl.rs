//! Terminal front end — line commands and transcript rendering.
//!
//! DESIGN
//! ======
//! Stands in for the browser sidebar and chat pane. Lines starting with `/`
//! are commands; anything else is text to submit. A line holding only
//! `"""` opens a block that collects pasted multi-line text until the next
//! `"""`. Rendering helpers return strings so they can be tested without a
//! terminal.

use std::fmt::Write;

use chrono::Local;

use crate::notice::{ErrorCode, Notice};
use crate::prompt::{ProcessingMode, UnknownMode};
use crate::state::{Conversation, ConversationStore, Message, Role};

pub const BLOCK_FENCE: &str = "\"\"\"";

pub const HELP_TEXT: &str = "\
Commands:
  /new                      start a new chat
  /list                     list chats (* marks the active one)
  /select <n|id>            switch to chat number n or id
  /delete [n|id]            delete a chat (default: the active one)
  /mode <explain|summarize|shorten>
                            choose how pasted text is processed
  /key <api key>            store your Gemini API key
  /show                     print the active chat
  /help                     show this help
  /quit                     exit
Anything else is sent to the active chat. Wrap multi-line text in \"\"\" lines.";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    #[error("unknown command '/{0}' (try /help)")]
    UnknownCommand(String),

    #[error("/{command} needs {what}")]
    MissingArgument { command: &'static str, what: &'static str },

    #[error(transparent)]
    Mode(#[from] UnknownMode),
}

impl ErrorCode for ReplError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCommand(_) => "E_UNKNOWN_COMMAND",
            Self::MissingArgument { .. } => "E_MISSING_ARGUMENT",
            Self::Mode(_) => "E_UNKNOWN_MODE",
        }
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    List,
    Select(String),
    Delete(Option<String>),
    Mode(ProcessingMode),
    Key(String),
    Show,
    Help,
    Quit,
    Submit(String),
}

/// A complete unit of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Contents of a `"""` block; always submitted as text.
    Block(String),
}

/// Parse a complete input. Returns `Ok(None)` for blank input.
///
/// # Errors
///
/// Returns a [`ReplError`] for unknown commands or missing arguments.
pub fn parse_input(input: &Input) -> Result<Option<Command>, ReplError> {
    match input {
        Input::Line(line) => parse_command(line),
        Input::Block(text) if text.trim().is_empty() => Ok(None),
        Input::Block(text) => Ok(Some(Command::Submit(text.clone()))),
    }
}

/// Parse one input line. Returns `Ok(None)` for blank input.
///
/// # Errors
///
/// Returns a [`ReplError`] for unknown commands or missing arguments.
pub fn parse_command(input: &str) -> Result<Option<Command>, ReplError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Ok(Some(Command::Submit(input.to_string())));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let arg = (!arg.is_empty()).then(|| arg.to_string());

    let command = match name {
        "new" => Command::New,
        "list" | "ls" => Command::List,
        "select" | "s" => Command::Select(arg.ok_or(ReplError::MissingArgument {
            command: "select",
            what: "a chat number or id",
        })?),
        "delete" | "rm" => Command::Delete(arg),
        "mode" => {
            let raw = arg.ok_or(ReplError::MissingArgument { command: "mode", what: "explain, summarize or shorten" })?;
            Command::Mode(raw.parse()?)
        }
        "key" => Command::Key(arg.ok_or(ReplError::MissingArgument { command: "key", what: "an API key" })?),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ReplError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

/// Map a `/select` or `/delete` argument to a conversation id: a 1-based
/// position in the list, or an id verbatim.
#[must_use]
pub fn resolve_target(store: &ConversationStore, target: &str) -> String {
    target
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| store.conversations().get(index))
        .map_or_else(|| target.to_string(), |c| c.id.clone())
}

// =============================================================================
// LINE BUFFER
// =============================================================================

/// Accumulates raw lines into complete inputs, handling `"""` blocks.
#[derive(Debug, Default)]
pub struct LineBuffer {
    block: Option<Vec<String>>,
}

impl LineBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn in_block(&self) -> bool {
        self.block.is_some()
    }

    /// Feed one line. Returns a complete input when one is ready.
    pub fn push_line(&mut self, line: &str) -> Option<Input> {
        let is_fence = line.trim() == BLOCK_FENCE;
        match self.block.take() {
            None if is_fence => {
                self.block = Some(Vec::new());
                None
            }
            None => Some(Input::Line(line.to_string())),
            Some(lines) if is_fence => Some(Input::Block(lines.join("\n"))),
            Some(mut lines) => {
                lines.push(line.to_string());
                self.block = Some(lines);
                None
            }
        }
    }
}

// =============================================================================
// RENDERING
// =============================================================================

#[must_use]
pub fn render_conversation_list(store: &ConversationStore) -> String {
    if store.conversations().is_empty() {
        return "No conversations yet. Create your first chat with /new".to_string();
    }
    let active = store.active_id();
    let mut out = String::new();
    for (index, conversation) in store.conversations().iter().enumerate() {
        let marker = if Some(conversation.id.as_str()) == active { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:>2}. {} ({} messages)",
            index + 1,
            conversation.title,
            conversation.messages.len()
        );
    }
    out.pop();
    out
}

#[must_use]
pub fn render_message(message: &Message) -> String {
    let who = match message.role {
        Role::User => "You",
        Role::Assistant => "Gemini",
    };
    let time = message.timestamp.with_timezone(&Local).format("%H:%M");
    format!("[{time}] {who}:\n{}", message.content)
}

#[must_use]
pub fn render_conversation(conversation: &Conversation) -> String {
    let mut out = format!("== {} ==", conversation.title);
    for message in &conversation.messages {
        out.push_str("\n\n");
        out.push_str(&render_message(message));
    }
    out
}

#[must_use]
pub fn render_modes(current: ProcessingMode) -> String {
    ProcessingMode::ALL
        .iter()
        .map(|mode| {
            let marker = if *mode == current { '*' } else { ' ' };
            format!("{marker} {:<10} {} ({})", mode.as_str(), mode.label(), mode.description())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn render_notice(notice: &Notice) -> String {
    match notice.code {
        Some(code) => format!("{}: {} [{code}]", notice.title, notice.description),
        None => format!("{}: {}", notice.title, notice.description),
    }
}

#[must_use]
pub fn welcome_text() -> &'static str {
    "Welcome to Gemini Assistant. Create a new chat with /new to get started (/help for commands)."
}

#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;
