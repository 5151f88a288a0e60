use spp_printer::OutputMode;
use std::fmt;

/// A printer setting changed from the REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `:clean on` or `:clean off`.
    Clean(bool),

    /// `:mode plain` or `:mode markdown`.
    Mode(OutputMode),

    /// `:keep a b c`. With no symbols, function applications lose all of their arguments.
    Keep(Vec<String>),
}

/// A single line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// A blank line.
    Empty,

    /// Markdown text to print as-is.
    Markdown(&'a str),

    /// A command.
    Command(Command),

    /// An expression or equation to show.
    Statement(&'a str),
}

/// Errors in REPL commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The command does not exist.
    Unknown(String),

    /// The command exists, but the argument is not valid for it.
    InvalidArgument {
        /// The name of the command.
        command: &'static str,

        /// The argument that was given.
        argument: String,
    },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Unknown(name) => {
                write!(f, "unknown command `:{}` (expected `:clean`, `:mode`, or `:keep`)", name)
            },
            Self::InvalidArgument { command, argument } => {
                write!(f, "invalid argument `{}` for `:{}`", argument, command)
            },
        }
    }
}

impl std::error::Error for CommandError {}

impl Command {
    /// Parses the text after the leading `:`.
    fn parse(input: &str) -> Result<Self, CommandError> {
        let mut words = input.split_whitespace();
        let name = words.next().unwrap_or_default();
        let argument = words.clone().collect::<Vec<_>>().join(" ");

        match name {
            "clean" => match argument.as_str() {
                "on" => Ok(Self::Clean(true)),
                "off" => Ok(Self::Clean(false)),
                _ => Err(CommandError::InvalidArgument { command: "clean", argument }),
            },
            "mode" => match argument.as_str() {
                "plain" => Ok(Self::Mode(OutputMode::Plain)),
                "markdown" => Ok(Self::Mode(OutputMode::Markdown)),
                _ => Err(CommandError::InvalidArgument { command: "mode", argument }),
            },
            "keep" => Ok(Self::Keep(words.map(str::to_string).collect())),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

impl<'a> Line<'a> {
    /// Classifies a line of input.
    ///
    /// Lines starting with `#` are markdown headings and are printed unchanged. Lines starting
    /// with `>` are markdown paragraphs, printed without the marker. Lines starting with `:` are
    /// commands, and anything else is an expression or an equation.
    pub fn parse(line: &'a str) -> Result<Self, CommandError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Ok(Self::Empty)
        } else if trimmed.starts_with('#') {
            Ok(Self::Markdown(trimmed))
        } else if let Some(text) = trimmed.strip_prefix('>') {
            Ok(Self::Markdown(text.trim_start()))
        } else if let Some(command) = trimmed.strip_prefix(':') {
            Command::parse(command).map(Self::Command)
        } else {
            Ok(Self::Statement(trimmed))
        }
    }
}
