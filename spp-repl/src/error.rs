use crate::command::CommandError;
use spp_error::Error as ParseError;
use std::io;

/// Utility enum to package errors that can occur while processing a line.
#[derive(Debug)]
pub enum Error {
    /// Errors that occurred while parsing.
    ParseError(ParseError),

    /// An invalid REPL command.
    CommandError(CommandError),

    /// The output could not be written.
    IoError(io::Error),
}

impl Error {
    /// Report the error to stderr.
    ///
    /// Parse errors are shown with their source spans highlighted.
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::ParseError(err) => {
                if let Err(io_err) = err.report_to_stderr("input", input) {
                    eprintln!("{}", io_err);
                }
            },
            Self::CommandError(err) => eprintln!("{}", err),
            Self::IoError(err) => eprintln!("{}", err),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::ParseError(err)
    }
}

impl From<CommandError> for Error {
    fn from(err: CommandError) -> Self {
        Self::CommandError(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::IoError(err)
    }
}
