use std::{fmt, io, path::PathBuf};

/// Errors that can occur while generating a report.
#[derive(Debug)]
pub enum ReportError {
    /// An I/O error occurred while reading or writing files.
    Io(io::Error),

    /// An external program could not be started.
    Spawn {
        /// The name of the program.
        program: String,

        /// The underlying error.
        source: io::Error,
    },

    /// The toolchain finished, but the output file was not created.
    OutputMissing(PathBuf),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{}", err),
            Self::Spawn { program, source } => write!(f, "could not run `{}`: {}", program, source),
            Self::OutputMissing(path) => {
                write!(f, "the report `{}` was not created successfully", path.display())
            },
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) | Self::Spawn { source: err, .. } => Some(err),
            Self::OutputMissing(_) => None,
        }
    }
}

impl From<io::Error> for ReportError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
