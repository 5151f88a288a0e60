use spp_math::numerical::EvalError;
use spp_report::ReportError;
use std::{fmt, io};

/// Errors that can occur while writing the paper.
#[derive(Debug)]
pub enum Error {
    /// One of the expressions in the paper could not be parsed.
    Parse {
        /// The source of the expression.
        input: &'static str,

        /// The parse error.
        err: spp_error::Error,
    },

    /// An expression could not be evaluated.
    Eval(EvalError),

    /// The transfer costs do not cross in the searched interval.
    NoCrossover {
        /// The lower bound of the interval.
        lo: f64,

        /// The upper bound of the interval.
        hi: f64,
    },

    /// The output could not be written.
    Io(io::Error),

    /// The report could not be generated.
    Report(ReportError),
}

impl Error {
    /// Report the error to stderr. Parse errors are shown with their source spans highlighted.
    pub fn report_to_stderr(&self) {
        match self {
            Self::Parse { input, err } => {
                if let Err(io_err) = err.report_to_stderr("paper", input) {
                    eprintln!("{}", io_err);
                }
            },
            err => eprintln!("{}", err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Parse { input, .. } => write!(f, "could not parse `{}`", input),
            Self::Eval(err) => write!(f, "{}", err),
            Self::NoCrossover { lo, hi } => {
                write!(f, "the transfer costs do not cross between {} and {}", lo, hi)
            },
            Self::Io(err) => write!(f, "{}", err),
            Self::Report(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        Self::Eval(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ReportError> for Error {
    fn from(err: ReportError) -> Self {
        Self::Report(err)
    }
}
