use spp_math::clean::CleanOptions;
use std::io::{self, IsTerminal};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the printer writes its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OutputMode {
    /// Plain text, meant to be read in a terminal: `y = m*x + b`.
    Plain,

    /// Markdown with LaTeX equations, meant to be converted into a document: `$$y = m x + b$$`.
    Markdown,
}

impl OutputMode {
    /// Picks the output mode based on where stdout goes. If stdout is a terminal, the output is
    /// read by a person, so [`OutputMode::Plain`] is used. Otherwise it is being piped or
    /// redirected into a document, so [`OutputMode::Markdown`] is used.
    pub fn detect() -> Self {
        if io::stdout().is_terminal() {
            Self::Plain
        } else {
            Self::Markdown
        }
    }
}

/// Configuration of a [`Printer`](crate::Printer).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrinterConfig {
    /// If true, the printer writes nothing at all.
    pub silent: bool,

    /// Whether equations are cleaned before they are shown, unless overridden for a single call.
    pub clean_equations: bool,

    /// The output mode.
    pub mode: OutputMode,

    /// Options for cleaning equations.
    pub clean: CleanOptions,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            silent: false,
            clean_equations: true,
            mode: OutputMode::detect(),
            clean: CleanOptions::default(),
        }
    }
}

impl PrinterConfig {
    /// Sets whether the printer is silent.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Sets whether equations are cleaned by default.
    pub fn clean_equations(mut self, clean_equations: bool) -> Self {
        self.clean_equations = clean_equations;
        self
    }

    /// Sets the output mode.
    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the options for cleaning equations.
    pub fn clean_options(mut self, clean: CleanOptions) -> Self {
        self.clean = clean;
        self
    }
}
