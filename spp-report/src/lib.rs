//! Report generation for symbolic "papers".
//!
//! A paper is written either as a notebook-style Python script (cells separated by `#%%`) or as
//! markdown produced by the printer. [`ReportGenerator`] turns it into a document by running an
//! external toolchain:
//!
//! 1. `p2j` converts the script into a notebook,
//! 2. `jupyter nbconvert` executes the notebook and converts it to markdown,
//! 3. `pandoc` compiles the markdown, with citations, into the final report.
//!
//! Markdown sources skip straight to the last step. Intermediate files are removed afterwards by a
//! [`CleanDirectoryScope`], and a [`FileScope`] marker prevents a report from being generated
//! twice at once (for example, when the script being executed asks for its own report).

mod error;
mod generator;
mod markdown;
mod options;
pub mod scope;

pub use error::ReportError;
pub use generator::ReportGenerator;
pub use markdown::{strip_percent_lines, strip_percent_lines_in_file};
pub use options::{ReportOptions, Toolchain};
pub use scope::{CleanDirectoryScope, FileScope, ScopeRegistry};
