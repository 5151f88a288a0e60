use std::{
    env,
    fs,
    io,
    path::{Path, PathBuf},
};

/// The names of the external programs used to build a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Converts a script with `#%%` cells into a notebook.
    pub p2j: String,

    /// Executes the notebook and converts it to markdown.
    pub jupyter: String,

    /// Converts markdown into the final document.
    pub pandoc: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            p2j: "p2j".to_string(),
            jupyter: "jupyter".to_string(),
            pandoc: "pandoc".to_string(),
        }
    }
}

/// Options for a [`ReportGenerator`](crate::ReportGenerator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// The script or markdown file the report is built from.
    pub source: PathBuf,

    /// Where to write the report. Defaults to the source with its extension replaced by
    /// [`ReportOptions::extension`].
    pub output: Option<PathBuf>,

    /// The extension of the report if no output path is given.
    pub extension: String,

    /// The bibliography. Defaults to the first `.bib` file in the source directory.
    pub bibliography: Option<PathBuf>,

    /// The citation style. Defaults to the first `.csl` file in the source directory.
    pub csl: Option<PathBuf>,

    /// Whether files created while building the report are deleted afterwards.
    pub keep_directory_clean: bool,

    /// The external programs to run.
    pub toolchain: Toolchain,
}

/// Returns the path as an absolute path, relative to the current directory.
fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

/// Returns the first file in `directory` with the given extension, in alphabetical order.
fn find_with_extension(directory: &Path, extension: &str) -> io::Result<Option<PathBuf>> {
    let mut found = fs::read_dir(directory)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().map_or(false, |ext| ext == extension))
        .collect::<Vec<_>>();
    found.sort();
    Ok(found.into_iter().next())
}

impl ReportOptions {
    /// Creates options for building a report from the given source, with default settings.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: None,
            extension: "pdf".to_string(),
            bibliography: None,
            csl: None,
            keep_directory_clean: true,
            toolchain: Toolchain::default(),
        }
    }

    /// Sets the output path.
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Sets the extension used when no output path is given.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the bibliography.
    pub fn bibliography(mut self, bibliography: impl Into<PathBuf>) -> Self {
        self.bibliography = Some(bibliography.into());
        self
    }

    /// Sets the citation style.
    pub fn csl(mut self, csl: impl Into<PathBuf>) -> Self {
        self.csl = Some(csl.into());
        self
    }

    /// Sets whether the source directory is kept clean.
    pub fn keep_directory_clean(mut self, keep_directory_clean: bool) -> Self {
        self.keep_directory_clean = keep_directory_clean;
        self
    }

    /// Sets the toolchain.
    pub fn toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// Resolves the options into absolute paths, looking up the bibliography and citation style
    /// if they were not given.
    pub(crate) fn resolve(&self) -> io::Result<ResolvedPaths> {
        let source = absolute(&self.source)?;
        let directory = source.parent()
            .map_or_else(|| PathBuf::from("/"), Path::to_path_buf);
        let output = match &self.output {
            Some(output) => absolute(output)?,
            None => source.with_extension(&self.extension),
        };
        let bibliography = match &self.bibliography {
            Some(path) => Some(absolute(path)?),
            None => find_with_extension(&directory, "bib")?,
        };
        let csl = match &self.csl {
            Some(path) => Some(absolute(path)?),
            None => find_with_extension(&directory, "csl")?,
        };

        Ok(ResolvedPaths {
            notebook: source.with_extension("ipynb"),
            markdown: source.with_extension("md"),
            marker: source.with_extension("report-lock"),
            source,
            directory,
            output,
            bibliography,
            csl,
        })
    }
}

/// The absolute paths of every file involved in building a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedPaths {
    pub source: PathBuf,
    pub directory: PathBuf,
    pub output: PathBuf,
    pub notebook: PathBuf,
    pub markdown: PathBuf,
    pub marker: PathBuf,
    pub bibliography: Option<PathBuf>,
    pub csl: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn default_paths() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("paper.py");
        let paths = ReportOptions::new(&source).resolve().unwrap();

        assert_eq!(paths.directory, dir.path());
        assert_eq!(paths.output, dir.path().join("paper.pdf"));
        assert_eq!(paths.notebook, dir.path().join("paper.ipynb"));
        assert_eq!(paths.markdown, dir.path().join("paper.md"));
        assert_eq!(paths.bibliography, None);
        assert_eq!(paths.csl, None);
    }

    #[test]
    fn explicit_output_keeps_its_extension() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ReportOptions::new(dir.path().join("paper.py"))
            .extension("docx")
            .output(dir.path().join("out/paper.html"))
            .resolve()
            .unwrap();
        assert_eq!(paths.output, dir.path().join("out/paper.html"));

        let paths = ReportOptions::new(dir.path().join("paper.py"))
            .extension("docx")
            .resolve()
            .unwrap();
        assert_eq!(paths.output, dir.path().join("paper.docx"));
    }

    #[test]
    fn finds_bibliography_and_style() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.bib"), "").unwrap();
        fs::write(dir.path().join("a.bib"), "").unwrap();
        fs::write(dir.path().join("ieee.csl"), "").unwrap();

        let paths = ReportOptions::new(dir.path().join("paper.py")).resolve().unwrap();
        assert_eq!(paths.bibliography, Some(dir.path().join("a.bib")));
        assert_eq!(paths.csl, Some(dir.path().join("ieee.csl")));

        let paths = ReportOptions::new(dir.path().join("paper.py"))
            .bibliography(dir.path().join("b.bib"))
            .resolve()
            .unwrap();
        assert_eq!(paths.bibliography, Some(dir.path().join("b.bib")));
    }
}
