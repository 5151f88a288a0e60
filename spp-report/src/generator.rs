use crate::{
    error::ReportError,
    markdown::strip_percent_lines_in_file,
    options::{ReportOptions, ResolvedPaths},
    scope::{CleanDirectoryScope, FileScope, ScopeRegistry},
};
use log::{info, warn};
use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::Command,
};

/// Builds a report by running the external toolchain.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    options: ReportOptions,
}

impl ReportGenerator {
    /// Creates a report generator.
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Returns the options of the generator.
    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Runs a program to completion in `directory`. If the program writes anything to stderr, both
    /// its stderr and stdout are logged.
    fn run<I, S>(&self, program: &str, args: I, directory: &Path) -> Result<(), ReportError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        info!("running `{}`", program);
        let output = Command::new(program)
            .args(args)
            .current_dir(directory)
            .output()
            .map_err(|source| ReportError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            warn!("{}", stderr);
            warn!("{}", String::from_utf8_lossy(&output.stdout));
        }
        if !output.status.success() {
            warn!("`{}` exited with {}", program, output.status);
        }

        Ok(())
    }

    /// Runs `pandoc` on the markdown file.
    fn pandoc(&self, paths: &ResolvedPaths, markdown: &Path) -> Result<(), ReportError> {
        let mut args: Vec<OsString> = vec![
            markdown.into(),
            "-s".into(),
            "-N".into(),
            "-o".into(),
            paths.output.clone().into(),
        ];
        if let Some(bibliography) = &paths.bibliography {
            args.push("--citeproc".into());
            let mut arg = OsString::from("--bibliography=");
            arg.push(bibliography);
            args.push(arg);
        }
        if let Some(csl) = &paths.csl {
            let mut arg = OsString::from("--csl=");
            arg.push(csl);
            args.push(arg);
        }

        self.run(&self.options.toolchain.pandoc, args, &paths.directory)
    }

    /// Runs `build` inside the scopes that keep the directory clean and prevent the report from
    /// being generated twice at once. Returns `Ok(None)` if another generation is in progress.
    fn scoped<F>(&self, registry: &ScopeRegistry, build: F) -> Result<Option<PathBuf>, ReportError>
    where
        F: FnOnce(&ResolvedPaths) -> Result<(), ReportError>,
    {
        let paths = self.options.resolve()?;
        if registry.is_controlled(&paths.marker) || paths.marker.exists() {
            info!("skipping `{}`, a report is already being generated", paths.source.display());
            return Ok(None);
        }

        let _clean = CleanDirectoryScope::new(
            &paths.directory,
            [&paths.output],
            self.options.keep_directory_clean,
        )?;
        let _marker = FileScope::enter(registry, &paths.marker)?;

        build(&paths)?;
        if !paths.output.is_file() {
            return Err(ReportError::OutputMissing(paths.output));
        }

        info!("wrote `{}`", paths.output.display());
        Ok(Some(paths.output))
    }

    /// Builds the report from a notebook-style script: the script is converted into a notebook
    /// with `p2j`, executed and converted to markdown with `jupyter nbconvert`, and compiled with
    /// `pandoc`.
    ///
    /// Returns the path of the report, or `None` if a report is already being generated from the
    /// same source.
    pub fn generate(&self, registry: &ScopeRegistry) -> Result<Option<PathBuf>, ReportError> {
        self.scoped(registry, |paths| {
            let toolchain = &self.options.toolchain;
            self.run(
                &toolchain.p2j,
                [paths.source.as_os_str(), OsStr::new("-o")],
                &paths.directory,
            )?;
            self.run(
                &toolchain.jupyter,
                [
                    OsStr::new("nbconvert"),
                    OsStr::new("--execute"),
                    OsStr::new("--to"),
                    OsStr::new("markdown"),
                    OsStr::new("--no-input"),
                    paths.notebook.as_os_str(),
                ],
                &paths.directory,
            )?;
            strip_percent_lines_in_file(&paths.markdown)?;
            self.pandoc(paths, &paths.markdown)
        })
    }

    /// Builds the report from a markdown file, such as one written by the printer. Only `pandoc`
    /// is run.
    pub fn generate_from_markdown(
        &self,
        registry: &ScopeRegistry,
    ) -> Result<Option<PathBuf>, ReportError> {
        self.scoped(registry, |paths| self.pandoc(paths, &paths.source))
    }
}
