mod error;
mod paper;
mod transfer;

use error::Error;
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use spp_printer::{OutputMode, Printer, PrinterConfig};
use spp_report::{ReportGenerator, ReportOptions, ScopeRegistry};
use std::{fs::File, io::{self, BufWriter, Write}, path::PathBuf, process::ExitCode};

/// Initializes logging to stderr, at the level given by the `SPP_LOG` environment variable.
fn init_logging() {
    let level = std::env::var("SPP_LOG")
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);
    if let Err(err) = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("could not initialize logging: {}", err);
    }
}

/// Command-line options of the demo.
#[derive(Debug, Default, PartialEq)]
struct Args {
    /// Print plain text instead of markdown.
    plain: bool,

    /// Print nothing.
    silent: bool,

    /// Write the markdown to this file and compile it into a report.
    report: Option<PathBuf>,
}

impl Args {
    /// Parses the arguments, not including the program name.
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--plain" => parsed.plain = true,
                "--silent" => parsed.silent = true,
                "--report" => match args.next() {
                    Some(path) => parsed.report = Some(PathBuf::from(path)),
                    None => return Err("`--report` needs a path to write the markdown to".to_string()),
                },
                other => return Err(format!("unknown argument `{}`", other)),
            }
        }
        Ok(parsed)
    }
}

/// Writes the paper to the markdown file, then builds the report from it with pandoc.
fn report(path: PathBuf) -> Result<(), Error> {
    let out = BufWriter::new(File::create(&path)?);
    let config = PrinterConfig::default().mode(OutputMode::Markdown);
    let mut printer = Printer::new(config, out);
    paper::write_paper(&mut printer)?;
    printer.into_inner().flush()?;

    let generator = ReportGenerator::new(ReportOptions::new(path));
    match generator.generate_from_markdown(&ScopeRegistry::new())? {
        Some(output) => println!("wrote {}", output.display()),
        None => println!("another report is being generated; skipped"),
    }
    Ok(())
}

fn run(args: Args) -> Result<(), Error> {
    if let Some(path) = args.report {
        return report(path);
    }

    let mode = if args.plain {
        OutputMode::Plain
    } else {
        OutputMode::Markdown
    };
    let config = PrinterConfig::default().mode(mode).silent(args.silent);
    let mut printer = Printer::new(config, io::stdout().lock());
    let summary = paper::write_paper(&mut printer)?;
    info!("finished with {:?}", summary);
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("usage: spp-demo [--plain] [--silent] [--report <out.md>]");
            return ExitCode::FAILURE;
        },
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.report_to_stderr();
            ExitCode::FAILURE
        },
    }
}
