mod command;
mod error;

use command::{Command, Line};
use error::Error;
use log::{debug, warn};
use rustyline::{error::ReadlineError, DefaultEditor};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use spp_math::{clean::CleanOptions, Statement};
use spp_printer::{Printer, PrinterConfig};
use std::{fs, io::{self, IsTerminal, Read, Write}, process::ExitCode};

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

/// Applies a command to the printer configuration.
fn apply_command<W: Write>(command: Command, printer: &mut Printer<W>) {
    debug!("applying {:?}", command);
    let config = printer.config_mut();
    match command {
        Command::Clean(clean) => config.clean_equations = clean,
        Command::Mode(mode) => config.mode = mode,
        Command::Keep(keep) => config.clean = CleanOptions::default()
            .with_time(config.clean.time.clone())
            .with_keep(keep),
    }
}

/// Processes a single line of input.
fn process_line<W: Write>(line: &str, printer: &mut Printer<W>) -> Result<(), Error> {
    match Line::parse(line)? {
        Line::Empty => Ok(()),
        Line::Markdown(text) => Ok(printer.print_markdown(text)?),
        Line::Command(command) => {
            apply_command(command, printer);
            Ok(())
        },
        Line::Statement(input) => {
            match input.parse::<Statement>()? {
                Statement::Expr(expr) => printer.show(expr)?,
                Statement::Equation(equation) => printer.show(equation)?,
            }
            Ok(())
        },
    }
}

/// Processes every line of the source, reporting errors without stopping. Returns true if every
/// line was processed successfully.
fn execute<W: Write>(source: &str, printer: &mut Printer<W>) -> bool {
    let mut success = true;
    for line in source.lines() {
        if let Err(err) = process_line(line, printer) {
            err.report_to_stderr(line);
            success = false;
        }
    }
    success
}

fn main() -> ExitCode {
    init_logging();

    let mut args = std::env::args();
    args.next();

    let mut printer = Printer::stdout(PrinterConfig::default());

    if let Some(filename) = args.next() {
        // run source file
        let source = match fs::read_to_string(&filename) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("could not read `{}`: {}", filename, err);
                return ExitCode::FAILURE;
            },
        };

        if execute(&source, &mut printer) { ExitCode::SUCCESS } else { ExitCode::FAILURE }
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        let mut source = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut source) {
            eprintln!("could not read stdin: {}", err);
            return ExitCode::FAILURE;
        }

        if execute(&source, &mut printer) { ExitCode::SUCCESS } else { ExitCode::FAILURE }
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            },
        };

        fn read_line(rl: &mut DefaultEditor, printer: &mut Printer<io::Stdout>) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            if let Err(err) = process_line(&input, printer) {
                err.report_to_stderr(&input);
            }
            Ok(())
        }

        loop {
            if let Err(err) = read_line(&mut rl, &mut printer) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => warn!("{}", err),
                }
                break;
            }
        }

        ExitCode::SUCCESS
    }
}
