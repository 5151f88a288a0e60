//! Displays equations and markdown narrative for symbolic "papers".
//!
//! A [`Printer`] writes markdown text and equations to any [`io::Write`]. Equations are cleaned
//! with [`spp_math::clean`] before they are shown, so `Derivative(r(t), t)` is displayed as
//! `\dot{r}`. Depending on the [`OutputMode`], equations are written as plain text or as LaTeX
//! between `$$` delimiters.
//!
//! ```
//! use spp_math::Expr;
//! use spp_printer::{OutputMode, Printer, PrinterConfig};
//!
//! let config = PrinterConfig::default().mode(OutputMode::Markdown);
//! let mut printer = Printer::new(config, Vec::new());
//!
//! let rhs: Expr = "-mu / r(t)^2".parse().unwrap();
//! printer.show_equation(Expr::symbol("a"), rhs).unwrap();
//!
//! let output = String::from_utf8(printer.into_inner()).unwrap();
//! assert_eq!(output, "$$a = - \\frac{\\mu}{r^{2}}$$\n\n");
//! ```

mod config;
mod side;

pub use config::{OutputMode, PrinterConfig};
pub use side::Side;

use log::{debug, trace};
use spp_math::{clean::warrants_cleaning, Expr, Latex};
use std::io::{self, Write};

/// Writes markdown text and equations to a writer.
///
/// If [`PrinterConfig::silent`] is set, every method does nothing and succeeds.
#[derive(Debug)]
pub struct Printer<W: Write> {
    config: PrinterConfig,
    out: W,
}

impl Printer<io::Stdout> {
    /// Creates a printer that writes to stdout.
    pub fn stdout(config: PrinterConfig) -> Self {
        Self::new(config, io::stdout())
    }
}

impl<W: Write> Printer<W> {
    /// Creates a printer that writes to the given writer.
    pub fn new(config: PrinterConfig, out: W) -> Self {
        Self { config, out }
    }

    /// Returns the configuration of the printer.
    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    /// Returns a mutable reference to the configuration of the printer.
    pub fn config_mut(&mut self) -> &mut PrinterConfig {
        &mut self.config
    }

    /// Consumes the printer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes markdown text. In [`OutputMode::Markdown`], the text is followed by a blank line so
    /// that consecutive calls produce separate paragraphs.
    pub fn print_markdown(&mut self, text: &str) -> io::Result<()> {
        if self.config.silent {
            return Ok(());
        }

        writeln!(self.out, "{}", text)?;
        if self.config.mode == OutputMode::Markdown {
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// Shows the equation `lhs = rhs`, cleaning both sides if [`PrinterConfig::clean_equations`]
    /// is set.
    ///
    /// If `lhs` is an [`Equation`](spp_math::Equation), it supplies both sides and `rhs` is
    /// ignored. If `rhs` is an equation, it extends the chain, showing `lhs = a = b`.
    pub fn show_equation(&mut self, lhs: impl Into<Side>, rhs: impl Into<Side>) -> io::Result<()> {
        let clean = self.config.clean_equations;
        self.show_equation_with(lhs, Some(rhs.into()), clean)
    }

    /// Shows a single side: an equation on its own, or a bare expression.
    pub fn show(&mut self, side: impl Into<Side>) -> io::Result<()> {
        let clean = self.config.clean_equations;
        self.show_equation_with(side, None, clean)
    }

    /// Shows the equation `lhs = rhs`, cleaning the sides if `clean` is true. Only sides whose
    /// kind warrants it (function calls, derivatives, sums, products and matrices) are cleaned.
    pub fn show_equation_with(
        &mut self,
        lhs: impl Into<Side>,
        rhs: Option<Side>,
        clean: bool,
    ) -> io::Result<()> {
        if self.config.silent {
            return Ok(());
        }

        let rendered = self.render(lhs.into(), rhs, clean);
        match self.config.mode {
            OutputMode::Plain => writeln!(self.out, "{}", rendered),
            OutputMode::Markdown => writeln!(self.out, "$${}$$\n", rendered),
        }
    }

    /// Renders the equation chain without writing it, using the configured output mode.
    pub fn render(&self, lhs: Side, rhs: Option<Side>, clean: bool) -> String {
        let chain = chain(lhs, rhs)
            .into_iter()
            .map(|side| {
                if clean && warrants_cleaning(&side) {
                    spp_math::clean::clean(&side, &self.config.clean)
                } else {
                    side
                }
            })
            .map(|side| match self.config.mode {
                OutputMode::Plain => side.to_string(),
                OutputMode::Markdown => side.as_display().to_string(),
            })
            .collect::<Vec<_>>();

        let rendered = chain.join(" = ");
        trace!("rendered `{}`", rendered);
        rendered
    }
}

/// Normalizes the two sides into the chain of expressions separated by equal signs.
fn chain(lhs: Side, rhs: Option<Side>) -> Vec<Expr> {
    match (lhs, rhs) {
        (Side::Equation(equation), rhs) => {
            if let Some(rhs) = rhs {
                debug!("ignoring right side `{:?}`, the left side is already an equation", rhs);
            }
            vec![equation.lhs, equation.rhs]
        },
        (Side::Expr(lhs), None) => vec![lhs],
        (Side::Expr(lhs), Some(Side::Expr(rhs))) => vec![lhs, rhs],
        (Side::Expr(lhs), Some(Side::Equation(rhs))) => vec![lhs, rhs.lhs, rhs.rhs],
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use spp_math::{clean::CleanOptions, Equation};
    use super::*;

    fn parse(input: &str) -> Expr {
        input.parse().unwrap()
    }

    fn printer(mode: OutputMode) -> Printer<Vec<u8>> {
        Printer::new(PrinterConfig::default().mode(mode), Vec::new())
    }

    fn output(printer: Printer<Vec<u8>>) -> String {
        String::from_utf8(printer.into_inner()).unwrap()
    }

    #[test]
    fn markdown_wraps_equations() {
        let mut printer = printer(OutputMode::Markdown);
        printer.show_equation("v", parse("sqrt(mu / r)")).unwrap();
        assert_eq!(output(printer), "$$v = \\sqrt{\\frac{\\mu}{r}}$$\n\n");
    }

    #[test]
    fn plain_equations() {
        let mut printer = printer(OutputMode::Plain);
        printer.show_equation(parse("diff(r(t), t)"), 0).unwrap();
        assert_eq!(output(printer), "\\dot{r} = 0\n");
    }

    #[test]
    fn silent_prints_nothing() {
        let config = PrinterConfig::default().mode(OutputMode::Markdown).silent(true);
        let mut printer = Printer::new(config, Vec::new());
        printer.print_markdown("# Title").unwrap();
        printer.show_equation("x", 2).unwrap();
        printer.show(Equation::new(parse("y"), parse("x"))).unwrap();
        assert_eq!(output(printer), "");
    }

    #[test]
    fn markdown_paragraphs() {
        let mut printer = printer(OutputMode::Markdown);
        printer.print_markdown("# Title").unwrap();
        printer.print_markdown("Some text.").unwrap();
        assert_eq!(output(printer), "# Title\n\nSome text.\n\n");

        let mut printer = self::printer(OutputMode::Plain);
        printer.print_markdown("# Title").unwrap();
        assert_eq!(output(printer), "# Title\n");
    }

    #[test]
    fn equation_on_the_left_ignores_right() {
        let printer = printer(OutputMode::Plain);
        let equation = Equation::new(parse("y"), parse("m x"));
        let rendered = printer.render(equation.into(), Some("ignored".into()), true);
        assert_eq!(rendered, "y = m*x");
    }

    #[test]
    fn equation_on_the_right_extends_chain() {
        let printer = printer(OutputMode::Plain);
        let equation = Equation::new(parse("b"), parse("c"));
        let rendered = printer.render("a".into(), Some(equation.into()), true);
        assert_eq!(rendered, "a = b = c");
    }

    #[test]
    fn cleaning_can_be_disabled() {
        let mut printer = printer(OutputMode::Plain);
        printer.show_equation_with("a", Some(parse("g(x) + z(t)").into()), false).unwrap();
        printer.config_mut().clean_equations = false;
        printer.show(parse("diff(z(t), t)")).unwrap();
        assert_eq!(output(printer), "a = g(x) + z(t)\nDerivative(z(t), t)\n");
    }

    #[test]
    fn only_some_kinds_are_cleaned() {
        let printer = printer(OutputMode::Plain);
        // a power is not cleaned, a sum is
        let rendered = printer.render(parse("z(t)^2").into(), Some(parse("z(t) + 1").into()), true);
        assert_eq!(rendered, "z(t)**2 = z + 1");
    }

    #[test]
    fn keep_set_from_config() {
        let config = PrinterConfig::default()
            .mode(OutputMode::Markdown)
            .clean_options(CleanOptions::default().with_keep(["x"]));
        let printer = Printer::new(config, Vec::new());
        let rendered = printer.render(parse("g(x, y) + h(y)").into(), None, true);
        assert_eq!(rendered, "g{\\left(x \\right)} + h");
    }
}
