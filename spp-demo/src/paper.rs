//! The worked example: Hohmann and bi-parabolic transfers between circular orbits, followed by
//! the equations of motion of a satellite in polar coordinates.

use crate::{error::Error, transfer::{self, Transfer}};
use log::info;
use spp_math::{Equation, Expr};
use spp_printer::Printer;
use std::io::Write;

/// Orbit ratios at which both transfer costs are tabulated.
const TABLE_RATIOS: [f64; 8] = [1.0, 2.0, 5.0, 10.0, 12.0, 15.0, 20.0, 40.0];

/// The interval searched for the crossover ratio.
const CROSSOVER_BRACKET: (f64, f64) = (1.0, 40.0);

/// Results computed while writing the paper.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// The orbit ratio above which the bi-parabolic transfer is cheaper.
    pub crossover: f64,
}

/// Rounds to the given number of decimal places, for display.
fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Writes the whole paper to the printer.
pub fn write_paper<W: Write>(printer: &mut Printer<W>) -> Result<Summary, Error> {
    printer.print_markdown("# Paper Printer Demo {-}")?;
    printer.print_markdown("## Hohmann and bi-parabolic transfers {-}")?;
    printer.print_markdown(
        "This problem compares two ways of moving a satellite between circular orbits. It shows \
        how a problem can be set up symbolically, normalized, and then solved numerically.",
    )?;

    let transfer = Transfer::new()?;
    hohmann(printer, &transfer)?;
    bi_parabolic(printer, &transfer)?;
    tabulate(printer, &transfer)?;
    let crossover = crossover(printer, &transfer)?;
    equations_of_motion(printer)?;

    printer.print_markdown("### References {-}")?;
    Ok(Summary { crossover })
}

/// Derives the total velocity change of a Hohmann transfer.
fn hohmann<W: Write>(printer: &mut Printer<W>, transfer: &Transfer) -> Result<(), Error> {
    printer.print_markdown("### Hohmann transfer {-}")?;
    printer.print_markdown(
        "A Hohmann transfer uses two burns along the velocity vector: one onto an elliptical \
        transfer orbit, and one half an orbit later to circularize.",
    )?;

    let dv1 = transfer::parse("sqrt(mu / r_o) (sqrt(2 r_f / (r_f + r_o)) - 1)")?;
    let dv2 = transfer::parse("sqrt(mu / r_f) (1 - sqrt(2 r_o / (r_f + r_o)))")?;
    printer.show_equation(r"\Delta{V_{1}}", &dv1)?;
    printer.show_equation(r"\Delta{V_{2}}", &dv2)?;

    printer.print_markdown("We write the final radius in terms of the orbit ratio.")?;
    let r_f = Expr::symbol("r_f");
    let ratio = transfer::parse("alpha r_o")?;
    printer.show_equation(r_f.clone(), &ratio)?;

    let total = (dv1 + dv2).subs(&r_f, &ratio);
    printer.show_equation(r"\Delta{V_{tol}}", total)?;

    printer.print_markdown("Dividing by the circular speed of the initial orbit leaves a function of the ratio alone.")?;
    printer.show_equation(r"\frac{\Delta{V_{tol}}}{\sqrt{\mu / r_o}}", &transfer.hohmann)?;
    Ok(())
}

/// Derives the total velocity change of a bi-parabolic transfer. The sum is shown as written.
fn bi_parabolic<W: Write>(printer: &mut Printer<W>, transfer: &Transfer) -> Result<(), Error> {
    printer.print_markdown("### Bi-parabolic transfer {-}")?;
    printer.print_markdown("The bi-parabolic transfer sums the differences between the circular and parabolic speeds of both orbits.")?;

    let total = transfer::parse("sqrt(2 mu / r_f) - sqrt(mu / r_f) + sqrt(2 mu / r_o) - sqrt(mu / r_o)")?;
    let equation = Equation::new(Expr::symbol(r"\Delta{V_{tol}}"), total);
    printer.show_equation_with(equation, None, false)?;
    printer.show_equation(r"\frac{\Delta{V_{tol}}}{\sqrt{\mu / r_o}}", &transfer.bi_parabolic)?;
    Ok(())
}

/// Tabulates both normalized costs over a range of orbit ratios.
fn tabulate<W: Write>(printer: &mut Printer<W>, transfer: &Transfer) -> Result<(), Error> {
    printer.print_markdown("### Comparison {-}")?;
    printer.print_markdown("Since the final orbit is larger than the initial orbit, the ratio is at least 1.")?;

    let mut table = String::from("| $\\alpha$ | Hohmann | Bi-parabolic |\n|---:|---:|---:|");
    for alpha in TABLE_RATIOS {
        let (hohmann, bi_parabolic) = transfer.costs(alpha)?;
        table.push_str(&format!("\n| {} | {:.4} | {:.4} |", alpha, hohmann, bi_parabolic));
    }
    printer.print_markdown(&table)?;
    Ok(())
}

/// Finds the orbit ratio at which both transfers cost the same.
fn crossover<W: Write>(printer: &mut Printer<W>, transfer: &Transfer) -> Result<f64, Error> {
    printer.print_markdown("### Crossover {-}")?;
    printer.print_markdown("The two costs are equal where their difference crosses zero, which we find numerically.")?;
    printer.show(Equation::new(transfer.hohmann.clone(), transfer.bi_parabolic.clone()))?;
    printer.show_equation(0, transfer.hohmann.clone() - transfer.bi_parabolic.clone())?;

    let (lo, hi) = CROSSOVER_BRACKET;
    let alpha = transfer.crossover(lo, hi, 1e-10)?;
    info!("transfer costs cross at alpha = {}", alpha);
    printer.show_equation(r"\alpha", round_to(alpha, 4))?;
    printer.print_markdown("Above this ratio, the bi-parabolic transfer is cheaper.")?;
    Ok(alpha)
}

/// Shows the acceleration of a satellite in polar coordinates, with and without dot notation.
fn equations_of_motion<W: Write>(printer: &mut Printer<W>) -> Result<(), Error> {
    printer.print_markdown("### Equations of motion {-}")?;
    printer.print_markdown("In polar coordinates, the radial and transverse accelerations are")?;

    let radial = transfer::parse("diff(r(t), t, 2) - r(t) diff(theta(t), t)^2")?;
    let transverse = transfer::parse("r(t) diff(theta(t), t, 2) + 2 diff(r(t), t) diff(theta(t), t)")?;
    printer.show_equation("a_r", &radial)?;
    printer.show_equation("a_theta", &transverse)?;

    printer.print_markdown("Without dot notation, the radial acceleration reads")?;
    printer.show_equation_with("a_r", Some(radial.into()), false)?;

    printer.print_markdown("The satellite starts on the initial orbit.")?;
    printer.show_equation(transfer::parse("r(t_0)")?, "r_o")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use spp_printer::{OutputMode, PrinterConfig};
    use super::*;

    fn write(config: PrinterConfig) -> (Summary, String) {
        let mut printer = Printer::new(config, Vec::new());
        let summary = write_paper(&mut printer).unwrap();
        (summary, String::from_utf8(printer.into_inner()).unwrap())
    }

    #[test]
    fn markdown_paper() {
        let (summary, output) = write(PrinterConfig::default().mode(OutputMode::Markdown));
        assert_float_absolute_eq!(summary.crossover, 11.94, 0.01);
        assert!(output.starts_with("# Paper Printer Demo {-}\n\n"));
        assert!(output.contains("$$a_{r} = \\ddot{r} - r \\dot{\\theta}^{2}$$\n\n"));
        assert!(output.contains("$$r{_0} = r_{o}$$\n\n"));
        assert!(output.contains("| 1 | 0.0000 | 0.8284 |"));
    }

    #[test]
    fn uncleaned_equation_keeps_derivatives() {
        let (_, output) = write(PrinterConfig::default().mode(OutputMode::Markdown));
        assert!(output.contains("\\frac{d^{2}}{d t^{2}} r{\\left(t \\right)}"));
    }

    #[test]
    fn plain_paper() {
        let (_, output) = write(PrinterConfig::default().mode(OutputMode::Plain));
        assert!(!output.contains("$$"));
        assert!(output.contains("a_r = \\ddot{r} - r*\\dot{theta}**2\n"));
    }

    #[test]
    fn silent_paper_still_computes() {
        let (summary, output) = write(PrinterConfig::default().silent(true));
        assert_eq!(output, "");
        assert_float_absolute_eq!(summary.crossover, 11.94, 0.01);
    }
}
