//! Renames function applications evaluated at the initial or final time.

use crate::expr::Expr;
use super::{dot::{apply_rules, RewriteRule}, TimeSymbols};

/// Returns the suffix appended to the name of a function evaluated at `boundary`: the part of the
/// symbol after its first underscore, written as a subscript. `t_0` gives `{_0}`.
fn boundary_suffix(boundary: &str) -> String {
    let sub = boundary.split_once('_').map_or(boundary, |(_, sub)| sub);
    format!("{{_{}}}", sub)
}

/// Returns the display name of an application of `name` to `args` if one of the arguments is the
/// initial or final time symbol: `r(t_0)` is named `r{_0}`. The initial time takes precedence if
/// both are present.
pub(super) fn boundary_name(name: &str, args: &[Expr], time: &TimeSymbols) -> Option<String> {
    let has_arg = |symbol: &str| args.iter().any(|arg| arg.as_symbol() == Some(symbol));
    let boundary = if has_arg(time.initial.as_str()) {
        &time.initial
    } else if has_arg(time.final_.as_str()) {
        &time.final_
    } else {
        return None;
    };
    Some(format!("{}{}", name, boundary_suffix(boundary)))
}

/// Renames every user-defined function application that has the initial or final time symbol as
/// one of its arguments. With the default symbols, `r(t_0)` becomes `r{_0}` and `v(t_f, x)`
/// becomes `v{_f}`. The initial time takes precedence if both are present.
pub fn rename_boundary_calls(expr: &Expr, time: &TimeSymbols) -> Expr {
    let rules = expr.named_calls()
        .into_iter()
        .rev()
        .filter_map(|app| {
            let (name, args) = app.as_named_call()?;
            let renamed = boundary_name(name, args, time)?;
            Some(RewriteRule::new(app.clone(), Expr::symbol(renamed)))
        })
        .collect::<Vec<_>>();

    apply_rules(expr, &rules)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        input.parse().unwrap()
    }

    #[test]
    fn initial_and_final_values() {
        let expr = parse("r(t_0) + v(t_f, x) + w(t)");
        assert_eq!(rename_boundary_calls(&expr, &TimeSymbols::default()), Expr::Add(vec![
            Expr::symbol("r{_0}"),
            Expr::symbol("v{_f}"),
            parse("w(t)"),
        ]));
    }

    #[test]
    fn only_direct_arguments_count() {
        let expr = parse("r(2 t_0)");
        assert_eq!(rename_boundary_calls(&expr, &TimeSymbols::default()), expr);
    }

    #[test]
    fn initial_time_wins() {
        let app = parse("x(t_f, t_0)");
        let (name, args) = app.as_named_call().unwrap();
        assert_eq!(boundary_name(name, args, &TimeSymbols::default()).as_deref(), Some("x{_0}"));
        assert_eq!(boundary_name("x", &[Expr::symbol("t")], &TimeSymbols::default()), None);
    }

    #[test]
    fn custom_symbols() {
        let time = TimeSymbols::new("tau", "start", "end");
        let expr = parse("x(start) * x(end)");
        assert_eq!(rename_boundary_calls(&expr, &time), Expr::Mul(vec![
            Expr::symbol("x{_start}"),
            Expr::symbol("x{_end}"),
        ]));
    }
}
