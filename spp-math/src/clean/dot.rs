//! Rewrites time derivatives of user-defined functions into dot notation.

use crate::{derivative::derivative, expr::{Derivative, Expr}};
use log::{debug, trace};

/// A single substitution in a rewrite pipeline: every subtree strictly equal to `from` is
/// replaced with `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    /// The subtree to replace.
    pub from: Expr,

    /// The replacement.
    pub to: Expr,
}

impl RewriteRule {
    /// Creates a new rule.
    pub fn new(from: Expr, to: Expr) -> Self {
        Self { from, to }
    }

    /// Applies the rule to the expression, returning the rewritten expression.
    pub fn apply(&self, expr: &Expr) -> Expr {
        expr.subs(&self.from, &self.to)
    }
}

/// Applies each rule to the expression, in order. Later rules see the output of earlier ones.
pub fn apply_rules(expr: &Expr, rules: &[RewriteRule]) -> Expr {
    rules.iter().fold(expr.clone(), |expr, rule| {
        trace!("rewriting `{}` -> `{}`", rule.from, rule.to);
        rule.apply(&expr)
    })
}

/// Differentiates the expression with respect to `time`. If the derivative cannot be computed,
/// it is kept as an unevaluated [`Derivative`], so the expression is treated as time-dependent.
fn time_derivative(expr: &Expr, time: &str) -> Expr {
    match derivative(expr, time) {
        Ok(d) => d,
        Err(err) => {
            debug!("keeping the derivative of `{}` unevaluated: {}", expr, err);
            match expr {
                Expr::Derivative(d) => Expr::Derivative(d.differentiated(time)),
                expr => Expr::Derivative(Derivative::new(expr.clone(), time, 1)),
            }
        },
    }
}

/// Builds the rules that rewrite a time-dependent function application `name(...)`.
///
/// The rules are, in order: the second time derivative to `\ddot{name}`, the first time
/// derivative to `\dot{name}`, and the application itself to the symbol `name`. If the first
/// derivative is identically zero, only the last rule is produced.
pub fn time_rules(app: &Expr, name: &str, time: &str) -> Vec<RewriteRule> {
    let first = time_derivative(app, time);
    let mut rules = Vec::with_capacity(3);

    if first.is_zero() {
        debug!("`{}` is constant in `{}`", app, time);
    } else {
        let second = time_derivative(&first, time);
        rules.push(RewriteRule::new(second, Expr::symbol(format!("\\ddot{{{}}}", name))));
        rules.push(RewriteRule::new(first, Expr::symbol(format!("\\dot{{{}}}", name))));
    }
    rules.push(RewriteRule::new(app.clone(), Expr::symbol(name)));

    rules
}

/// Rewrites first and second time derivatives of user-defined functions into dot notation.
///
/// Every user-defined function application whose arguments contain `time`, such as `z(t, x)`,
/// is rewritten with the rules from [`time_rules`]: `Derivative(z(t, x), (t, 2))` becomes
/// `\ddot{z}`, `Derivative(z(t, x), t)` becomes `\dot{z}`, and `z(t, x)` becomes `z`.
/// Applications containing other applications are rewritten first.
///
/// The input is not modified.
pub fn dot_time_derivatives(expr: &Expr, time: &str) -> Expr {
    dot_time_derivatives_named(expr, time, |name, _| name.to_string())
}

/// Like [`dot_time_derivatives`], but the symbol standing for each application is named by
/// `display_name`, given the function name and the application's arguments.
pub(super) fn dot_time_derivatives_named<F>(expr: &Expr, time: &str, display_name: F) -> Expr
where
    F: Fn(&str, &[Expr]) -> String,
{
    let rules = expr.named_calls()
        .into_iter()
        .rev()
        .filter(|app| app.has_symbol(time))
        .filter_map(|app| {
            let (name, args) = app.as_named_call()?;
            Some(time_rules(app, &display_name(name, args), time))
        })
        .flatten()
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
    fn dots_first_and_second_derivatives() {
        let z = parse("z(t, x)");
        let dz = z.diff("t").unwrap();
        let ddz = dz.diff("t").unwrap();
        let expr = z * dz * ddz * Expr::symbol("y");

        assert_eq!(dot_time_derivatives(&expr, "t"), Expr::Mul(vec![
            Expr::symbol("z"),
            Expr::symbol("\\dot{z}"),
            Expr::symbol("\\ddot{z}"),
            Expr::symbol("y"),
        ]));
    }

    #[test]
    fn constant_application_is_only_renamed() {
        let expr = parse("z(t - t) + diff(w(t), t)");
        let dotted = dot_time_derivatives(&expr, "t");
        assert_eq!(dotted, Expr::Add(vec![Expr::symbol("z"), Expr::symbol("\\dot{w}")]));
        assert!(dotted.free_symbols().iter().all(|sym| !sym.contains("{z}")));
    }

    #[test]
    fn zero_derivative_produces_one_rule() {
        let app = parse("z(t - t)");
        assert_eq!(time_rules(&app, "z", "t"), vec![
            RewriteRule::new(app.clone(), Expr::symbol("z")),
        ]);
    }

    #[test]
    fn rules_are_ordered_highest_derivative_first() {
        let app = parse("r(t)");
        let rules = time_rules(&app, "r", "t");
        assert_eq!(rules.iter().map(|rule| rule.to.to_string()).collect::<Vec<_>>(), vec![
            "\\ddot{r}",
            "\\dot{r}",
            "r",
        ]);
    }

    #[test]
    fn idempotent() {
        let expr = parse("diff(r(t), t, 2) - r(t) diff(theta(t), t)^2 + mu / r(t)^2");
        let once = dot_time_derivatives(&expr, "t");
        let twice = dot_time_derivatives(&once, "t");
        assert_eq!(once, twice);
        let expected = parse("rdd - r thd^2 + mu / r^2")
            .subs(&Expr::symbol("rdd"), &Expr::symbol("\\ddot{r}"))
            .subs(&Expr::symbol("thd"), &Expr::symbol("\\dot{theta}"));
        assert_eq!(once, expected);
    }

    #[test]
    fn input_is_unchanged() {
        let expr = parse("z(t) * diff(z(t), t)");
        let copy = expr.clone();
        let _ = dot_time_derivatives(&expr, "t");
        assert_eq!(expr, copy);
    }

    #[test]
    fn time_independent_applications_are_kept() {
        let expr = parse("g(x) + z(t)");
        assert_eq!(dot_time_derivatives(&expr, "t"), parse("g(x) + z"));
    }

    #[test]
    fn outer_applications_first() {
        let expr = parse("w(z(t), t)");
        assert_eq!(dot_time_derivatives(&expr, "t"), Expr::symbol("w"));
    }
}
