//! Hides the arguments of user-defined function applications.

use crate::expr::Expr;

/// Rewrites a single application `name(...)`, keeping only the free symbols in `keep`.
fn suppress_call(app: &Expr, name: &str, keep: &[&str]) -> Expr {
    if keep.is_empty() {
        return Expr::symbol(name);
    }

    let surviving = app.free_symbols()
        .into_iter()
        .filter(|symbol| keep.contains(symbol))
        .map(Expr::symbol)
        .collect::<Vec<_>>();
    if surviving.is_empty() {
        Expr::symbol(name)
    } else {
        Expr::named(name, surviving)
    }
}

/// Rewrites the argument list of every user-defined function application in the expression.
///
/// If `keep` is empty, each application becomes the bare symbol named after the function, so
/// `g(x, y, t)` becomes `g`. Otherwise, an application keeps only those of its free symbols that
/// are in `keep`, in sorted order: with `keep = ["x", "t"]`, `g(x, y, t)` becomes `g(t, x)`. If no
/// symbol survives, the application becomes the bare symbol.
///
/// Builtin functions such as `cos` are left alone, but their arguments are still rewritten.
/// Unevaluated derivatives are left intact. The input is not modified.
pub fn suppress_arguments(expr: &Expr, keep: &[&str]) -> Expr {
    expr.map(&mut |node| match node {
        Expr::Derivative(_) => Some(node.clone()),
        _ => {
            let (name, _) = node.as_named_call()?;
            Some(suppress_call(node, name, keep))
        },
    })
}
