use std::borrow::Cow;

/// Names of Greek letters that are written as LaTeX commands.
const GREEK: [&str; 40] = [
    "alpha", "beta", "gamma", "Gamma", "delta", "Delta", "epsilon", "varepsilon", "zeta", "eta",
    "theta", "Theta", "vartheta", "iota", "kappa", "lambda", "Lambda", "mu", "nu", "xi", "Xi",
    "pi", "Pi", "rho", "varrho", "sigma", "Sigma", "tau", "upsilon", "Upsilon", "phi", "Phi",
    "varphi", "chi", "psi", "Psi", "omega", "Omega", "ell", "hbar",
];

/// Writes a single part of a symbol name, turning Greek letter names into LaTeX commands.
fn latex_word(word: &str) -> Cow<'_, str> {
    if GREEK.contains(&word) {
        Cow::Owned(format!("\\{}", word))
    } else {
        Cow::Borrowed(word)
    }
}

/// Converts a symbol name into LaTeX.
///
/// Greek letter names are written as commands (`mu` becomes `\mu`), and everything after the
/// first underscore becomes a subscript (`r_o` becomes `r_{o}`). The names produced by the clean
/// pipeline are understood too: `\dot{theta}` becomes `\dot{\theta}` and `r_o{_0}` becomes
/// `r_{o}{_0}`. Any other name that already contains LaTeX markup, such as `\mu`, is written
/// unchanged.
pub fn latex_symbol(name: &str) -> Cow<'_, str> {
    for accent in ["\\ddot", "\\dot"] {
        let inner = name.strip_prefix(accent)
            .and_then(|rest| rest.strip_prefix('{'))
            .and_then(|rest| rest.strip_suffix('}'));
        if let Some(inner) = inner {
            return Cow::Owned(format!("{}{{{}}}", accent, latex_symbol(inner)));
        }
    }

    if let Some(start) = name.rfind("{_") {
        if start > 0 && name.ends_with('}') {
            return Cow::Owned(format!("{}{}", latex_symbol(&name[..start]), &name[start..]));
        }
    }

    if name.contains(['\\', '{', '}']) {
        return Cow::Borrowed(name);
    }

    match name.split_once('_') {
        Some((base, sub)) if !base.is_empty() && !sub.is_empty() => {
            Cow::Owned(format!("{}_{{{}}}", latex_word(base), latex_symbol(sub)))
        },
        _ => latex_word(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greek_and_subscripts() {
        assert_eq!(latex_symbol("x"), "x");
        assert_eq!(latex_symbol("theta"), "\\theta");
        assert_eq!(latex_symbol("t_f"), "t_{f}");
        assert_eq!(latex_symbol("v_c_1"), "v_{c_{1}}");
        assert_eq!(latex_symbol("_x"), "_x");
        assert_eq!(latex_symbol("\\ddot{r}"), "\\ddot{r}");
        assert_eq!(latex_symbol("\\mu"), "\\mu");
    }

    #[test]
    fn clean_pipeline_names() {
        assert_eq!(latex_symbol("\\dot{theta}"), "\\dot{\\theta}");
        assert_eq!(latex_symbol("\\ddot{r_o}"), "\\ddot{r_{o}}");
        assert_eq!(latex_symbol("v_c{_0}"), "v_{c}{_0}");
        assert_eq!(latex_symbol("\\dot{phi{_f}}"), "\\dot{\\phi{_f}}");
    }
}
