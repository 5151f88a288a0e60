use crate::consts;
use levenshtein::levenshtein;
use rug::Float;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A context to use when evaluating an expression, containing the values of the variables that
/// can be used within the expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ctxt {
    /// The variables in the context.
    vars: HashMap<String, Float>,
}

impl Default for Ctxt {
    fn default() -> Self {
        Self {
            vars: HashMap::from([
                ("e".to_string(), consts::E.clone()),
                ("pi".to_string(), consts::PI.clone()),
                (r"\pi".to_string(), consts::PI.clone()),
            ]),
        }
    }
}

impl Ctxt {
    /// Creates a new empty context.
    ///
    /// The empty context does not contain the constants `e` and `pi`. Consider using the
    /// [`Default`] implementation instead.
    pub fn new() -> Ctxt {
        Ctxt {
            vars: HashMap::new(),
        }
    }

    /// Add a variable to the context, replacing any previous value.
    pub fn add_var(&mut self, name: &str, value: Float) {
        self.vars.insert(name.to_string(), value);
    }

    /// Get the value of a variable in the context.
    pub fn get_var(&self, name: &str) -> Option<&Float> {
        self.vars.get(name)
    }

    /// Returns all variables in the context with a name similar to the given name, sorted.
    pub fn get_similar_vars(&self, name: &str) -> Vec<&str> {
        let mut similar = self.vars
            .keys()
            .filter(|n| levenshtein(n, name) < 2)
            .map(String::as_str)
            .collect::<Vec<_>>();
        similar.sort_unstable();
        similar
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::float;
    use super::*;

    #[test]
    fn default_constants() {
        let ctxt = Ctxt::default();
        assert!(ctxt.get_var("pi").is_some());
        assert!(ctxt.get_var("e").is_some());
        assert!(Ctxt::new().get_var("pi").is_none());
    }

    #[test]
    fn similar_names() {
        let mut ctxt = Ctxt::new();
        ctxt.add_var("r_o", float(1));
        ctxt.add_var("r_f", float(2));
        ctxt.add_var("mu", float(3));
        assert_eq!(ctxt.get_similar_vars("r_0"), vec!["r_f", "r_o"]);
    }
}
