//! The kinds of functions that can be applied in an [`Expr`](super::Expr).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A builtin (unnamed) function with known semantics, such as `sin` or `sqrt`.
///
/// Builtin functions are never rewritten by the cleaning pipeline, but their arguments are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
    Abs,
    Re,
    Im,
}

impl Builtin {
    /// All builtin functions.
    pub const ALL: [Builtin; 9] = [
        Builtin::Sin,
        Builtin::Cos,
        Builtin::Tan,
        Builtin::Exp,
        Builtin::Ln,
        Builtin::Sqrt,
        Builtin::Abs,
        Builtin::Re,
        Builtin::Im,
    ];

    /// Returns the builtin function with the given name, if one exists. `log` is accepted as an
    /// alias of `ln`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "exp" => Some(Self::Exp),
            "ln" | "log" => Some(Self::Ln),
            "sqrt" => Some(Self::Sqrt),
            "abs" | "Abs" => Some(Self::Abs),
            "re" => Some(Self::Re),
            "im" => Some(Self::Im),
            _ => None,
        }
    }

    /// Returns the canonical name of the function.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Exp => "exp",
            Self::Ln => "log",
            Self::Sqrt => "sqrt",
            Self::Abs => "Abs",
            Self::Re => "re",
            Self::Im => "im",
        }
    }

    /// Returns the number of arguments the function takes.
    pub fn arity(self) -> usize {
        1
    }
}

/// The function applied by a [`Primary::Call`](super::Primary::Call).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Func {
    /// A builtin function, such as `sin`.
    Builtin(Builtin),

    /// A user-defined function, such as `z` in `z(t, x)`. These are the functions the cleaning
    /// pipeline rewrites.
    Named(String),
}

impl Func {
    /// Classifies the given name: builtin names produce [`Func::Builtin`], everything else a
    /// [`Func::Named`].
    pub fn from_name(name: &str) -> Self {
        Builtin::from_name(name)
            .map(Self::Builtin)
            .unwrap_or_else(|| Self::Named(name.to_string()))
    }

    /// Returns the name of the function.
    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(builtin) => builtin.name(),
            Self::Named(name) => name,
        }
    }

    /// Returns true if this is a user-defined function.
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify() {
        assert_eq!(Func::from_name("cos"), Func::Builtin(Builtin::Cos));
        assert_eq!(Func::from_name("log"), Func::Builtin(Builtin::Ln));
        assert_eq!(Func::from_name("z"), Func::Named("z".to_string()));
        assert!(Func::from_name("g").is_named());
    }

    #[test]
    fn names_round_trip() {
        for builtin in Builtin::ALL {
            assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));
        }
    }
}
