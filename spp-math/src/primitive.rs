//! Functions to construct [`Float`]s from various types.

use rug::{float::ParseFloatError, Assign, Float};

/// The number of bits of precision to use when computing values.
pub const PRECISION: u32 = 1 << 9;

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] from a string slice, such as `"2"` or `"0.25"`.
pub fn float_from_str(s: &str) -> Result<Float, ParseFloatError> {
    Float::parse(s).map(|parsed| Float::with_val(PRECISION, parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numbers() {
        assert_eq!(float_from_str("2").unwrap(), 2);
        assert_eq!(float_from_str("0.25").unwrap(), 0.25);
        assert!(float_from_str("two").is_err());
    }
}
