//! # Dimension Normalization: Human Sizes to Whole MiB
//!
//! Partition sizes and offsets are written by humans as strings such as
//! `100MB`, `1.5GiB` or `1GB512MB`, and emitted as an integer count of MiB.
//!
//! ## Grammar
//!
//! ```text
//! dimension := ""                       (absent, field omitted)
//!            | "0"
//!            | sign? term+
//! term      := digits ("." digits)? unit
//! unit      := "B" | "KB" | "KiB" | "MB" | "MiB" | "GB" | "GiB"
//!            | "TB" | "TiB" | "PB" | "PiB" | "EB" | "EiB"
//! ```
//!
//! Every unit is a power of 1024: `MB` and `MiB` both mean 2^20 bytes.
//!
//! ## Invariants
//!
//! - Conversion is exact. A byte count that is not an integer multiple of
//!   [`MIB`] is rejected, never rounded.
//! - A negative magnitude is rejected before granularity is checked.

use std::fmt;

use crate::error::DimensionError;

/// Bytes in one MiB, the granularity of every emitted dimension.
pub const MIB: u64 = 1 << 20;

/// Parse a human size string into a whole number of MiB.
///
/// Returns `Ok(None)` for the empty string, which means "not specified".
///
/// # Errors
///
/// - [`DimensionError::Syntax`] if the string does not follow the grammar.
/// - [`DimensionError::Negative`] if the magnitude is below zero.
/// - [`DimensionError::Granularity`] if the size is not a whole MiB.
/// - [`DimensionError::Overflow`] if the size does not fit in a `u64` MiB count.
pub fn parse_dimension(input: &str) -> Result<Option<u64>, DimensionError> {
    if input.is_empty() {
        return Ok(None);
    }

    let (negative, body) = match input.as_bytes()[0] {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    let bytes = parse_bytes(input, body)?;

    if negative && bytes > 0 {
        return Err(DimensionError::Negative(input.to_string()));
    }
    if bytes % u128::from(MIB) != 0 {
        return Err(DimensionError::Granularity(input.to_string()));
    }
    u64::try_from(bytes / u128::from(MIB))
        .map(Some)
        .map_err(|_| DimensionError::Overflow(input.to_string()))
}

/// Sum every `<number><unit>` term of `body` into an exact byte count.
fn parse_bytes(input: &str, body: &str) -> Result<u128, DimensionError> {
    let syntax = |reason: &str| DimensionError::Syntax {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    if body == "0" {
        return Ok(0);
    }
    if body.is_empty() {
        return Err(syntax("missing magnitude"));
    }

    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let mut total: u128 = 0;
    let mut rest = body;

    while !rest.is_empty() {
        let number_end = rest.find(|c: char| !is_number(c)).unwrap_or(rest.len());
        let (number, after) = rest.split_at(number_end);
        if number.is_empty() {
            return Err(syntax("expected a number"));
        }
        let unit_end = after.find(is_number).unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_end);
        if unit.is_empty() {
            return Err(syntax("missing unit"));
        }
        let scale = unit_scale(unit).ok_or_else(|| syntax(&format!("unknown unit {unit:?}")))?;

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if fraction.contains('.') || (whole.is_empty() && fraction.is_empty()) {
            return Err(syntax("malformed number"));
        }

        let overflow = || DimensionError::Overflow(input.to_string());
        let digits = format!("{whole}{fraction}");
        let mantissa: u128 = digits.parse().map_err(|_| overflow())?;
        let denominator = u32::try_from(fraction.len())
            .ok()
            .and_then(|exp| 10u128.checked_pow(exp))
            .ok_or_else(overflow)?;
        let numerator = mantissa.checked_mul(u128::from(scale)).ok_or_else(overflow)?;

        // A fractional byte can never add up to a whole MiB.
        if numerator % denominator != 0 {
            return Err(DimensionError::Granularity(input.to_string()));
        }
        total = total
            .checked_add(numerator / denominator)
            .ok_or_else(overflow)?;
        rest = after;
    }

    Ok(total)
}

fn unit_scale(unit: &str) -> Option<u64> {
    let shift = match unit {
        "B" => 0,
        "KB" | "KiB" => 10,
        "MB" | "MiB" => 20,
        "GB" | "GiB" => 30,
        "TB" | "TiB" => 40,
        "PB" | "PiB" => 50,
        "EB" | "EiB" => 60,
        _ => return None,
    };
    Some(1u64 << shift)
}

/// A human size string together with its canonical MiB count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeValue {
    raw: String,
    mib: Option<u64>,
}

impl SizeValue {
    /// Normalize `raw`. See [`parse_dimension`] for the accepted grammar.
    pub fn parse(raw: &str) -> Result<Self, DimensionError> {
        Ok(Self {
            raw: raw.to_string(),
            mib: parse_dimension(raw)?,
        })
    }

    /// The string as written.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whole MiB, or `None` when the string was empty.
    pub fn mib(&self) -> Option<u64> {
        self.mib
    }
}

impl fmt::Display for SizeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mib {
            Some(mib) => write!(f, "{} ({mib} MiB)", self.raw),
            None => f.write_str("(unset)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_is_absent() {
        assert_eq!(parse_dimension(""), Ok(None));
    }

    #[test]
    fn binary_units() {
        assert_eq!(parse_dimension("100MB"), Ok(Some(100)));
        assert_eq!(parse_dimension("50MB"), Ok(Some(50)));
        assert_eq!(parse_dimension("1GB"), Ok(Some(1024)));
        assert_eq!(parse_dimension("1GiB"), Ok(Some(1024)));
        assert_eq!(parse_dimension("2TB"), Ok(Some(2 * 1024 * 1024)));
        assert_eq!(parse_dimension("1048576B"), Ok(Some(1)));
        assert_eq!(parse_dimension("2048KiB"), Ok(Some(2)));
    }

    #[test]
    fn bare_zero_and_explicit_plus() {
        assert_eq!(parse_dimension("0"), Ok(Some(0)));
        assert_eq!(parse_dimension("+300MB"), Ok(Some(300)));
        assert_eq!(parse_dimension("-0MB"), Ok(Some(0)));
    }

    #[test]
    fn compound_and_fractional_terms() {
        assert_eq!(parse_dimension("1GB512MB"), Ok(Some(1536)));
        assert_eq!(parse_dimension("1.5GiB"), Ok(Some(1536)));
        assert_eq!(parse_dimension("0.5MB"), Err(DimensionError::Granularity("0.5MB".into())));
    }

    #[test]
    fn negative_is_rejected() {
        assert_eq!(parse_dimension("-1GB"), Err(DimensionError::Negative("-1GB".into())));
    }

    #[test]
    fn sub_mib_granularity_is_rejected() {
        assert_eq!(parse_dimension("1MiB1B"), Err(DimensionError::Granularity("1MiB1B".into())));
        assert_eq!(parse_dimension("1KB"), Err(DimensionError::Granularity("1KB".into())));
        let msg = parse_dimension("1KB").unwrap_err().to_string();
        assert!(msg.contains("finest granularity is 1 MiB"), "{msg}");
    }

    #[test]
    fn syntax_errors() {
        for bad in ["100", "MB", "1.2.3MB", "12XB", "-", "1 GB", "."] {
            assert!(
                matches!(parse_dimension(bad), Err(DimensionError::Syntax { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn huge_values_overflow_instead_of_wrapping() {
        let input = format!("{}EB", u128::MAX);
        assert!(matches!(parse_dimension(&input), Err(DimensionError::Overflow(_))));
    }

    #[test]
    fn size_value_keeps_raw_string() {
        let v = SizeValue::parse("1GB").unwrap();
        assert_eq!(v.raw(), "1GB");
        assert_eq!(v.mib(), Some(1024));
        assert_eq!(SizeValue::parse("").unwrap().mib(), None);
    }

    proptest! {
        /// Whole MiB counts survive every spelling of the MiB unit.
        #[test]
        fn whole_mib_is_exact(n in 0u64..10_000_000) {
            prop_assert_eq!(parse_dimension(&format!("{n}MiB")), Ok(Some(n)));
            prop_assert_eq!(parse_dimension(&format!("{n}MB")), Ok(Some(n)));
        }

        /// Whole GiB counts map to 1024 MiB each.
        #[test]
        fn gib_scales_by_1024(n in 0u64..1_000_000) {
            prop_assert_eq!(parse_dimension(&format!("{n}GB")), Ok(Some(n * 1024)));
        }

        /// Any byte count that is not a MiB multiple is a granularity error.
        #[test]
        fn partial_mib_is_always_rejected(n in 0u64..100_000, r in 1u64..MIB) {
            let input = format!("{}B", n * MIB + r);
            prop_assert_eq!(parse_dimension(&input), Err(DimensionError::Granularity(input.clone())));
        }

        /// Any strictly negative magnitude is a negative-dimension error.
        #[test]
        fn negatives_are_rejected(n in 1u64..100_000) {
            let input = format!("-{n}MB");
            prop_assert_eq!(parse_dimension(&input), Err(DimensionError::Negative(input.clone())));
        }
    }
}
