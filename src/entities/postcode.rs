use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{invalid_postcode_error, Error};

/// A UK postcode in canonical form: uppercase, one space before the inward code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Postcode(String);

impl Postcode {
    /// Trims and uppercases `raw`, then checks it against the UK postcode shape:
    /// one or two letters, a digit, an optional letter or digit, an optional
    /// space, a digit and two letters.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let normalized = raw.trim().to_uppercase();

        if normalized.len() < 5 || !normalized.is_ascii() {
            return Err(invalid_postcode_error());
        }

        let (outward, inward) = normalized.split_at(normalized.len() - 3);
        let outward = outward.strip_suffix(' ').unwrap_or(outward);

        if !is_inward_code(inward) || !is_outward_code(outward) {
            return Err(invalid_postcode_error());
        }

        Ok(Self(format!("{} {}", outward, inward)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_outward_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    let letters = bytes
        .iter()
        .take(2)
        .take_while(|b| b.is_ascii_uppercase())
        .count();

    match &bytes[letters..] {
        [digit] => letters > 0 && digit.is_ascii_digit(),
        [digit, extra] => {
            letters > 0
                && digit.is_ascii_digit()
                && (extra.is_ascii_uppercase() || extra.is_ascii_digit())
        }
        _ => false,
    }
}

fn is_inward_code(code: &str) -> bool {
    matches!(
        code.as_bytes(),
        [digit, a, b] if digit.is_ascii_digit() && a.is_ascii_uppercase() && b.is_ascii_uppercase()
    )
}

impl FromStr for Postcode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[test]
fn accepts_every_outward_shape() {
    for raw in ["M1 1AE", "B33 8TH", "CR2 6XH", "DN55 1PT", "W1A 0AX", "EC1A 1BB"] {
        assert!(Postcode::parse(raw).is_ok(), "{} should be valid", raw);
    }
}

#[test]
fn normalizes_case_and_spacing() {
    let spaced = Postcode::parse("  sw1a 1aa ").unwrap();
    let packed = Postcode::parse("SW1A1AA").unwrap();

    assert_eq!(spaced.as_str(), "SW1A 1AA");
    assert_eq!(spaced, packed);
}

#[test]
fn rejects_malformed_input() {
    use crate::error::INVALID_POSTCODE_ERROR;

    for raw in [
        "",
        "   ",
        "SW1A",
        "SW1A  1AA",
        "1SW 1AA",
        "SWA1 1AA",
        "ABC1 1AA",
        "SW1A 1A1",
        "SW1A 11A",
        "SW1A-1AA",
        "SW1\u{c4} 1AA",
    ] {
        let err = Postcode::parse(raw).unwrap_err();
        assert_eq!(err.code, INVALID_POSTCODE_ERROR, "{:?} should be rejected", raw);
    }
}
