//! Parsing of resistance values typed on the command line.
//!
//! Accepted forms: `220000`, `220k`, `4.7k`, `4k7`, `1M`, `1M5`, `470R`,
//! `20kΩ`, `20 kohm`. `k`/`K` is kilo, `M` is mega; `R` or a bare number is ohms.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseOhmsError {
    #[error("empty resistance value")]
    Empty,
    #[error("`{0}` is not a resistance (try 4700, 4.7k, 4k7 or 1M)")]
    Malformed(String),
    #[error("resistance must be a finite value >= 0, got `{0}`")]
    OutOfRange(String),
}

fn multiplier(c: char) -> Option<f64> {
    match c {
        'R' | 'r' => Some(1.0),
        'k' | 'K' => Some(1e3),
        'M' => Some(1e6),
        _ => None,
    }
}

/// Parse a resistance in ohms.
///
/// # Errors
/// [`ParseOhmsError`] for empty, malformed, negative or non-finite input.
pub fn parse_ohms(input: &str) -> Result<f64, ParseOhmsError> {
    let mut s = input.trim();
    for unit in ["Ω", "ohms", "ohm", "Ohm", "Ohms"] {
        if let Some(rest) = s.strip_suffix(unit) {
            s = rest.trim_end();
            break;
        }
    }
    if s.is_empty() {
        return Err(ParseOhmsError::Empty);
    }

    let malformed = || ParseOhmsError::Malformed(input.trim().to_string());
    let (number, scale) = match s.char_indices().find(|(_, c)| multiplier(*c).is_some()) {
        None => (s.to_string(), 1.0),
        Some((i, c)) => {
            let scale = multiplier(c).ok_or_else(malformed)?;
            let (head, tail) = (&s[..i], &s[i + c.len_utf8()..]);
            if head.is_empty() {
                return Err(malformed());
            }
            if tail.is_empty() {
                (head.to_string(), scale)
            } else if head.contains('.') || !tail.bytes().all(|b| b.is_ascii_digit()) {
                // 4k7 style: the multiplier stands in for the decimal point
                return Err(malformed());
            } else {
                (format!("{head}.{tail}"), scale)
            }
        }
    };

    let value: f64 = number.trim().parse().map_err(|_| malformed())?;
    let ohms = value * scale;
    if !ohms.is_finite() || ohms < 0.0 {
        return Err(ParseOhmsError::OutOfRange(input.trim().to_string()));
    }
    Ok(ohms)
}
