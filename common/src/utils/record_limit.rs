//! Max-record clamping.

use serde_json::Value;

/// Normalizes the caller-provided `maxRecords` value.
pub struct RecordLimit;

impl RecordLimit {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;
    pub const DEFAULT: u32 = 50;

    /// Clamps `raw` into `MIN..=MAX`.
    ///
    /// The value is coerced the way a JavaScript `Number(...)` call does
    /// (booleans, numeric strings including `0x`/`0o`/`0b` literals,
    /// single-element arrays). Anything that coerces to zero or NaN falls
    /// back to `DEFAULT`. Fractions are truncated.
    pub fn clamp(raw: Option<&Value>) -> u32 {
        let requested = raw.map_or(Some(0.0), to_number);

        match requested {
            Some(n) if n.is_finite() && n != 0.0 => {
                n.trunc().clamp(f64::from(Self::MIN), f64::from(Self::MAX)) as u32
            }
            Some(n) if n.is_infinite() => {
                if n > 0.0 {
                    Self::MAX
                } else {
                    Self::MIN
                }
            }
            _ => Self::DEFAULT,
        }
    }
}

/// Numeric coercion of a JSON value; `None` stands for NaN.
fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        // An array coerces through its string form, so only `[]` and `[x]`
        // can be numeric.
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [Value::Bool(_)] | [Value::Object(_)] => None,
            [item] => to_number(item),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

/// String to number, following JavaScript's `StringToNumber` rules.
fn parse_number(input: &str) -> Option<f64> {
    let s = input.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }

    // Rust also accepts "inf" and "nan"; JavaScript does not.
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}
