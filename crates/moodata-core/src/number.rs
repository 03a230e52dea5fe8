//! Numeric access to textual indicator values
//!
//! Indicator values are stored as strings so that a worksheet can hold blank
//! and partially entered fields. Every place that needs a number goes through
//! [`parse_number`], and every computed number is rendered with
//! [`format_number`] unless a formula supplies its own formatting.

/// Parse a stored value as a number.
///
/// Returns `None` for blank text, for anything that is not a decimal number,
/// and for non-finite literals such as `inf` or `NaN`. A `,` is accepted as
/// the decimal separator.
pub fn parse_number(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }

    let parsed = if value.contains(',') {
        value.replace(',', ".").parse::<f64>().ok()?
    } else {
        value.parse::<f64>().ok()?
    };

    parsed.is_finite().then_some(parsed)
}

/// Default rendering of a computed value: fixed point, two decimals.
pub fn format_number(value: f64) -> String {
    format!("{:.2}", value)
}

/// Render a value as a percentage: multiplied by 100, two decimals.
pub fn format_percent(value: f64) -> String {
    format_number(value * 100.0)
}

/// Significant digits shown for a difference
const DELTA_PRECISION: i32 = 6;

/// Render a difference like C's `%g`: six significant digits, trailing
/// zeros removed, scientific notation for very large or small magnitudes.
pub fn format_delta(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // rounding to the precision can bump the exponent (999999.7 -> 1e+06)
    let sci = format!("{:.*e}", (DELTA_PRECISION - 1) as usize, value);
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return sci;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= DELTA_PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (DELTA_PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Outcome of checking a raw keystroke value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedInput {
    /// Field was cleared
    Blank,
    /// A number, with `,` already replaced by `.`
    Number(String),
    /// Not a number; the previous value should be kept
    Rejected(String),
}

impl NormalizedInput {
    /// The value to store, if the input is acceptable
    pub fn into_value(self) -> Option<String> {
        match self {
            NormalizedInput::Blank => Some(String::new()),
            NormalizedInput::Number(s) => Some(s),
            NormalizedInput::Rejected(_) => None,
        }
    }
}

/// Normalize a value typed by the user before it is stored.
pub fn normalize_input(raw: &str) -> NormalizedInput {
    let filtered = raw.replace(',', ".");
    if filtered.is_empty() {
        NormalizedInput::Blank
    } else if parse_number(&filtered).is_some() {
        NormalizedInput::Number(filtered)
    } else {
        NormalizedInput::Rejected(raw.to_string())
    }
}
