//! Text-field handling for the five bond inputs
//!
//! `sanitize` is applied on every edit and returns the text the field should
//! hold. `parse_field`/`parse_years` turn finished text into engine inputs.
//! Nothing here touches the valuation engine.

use crate::error::ValuationError;

/// The inputs a caller collects before pricing or solving for yield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Price,
    Coupon,
    Years,
    Face,
    Rate,
}

impl InputField {
    pub const ALL: [InputField; 5] = [
        InputField::Price,
        InputField::Coupon,
        InputField::Years,
        InputField::Face,
        InputField::Rate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InputField::Price => "PRICE",
            InputField::Coupon => "COUPON",
            InputField::Years => "YEARS",
            InputField::Face => "FACE",
            InputField::Rate => "RATE",
        }
    }

    /// Years are whole periods; every other field takes one decimal point
    pub fn allows_decimal(&self) -> bool {
        !matches!(self, InputField::Years)
    }
}

/// Keep ASCII digits and, for decimal fields, the first `.`.
pub fn sanitize(field: InputField, text: &str) -> String {
    let mut seen_point = false;
    text.chars()
        .filter(|&c| {
            if c.is_ascii_digit() {
                true
            } else if c == '.' && field.allows_decimal() && !seen_point {
                seen_point = true;
                true
            } else {
                false
            }
        })
        .collect()
}

/// Parse a decimal field, rejecting what `sanitize` would have altered
pub fn parse_field(field: InputField, text: &str) -> Result<f64, ValuationError> {
    let text = text.trim();
    let name = field.label();

    if text.is_empty() {
        return Err(ValuationError::invalid(name, "value is required"));
    }
    if text.matches('.').count() > 1 {
        return Err(ValuationError::invalid(name, "more than one decimal point"));
    }
    if !field.allows_decimal() && text.contains('.') {
        return Err(ValuationError::invalid(name, "must be a whole number"));
    }
    if sanitize(field, text) != text {
        return Err(ValuationError::invalid(name, format!("'{}' is not a number", text)));
    }
    if text == "." {
        return Err(ValuationError::invalid(name, "'.' is not a number"));
    }

    text.parse::<f64>()
        .map_err(|e| ValuationError::invalid(name, e.to_string()))
}

/// Parse the term field into a whole number of years
pub fn parse_years(text: &str) -> Result<u32, ValuationError> {
    let field = InputField::Years;
    parse_field(field, text)?;
    text.trim()
        .parse::<u32>()
        .map_err(|e| ValuationError::invalid(field.label(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_letters() {
        assert_eq!(sanitize(InputField::Price, "1a0b0.5"), "100.5");
        assert_eq!(sanitize(InputField::Face, "$1,000"), "1000");
    }

    #[test]
    fn test_sanitize_keeps_first_point_only() {
        assert_eq!(sanitize(InputField::Coupon, "0.1.5"), "0.15");
    }

    #[test]
    fn test_sanitize_years_drops_point() {
        assert_eq!(sanitize(InputField::Years, "5.5"), "55");
    }

    #[test]
    fn test_sanitize_idempotent() {
        for field in InputField::ALL {
            let once = sanitize(field, "-12.3.4x");
            assert_eq!(sanitize(field, &once), once);
        }
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field(InputField::Rate, "0.15").unwrap(), 0.15);
        assert_eq!(parse_field(InputField::Price, " 832.4 ").unwrap(), 832.4);
        assert_eq!(parse_field(InputField::Face, "1000.").unwrap(), 1000.0);
    }

    #[test]
    fn test_parse_field_rejects() {
        assert!(parse_field(InputField::Price, "").is_err());
        assert!(parse_field(InputField::Price, "1.2.3").is_err());
        assert!(parse_field(InputField::Price, "12abc").is_err());
        assert!(parse_field(InputField::Price, "-5").is_err());
        assert!(parse_field(InputField::Price, ".").is_err());
    }

    #[test]
    fn test_parse_years() {
        assert_eq!(parse_years("30").unwrap(), 30);
        assert!(parse_years("5.5").is_err());
        assert!(parse_years("").is_err());
        assert!(parse_years("99999999999").is_err());
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = InputField::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, ["PRICE", "COUPON", "YEARS", "FACE", "RATE"]);
    }
}
