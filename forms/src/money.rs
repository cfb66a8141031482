//! Amounts are typed and displayed with a decimal comma and sent with a dot.

use rust_decimal::{Decimal, RoundingStrategy};

/// Strips regular and non-breaking spaces and turns the decimal comma into a dot
pub fn normalize_number_input(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{00A0}')
        .collect::<String>()
        .replacen(',', ".", 1)
}

/// Parses a user-typed amount ("12,50", "1 200.00", "12")
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let normalized = normalize_number_input(raw);
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<Decimal>().ok()
}

/// Dot-decimal text sent to the server, `None` for empty or invalid input
pub fn to_wire(raw: &str) -> Option<String> {
    parse_amount(raw).map(|amount| amount.normalize().to_string())
}

/// Two decimals with a comma: `12.5` -> `12,50`
pub fn format_display(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded).replace('.', ",")
}

/// Parses a formatted table cell such as `+ 50,00 €` or `− 50,00 €` and
/// returns its absolute value
pub fn parse_display_abs(cell: &str) -> Option<Decimal> {
    let cleaned: String = normalize_number_input(&cell.replace('€', ""))
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == '+')
        .collect();
    cleaned.parse::<Decimal>().ok().map(|d| d.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_normalize_number_input() {
        assert_eq!(normalize_number_input(" 1\u{00A0}234,5 "), "1234.5");
        assert_eq!(normalize_number_input("12.00"), "12.00");
        assert_eq!(normalize_number_input(""), "");
    }

    #[test]
    fn test_to_wire_converts_comma() {
        assert_eq!(to_wire("12,50").as_deref(), Some("12.5"));
        assert_eq!(to_wire("1 500").as_deref(), Some("1500"));
        assert_eq!(to_wire("abc"), None);
        assert_eq!(to_wire("  "), None);
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_display(Decimal::from_str("12.5").unwrap()), "12,50");
        assert_eq!(format_display(Decimal::from_str("0.125").unwrap()), "0,13");
        assert_eq!(format_display(Decimal::ZERO), "0,00");
    }

    #[test]
    fn test_parse_display_abs_ignores_sign_and_currency() {
        let fifty = Decimal::from_str("50").unwrap();
        assert_eq!(parse_display_abs("+ 50,00 €"), Some(fifty));
        assert_eq!(parse_display_abs("- 50,00 €"), Some(fifty));
        assert_eq!(parse_display_abs("− 50,00 €"), Some(fifty));
        assert_eq!(parse_display_abs("—"), None);
    }
}
