//! Dates travel as `YYYY-MM-DD` and are shown as `DD/MM/YYYY`.

use chrono::NaiveDate;

pub const WIRE_FORMAT: &str = "%Y-%m-%d";
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

pub fn parse_wire(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), WIRE_FORMAT).ok()
}

pub fn parse_display(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DISPLAY_FORMAT).ok()
}

pub fn to_wire(date: NaiveDate) -> String {
    date.format(WIRE_FORMAT).to_string()
}

pub fn to_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Accepts what a user may type or what the server sends: either format
pub fn parse_any(value: &str) -> Option<NaiveDate> {
    parse_display(value).or_else(|| parse_wire(value))
}

/// `2024-03-05` -> `05/03/2024`; unparsable input is returned unchanged
pub fn wire_to_display(value: &str) -> String {
    parse_wire(value).map(to_display).unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_to_display() {
        assert_eq!(wire_to_display("2024-03-05"), "05/03/2024");
        assert_eq!(wire_to_display("not a date"), "not a date");
    }

    #[test]
    fn test_parse_any_accepts_both_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
        assert_eq!(parse_any("12/03/2024"), Some(expected));
        assert_eq!(parse_any("2024-03-12"), Some(expected));
        assert_eq!(parse_any("31/02/2024"), None);
    }

    #[test]
    fn test_to_wire_pads_components() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert_eq!(to_wire(date), "2025-01-07");
        assert_eq!(to_display(date), "07/01/2025");
    }
}
