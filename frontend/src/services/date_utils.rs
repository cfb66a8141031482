use chrono::{Datelike, Duration, NaiveDate};

/// Today's date in the browser's local time zone
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Janvier", 2 => "Février", 3 => "Mars", 4 => "Avril",
        5 => "Mai", 6 => "Juin", 7 => "Juillet", 8 => "Août",
        9 => "Septembre", 10 => "Octobre", 11 => "Novembre", 12 => "Décembre",
        _ => "Janvier",
    }
}

/// Monday-first weekday headers
pub const WEEKDAYS: [&str; 7] = ["Lu", "Ma", "Me", "Je", "Ve", "Sa", "Di"];

#[derive(Clone, PartialEq, Debug)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
}

/// First day of the month before/after `first`
pub fn shift_month(first: NaiveDate, months: i32) -> NaiveDate {
    let index = first.year() * 12 + first.month0() as i32 + months;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1).unwrap_or(first)
}

/// Six full weeks starting on the Monday on or before the 1st
pub fn calendar_days(year: i32, month: u32) -> Vec<CalendarDay> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let start = first - Duration::days(first.weekday().num_days_from_monday() as i64);

    (0..42)
        .map(|offset| {
            let date = start + Duration::days(offset);
            CalendarDay {
                date,
                is_current_month: date.month() == month,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_starts_on_monday() {
        let days = calendar_days(2024, 3);
        assert_eq!(days.len(), 42);
        // 1 March 2024 is a Friday
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 2, 26).unwrap());
        assert!(!days[0].is_current_month);
        assert_eq!(days[4].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(days[4].is_current_month);
    }

    #[test]
    fn test_shift_month_wraps_years() {
        let january = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(shift_month(january, -1), NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(shift_month(january, 12), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }
}
