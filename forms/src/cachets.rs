//! Multi-date selection for fee slips ("cachets").
//!
//! One cachet is paid per selected date; the selection is kept sorted so the
//! hidden field sent to the server never depends on click order.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::dates;
use crate::money;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachetsSelection {
    dates: BTreeSet<NaiveDate>,
}

impl CachetsSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Adds the date, or removes it if it was already selected
    pub fn toggle(&mut self, date: NaiveDate) {
        if !self.dates.remove(&date) {
            self.dates.insert(date);
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn clear(&mut self) {
        self.dates.clear();
    }

    pub fn count(&self) -> usize {
        self.dates.len()
    }

    /// `2024-03-05,2024-03-12`
    pub fn hidden_value(&self) -> String {
        self.dates
            .iter()
            .map(|d| dates::to_wire(*d))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// One `DD/MM/YYYY` per line
    pub fn display_value(&self) -> String {
        self.dates
            .iter()
            .map(|d| dates::to_display(*d))
            .collect::<Vec<_>>()
            .join(",\n")
    }

    /// Unit amount times the number of dates, e.g. `300,00 €`. An unparsable
    /// unit amount counts as zero.
    pub fn total_display(&self, unit_amount: &str) -> String {
        let unit = money::parse_amount(unit_amount).unwrap_or(Decimal::ZERO);
        let total = unit * Decimal::from(self.count() as u64);
        format!("{} €", money::format_display(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        dates::parse_display(s).unwrap()
    }

    #[test]
    fn test_hidden_value_is_sorted_regardless_of_click_order() {
        let mut selection = CachetsSelection::new();
        selection.toggle(date("12/03/2024"));
        selection.toggle(date("05/03/2024"));

        assert_eq!(selection.hidden_value(), "2024-03-05,2024-03-12");
        assert_eq!(selection.display_value(), "05/03/2024,\n12/03/2024");
        assert_eq!(selection.count(), 2);
    }

    #[test]
    fn test_toggle_twice_removes_date() {
        let mut selection = CachetsSelection::new();
        selection.toggle(date("05/03/2024"));
        selection.toggle(date("05/03/2024"));

        assert_eq!(selection.count(), 0);
        assert_eq!(selection.hidden_value(), "");
    }

    #[test]
    fn test_total_display() {
        let selection = CachetsSelection::from_dates(vec![
            date("01/02/2024"),
            date("02/02/2024"),
            date("03/02/2024"),
        ]);

        assert_eq!(selection.total_display("100,5"), "301,50 €");
        assert_eq!(selection.total_display(""), "0,00 €");
        assert_eq!(CachetsSelection::new().total_display("120"), "0,00 €");
    }
}
