//! Which concerts an operation may be linked to, and free-text search over them.

use shared::{Concert, Reason};
use std::collections::HashMap;

use crate::dates;
use crate::payee::PayeeClass;
use crate::rules::requires_concert;

/// `05/03/2024 — Odradek`
pub fn concert_label(concert: &Concert) -> String {
    format!("{} — {}", dates::to_display(concert.date), concert.lieu)
}

fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c == '-' || c == '—')
        .filter(|w| !w.is_empty())
}

/// True when at least one query token is a prefix of one of the label's words
pub fn label_matches(label: &str, query: &str) -> bool {
    let label = label.to_lowercase();
    let query = query.to_lowercase();
    let words: Vec<&str> = split_words(&label).collect();
    let matched = split_words(&query).any(|token| words.iter().any(|word| word.starts_with(token)));
    matched
}

/// Concert candidates for the current payee and reason
#[derive(Debug, Clone, PartialEq)]
pub struct ConcertChoices {
    /// Whether the concert field accepts input at all
    pub enabled: bool,
    pub concerts: Vec<Concert>,
}

impl ConcertChoices {
    pub fn search(&self, query: &str) -> Vec<Concert> {
        if !self.enabled || query.trim().is_empty() {
            return Vec::new();
        }
        self.concerts
            .iter()
            .filter(|c| label_matches(&concert_label(c), query))
            .cloned()
            .collect()
    }

    pub fn find(&self, id: i64) -> Option<&Concert> {
        self.concerts.iter().find(|c| c.id == id)
    }

    /// Concert whose date was picked in the calendar
    pub fn on_date(&self, date: chrono::NaiveDate) -> Option<&Concert> {
        self.concerts.iter().find(|c| c.date == date)
    }

    /// Resolves a label typed or pre-filled in the field back to its concert
    pub fn by_label(&self, label: &str) -> Option<&Concert> {
        let label = label.trim();
        self.concerts.iter().find(|c| concert_label(c) == label)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConcertCatalog {
    all: Vec<Concert>,
    by_musician: HashMap<String, Vec<Concert>>,
}

impl ConcertCatalog {
    pub fn new(all: Vec<Concert>, by_musician: HashMap<String, Vec<Concert>>) -> Self {
        Self { all, by_musician }
    }

    pub fn all(&self) -> &[Concert] {
        &self.all
    }

    /// Concerts selectable for `payee` with `reason`.
    ///
    /// The card account paying fees and concert receipts see every concert.
    /// A payee with recorded concerts is limited to those; anyone else sees
    /// every concert.
    pub fn eligible(&self, payee: &str, reason: Option<Reason>) -> ConcertChoices {
        if !requires_concert(reason) {
            return ConcertChoices {
                enabled: false,
                concerts: Vec::new(),
            };
        }

        let sees_all = reason == Some(Reason::RecetteConcert)
            || (PayeeClass::classify(payee) == PayeeClass::Card && reason == Some(Reason::Frais));

        let concerts = if sees_all {
            self.all.clone()
        } else {
            self.by_musician
                .get(payee.trim())
                .cloned()
                .unwrap_or_else(|| self.all.clone())
        };

        ConcertChoices {
            enabled: true,
            concerts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn concert(id: i64, ymd: (i32, u32, u32), lieu: &str) -> Concert {
        Concert {
            id,
            date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
            lieu: lieu.to_string(),
        }
    }

    fn catalog() -> ConcertCatalog {
        let odradek = concert(1, (2024, 3, 5), "Odradek");
        let ubu = concert(2, (2024, 3, 12), "Ubu Rennes");
        let antipode = concert(3, (2024, 4, 2), "L'Antipode");
        let mut by_musician = HashMap::new();
        by_musician.insert("Jean Dupont".to_string(), vec![odradek.clone()]);
        ConcertCatalog::new(vec![odradek, ubu, antipode], by_musician)
    }

    #[test]
    fn test_concert_label() {
        assert_eq!(concert_label(&concert(1, (2024, 3, 5), "Odradek")), "05/03/2024 — Odradek");
    }

    #[test]
    fn test_label_matches_any_token_prefix() {
        let label = "12/03/2024 — Ubu Rennes";
        assert!(label_matches(label, "ren"));
        assert!(label_matches(label, "12/03"));
        assert!(label_matches(label, "xyz ubu"));
        assert!(label_matches(label, "RENNES"));
        assert!(!label_matches(label, "ennes"));
        assert!(!label_matches(label, ""));
    }

    #[test]
    fn test_musician_fees_only_see_own_concerts() {
        let choices = catalog().eligible("Jean Dupont", Some(Reason::Frais));
        assert!(choices.enabled);
        assert_eq!(choices.concerts.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_card_account_fees_see_all_concerts() {
        let choices = catalog().eligible("CB ASSO7", Some(Reason::Frais));
        assert_eq!(choices.concerts.len(), 3);
    }

    #[test]
    fn test_concert_receipt_sees_all_concerts() {
        let choices = catalog().eligible("CAISSE ASSO7", Some(Reason::RecetteConcert));
        assert_eq!(choices.concerts.len(), 3);
    }

    #[test]
    fn test_payee_without_recorded_concerts_sees_all() {
        let choices = catalog().eligible("Zoé Martin", Some(Reason::Frais));
        assert!(choices.enabled);
        assert_eq!(choices.concerts.len(), 3);

        let choices = catalog().eligible("CAISSE ASSO7", Some(Reason::Frais));
        assert_eq!(choices.concerts.len(), 3);
    }


    #[test]
    fn test_reason_without_concert_disables_field() {
        let choices = catalog().eligible("Jean Dupont", Some(Reason::Salaire));
        assert!(!choices.enabled);
        assert!(choices.search("odr").is_empty());
    }

    #[test]
    fn test_search_and_lookup() {
        let choices = catalog().eligible("CB ASSO7", Some(Reason::Frais));

        let found = choices.search("antipode");
        assert_eq!(found.len(), 0, "apostrophes keep the word whole");
        let found = choices.search("l'anti");
        assert_eq!(found.iter().map(|c| c.id).collect::<Vec<_>>(), vec![3]);

        assert_eq!(choices.by_label("12/03/2024 — Ubu Rennes").map(|c| c.id), Some(2));
        assert_eq!(
            choices.on_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()).map(|c| c.id),
            Some(1)
        );
        assert!(choices.find(99).is_none());
    }
}
