//! Search over the archived operations of a season.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{ArchiveTable, ArchivedOperation};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCriterion {
    #[default]
    Montant,
    Date,
    Qui,
    Motif,
    Concert,
}

impl SearchCriterion {
    pub const ALL: [SearchCriterion; 5] = [
        SearchCriterion::Montant,
        SearchCriterion::Date,
        SearchCriterion::Qui,
        SearchCriterion::Motif,
        SearchCriterion::Concert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchCriterion::Montant => "montant",
            SearchCriterion::Date => "date",
            SearchCriterion::Qui => "qui",
            SearchCriterion::Motif => "motif",
            SearchCriterion::Concert => "concert",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchCriterion::Montant => "Montant",
            SearchCriterion::Date => "Date",
            SearchCriterion::Qui => "Qui",
            SearchCriterion::Motif => "Motif",
            SearchCriterion::Concert => "Concert",
        }
    }

    /// Text of the button opening the search popup
    pub fn button_label(&self) -> &'static str {
        match self {
            SearchCriterion::Montant => "🔍 Recherche par montant",
            _ => "🔍 Recherche",
        }
    }

    /// Input hint shown under the query field
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SearchCriterion::Montant => Some("Le signe est ignoré : 50 trouve + 50,00 € et − 50,00 €."),
            SearchCriterion::Concert => Some("Un seul mot suffit : « rennes odradek » trouve l'un ou l'autre."),
            _ => None,
        }
    }
}

impl FromStr for SearchCriterion {
    type Err = String;

    /// Empty input falls back to `montant`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        if value.is_empty() {
            return Ok(SearchCriterion::default());
        }
        SearchCriterion::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| format!("Unknown search criterion: {}", s))
    }
}

/// Lowercase, trimmed, without diacritics: "Élodie " -> "elodie"
pub fn normalize_text(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

#[derive(Debug, Clone, PartialEq)]
enum Matcher {
    Everything,
    Nothing,
    Amount(Decimal),
    Text(SearchCriterion, String),
    AnyWord(Vec<String>),
}

/// A compiled archive query
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveFilter {
    matcher: Matcher,
}

impl Default for ArchiveFilter {
    fn default() -> Self {
        Self::reset()
    }
}

impl ArchiveFilter {
    /// Shows every row
    pub fn reset() -> Self {
        Self {
            matcher: Matcher::Everything,
        }
    }

    pub fn new(criterion: SearchCriterion, query: &str) -> Self {
        let matcher = match criterion {
            // No number in the query hides everything rather than showing everything
            SearchCriterion::Montant => money::parse_display_abs(query)
                .map(Matcher::Amount)
                .unwrap_or(Matcher::Nothing),
            SearchCriterion::Concert => {
                let words: Vec<String> = normalize_text(query)
                    .split_whitespace()
                    .map(str::to_string)
                    .collect();
                if words.is_empty() {
                    Matcher::Nothing
                } else {
                    Matcher::AnyWord(words)
                }
            }
            _ => Matcher::Text(criterion, normalize_text(query)),
        };
        Self { matcher }
    }

    pub fn is_active(&self) -> bool {
        self.matcher != Matcher::Everything
    }

    pub fn matches(&self, row: &ArchivedOperation) -> bool {
        match &self.matcher {
            Matcher::Everything => true,
            Matcher::Nothing => false,
            Matcher::Amount(target) => {
                money::parse_display_abs(&row.montant).map_or(false, |amount| amount == *target)
            }
            Matcher::Text(criterion, needle) => {
                let haystack = match criterion {
                    SearchCriterion::Date => &row.date,
                    SearchCriterion::Qui => &row.qui,
                    _ => &row.motif,
                };
                normalize_text(haystack).contains(needle.as_str())
            }
            Matcher::AnyWord(words) => {
                let label = normalize_text(&row.concert);
                words.iter().any(|word| label.contains(word.as_str()))
            }
        }
    }

    pub fn visible_rows<'a>(&'a self, table: &'a ArchiveTable) -> impl Iterator<Item = &'a ArchivedOperation> + 'a {
        table.rows.iter().filter(move |row| self.matches(row))
    }

    /// Number of matching rows across all tables
    pub fn count(&self, tables: &[ArchiveTable]) -> usize {
        tables.iter().map(|t| self.visible_rows(t).count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, qui: &str, motif: &str, montant: &str, concert: &str) -> ArchivedOperation {
        ArchivedOperation {
            id: format!("{}-{}", date, qui),
            date: date.to_string(),
            qui: qui.to_string(),
            type_label: "Débit".to_string(),
            motif: motif.to_string(),
            preciser: String::new(),
            montant: montant.to_string(),
            concert: concert.to_string(),
            delete_action: "/supprimer_operation".to_string(),
        }
    }

    fn tables() -> Vec<ArchiveTable> {
        vec![
            ArchiveTable {
                title: "Opérations musiciens".to_string(),
                rows: vec![
                    row("05/03/2024", "Élodie Martin", "Frais", "− 50,00 €", "05/03/2024 — Odradek"),
                    row("12/03/2024", "Jean Dupont", "Salaire", "− 980,12 €", ""),
                ],
            },
            ArchiveTable {
                title: "Opérations structure".to_string(),
                rows: vec![row("12/03/2024", "CAISSE ASSO7", "Recette concert", "+ 50,00 €", "12/03/2024 — Ubu Rennes")],
            },
        ]
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Élodie Gérard "), "elodie gerard");
        assert_eq!(normalize_text("Ça"), "ca");
    }

    #[test]
    fn test_criterion_parsing() {
        assert_eq!("".parse::<SearchCriterion>().unwrap(), SearchCriterion::Montant);
        assert_eq!("Concert".parse::<SearchCriterion>().unwrap(), SearchCriterion::Concert);
        assert!("lieu".parse::<SearchCriterion>().is_err());
        assert_eq!(SearchCriterion::Qui.button_label(), "🔍 Recherche");
    }

    #[test]
    fn test_amount_ignores_sign() {
        let filter = ArchiveFilter::new(SearchCriterion::Montant, "50");
        assert_eq!(filter.count(&tables()), 2);

        let filter = ArchiveFilter::new(SearchCriterion::Montant, "980,12 €");
        assert_eq!(filter.count(&tables()), 1);
    }

    #[test]
    fn test_unparsable_amount_hides_everything() {
        let filter = ArchiveFilter::new(SearchCriterion::Montant, "cinquante");
        assert!(filter.is_active());
        assert_eq!(filter.count(&tables()), 0);
    }

    #[test]
    fn test_text_criteria_ignore_accents_and_case() {
        assert_eq!(ArchiveFilter::new(SearchCriterion::Qui, "elodie").count(&tables()), 1);
        assert_eq!(ArchiveFilter::new(SearchCriterion::Date, "12/03").count(&tables()), 2);
        assert_eq!(ArchiveFilter::new(SearchCriterion::Motif, "RECETTE").count(&tables()), 1);
    }

    #[test]
    fn test_concert_matches_any_word() {
        let filter = ArchiveFilter::new(SearchCriterion::Concert, "rennes odradek");
        assert_eq!(filter.count(&tables()), 2);
        assert_eq!(ArchiveFilter::new(SearchCriterion::Concert, "  ").count(&tables()), 0);
    }

    #[test]
    fn test_reset_shows_all_rows() {
        let filter = ArchiveFilter::reset();
        assert!(!filter.is_active());
        assert_eq!(filter.count(&tables()), 3);
    }
}
