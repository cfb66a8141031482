//! Payee ("bénéficiaire") classification and the ordering of the payee list.

use serde::{Deserialize, Serialize};

pub const ASSOCIATION_ACCOUNT: &str = "ASSO7";
pub const CARD_ACCOUNT: &str = "CB ASSO7";
pub const CASH_ACCOUNT: &str = "CAISSE ASSO7";
pub const TREASURY_ACCOUNT: &str = "TRESO ASSO7";

/// Structure accounts in the order they are listed after the musicians
pub const STRUCTURE_ACCOUNTS: [&str; 4] =
    [ASSOCIATION_ACCOUNT, CARD_ACCOUNT, CASH_ACCOUNT, TREASURY_ACCOUNT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayeeClass {
    Musician,
    Association,
    Card,
    Cash,
    Treasury,
}

impl PayeeClass {
    /// Anything that is not a known structure account is a musician
    pub fn classify(payee: &str) -> Self {
        match payee.trim() {
            ASSOCIATION_ACCOUNT => PayeeClass::Association,
            CARD_ACCOUNT => PayeeClass::Card,
            CASH_ACCOUNT => PayeeClass::Cash,
            TREASURY_ACCOUNT => PayeeClass::Treasury,
            _ => PayeeClass::Musician,
        }
    }

    pub fn is_structure(&self) -> bool {
        !matches!(self, PayeeClass::Musician)
    }

    /// Colour used to highlight the account in the payee list
    pub fn accent(&self) -> Option<&'static str> {
        match self {
            PayeeClass::Musician => None,
            PayeeClass::Association => Some("black"),
            PayeeClass::Card => Some("purple"),
            PayeeClass::Cash => Some("green"),
            PayeeClass::Treasury => Some("blue"),
        }
    }
}

/// One entry of the payee select box
#[derive(Debug, Clone, PartialEq)]
pub enum PayeeOption {
    Placeholder,
    Musician(String),
    Separator,
    Structure { name: String, class: PayeeClass },
}

impl PayeeOption {
    /// Value submitted for this option; separators cannot be selected
    pub fn value(&self) -> Option<&str> {
        match self {
            PayeeOption::Placeholder => Some(""),
            PayeeOption::Musician(name) => Some(name),
            PayeeOption::Separator => None,
            PayeeOption::Structure { name, .. } => Some(name),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PayeeOption::Placeholder => "-- Sélectionner --",
            PayeeOption::Musician(name) => name,
            PayeeOption::Separator => "──────────",
            PayeeOption::Structure { name, .. } => name,
        }
    }
}

/// Musicians first (server order), then a separator, then the structure
/// accounts that are present, in their fixed order.
pub fn order_payees<S: AsRef<str>>(payees: &[S]) -> Vec<PayeeOption> {
    let names: Vec<&str> = payees
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .collect();

    let mut options = vec![PayeeOption::Placeholder];
    options.extend(
        names
            .iter()
            .filter(|name| !STRUCTURE_ACCOUNTS.contains(*name))
            .map(|name| PayeeOption::Musician(name.to_string())),
    );
    options.push(PayeeOption::Separator);
    options.extend(
        STRUCTURE_ACCOUNTS
            .iter()
            .filter(|account| names.contains(*account))
            .map(|account| PayeeOption::Structure {
                name: account.to_string(),
                class: PayeeClass::classify(account),
            }),
    );
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_structure_accounts() {
        assert_eq!(PayeeClass::classify("ASSO7"), PayeeClass::Association);
        assert_eq!(PayeeClass::classify(" CB ASSO7 "), PayeeClass::Card);
        assert_eq!(PayeeClass::classify("CAISSE ASSO7"), PayeeClass::Cash);
        assert_eq!(PayeeClass::classify("TRESO ASSO7"), PayeeClass::Treasury);
    }

    #[test]
    fn test_unknown_payee_defaults_to_musician() {
        assert_eq!(PayeeClass::classify("Jean Dupont"), PayeeClass::Musician);
        assert_eq!(PayeeClass::classify(""), PayeeClass::Musician);
        assert_eq!(PayeeClass::classify("asso7"), PayeeClass::Musician);
    }

    #[test]
    fn test_order_payees_puts_structures_last_in_fixed_order() {
        let payees = ["TRESO ASSO7", "Zoé Martin", "CB ASSO7", "Jean Dupont", "ASSO7"];
        let options = order_payees(&payees[..]);

        let labels: Vec<&str> = options.iter().map(|o| o.label()).collect();
        assert_eq!(
            labels,
            vec![
                "-- Sélectionner --",
                "Zoé Martin",
                "Jean Dupont",
                "──────────",
                "ASSO7",
                "CB ASSO7",
                "TRESO ASSO7",
            ]
        );
        assert_eq!(options[3].value(), None);
    }

    #[test]
    fn test_structure_accents() {
        assert_eq!(PayeeClass::Card.accent(), Some("purple"));
        assert_eq!(PayeeClass::Cash.accent(), Some("green"));
        assert_eq!(PayeeClass::Musician.accent(), None);
    }
}
