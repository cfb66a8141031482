use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Purpose of an operation ("motif"). Serialized with the labels the server stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Reason {
    #[serde(rename = "Salaire")]
    Salaire,
    #[serde(rename = "Frais")]
    Frais,
    #[serde(rename = "Remboursement frais divers")]
    RemboursementFraisDivers,
    #[serde(rename = "Achat")]
    Achat,
    #[serde(rename = "Vente")]
    Vente,
    #[serde(rename = "Divers")]
    Divers,
    #[serde(rename = "Recette concert")]
    RecetteConcert,
}

impl Reason {
    /// Every reason, in the order the select box lists them
    pub const ALL: [Reason; 7] = [
        Reason::Salaire,
        Reason::Frais,
        Reason::RemboursementFraisDivers,
        Reason::Achat,
        Reason::Vente,
        Reason::Divers,
        Reason::RecetteConcert,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Reason::Salaire => "Salaire",
            Reason::Frais => "Frais",
            Reason::RemboursementFraisDivers => "Remboursement frais divers",
            Reason::Achat => "Achat",
            Reason::Vente => "Vente",
            Reason::Divers => "Divers",
            Reason::RecetteConcert => "Recette concert",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Reason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Reason::ALL
            .iter()
            .copied()
            .find(|reason| reason.label() == trimmed)
            .ok_or_else(|| format!("Unknown reason: {}", trimmed))
    }
}

/// Direction of an operation, as seen from the association's books
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "credit",
            TransactionType::Debit => "debit",
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" => Ok(TransactionType::Credit),
            "debit" => Ok(TransactionType::Debit),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// How the money moved: through the bank account or in cash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    #[serde(rename = "Compte")]
    Account,
    #[serde(rename = "Espèces")]
    Cash,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Account => "Compte",
            PaymentMode::Cash => "Espèces",
        }
    }
}

impl FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Compte" => Ok(PaymentMode::Account),
            "Espèces" => Ok(PaymentMode::Cash),
            other => Err(format!("Unknown payment mode: {}", other)),
        }
    }
}

/// A concert an operation can be linked to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concert {
    pub id: i64,
    /// Concert date, exchanged as YYYY-MM-DD
    pub date: NaiveDate,
    /// Venue name
    pub lieu: String,
}

/// Venue returned by `GET /api/lieux/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LieuSummary {
    pub id: i64,
    pub nom: String,
    #[serde(default)]
    pub ville: Option<String>,
}

/// Body of `POST /api/lieux`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateLieuRequest {
    pub nom: String,
    pub ville: String,
    pub code_postal: String,
    pub adresse: String,
    pub email: String,
    pub telephone: String,
    pub contacts: String,
    pub note: String,
}

/// Minimal reference to a venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LieuRef {
    pub id: i64,
    pub nom: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLieuResponse {
    pub success: bool,
    #[serde(default)]
    pub lieu: Option<LieuRef>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Fields extracted by the server from a scanned pay slip
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadPdfResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "loose_text")]
    pub montant: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub brut: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub preciser: Option<String>,
    /// ISO date (YYYY-MM-DD)
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /valider_paiement_concert`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatePaymentRequest {
    pub concert_id: String,
    pub compte: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recette: Option<String>,
}

/// Body of `POST /annuler_paiement_concert`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelPaymentRequest {
    pub concert_id: String,
}

/// Generic `{success, message?}` answer shared by most endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /participants_concert/<id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantsResponse {
    pub success: bool,
    /// Whether the concert has already been paid
    #[serde(default)]
    pub paye: bool,
    #[serde(default)]
    pub items: Vec<ParticipantItem>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantItem {
    pub nom: String,
    pub participation_id: i64,
    /// Manually fixed earnings, if any
    #[serde(default, deserialize_with = "loose_text")]
    pub fixe: Option<String>,
    #[serde(default)]
    pub reel: Option<f64>,
    #[serde(default)]
    pub potentiel: Option<f64>,
}

/// Body of `POST /ajuster_gains`; `None` clears a fixed amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustEarningsRequest {
    pub concert_id: String,
    pub overrides: BTreeMap<String, Option<String>>,
}

/// Body posted to an operation's delete form action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteOperationRequest {
    pub id: String,
}

/// Existing operation values used to pre-populate the form when editing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationDraft {
    #[serde(default)]
    pub payee: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub transaction_type: Option<TransactionType>,
    #[serde(default)]
    pub payment_mode: Option<PaymentMode>,
    #[serde(default, deserialize_with = "loose_text")]
    pub montant: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub brut: Option<String>,
    #[serde(default)]
    pub preciser: Option<String>,
    /// ISO date (YYYY-MM-DD)
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub concert_id: Option<i64>,
    /// Label shown in the concert field ("DD/MM/YYYY — lieu")
    #[serde(default)]
    pub concert_label: Option<String>,
}

/// Page data for the operation entry/edit form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationFormData {
    /// URL the form posts to
    pub action: String,
    /// Payees as listed by the server: musicians and structure accounts mixed
    pub payees: Vec<String>,
    #[serde(default)]
    pub concerts: Vec<Concert>,
    #[serde(default)]
    pub concerts_par_musicien: HashMap<String, Vec<Concert>>,
    #[serde(default)]
    pub existing: Option<OperationDraft>,
}

/// Page data for the concert form (venue picker)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConcertFormData {
    #[serde(default)]
    pub lieu: Option<LieuRef>,
}

/// Page data for the fee-slip ("cachets") form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CachetsData {
    pub action: String,
    #[serde(default)]
    pub musiciens: Vec<String>,
    #[serde(default)]
    pub montant: String,
    #[serde(default)]
    pub dates: Vec<NaiveDate>,
}

/// One archived operation as already formatted by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedOperation {
    pub id: String,
    /// DD/MM/YYYY
    pub date: String,
    pub qui: String,
    pub type_label: String,
    pub motif: String,
    #[serde(default)]
    pub preciser: String,
    /// Display amount, e.g. "+ 50,00 €"
    pub montant: String,
    #[serde(default)]
    pub concert: String,
    /// Form action used to delete the operation
    pub delete_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveTable {
    pub title: String,
    pub rows: Vec<ArchivedOperation>,
}

/// Page data for the archives page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchivesData {
    pub tables: Vec<ArchiveTable>,
}

/// One row of the concert list with its payment checkbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcertPaymentRow {
    pub concert_id: String,
    pub label: String,
    #[serde(default)]
    pub paye: bool,
    #[serde(default, deserialize_with = "loose_text")]
    pub recette_attendue: Option<String>,
}

/// Page data for the concert list (payments and earnings adjustments)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConcertPaymentsData {
    /// Whether ticking a concert opens the confirmation popup
    #[serde(default)]
    pub with_popup: bool,
    pub rows: Vec<ConcertPaymentRow>,
}

/// Accepts a JSON string or number and keeps it as text; empty strings become `None`
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_labels_roundtrip_through_from_str() {
        for reason in Reason::ALL {
            assert_eq!(reason.label().parse::<Reason>().unwrap(), reason);
        }
        assert!("Salary".parse::<Reason>().is_err());
    }

    #[test]
    fn test_reason_serializes_with_french_label() {
        let json = serde_json::to_string(&Reason::RemboursementFraisDivers).unwrap();
        assert_eq!(json, "\"Remboursement frais divers\"");
    }

    #[test]
    fn test_payment_mode_wire_values() {
        assert_eq!(serde_json::to_string(&PaymentMode::Cash).unwrap(), "\"Espèces\"");
        assert_eq!("Compte".parse::<PaymentMode>().unwrap(), PaymentMode::Account);
    }

    #[test]
    fn test_upload_pdf_response_accepts_numbers_and_strings() {
        let json = r#"{"success": true, "montant": 1234.5, "brut": "1500,00", "preciser": "", "date": "2024-03-05"}"#;
        let response: UploadPdfResponse = serde_json::from_str(json).unwrap();

        assert!(response.success);
        assert_eq!(response.montant.as_deref(), Some("1234.5"));
        assert_eq!(response.brut.as_deref(), Some("1500,00"));
        assert_eq!(response.preciser, None);
        assert_eq!(response.date.as_deref(), Some("2024-03-05"));
    }

    #[test]
    fn test_adjust_request_serializes_null_overrides() {
        let mut overrides = BTreeMap::new();
        overrides.insert("12".to_string(), Some("150.5".to_string()));
        overrides.insert("13".to_string(), None);
        let request = AdjustEarningsRequest {
            concert_id: "7".to_string(),
            overrides,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"concert_id":"7","overrides":{"12":"150.5","13":null}}"#);
    }

    #[test]
    fn test_validate_payment_request_omits_missing_receipt() {
        let request = ValidatePaymentRequest {
            concert_id: "3".to_string(),
            compte: "CB ASSO7".to_string(),
            recette: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"concert_id":"3","compte":"CB ASSO7"}"#);
    }

    #[test]
    fn test_concert_date_uses_iso_format() {
        let concert: Concert =
            serde_json::from_str(r#"{"id": 4, "date": "2024-03-12", "lieu": "Odradek"}"#).unwrap();
        assert_eq!(concert.date, NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
    }

    #[test]
    fn test_participants_response_defaults() {
        let response: ParticipantsResponse =
            serde_json::from_str(r#"{"success": false, "message": "Concert introuvable"}"#).unwrap();
        assert!(!response.success);
        assert!(!response.paye);
        assert!(response.items.is_empty());
        assert_eq!(response.message.as_deref(), Some("Concert introuvable"));
    }
}
