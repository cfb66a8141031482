//! Per-musician earnings overrides for one concert.

use std::collections::BTreeMap;

use async_trait::async_trait;
use shared::{AdjustEarningsRequest, ParticipantItem, ParticipantsResponse, StatusResponse};
use tracing::info;

use crate::error::ApiError;
use crate::money::normalize_number_input;
use crate::services::check_status;

const LOAD_FAILED: &str = "Erreur de chargement des participants";
const SAVE_FAILED: &str = "Erreur d'enregistrement";

#[async_trait(?Send)]
pub trait AdjustmentsApi {
    /// `GET /participants_concert/<id>`
    async fn load_participants(&self, concert_id: &str) -> Result<ParticipantsResponse, ApiError>;

    /// `POST /ajuster_gains`
    async fn adjust_earnings(&self, request: &AdjustEarningsRequest) -> Result<StatusResponse, ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentRow {
    pub participation_id: i64,
    pub nom: String,
    /// Fixed amount as typed; empty means not fixed
    pub input: String,
    /// Earnings shown next to the input, two decimals
    pub current: String,
}

impl AdjustmentRow {
    fn from_item(item: ParticipantItem, paid: bool) -> Self {
        let current = if paid { item.reel } else { item.potentiel };
        Self {
            participation_id: item.participation_id,
            nom: item.nom,
            input: item.fixe.unwrap_or_default(),
            current: format!("{:.2}", current.unwrap_or(0.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentSheet {
    pub concert_id: String,
    pub paid: bool,
    pub rows: Vec<AdjustmentRow>,
}

impl AdjustmentSheet {
    pub async fn load<A: AdjustmentsApi + ?Sized>(api: &A, concert_id: &str) -> Result<Self, ApiError> {
        let response = api.load_participants(concert_id).await?;
        if !response.success {
            return Err(ApiError::from_message(response.message, LOAD_FAILED));
        }

        let paid = response.paye;
        Ok(Self {
            concert_id: concert_id.to_string(),
            paid,
            rows: response
                .items
                .into_iter()
                .map(|item| AdjustmentRow::from_item(item, paid))
                .collect(),
        })
    }

    pub fn set_input(&mut self, participation_id: i64, value: &str) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.participation_id == participation_id) {
            row.input = value.to_string();
        }
    }

    /// Normalized inputs keyed by participation id; `None` clears the fixed amount
    pub fn overrides(&self) -> BTreeMap<String, Option<String>> {
        self.rows
            .iter()
            .map(|row| {
                let value = normalize_number_input(&row.input);
                (row.participation_id.to_string(), (!value.is_empty()).then_some(value))
            })
            .collect()
    }

    pub async fn save<A: AdjustmentsApi + ?Sized>(&self, api: &A) -> Result<(), ApiError> {
        let request = AdjustEarningsRequest {
            concert_id: self.concert_id.clone(),
            overrides: self.overrides(),
        };
        info!(
            "Saving {} earnings overrides for concert {}",
            request.overrides.values().filter(|v| v.is_some()).count(),
            self.concert_id
        );
        check_status(api.adjust_earnings(&request).await?, SAVE_FAILED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeAdjustments {
        participants: ParticipantsResponse,
        saved: RefCell<Vec<AdjustEarningsRequest>>,
    }

    #[async_trait(?Send)]
    impl AdjustmentsApi for FakeAdjustments {
        async fn load_participants(&self, _concert_id: &str) -> Result<ParticipantsResponse, ApiError> {
            Ok(self.participants.clone())
        }

        async fn adjust_earnings(&self, request: &AdjustEarningsRequest) -> Result<StatusResponse, ApiError> {
            self.saved.borrow_mut().push(request.clone());
            Ok(StatusResponse { success: true, message: None })
        }
    }

    fn participants(paye: bool) -> FakeAdjustments {
        FakeAdjustments {
            participants: ParticipantsResponse {
                success: true,
                paye,
                items: vec![
                    ParticipantItem {
                        nom: "Jean Dupont".to_string(),
                        participation_id: 12,
                        fixe: Some("150".to_string()),
                        reel: Some(150.0),
                        potentiel: Some(120.5),
                    },
                    ParticipantItem {
                        nom: "Élodie Martin".to_string(),
                        participation_id: 13,
                        fixe: None,
                        reel: None,
                        potentiel: Some(98.5),
                    },
                ],
                message: None,
            },
            saved: RefCell::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn test_current_amount_depends_on_payment() {
        let unpaid = AdjustmentSheet::load(&participants(false), "7").await.unwrap();
        assert_eq!(unpaid.rows[0].current, "120.50");
        assert_eq!(unpaid.rows[0].input, "150");
        assert_eq!(unpaid.rows[1].input, "");

        let paid = AdjustmentSheet::load(&participants(true), "7").await.unwrap();
        assert_eq!(paid.rows[0].current, "150.00");
        assert_eq!(paid.rows[1].current, "0.00");
    }

    #[tokio::test]
    async fn test_save_normalizes_inputs() {
        let api = participants(false);
        let mut sheet = AdjustmentSheet::load(&api, "7").await.unwrap();
        sheet.set_input(12, " 1\u{00A0}150,5 ");
        sheet.set_input(13, "  ");
        sheet.save(&api).await.unwrap();

        let saved = api.saved.borrow();
        assert_eq!(saved[0].concert_id, "7");
        assert_eq!(saved[0].overrides.get("12"), Some(&Some("1150.5".to_string())));
        assert_eq!(saved[0].overrides.get("13"), Some(&None));
    }

    #[tokio::test]
    async fn test_load_failure_message() {
        let api = FakeAdjustments {
            participants: ParticipantsResponse { success: false, paye: false, items: vec![], message: None },
            saved: RefCell::new(Vec::new()),
        };
        let err = AdjustmentSheet::load(&api, "7").await.unwrap_err();
        assert_eq!(err.to_string(), "Erreur de chargement des participants");
    }
}
