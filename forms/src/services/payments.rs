//! Concert payment checkboxes on the concert list.

use async_trait::async_trait;
use shared::{CancelPaymentRequest, ConcertPaymentRow, StatusResponse, ValidatePaymentRequest};
use tracing::info;

use crate::error::ApiError;
use crate::money;
use crate::payee::{CARD_ACCOUNT, CASH_ACCOUNT};
use crate::services::check_status;

/// Accounts offered in the confirmation popup
pub const PAYMENT_ACCOUNTS: [&str; 2] = [CARD_ACCOUNT, CASH_ACCOUNT];

pub const CANCEL_CONFIRMATION: &str = "Annuler la validation du paiement pour ce concert ?";

const PAYMENT_FAILED: &str = "Erreur lors de la validation du paiement";
const CANCEL_FAILED: &str = "Erreur lors de l'annulation du paiement";

#[async_trait(?Send)]
pub trait PaymentApi {
    /// `POST /valider_paiement_concert`
    async fn validate_payment(&self, request: &ValidatePaymentRequest) -> Result<StatusResponse, ApiError>;

    /// `POST /annuler_paiement_concert`
    async fn cancel_payment(&self, request: &CancelPaymentRequest) -> Result<StatusResponse, ApiError>;
}

/// Contents of the payment confirmation popup
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentPopup {
    pub concert_id: String,
    pub label: String,
    pub compte: String,
    /// Receipt as typed; pre-filled with the expected receipt
    pub recette: String,
}

/// What ticking a concert led to
#[derive(Debug, Clone, PartialEq)]
pub enum TickAction {
    /// The checkbox stays unticked until the popup is confirmed
    OpenPopup(PaymentPopup),
    /// Paid with the default account; the page should reload
    Validated,
}

pub struct PaymentFlow<A> {
    api: A,
    with_popup: bool,
    default_account: String,
}

impl<A: PaymentApi> PaymentFlow<A> {
    pub fn new(api: A, with_popup: bool) -> Self {
        Self::with_config(api, with_popup, CARD_ACCOUNT)
    }

    pub fn with_config(api: A, with_popup: bool, default_account: &str) -> Self {
        Self {
            api,
            with_popup,
            default_account: default_account.to_string(),
        }
    }

    pub async fn tick(&self, row: &ConcertPaymentRow) -> Result<TickAction, ApiError> {
        if self.with_popup {
            return Ok(TickAction::OpenPopup(PaymentPopup {
                concert_id: row.concert_id.clone(),
                label: row.label.clone(),
                compte: self.default_account.clone(),
                recette: row.recette_attendue.clone().unwrap_or_default(),
            }));
        }

        info!("Validating payment of concert {} with {}", row.concert_id, self.default_account);
        let request = ValidatePaymentRequest {
            concert_id: row.concert_id.clone(),
            compte: self.default_account.clone(),
            recette: None,
        };
        check_status(self.api.validate_payment(&request).await?, PAYMENT_FAILED)?;
        Ok(TickAction::Validated)
    }

    pub async fn confirm(&self, popup: &PaymentPopup) -> Result<(), ApiError> {
        info!("Validating payment of concert {} with {}", popup.concert_id, popup.compte);
        let recette = popup.recette.trim();
        let request = ValidatePaymentRequest {
            concert_id: popup.concert_id.clone(),
            compte: popup.compte.clone(),
            recette: (!recette.is_empty())
                .then(|| money::to_wire(recette).unwrap_or_else(|| recette.to_string())),
        };
        check_status(self.api.validate_payment(&request).await?, PAYMENT_FAILED)
    }

    /// Called once the user confirmed [`CANCEL_CONFIRMATION`]
    pub async fn untick(&self, concert_id: &str) -> Result<(), ApiError> {
        info!("Cancelling payment of concert {}", concert_id);
        let request = CancelPaymentRequest {
            concert_id: concert_id.to_string(),
        };
        check_status(self.api.cancel_payment(&request).await?, CANCEL_FAILED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakePayments {
        validated: RefCell<Vec<ValidatePaymentRequest>>,
        cancelled: RefCell<Vec<CancelPaymentRequest>>,
        refuse_with: Option<String>,
    }

    impl FakePayments {
        fn status(&self) -> StatusResponse {
            StatusResponse {
                success: self.refuse_with.is_none(),
                message: self.refuse_with.clone(),
            }
        }
    }

    #[async_trait(?Send)]
    impl PaymentApi for FakePayments {
        async fn validate_payment(&self, request: &ValidatePaymentRequest) -> Result<StatusResponse, ApiError> {
            self.validated.borrow_mut().push(request.clone());
            Ok(self.status())
        }

        async fn cancel_payment(&self, request: &CancelPaymentRequest) -> Result<StatusResponse, ApiError> {
            self.cancelled.borrow_mut().push(request.clone());
            Ok(self.status())
        }
    }

    fn row() -> ConcertPaymentRow {
        ConcertPaymentRow {
            concert_id: "3".to_string(),
            label: "05/03/2024 — Odradek".to_string(),
            paye: false,
            recette_attendue: Some("450,50".to_string()),
        }
    }

    #[tokio::test]
    async fn test_tick_with_popup_makes_no_call() {
        let flow = PaymentFlow::new(FakePayments::default(), true);
        let action = flow.tick(&row()).await.unwrap();

        match action {
            TickAction::OpenPopup(popup) => {
                assert_eq!(popup.recette, "450,50");
                assert_eq!(popup.compte, "CB ASSO7");
            }
            other => panic!("expected popup, got {:?}", other),
        }
        assert!(flow.api.validated.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_tick_without_popup_uses_default_account() {
        let flow = PaymentFlow::new(FakePayments::default(), false);
        assert_eq!(flow.tick(&row()).await.unwrap(), TickAction::Validated);

        let sent = flow.api.validated.borrow();
        assert_eq!(sent[0].compte, "CB ASSO7");
        assert_eq!(sent[0].recette, None);
    }

    #[tokio::test]
    async fn test_confirm_sends_receipt_with_dot() {
        let flow = PaymentFlow::new(FakePayments::default(), true);
        let popup = PaymentPopup {
            concert_id: "3".to_string(),
            label: String::new(),
            compte: "CAISSE ASSO7".to_string(),
            recette: "450,50".to_string(),
        };
        flow.confirm(&popup).await.unwrap();

        let sent = flow.api.validated.borrow();
        assert_eq!(sent[0].compte, "CAISSE ASSO7");
        assert_eq!(sent[0].recette.as_deref(), Some("450.5"));
    }

    #[tokio::test]
    async fn test_refusal_is_reported_verbatim() {
        let flow = PaymentFlow::new(
            FakePayments { refuse_with: Some("Concert introuvable".to_string()), ..FakePayments::default() },
            false,
        );
        let err = flow.tick(&row()).await.unwrap_err();
        assert_eq!(err, ApiError::Server("Concert introuvable".to_string()));

        let err = flow.untick("3").await.unwrap_err();
        assert_eq!(err.to_string(), "Concert introuvable");
        assert_eq!(flow.api.cancelled.borrow()[0].concert_id, "3");
    }
}
