//! State of one operation form, from page load until navigation away.
//!
//! Every payee or reason change re-runs the [`RuleEngine`] and brings the rest
//! of the form back in line: locked controls, gross amount, concert link.

use chrono::NaiveDate;
use serde::Serialize;
use shared::{Concert, OperationDraft, OperationFormData, PaymentMode, Reason, TransactionType};
use tracing::{debug, info};

use crate::autocomplete::{KeyOutcome, NavKey, SuggestionList};
use crate::concerts::{concert_label, ConcertCatalog, ConcertChoices};
use crate::config::ClientConfig;
use crate::dates;
use crate::error::FormError;
use crate::money;
use crate::rules::{RuleEngine, RuleResult};
use crate::services::scan::ScanFill;
use crate::validation::{validate_submission, SubmitCheck, ValidationError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub payee: String,
    pub reason: Option<Reason>,
    pub transaction_type: Option<TransactionType>,
    pub payment_mode: Option<PaymentMode>,
    /// Net amount as typed
    pub amount: String,
    /// Gross amount as typed, salaries only
    pub gross_amount: String,
    /// Free text ("préciser")
    pub details: String,
    pub date: Option<NaiveDate>,
    pub concert: Option<Concert>,
    /// Text currently shown in the concert field
    pub concert_text: String,
}

/// Values posted to the server, named after the form fields it expects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationSubmission {
    pub musicien: String,
    pub motif: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub mode: Option<String>,
    pub montant: String,
    pub brut: Option<String>,
    pub preciser: String,
    pub date: Option<String>,
    pub concert_id: Option<i64>,
}

impl OperationSubmission {
    /// `(name, value)` pairs for hidden inputs; absent values are sent empty
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("musicien", self.musicien.clone()),
            ("motif", self.motif.clone().unwrap_or_default()),
            ("type", self.transaction_type.clone().unwrap_or_default()),
            ("mode", self.mode.clone().unwrap_or_default()),
            ("montant", self.montant.clone()),
            ("brut", self.brut.clone().unwrap_or_default()),
            ("preciser", self.preciser.clone()),
            ("date", self.date.clone().unwrap_or_default()),
            (
                "concert_id",
                self.concert_id.map(|id| id.to_string()).unwrap_or_default(),
            ),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct FormController {
    engine: RuleEngine,
    catalog: ConcertCatalog,
    state: FormState,
    rules: RuleResult,
    choices: ConcertChoices,
    suggestions: SuggestionList<Concert>,
}

impl FormController {
    /// Empty form, as when creating a new operation
    pub fn new(engine: RuleEngine, catalog: ConcertCatalog) -> Self {
        Self::with_state(engine, catalog, FormState::default())
    }

    pub fn from_bootstrap(config: &ClientConfig, data: &OperationFormData) -> Self {
        let engine = RuleEngine::new(config.rule_table);
        let catalog = ConcertCatalog::new(data.concerts.clone(), data.concerts_par_musicien.clone());
        match &data.existing {
            Some(draft) => Self::from_draft(engine, catalog, draft),
            None => Self::new(engine, catalog),
        }
    }

    /// Form pre-populated with an existing operation
    pub fn from_draft(engine: RuleEngine, catalog: ConcertCatalog, draft: &OperationDraft) -> Self {
        let state = FormState {
            payee: draft.payee.trim().to_string(),
            reason: draft.reason.as_deref().and_then(|r| r.parse().ok()),
            transaction_type: draft.transaction_type,
            payment_mode: draft.payment_mode,
            amount: draft.montant.clone().unwrap_or_default(),
            gross_amount: draft.brut.clone().unwrap_or_default(),
            details: draft.preciser.clone().unwrap_or_default(),
            date: draft.date.as_deref().and_then(dates::parse_any),
            concert: None,
            concert_text: draft.concert_label.clone().unwrap_or_default(),
        };
        let mut controller = Self::with_state(engine, catalog, state);

        let concert = match draft.concert_id {
            Some(id) => controller.choices.find(id).cloned(),
            None => controller.choices.by_label(&controller.state.concert_text).cloned(),
        };
        if let Some(concert) = concert {
            controller.state.concert_text = concert_label(&concert);
            controller.state.concert = Some(concert);
        }
        controller
    }

    fn with_state(engine: RuleEngine, catalog: ConcertCatalog, state: FormState) -> Self {
        let rules = engine.evaluate(&state.payee, state.reason, state.transaction_type);
        let mut controller = Self {
            engine,
            catalog,
            state,
            rules: rules.clone(),
            choices: ConcertChoices {
                enabled: false,
                concerts: Vec::new(),
            },
            suggestions: SuggestionList::new(),
        };
        controller.apply_rules(rules, false);
        controller
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn rules(&self) -> &RuleResult {
        &self.rules
    }

    pub fn concert_choices(&self) -> &ConcertChoices {
        &self.choices
    }

    pub fn suggestions(&self) -> &SuggestionList<Concert> {
        &self.suggestions
    }

    pub fn set_payee(&mut self, payee: &str) {
        self.state.payee = payee.trim().to_string();
        self.reevaluate();
    }

    /// Unknown labels are treated as no selection and replaced by the first allowed reason
    pub fn set_reason(&mut self, label: &str) {
        self.state.reason = label.parse().ok();
        self.reevaluate();
    }

    pub fn set_transaction_type(&mut self, value: TransactionType) -> Result<(), FormError> {
        if self.rules.transaction_type.locked {
            return Err(FormError::TransactionTypeLocked);
        }
        self.state.transaction_type = Some(value);
        Ok(())
    }

    pub fn set_payment_mode(&mut self, value: PaymentMode) -> Result<(), FormError> {
        if self.rules.payment_mode.locked {
            return Err(FormError::PaymentModeLocked);
        }
        self.state.payment_mode = Some(value);
        Ok(())
    }

    pub fn set_amount(&mut self, value: &str) {
        self.state.amount = value.to_string();
    }

    pub fn set_gross_amount(&mut self, value: &str) -> Result<(), FormError> {
        if !self.rules.gross_amount_editable {
            return Err(FormError::GrossAmountLocked);
        }
        self.state.gross_amount = value.to_string();
        Ok(())
    }

    pub fn set_details(&mut self, value: &str) {
        self.state.details = value.to_string();
    }

    /// Accepts `DD/MM/YYYY` or `YYYY-MM-DD`; anything else clears the date
    pub fn set_date_text(&mut self, value: &str) {
        self.state.date = dates::parse_any(value);
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.state.date = date;
    }

    /// Free text typed in the concert field: drops the current link and
    /// refreshes the suggestions
    pub fn type_concert_text(&mut self, text: &str) {
        if !self.choices.enabled {
            return;
        }
        self.state.concert = None;
        self.state.concert_text = text.to_string();
        self.suggestions.show(self.choices.search(text));
    }

    pub fn concert_key(&mut self, key: NavKey) -> KeyOutcome<Concert> {
        let outcome = self.suggestions.handle_key(key);
        if let KeyOutcome::Selected(concert) = &outcome {
            self.link_concert(concert.clone());
        }
        outcome
    }

    pub fn highlight_concert(&mut self, index: usize) {
        self.suggestions.highlight(index);
    }

    /// Links the concert if it is among the current choices
    pub fn select_concert(&mut self, id: i64) -> bool {
        match self.choices.find(id).cloned() {
            Some(concert) => {
                self.link_concert(concert);
                true
            }
            None => false,
        }
    }

    /// Date picked in the concert calendar
    pub fn select_concert_date(&mut self, date: NaiveDate) -> bool {
        match self.choices.on_date(date).cloned() {
            Some(concert) => {
                self.link_concert(concert);
                true
            }
            None => false,
        }
    }

    /// Leaving the field without a linked concert discards the typed text
    pub fn concert_blur(&mut self) {
        self.suggestions.hide();
        if self.state.concert.is_none() {
            self.state.concert_text.clear();
        }
    }

    pub fn clear_concert(&mut self) {
        self.state.concert = None;
        self.state.concert_text.clear();
        self.suggestions.clear();
    }

    /// Fills the form with what the server read from a scanned pay slip
    pub fn apply_scan(&mut self, fill: &ScanFill) {
        self.state.amount = fill.amount.clone().unwrap_or_default();
        if self.rules.gross_amount_editable {
            self.state.gross_amount = fill.gross_amount.clone().unwrap_or_default();
        }
        self.state.details = fill.details.clone().unwrap_or_default();
        if let Some(date) = fill.date {
            self.state.date = Some(date);
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_submission(&SubmitCheck {
            amount: &self.state.amount,
            gross_amount: &self.state.gross_amount,
            reason: self.state.reason,
            concert_id: self.state.concert.as_ref().map(|c| c.id),
        })
    }

    /// Validates and produces the values to post
    pub fn submission(&self) -> Result<OperationSubmission, ValidationError> {
        self.validate()?;

        let submission = OperationSubmission {
            musicien: self.state.payee.clone(),
            motif: self.state.reason.map(|r| r.label().to_string()),
            transaction_type: self.state.transaction_type.map(|t| t.as_str().to_string()),
            mode: self.state.payment_mode.map(|m| m.as_str().to_string()),
            montant: money::to_wire(&self.state.amount).unwrap_or_default(),
            brut: if self.rules.gross_amount_editable {
                money::to_wire(&self.state.gross_amount)
            } else {
                None
            },
            preciser: self.state.details.trim().to_string(),
            date: self.state.date.map(dates::to_wire),
            concert_id: self.state.concert.as_ref().map(|c| c.id),
        };

        info!(
            "Submitting operation for {:?}: motif={:?} montant={}",
            submission.musicien, submission.motif, submission.montant
        );
        Ok(submission)
    }

    fn link_concert(&mut self, concert: Concert) {
        debug!("Linking concert {} ({})", concert.id, concert.lieu);
        self.state.concert_text = concert_label(&concert);
        self.state.date = Some(concert.date);
        self.state.concert = Some(concert);
        self.suggestions.hide();
    }

    fn reevaluate(&mut self) {
        let rules = self
            .engine
            .evaluate(&self.state.payee, self.state.reason, self.state.transaction_type);
        let was_mode_locked = self.rules.payment_mode.locked;
        self.apply_rules(rules, was_mode_locked);
    }

    fn apply_rules(&mut self, rules: RuleResult, was_mode_locked: bool) {
        self.state.reason = rules.reason;
        self.state.transaction_type = rules.transaction_type.value;

        if rules.payment_mode.locked || was_mode_locked || self.state.payment_mode.is_none() {
            self.state.payment_mode = Some(rules.payment_mode.value);
        }

        if !rules.gross_amount_editable {
            self.state.gross_amount.clear();
        }

        self.choices = self.catalog.eligible(&self.state.payee, self.state.reason);
        let still_eligible = self
            .state
            .concert
            .as_ref()
            .map_or(false, |c| self.choices.find(c.id).is_some());
        if !still_eligible {
            self.state.concert = None;
            if !self.choices.enabled {
                self.state.concert_text.clear();
            }
        }
        if !self.choices.enabled {
            self.suggestions.clear();
        }

        self.rules = rules;
    }
}
