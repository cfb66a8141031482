use std::rc::Rc;

use asso7_forms::autocomplete::{KeyOutcome, NavKey};
use asso7_forms::controller::OperationSubmission;
use asso7_forms::services::ScanFill;
use asso7_forms::{ClientConfig, FormController, FormError};
use chrono::NaiveDate;
use shared::{OperationFormData, PaymentMode, TransactionType};
use yew::prelude::*;

/// Everything the user can do to the operation form
pub enum FormAction {
    Payee(String),
    Reason(String),
    TransactionType(TransactionType),
    PaymentMode(PaymentMode),
    Amount(String),
    GrossAmount(String),
    Details(String),
    Date(String),
    ConcertText(String),
    ConcertKey(NavKey),
    ConcertHighlight(usize),
    ConcertSelect(i64),
    ConcertDate(NaiveDate),
    ConcertBlur,
    ConcertClear,
    Scanned(ScanFill),
    Submit,
}

#[derive(Clone)]
pub struct OperationFormModel {
    pub controller: FormController,
    pub error: Option<FormError>,
    /// Set once the form passed validation; the page then posts it
    pub submission: Option<OperationSubmission>,
    /// Submit attempts refused by validation, so each one is reported
    pub rejected_submits: u32,
}

impl Reducible for OperationFormModel {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.error = None;
        let form = &mut next.controller;

        let result: Result<(), FormError> = match action {
            FormAction::Payee(value) => {
                form.set_payee(&value);
                Ok(())
            }
            FormAction::Reason(value) => {
                form.set_reason(&value);
                Ok(())
            }
            FormAction::TransactionType(value) => form.set_transaction_type(value),
            FormAction::PaymentMode(value) => form.set_payment_mode(value),
            FormAction::Amount(value) => {
                form.set_amount(&value);
                Ok(())
            }
            FormAction::GrossAmount(value) => form.set_gross_amount(&value),
            FormAction::Details(value) => {
                form.set_details(&value);
                Ok(())
            }
            FormAction::Date(value) => {
                form.set_date_text(&value);
                Ok(())
            }
            FormAction::ConcertText(value) => {
                form.type_concert_text(&value);
                Ok(())
            }
            FormAction::ConcertKey(key) => {
                if let KeyOutcome::Selected(concert) = form.concert_key(key) {
                    gloo::console::debug!("concert picked with keyboard:", concert.id.to_string());
                }
                Ok(())
            }
            FormAction::ConcertHighlight(index) => {
                form.highlight_concert(index);
                Ok(())
            }
            FormAction::ConcertSelect(id) => {
                form.select_concert(id);
                Ok(())
            }
            FormAction::ConcertDate(date) => {
                if !form.select_concert_date(date) {
                    gloo::console::log!("no eligible concert on", date.to_string());
                }
                Ok(())
            }
            FormAction::ConcertBlur => {
                form.concert_blur();
                Ok(())
            }
            FormAction::ConcertClear => {
                form.clear_concert();
                Ok(())
            }
            FormAction::Scanned(fill) => {
                form.apply_scan(&fill);
                Ok(())
            }
            FormAction::Submit => match form.submission() {
                Ok(submission) => {
                    next.submission = Some(submission);
                    Ok(())
                }
                Err(error) => {
                    next.rejected_submits += 1;
                    Err(error.into())
                }
            },
        };

        if let Err(error) = result {
            next.error = Some(error);
        }
        Rc::new(next)
    }
}

#[hook]
pub fn use_operation_form(config: &ClientConfig, data: &OperationFormData) -> UseReducerHandle<OperationFormModel> {
    let config = config.clone();
    let data = data.clone();
    use_reducer(move || OperationFormModel {
        controller: FormController::from_bootstrap(&config, &data),
        error: None,
        submission: None,
        rejected_submits: 0,
    })
}
