use asso7_forms::dates;
use asso7_forms::services::ScanFill;
use asso7_forms::payee::{order_payees, PayeeOption};
use asso7_forms::{ClientConfig, FormError};
use shared::{OperationFormData, PaymentMode, Reason, TransactionType};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::concert_picker::ConcertPicker;
use crate::components::scan_modal::ScanModal;
use crate::hooks::use_operation_form::{use_operation_form, FormAction};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct OperationFormPageProps {
    pub api_client: ApiClient,
    pub config: ClientConfig,
    pub data: OperationFormData,
}

#[function_component(OperationFormPage)]
pub fn operation_form_page(props: &OperationFormPageProps) -> Html {
    let form = use_operation_form(&props.config, &props.data);
    let form_ref = use_node_ref();
    let scan_open = use_state(|| false);

    let payee_options = use_memo(props.data.payees.clone(), |payees| order_payees(payees.as_slice()));

    // Each refused submit is reported and moves the focus to the offending field
    {
        let error = form.error.clone();
        use_effect_with(form.rejected_submits, move |rejected| {
            if let (true, Some(FormError::Validation(e))) = (*rejected > 0, &error) {
                gloo::dialogs::alert(&e.to_string());
                let element = gloo::utils::document()
                    .get_element_by_id(e.field().element_id())
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok());
                if let Some(element) = element {
                    let _ = element.focus();
                }
            }
            || ()
        });
    }

    // Once validated, the hidden wire fields are rendered and the form is posted natively
    {
        let form_ref = form_ref.clone();
        use_effect_with(form.submission.clone(), move |submission| {
            if submission.is_some() {
                if let Some(element) = form_ref.cast::<HtmlFormElement>() {
                    if let Err(e) = element.submit() {
                        gloo::console::error!("Form submit failed:", e);
                    }
                }
            }
            || ()
        });
    }

    let on_submit = {
        let dispatcher = form.dispatcher();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            dispatcher.dispatch(FormAction::Submit);
        })
    };

    let select_changed = |make: fn(String) -> FormAction| {
        let dispatcher = form.dispatcher();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            dispatcher.dispatch(make(select.value()));
        })
    };
    let input_changed = |make: fn(String) -> FormAction| {
        let dispatcher = form.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(make(input.value()));
        })
    };

    let on_details_input = {
        let dispatcher = form.dispatcher();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            dispatcher.dispatch(FormAction::Details(area.value()));
        })
    };

    let state = form.controller.state();
    let rules = form.controller.rules();
    let invalid_field = match &form.error {
        Some(FormError::Validation(e)) => Some(e.field().element_id()),
        _ => None,
    };
    let field_class = |id: &'static str| classes!("form-control", (invalid_field == Some(id)).then_some("field-error"));

    let type_radio = |value: TransactionType, label: &'static str| {
        let dispatcher = form.dispatcher();
        let id = format!("{}_radio", value.as_str());
        html! {
            <label for={id.clone()} class="radio-label">
                <input
                    type="radio"
                    id={id}
                    checked={state.transaction_type == Some(value)}
                    disabled={rules.transaction_type.locked}
                    onchange={Callback::from(move |_: Event| dispatcher.dispatch(FormAction::TransactionType(value)))}
                />
                {label}
            </label>
        }
    };
    let mode_radio = |value: PaymentMode| {
        let dispatcher = form.dispatcher();
        html! {
            <label class="radio-label">
                <input
                    type="radio"
                    checked={state.payment_mode == Some(value)}
                    disabled={rules.payment_mode.locked}
                    onchange={Callback::from(move |_: Event| dispatcher.dispatch(FormAction::PaymentMode(value)))}
                />
                {value.as_str()}
            </label>
        }
    };

    let on_scan_open = {
        let scan_open = scan_open.clone();
        Callback::from(move |_: MouseEvent| scan_open.set(true))
    };
    let on_scan_close = {
        let scan_open = scan_open.clone();
        Callback::from(move |_: ()| scan_open.set(false))
    };
    let on_scanned = {
        let dispatcher = form.dispatcher();
        Callback::from(move |fill: ScanFill| dispatcher.dispatch(FormAction::Scanned(fill)))
    };

    html! {
        <form class="operation-form" method="post" action={props.data.action.clone()} ref={form_ref} onsubmit={on_submit}>
            {if let Some(submission) = form.submission.as_ref() {
                html! {
                    <>
                        {for submission.fields().into_iter().map(|(name, value)| html! {
                            <input type="hidden" name={name} value={value} />
                        })}
                    </>
                }
            } else { html! {} }}

            {if let Some(error) = form.error.as_ref() {
                html! { <div class="form-message error">{error.to_string()}</div> }
            } else { html! {} }}

            <div class="form-group">
                <label for="musicien">{"Bénéficiaire"}</label>
                <select id="musicien" class="form-control" onchange={select_changed(FormAction::Payee)}>
                    {for payee_options.iter().map(|option| match option {
                        PayeeOption::Placeholder => html! {
                            <option value="" selected={state.payee.is_empty()}>{option.label()}</option>
                        },
                        PayeeOption::Separator => html! { <option disabled={true}>{option.label()}</option> },
                        PayeeOption::Musician(name) => html! {
                            <option value={name.clone()} selected={state.payee == *name}>{name}</option>
                        },
                        PayeeOption::Structure { name, class } => html! {
                            <option
                                value={name.clone()}
                                selected={state.payee == *name}
                                style={format!("font-weight: bold; color: {};", class.accent().unwrap_or("inherit"))}
                            >
                                {name}
                            </option>
                        },
                    })}
                </select>
            </div>

            <div class="form-group">
                <label for="motif">{"Motif"}</label>
                <select id="motif" class="form-control" onchange={select_changed(FormAction::Reason)}>
                    <option value="" selected={state.reason.is_none()}>{"-- Sélectionner --"}</option>
                    {for Reason::ALL.iter().map(|reason| html! {
                        <option
                            value={reason.label()}
                            selected={state.reason == Some(*reason)}
                            disabled={!rules.allowed_reasons.contains(reason)}
                        >
                            {reason.label()}
                        </option>
                    })}
                </select>
            </div>

            <div class="form-group radio-group">
                {type_radio(TransactionType::Credit, "Crédit")}
                {type_radio(TransactionType::Debit, "Débit")}
            </div>

            <div class="form-group radio-group">
                {mode_radio(PaymentMode::Account)}
                {mode_radio(PaymentMode::Cash)}
            </div>

            <div class="form-group">
                <label for="montant">{"Montant (€)"}</label>
                <input
                    type="text"
                    id="montant"
                    inputmode="decimal"
                    class={field_class("montant")}
                    value={state.amount.clone()}
                    oninput={input_changed(FormAction::Amount)}
                />
            </div>

            <div class="form-group">
                <label for="brut">{"Montant brut (€)"}</label>
                <input
                    type="text"
                    id="brut"
                    inputmode="decimal"
                    class={field_class("brut")}
                    value={state.gross_amount.clone()}
                    disabled={!rules.gross_amount_editable}
                    oninput={input_changed(FormAction::GrossAmount)}
                />
            </div>

            <div class="form-group">
                <label for="preciser">{"Préciser"}</label>
                <textarea id="preciser" class="form-control" value={state.details.clone()} oninput={on_details_input} />
            </div>

            <div class="form-group">
                <label for="date">{"Date"}</label>
                <input
                    type="date"
                    id="date"
                    class="form-control"
                    value={state.date.map(dates::to_wire).unwrap_or_default()}
                    onchange={{
                        let dispatcher = form.dispatcher();
                        Callback::from(move |e: Event| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            dispatcher.dispatch(FormAction::Date(input.value()));
                        })
                    }}
                />
            </div>

            {if form.controller.concert_choices().enabled {
                html! {
                    <ConcertPicker
                        text={state.concert_text.clone()}
                        selected={state.concert.clone()}
                        suggestions={form.controller.suggestions().clone()}
                        invalid={invalid_field == Some("concert_field")}
                        blur_delay_ms={props.config.blur_hide_delay_ms}
                        dispatcher={form.dispatcher()}
                    />
                }
            } else { html! {} }}

            <div class="form-actions">
                <button type="button" class="btn btn-secondary" onclick={on_scan_open}>{"📄 Scanner un bulletin"}</button>
                <button type="submit" class="btn btn-primary">{"Enregistrer"}</button>
            </div>

            <ScanModal
                api_client={props.api_client.clone()}
                is_open={*scan_open}
                on_close={on_scan_close}
                on_scanned={on_scanned}
            />
        </form>
    }
}
