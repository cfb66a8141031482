use asso7_forms::services::payments::{CANCEL_CONFIRMATION, PAYMENT_ACCOUNTS};
use asso7_forms::services::{PaymentFlow, PaymentPopup, TickAction};
use asso7_forms::ClientConfig;
use shared::{ConcertPaymentRow, ConcertPaymentsData};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::adjustments_popup::AdjustmentsPopup;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ConcertPaymentsPageProps {
    pub api_client: ApiClient,
    pub config: ClientConfig,
    pub data: ConcertPaymentsData,
}

fn reload_page() {
    if let Err(e) = gloo::utils::window().location().reload() {
        gloo::console::error!("Reload failed:", e);
    }
}

fn report(e: impl std::fmt::Display) {
    gloo::dialogs::alert(&format!("Erreur : {}", e));
}

/// Concert list with payment checkboxes and the earnings adjustment popup
#[function_component(ConcertPaymentsPage)]
pub fn concert_payments_page(props: &ConcertPaymentsPageProps) -> Html {
    let popup = use_state(|| Option::<PaymentPopup>::None);
    let adjusting = use_state(|| Option::<ConcertPaymentRow>::None);
    let busy = use_state(|| false);

    let flow = {
        let api_client = props.api_client.clone();
        let with_popup = props.data.with_popup;
        let account = props.config.default_payment_account.clone();
        move || PaymentFlow::with_config(api_client.clone(), with_popup, &account)
    };

    let on_toggle = {
        let flow = flow.clone();
        let popup = popup.clone();
        let busy = busy.clone();
        Callback::from(move |row: ConcertPaymentRow| {
            let flow = flow();
            let popup = popup.clone();
            let busy = busy.clone();

            if row.paye {
                if !gloo::dialogs::confirm(CANCEL_CONFIRMATION) {
                    return;
                }
                busy.set(true);
                spawn_local(async move {
                    match flow.untick(&row.concert_id).await {
                        Ok(()) => reload_page(),
                        Err(e) => report(e),
                    }
                    busy.set(false);
                });
                return;
            }

            busy.set(true);
            spawn_local(async move {
                match flow.tick(&row).await {
                    Ok(TickAction::OpenPopup(contents)) => popup.set(Some(contents)),
                    Ok(TickAction::Validated) => reload_page(),
                    Err(e) => report(e),
                }
                busy.set(false);
            });
        })
    };

    let on_confirm = {
        let flow = flow.clone();
        let popup = popup.clone();
        let busy = busy.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(contents) = (*popup).clone() else {
                return;
            };
            let flow = flow();
            let popup = popup.clone();
            let busy = busy.clone();

            busy.set(true);
            spawn_local(async move {
                match flow.confirm(&contents).await {
                    Ok(()) => {
                        popup.set(None);
                        reload_page();
                    }
                    Err(e) => report(e),
                }
                busy.set(false);
            });
        })
    };

    let on_popup_cancel = {
        let popup = popup.clone();
        Callback::from(move |_: MouseEvent| popup.set(None))
    };

    let on_adjust_close = {
        let adjusting = adjusting.clone();
        Callback::from(move |_: ()| adjusting.set(None))
    };

    let popup_view = match popup.as_ref() {
        Some(contents) => {
            let account_radio = |account: &'static str| {
                let popup = popup.clone();
                let onchange = Callback::from(move |_: Event| {
                    if let Some(mut next) = (*popup).clone() {
                        next.compte = account.to_string();
                        popup.set(Some(next));
                    }
                });
                html! {
                    <label class="radio-label">
                        <input type="radio" name="compte" checked={contents.compte == account} {onchange} />
                        {account}
                    </label>
                }
            };
            let on_recette = {
                let popup = popup.clone();
                Callback::from(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    if let Some(mut next) = (*popup).clone() {
                        next.recette = input.value();
                        popup.set(Some(next));
                    }
                })
            };
            html! {
                <div class="modal-overlay">
                    <div class="modal-content payment-popup">
                        <div class="modal-header">
                            <h2>{"Valider le paiement"}</h2>
                        </div>
                        <p class="concert-label">{contents.label.clone()}</p>
                        <div class="form-group radio-group">
                            {for PAYMENT_ACCOUNTS.iter().map(|account| account_radio(*account))}
                        </div>
                        <div class="form-group">
                            <label for="recette">{"Recette (€)"}</label>
                            <input
                                type="text"
                                id="recette"
                                inputmode="decimal"
                                class="form-control"
                                value={contents.recette.clone()}
                                oninput={on_recette}
                            />
                        </div>
                        <div class="modal-actions">
                            <button type="button" class="btn btn-secondary" onclick={on_popup_cancel}>{"Annuler"}</button>
                            <button type="button" class="btn btn-primary" onclick={on_confirm} disabled={*busy}>{"Valider"}</button>
                        </div>
                    </div>
                </div>
            }
        }
        None => html! {},
    };

    html! {
        <div class="concert-payments">
            <table>
                <thead>
                    <tr>
                        <th>{"Concert"}</th>
                        <th>{"Payé"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {for props.data.rows.iter().map(|row| {
                        let onchange = {
                            let on_toggle = on_toggle.clone();
                            let row = row.clone();
                            Callback::from(move |e: Event| {
                                // The checkbox reflects the server state; a reload follows success
                                let input: HtmlInputElement = e.target_unchecked_into();
                                input.set_checked(row.paye);
                                on_toggle.emit(row.clone());
                            })
                        };
                        let on_adjust = {
                            let adjusting = adjusting.clone();
                            let row = row.clone();
                            Callback::from(move |_: MouseEvent| adjusting.set(Some(row.clone())))
                        };
                        html! {
                            <tr key={row.concert_id.clone()}>
                                <td>{row.label.clone()}</td>
                                <td>
                                    <input type="checkbox" checked={row.paye} disabled={*busy} {onchange} />
                                </td>
                                <td>
                                    <button type="button" class="btn btn-link" onclick={on_adjust}>{"Ajuster"}</button>
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>

            {popup_view}

            {if let Some(row) = adjusting.as_ref() {
                html! {
                    <AdjustmentsPopup
                        api_client={props.api_client.clone()}
                        concert_id={row.concert_id.clone()}
                        label={row.label.clone()}
                        on_close={on_adjust_close}
                    />
                }
            } else { html! {} }}
        </div>
    }
}
