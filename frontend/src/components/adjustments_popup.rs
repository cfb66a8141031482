use asso7_forms::services::AdjustmentSheet;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct AdjustmentsPopupProps {
    pub api_client: ApiClient,
    pub concert_id: String,
    pub label: String,
    pub on_close: Callback<()>,
}

/// Per-musician fixed earnings for one concert
#[function_component(AdjustmentsPopup)]
pub fn adjustments_popup(props: &AdjustmentsPopupProps) -> Html {
    let sheet = use_state(|| Option::<AdjustmentSheet>::None);
    let error_message = use_state(|| Option::<String>::None);
    let saving = use_state(|| false);

    {
        let api_client = props.api_client.clone();
        let sheet = sheet.clone();
        let error_message = error_message.clone();
        use_effect_with(props.concert_id.clone(), move |concert_id| {
            let concert_id = concert_id.clone();
            spawn_local(async move {
                match AdjustmentSheet::load(&api_client, &concert_id).await {
                    Ok(loaded) => sheet.set(Some(loaded)),
                    Err(e) => error_message.set(Some(e.to_string())),
                }
            });
            || ()
        });
    }

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_keydown = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                on_close.emit(());
            }
        })
    };

    // Clicks inside the dialog must not reach the backdrop
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    let on_save = {
        let api_client = props.api_client.clone();
        let sheet = sheet.clone();
        let saving = saving.clone();
        let error_message = error_message.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(current) = (*sheet).clone() else {
                return;
            };
            let api_client = api_client.clone();
            let saving = saving.clone();
            let error_message = error_message.clone();
            let on_close = on_close.clone();

            saving.set(true);
            spawn_local(async move {
                match current.save(&api_client).await {
                    Ok(()) => {
                        on_close.emit(());
                        if let Err(e) = gloo::utils::window().location().reload() {
                            gloo::console::error!("Reload failed:", e);
                        }
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
                saving.set(false);
            });
        })
    };

    let body = match sheet.as_ref() {
        None if error_message.is_none() => html! { <p>{"Chargement..."}</p> },
        None => html! {},
        Some(current) if current.rows.is_empty() => html! { <p>{"Aucun participant."}</p> },
        Some(current) => html! {
            <table class="adjustments-table">
                <thead>
                    <tr>
                        <th>{"Musicien"}</th>
                        <th>{"Montant fixé (€)"}</th>
                        <th>{if current.paid { "Réel" } else { "Potentiel" }}</th>
                    </tr>
                </thead>
                <tbody>
                    {for current.rows.iter().map(|row| {
                        let on_input = {
                            let sheet = sheet.clone();
                            let id = row.participation_id;
                            Callback::from(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                if let Some(mut next) = (*sheet).clone() {
                                    next.set_input(id, &input.value());
                                    sheet.set(Some(next));
                                }
                            })
                        };
                        html! {
                            <tr key={row.participation_id}>
                                <td>{row.nom.clone()}</td>
                                <td>
                                    <input
                                        type="text"
                                        inputmode="decimal"
                                        class="form-control"
                                        placeholder="auto"
                                        value={row.input.clone()}
                                        oninput={on_input}
                                    />
                                </td>
                                <td class="amount">{row.current.clone()}</td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        },
    };

    html! {
        <div class="modal-overlay" onclick={close.clone()} onkeydown={on_keydown} tabindex="-1">
            <div class="modal-content adjustments-popup" onclick={stop}>
                <div class="modal-header">
                    <h2>{format!("Ajuster les gains : {}", props.label)}</h2>
                    <button type="button" class="close-button" onclick={close.clone()}>{"×"}</button>
                </div>

                {if let Some(error) = error_message.as_ref() {
                    html! { <div class="form-message error">{error}</div> }
                } else { html! {} }}

                {body}

                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" onclick={close}>{"Annuler"}</button>
                    <button type="button" class="btn btn-primary" onclick={on_save} disabled={*saving || sheet.is_none()}>
                        {if *saving { "Enregistrement..." } else { "Enregistrer" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
