use asso7_forms::services::LieuPicker;
use asso7_forms::FormError;
use shared::{CreateLieuRequest, LieuRef};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct LieuModalProps {
    pub api_client: ApiClient,
    pub is_open: bool,
    pub on_close: Callback<()>,
    pub on_created: Callback<LieuRef>,
}

const FIELDS: [(&str, &str); 8] = [
    ("m_lieu_nom", "Nom *"),
    ("m_lieu_ville", "Ville *"),
    ("m_lieu_cp", "Code postal *"),
    ("m_lieu_adresse", "Adresse"),
    ("m_lieu_email", "Email"),
    ("m_lieu_tel", "Téléphone"),
    ("m_lieu_contacts", "Contacts"),
    ("m_lieu_note", "Note"),
];

fn field_mut<'a>(request: &'a mut CreateLieuRequest, id: &str) -> &'a mut String {
    match id {
        "m_lieu_nom" => &mut request.nom,
        "m_lieu_ville" => &mut request.ville,
        "m_lieu_cp" => &mut request.code_postal,
        "m_lieu_adresse" => &mut request.adresse,
        "m_lieu_email" => &mut request.email,
        "m_lieu_tel" => &mut request.telephone,
        "m_lieu_contacts" => &mut request.contacts,
        _ => &mut request.note,
    }
}

#[function_component(LieuModal)]
pub fn lieu_modal(props: &LieuModalProps) -> Html {
    let draft = use_state(CreateLieuRequest::default);
    let creating = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    // Reset state when modal opens
    use_effect_with(props.is_open, {
        let draft = draft.clone();
        let error_message = error_message.clone();
        move |is_open| {
            if *is_open {
                draft.set(CreateLieuRequest::default());
                error_message.set(None);
            }
            || ()
        }
    });

    let on_create = {
        let api_client = props.api_client.clone();
        let draft = draft.clone();
        let creating = creating.clone();
        let error_message = error_message.clone();
        let on_created = props.on_created.clone();

        Callback::from(move |_: MouseEvent| {
            let picker = LieuPicker::new(api_client.clone());
            let request = (*draft).clone();
            let creating = creating.clone();
            let error_message = error_message.clone();
            let on_created = on_created.clone();

            creating.set(true);
            spawn_local(async move {
                match picker.create(&request).await {
                    Ok(lieu) => on_created.emit(lieu),
                    Err(FormError::Api(asso7_forms::ApiError::Network(e))) => {
                        gloo::console::error!("Venue creation failed:", e);
                        error_message.set(Some("Erreur réseau lors de la création du lieu.".to_string()));
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
                creating.set(false);
            });
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    if !props.is_open {
        return html! {};
    }

    html! {
        <div class="modal-overlay">
            <div class="modal-content lieu-modal">
                <div class="modal-header">
                    <h2>{"Nouveau lieu"}</h2>
                    <button type="button" class="close-button" onclick={on_cancel.clone()}>{"×"}</button>
                </div>

                {if let Some(error) = error_message.as_ref() {
                    html! { <div class="form-message error">{error}</div> }
                } else { html! {} }}

                {for FIELDS.iter().map(|&(id, label)| {
                    let value = field_mut(&mut (*draft).clone(), id).clone();
                    let oninput = {
                        let draft = draft.clone();
                        Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            let mut next = (*draft).clone();
                            *field_mut(&mut next, id) = input.value();
                            draft.set(next);
                        })
                    };
                    html! {
                        <div class="form-group">
                            <label for={id}>{label}</label>
                            <input type="text" id={id} class="form-control" {value} {oninput} />
                        </div>
                    }
                })}

                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" onclick={on_cancel}>{"Annuler"}</button>
                    <button type="button" class="btn btn-primary" onclick={on_create} disabled={*creating}>
                        {if *creating { "Création..." } else { "Créer le lieu" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
