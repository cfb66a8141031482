use asso7_forms::autocomplete::{KeyOutcome, NavKey};
use asso7_forms::ClientConfig;
use gloo::timers::callback::Timeout;
use shared::{ConcertFormData, LieuRef};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::lieu_modal::LieuModal;
use crate::hooks::use_lieu_search::use_lieu_search;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct LieuPickerProps {
    pub api_client: ApiClient,
    pub config: ClientConfig,
    pub data: ConcertFormData,
}

/// Venue field of the concert form: `lieu` (name) and `lieu_id` (hidden)
#[function_component(LieuPicker)]
pub fn lieu_picker(props: &LieuPickerProps) -> Html {
    let search = use_lieu_search(&props.api_client, props.config.search_min_chars);
    let text = use_state(|| props.data.lieu.as_ref().map(|l| l.nom.clone()).unwrap_or_default());
    let lieu_id = use_state(|| props.data.lieu.as_ref().map(|l| l.id));
    let modal_open = use_state(|| false);

    let choose = {
        let text = text.clone();
        let lieu_id = lieu_id.clone();
        let hide = search.actions.hide.clone();
        Callback::from(move |lieu: LieuRef| {
            text.set(lieu.nom);
            lieu_id.set(Some(lieu.id));
            hide.emit(());
        })
    };

    let on_input = {
        let text = text.clone();
        let lieu_id = lieu_id.clone();
        let run_search = search.actions.search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            lieu_id.set(None);
            text.set(input.value());
            run_search.emit(input.value());
        })
    };

    let on_keydown = {
        let suggestions = search.suggestions.clone();
        let choose = choose.clone();
        Callback::from(move |e: KeyboardEvent| {
            let mut list = (*suggestions).clone();
            match list.handle_key(NavKey::from_key(&e.key())) {
                KeyOutcome::Highlighted(_) => e.prevent_default(),
                KeyOutcome::Selected(lieu) => {
                    e.prevent_default();
                    choose.emit(LieuRef { id: lieu.id, nom: lieu.nom });
                    return;
                }
                KeyOutcome::Hidden | KeyOutcome::Ignored => {}
            }
            suggestions.set(list);
        })
    };

    let on_blur = {
        let hide = search.actions.hide.clone();
        let delay = props.config.blur_hide_delay_ms;
        Callback::from(move |_: FocusEvent| {
            let hide = hide.clone();
            Timeout::new(delay, move || hide.emit(())).forget();
        })
    };

    let on_new = {
        let modal_open = modal_open.clone();
        Callback::from(move |_: MouseEvent| modal_open.set(true))
    };
    let on_modal_close = {
        let modal_open = modal_open.clone();
        Callback::from(move |_: ()| modal_open.set(false))
    };
    let on_created = {
        let choose = choose.clone();
        let modal_open = modal_open.clone();
        Callback::from(move |lieu: LieuRef| {
            choose.emit(lieu);
            modal_open.set(false);
        })
    };

    let highlighted = search.suggestions.highlighted();

    html! {
        <div class="form-group lieu-picker">
            <label for="lieu_field">{"Lieu"}</label>
            <div class="lieu-picker-row">
                <input
                    type="text"
                    id="lieu_field"
                    name="lieu"
                    autocomplete="off"
                    class="form-control"
                    value={(*text).clone()}
                    oninput={on_input}
                    onkeydown={on_keydown}
                    onblur={on_blur}
                />
                <input type="hidden" id="lieu_id" name="lieu_id" value={lieu_id.map(|id| id.to_string()).unwrap_or_default()} />
                <button type="button" class="btn btn-secondary" onclick={on_new}>{"+ Nouveau lieu"}</button>
            </div>

            {if search.suggestions.is_visible() {
                html! {
                    <div class="autocomplete-list">
                        {for search.suggestions.items().iter().enumerate().map(|(index, lieu)| {
                            let on_pick = {
                                let choose = choose.clone();
                                let lieu = LieuRef { id: lieu.id, nom: lieu.nom.clone() };
                                Callback::from(move |e: MouseEvent| {
                                    e.prevent_default();
                                    choose.emit(lieu.clone());
                                })
                            };
                            html! {
                                <div
                                    class={classes!("autocomplete-item", (highlighted == Some(index)).then_some("active"))}
                                    onmousedown={on_pick}
                                >
                                    {lieu.label.clone()}
                                </div>
                            }
                        })}
                    </div>
                }
            } else { html! {} }}

            <LieuModal
                api_client={props.api_client.clone()}
                is_open={*modal_open}
                on_close={on_modal_close}
                on_created={on_created}
            />
        </div>
    }
}
