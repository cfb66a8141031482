use asso7_forms::autocomplete::{NavKey, SuggestionList};
use asso7_forms::concerts::concert_label;
use asso7_forms::dates;
use gloo::timers::callback::Timeout;
use shared::Concert;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_operation_form::{FormAction, OperationFormModel};

#[derive(Properties, PartialEq)]
pub struct ConcertPickerProps {
    /// Text shown in the field
    pub text: String,
    pub selected: Option<Concert>,
    pub suggestions: SuggestionList<Concert>,
    #[prop_or_default]
    pub invalid: bool,
    pub blur_delay_ms: u32,
    pub dispatcher: UseReducerDispatcher<OperationFormModel>,
}

#[function_component(ConcertPicker)]
pub fn concert_picker(props: &ConcertPickerProps) -> Html {
    let on_input = {
        let dispatcher = props.dispatcher.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(FormAction::ConcertText(input.value()));
        })
    };

    let on_keydown = {
        let dispatcher = props.dispatcher.clone();
        let visible = props.suggestions.is_visible();
        Callback::from(move |e: KeyboardEvent| {
            let key = NavKey::from_key(&e.key());
            if visible && matches!(key, NavKey::ArrowDown | NavKey::ArrowUp | NavKey::Enter) {
                e.prevent_default();
            }
            if key != NavKey::Other {
                dispatcher.dispatch(FormAction::ConcertKey(key));
            }
        })
    };

    // Delayed so a click on a suggestion lands before the list disappears
    let on_blur = {
        let dispatcher = props.dispatcher.clone();
        let delay = props.blur_delay_ms;
        Callback::from(move |_: FocusEvent| {
            let dispatcher = dispatcher.clone();
            Timeout::new(delay, move || dispatcher.dispatch(FormAction::ConcertBlur)).forget();
        })
    };

    let on_clear = {
        let dispatcher = props.dispatcher.clone();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(FormAction::ConcertClear))
    };

    let on_date_change = {
        let dispatcher = props.dispatcher.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(date) = dates::parse_wire(&input.value()) {
                dispatcher.dispatch(FormAction::ConcertDate(date));
            }
        })
    };

    let highlighted = props.suggestions.highlighted();

    html! {
        <div class="form-group concert-picker">
            <label for="concert_field">{"Concert lié"}</label>
            <div class="concert-picker-row">
                <input
                    type="text"
                    id="concert_field"
                    autocomplete="off"
                    placeholder="Date ou lieu du concert..."
                    class={classes!("form-control", props.invalid.then_some("field-error"), props.selected.is_some().then_some("locked"))}
                    value={props.text.clone()}
                    readonly={props.selected.is_some()}
                    oninput={on_input}
                    onkeydown={on_keydown}
                    onblur={on_blur}
                />
                <input
                    type="date"
                    class="concert-date"
                    title="Choisir par date"
                    value={props.selected.as_ref().map(|c| dates::to_wire(c.date)).unwrap_or_default()}
                    onchange={on_date_change}
                />
                {if props.selected.is_some() || !props.text.is_empty() {
                    html! { <button type="button" class="btn btn-link" onclick={on_clear}>{"✕"}</button> }
                } else { html! {} }}
            </div>

            {if props.suggestions.is_visible() {
                html! {
                    <div class="autocomplete-list">
                        {for props.suggestions.items().iter().enumerate().map(|(index, concert)| {
                            let on_pick = {
                                let dispatcher = props.dispatcher.clone();
                                let id = concert.id;
                                Callback::from(move |e: MouseEvent| {
                                    e.prevent_default();
                                    dispatcher.dispatch(FormAction::ConcertSelect(id));
                                })
                            };
                            let on_hover = {
                                let dispatcher = props.dispatcher.clone();
                                Callback::from(move |_: MouseEvent| dispatcher.dispatch(FormAction::ConcertHighlight(index)))
                            };
                            html! {
                                <div
                                    class={classes!("autocomplete-item", (highlighted == Some(index)).then_some("active"))}
                                    onmousedown={on_pick}
                                    onmouseenter={on_hover}
                                >
                                    {concert_label(concert)}
                                </div>
                            }
                        })}
                    </div>
                }
            } else { html! {} }}
        </div>
    }
}
