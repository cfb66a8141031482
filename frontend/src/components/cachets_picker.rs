use asso7_forms::cachets::CachetsSelection;
use chrono::{Datelike, NaiveDate};
use shared::CachetsData;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::services::date_utils::{calendar_days, month_name, shift_month, today, WEEKDAYS};

#[derive(Properties, PartialEq)]
pub struct CachetsPageProps {
    pub data: CachetsData,
}

/// Fee-slip form: one cachet per date clicked in the calendar
#[function_component(CachetsPage)]
pub fn cachets_page(props: &CachetsPageProps) -> Html {
    let selection = use_state(|| CachetsSelection::from_dates(props.data.dates.iter().copied()));
    let unit_amount = use_state(|| props.data.montant.clone());
    let musicien = use_state(String::new);

    // Opens on the month of the first pre-selected date, else the current one
    let month = use_state(|| {
        let anchor = props.data.dates.iter().min().copied().unwrap_or_else(today);
        NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1).unwrap_or(anchor)
    });

    let on_previous = {
        let month = month.clone();
        Callback::from(move |_: MouseEvent| month.set(shift_month(*month, -1)))
    };
    let on_next = {
        let month = month.clone();
        Callback::from(move |_: MouseEvent| month.set(shift_month(*month, 1)))
    };

    let on_musicien = {
        let musicien = musicien.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            musicien.set(select.value());
        })
    };
    let on_amount = {
        let unit_amount = unit_amount.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            unit_amount.set(input.value());
        })
    };
    let on_clear = {
        let selection = selection.clone();
        Callback::from(move |_: MouseEvent| selection.set(CachetsSelection::new()))
    };

    let days = calendar_days(month.year(), month.month());

    html! {
        <form class="cachets-form" method="post" action={props.data.action.clone()}>
            <div class="form-group">
                <label for="musicien">{"Musicien"}</label>
                <select id="musicien" name="musicien" class="form-control" onchange={on_musicien}>
                    <option value="" selected={musicien.is_empty()}>{"-- Sélectionner --"}</option>
                    {for props.data.musiciens.iter().map(|name| html! {
                        <option value={name.clone()} selected={*musicien == *name}>{name}</option>
                    })}
                </select>
            </div>

            <div class="form-group">
                <label for="montant">{"Montant par cachet (€)"}</label>
                <input
                    type="text"
                    id="montant"
                    name="montant"
                    inputmode="decimal"
                    class="form-control"
                    value={(*unit_amount).clone()}
                    oninput={on_amount}
                />
            </div>

            <div class="cachets-calendar">
                <div class="calendar-header">
                    <button type="button" class="nav-button" onclick={on_previous}>{"◀"}</button>
                    <span class="month-label">{format!("{} {}", month_name(month.month()), month.year())}</span>
                    <button type="button" class="nav-button" onclick={on_next}>{"▶"}</button>
                </div>
                <div class="calendar-grid">
                    {for WEEKDAYS.iter().map(|day| html! { <div class="weekday">{*day}</div> })}
                    {for days.into_iter().map(|day| {
                        let on_toggle = {
                            let selection = selection.clone();
                            let date = day.date;
                            Callback::from(move |_: MouseEvent| {
                                let mut next = (*selection).clone();
                                next.toggle(date);
                                selection.set(next);
                            })
                        };
                        html! {
                            <div
                                class={classes!(
                                    "calendar-day",
                                    (!day.is_current_month).then_some("other-month"),
                                    selection.contains(day.date).then_some("selected"),
                                )}
                                onclick={on_toggle}
                            >
                                {day.date.day()}
                            </div>
                        }
                    })}
                </div>
            </div>

            <input type="hidden" name="dates" value={selection.hidden_value()} />

            <div class="form-group">
                <label for="dates_display">{"Dates sélectionnées"}</label>
                <textarea id="dates_display" class="form-control" readonly={true} value={selection.display_value()} />
            </div>

            <div class="cachets-summary">
                <span>{format!("{} cachet(s)", selection.count())}</span>
                <span class="total">{format!("Total : {}", selection.total_display(&unit_amount))}</span>
                <button type="button" class="btn btn-link" onclick={on_clear}>{"Effacer les dates"}</button>
            </div>

            <div class="form-actions">
                <button type="submit" class="btn btn-primary">{"Enregistrer"}</button>
            </div>
        </form>
    }
}
