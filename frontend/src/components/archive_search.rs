use asso7_forms::archive::{ArchiveFilter, SearchCriterion};
use asso7_forms::services::deletion::DELETE_CONFIRMATION;
use asso7_forms::services::DeleteService;
use shared::{ArchivedOperation, ArchivesData};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ArchivesPageProps {
    pub api_client: ApiClient,
    pub data: ArchivesData,
}

#[function_component(ArchivesPage)]
pub fn archives_page(props: &ArchivesPageProps) -> Html {
    let filter = use_state(ArchiveFilter::reset);
    let criterion = use_state(SearchCriterion::default);
    let query = use_state(String::new);
    let popup_open = use_state(|| false);

    let on_open = {
        let popup_open = popup_open.clone();
        Callback::from(move |_: MouseEvent| popup_open.set(true))
    };
    let on_close = {
        let popup_open = popup_open.clone();
        Callback::from(move |_: MouseEvent| popup_open.set(false))
    };

    let on_criterion = {
        let criterion = criterion.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            criterion.set(select.value().parse().unwrap_or_default());
        })
    };
    let on_query = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            query.set(input.value());
        })
    };

    let run_search = {
        let filter = filter.clone();
        let criterion = criterion.clone();
        let query = query.clone();
        let popup_open = popup_open.clone();
        Callback::from(move |_: ()| {
            filter.set(ArchiveFilter::new(*criterion, &query));
            popup_open.set(false);
        })
    };
    let on_search = {
        let run_search = run_search.clone();
        Callback::from(move |_: MouseEvent| run_search.emit(()))
    };
    let on_query_key = {
        let run_search = run_search.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                run_search.emit(());
            }
        })
    };

    let on_reset = {
        let filter = filter.clone();
        let query = query.clone();
        Callback::from(move |_: MouseEvent| {
            filter.set(ArchiveFilter::reset());
            query.set(String::new());
        })
    };

    let on_delete = {
        let api_client = props.api_client.clone();
        Callback::from(move |row: ArchivedOperation| {
            if !gloo::dialogs::confirm(DELETE_CONFIRMATION) {
                return;
            }
            let service = DeleteService::new(api_client.clone());
            spawn_local(async move {
                match service.delete(&row.delete_action, &row.id).await {
                    Ok(()) => {
                        if let Err(e) = gloo::utils::window().location().reload() {
                            gloo::console::error!("Reload failed:", e);
                        }
                    }
                    Err(e) => gloo::dialogs::alert(&e.to_string()),
                }
            });
        })
    };

    let render_row = |row: &ArchivedOperation| {
        let on_click = {
            let on_delete = on_delete.clone();
            let row = row.clone();
            Callback::from(move |_: MouseEvent| on_delete.emit(row.clone()))
        };
        html! {
            <tr key={row.id.clone()}>
                <td>{row.date.clone()}</td>
                <td>{row.qui.clone()}</td>
                <td>{row.type_label.clone()}</td>
                <td>{row.motif.clone()}</td>
                <td>{row.preciser.clone()}</td>
                <td class="amount">{row.montant.clone()}</td>
                <td>{row.concert.clone()}</td>
                <td>
                    <button type="button" class="btn btn-link delete-button" title="Supprimer" onclick={on_click}>{"🗑"}</button>
                </td>
            </tr>
        }
    };

    html! {
        <div class="archives-page">
            <div class="archives-toolbar">
                <button type="button" class="btn btn-secondary" onclick={on_open}>{criterion.button_label()}</button>
                {if filter.is_active() {
                    html! {
                        <>
                            <span class="result-count">{format!("{} résultat(s)", filter.count(&props.data.tables))}</span>
                            <button type="button" class="btn btn-link" onclick={on_reset}>{"🔁 Retour à la liste complète"}</button>
                        </>
                    }
                } else { html! {} }}
            </div>

            {if *popup_open {
                html! {
                    <div class="modal-overlay">
                        <div class="modal-content search-popup">
                            <div class="modal-header">
                                <h2>{"Rechercher"}</h2>
                                <button type="button" class="close-button" onclick={on_close}>{"×"}</button>
                            </div>
                            <div class="form-group">
                                <label for="search_criterion">{"Critère"}</label>
                                <select id="search_criterion" class="form-control" onchange={on_criterion}>
                                    {for SearchCriterion::ALL.iter().map(|c| html! {
                                        <option value={c.as_str()} selected={*criterion == *c}>{c.label()}</option>
                                    })}
                                </select>
                            </div>
                            <div class="form-group">
                                <label for="search_value">{"Valeur"}</label>
                                <input
                                    type="text"
                                    id="search_value"
                                    class="form-control"
                                    value={(*query).clone()}
                                    oninput={on_query}
                                    onkeydown={on_query_key}
                                />
                                {if let Some(hint) = criterion.hint() {
                                    html! { <small class="form-hint">{hint}</small> }
                                } else { html! {} }}
                            </div>
                            <div class="modal-actions">
                                <button type="button" class="btn btn-primary" onclick={on_search}>{"Rechercher"}</button>
                            </div>
                        </div>
                    </div>
                }
            } else { html! {} }}

            {for props.data.tables.iter().map(|table| html! {
                <section class="archive-table">
                    <h3>{table.title.clone()}</h3>
                    <table>
                        <thead>
                            <tr>
                                <th>{"Date"}</th>
                                <th>{"Qui"}</th>
                                <th>{"Type"}</th>
                                <th>{"Motif"}</th>
                                <th>{"Préciser"}</th>
                                <th>{"Montant"}</th>
                                <th>{"Concert"}</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {for filter.visible_rows(table).map(|row| render_row(row))}
                        </tbody>
                    </table>
                </section>
            })}
        </div>
    }
}
