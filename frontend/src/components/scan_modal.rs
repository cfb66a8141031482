use asso7_forms::services::{ScanFill, ScanService};
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, FileList, HtmlInputElement};
use yew::prelude::*;

use crate::services::api::{ApiClient, PdfFile};

#[derive(Properties, PartialEq)]
pub struct ScanModalProps {
    pub api_client: ApiClient,
    pub is_open: bool,
    pub on_close: Callback<()>,
    pub on_scanned: Callback<ScanFill>,
}

#[function_component(ScanModal)]
pub fn scan_modal(props: &ScanModalProps) -> Html {
    let uploading = use_state(|| false);
    let dragging = use_state(|| false);

    let upload = {
        let api_client = props.api_client.clone();
        let uploading = uploading.clone();
        let on_scanned = props.on_scanned.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |files: Option<FileList>| {
            let Some(file) = files.and_then(|list| list.get(0)) else {
                gloo::dialogs::alert("Veuillez choisir un fichier PDF.");
                return;
            };

            let service = ScanService::new(api_client.clone());
            let uploading = uploading.clone();
            let on_scanned = on_scanned.clone();
            let on_close = on_close.clone();

            uploading.set(true);
            spawn_local(async move {
                match service.scan(&PdfFile(file)).await {
                    Ok(fill) => {
                        on_scanned.emit(fill);
                        on_close.emit(());
                    }
                    Err(e) => {
                        gloo::console::error!("Scan failed:", e.to_string());
                        gloo::dialogs::alert(&e.to_string());
                    }
                }
                uploading.set(false);
            });
        })
    };

    let on_file_change = {
        let upload = upload.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            upload.emit(input.files());
            input.set_value("");
        })
    };

    let on_drop = {
        let upload = upload.clone();
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(false);
            upload.emit(e.data_transfer().and_then(|transfer| transfer.files()));
        })
    };

    let on_drag_over = {
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(true);
        })
    };

    let on_drag_leave = {
        let dragging = dragging.clone();
        Callback::from(move |_: DragEvent| dragging.set(false))
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    if !props.is_open {
        return html! {};
    }

    html! {
        <div class="modal-overlay">
            <div class="modal-content scan-modal">
                <div class="modal-header">
                    <h2>{"Scanner un bulletin de paie"}</h2>
                    <button type="button" class="close-button" onclick={on_close}>{"×"}</button>
                </div>

                <div
                    class={classes!("drop-zone", dragging.then_some("dragging"))}
                    ondrop={on_drop}
                    ondragover={on_drag_over}
                    ondragleave={on_drag_leave}
                >
                    {if *uploading {
                        html! { <p>{"Analyse du PDF en cours..."}</p> }
                    } else {
                        html! {
                            <>
                                <p>{"Déposez le PDF ici ou"}</p>
                                <input type="file" accept="application/pdf" onchange={on_file_change} />
                            </>
                        }
                    }}
                </div>
            </div>
        </div>
    }
}
