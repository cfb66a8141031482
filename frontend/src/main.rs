use asso7_forms::config::{BOOTSTRAP_ELEMENT_ID, ROOT_ELEMENT_ID};
use asso7_forms::elements::{resolve_elements, REQUIRED_ELEMENTS};
use asso7_forms::{Bootstrap, PageKind};
use tracing::{info, Level};

mod components;
mod hooks;
mod services;

use components::archive_search::{ArchivesPage, ArchivesPageProps};
use components::cachets_picker::{CachetsPage, CachetsPageProps};
use components::concert_payments::{ConcertPaymentsPage, ConcertPaymentsPageProps};
use components::lieu_picker::{LieuPicker, LieuPickerProps};
use components::operation_form::{OperationFormPage, OperationFormPageProps};
use services::api::ApiClient;

/// Reads the page bootstrap and mounts the matching client on `#asso7-root`
fn mount() -> anyhow::Result<()> {
    let document = gloo::utils::document();
    let mut elements = resolve_elements(&REQUIRED_ELEMENTS, |id| document.get_element_by_id(id))?;

    let script = elements
        .take(BOOTSTRAP_ELEMENT_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", BOOTSTRAP_ELEMENT_ID))?;
    let root = elements
        .take(ROOT_ELEMENT_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", ROOT_ELEMENT_ID))?;

    let bootstrap = Bootstrap::from_json(&script.text_content().unwrap_or_default())?;
    let config = bootstrap.config.clone();
    let api_client = ApiClient::from_config(&config);
    info!("Mounting {:?} page", bootstrap.page);

    match bootstrap.page {
        PageKind::OperationForm => {
            let props = OperationFormPageProps { api_client, config, data: bootstrap.data()? };
            yew::Renderer::<OperationFormPage>::with_root_and_props(root, props).render();
        }
        PageKind::ConcertForm => {
            let props = LieuPickerProps { api_client, config, data: bootstrap.data()? };
            yew::Renderer::<LieuPicker>::with_root_and_props(root, props).render();
        }
        PageKind::Cachets => {
            let props = CachetsPageProps { data: bootstrap.data()? };
            yew::Renderer::<CachetsPage>::with_root_and_props(root, props).render();
        }
        PageKind::Archives => {
            let props = ArchivesPageProps { api_client, data: bootstrap.data()? };
            yew::Renderer::<ArchivesPage>::with_root_and_props(root, props).render();
        }
        PageKind::ConcertsPayments => {
            let props = ConcertPaymentsPageProps { api_client, config, data: bootstrap.data()? };
            yew::Renderer::<ConcertPaymentsPage>::with_root_and_props(root, props).render();
        }
    }

    Ok(())
}

fn main() {
    services::logging::init(Level::DEBUG);

    if let Err(e) = mount() {
        gloo::console::error!(format!("ASSO7 client not started: {:#}", e));
    }
}
