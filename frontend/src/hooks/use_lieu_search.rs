use asso7_forms::autocomplete::SuggestionList;
use asso7_forms::services::{LieuPicker, LieuSuggestion};
use asso7_forms::Outcome;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

pub struct UseLieuSearchResult {
    pub suggestions: UseStateHandle<SuggestionList<LieuSuggestion>>,
    pub actions: UseLieuSearchActions,
}

#[derive(Clone)]
pub struct UseLieuSearchActions {
    /// Text typed in the venue field
    pub search: Callback<String>,
    pub hide: Callback<()>,
}

#[hook]
pub fn use_lieu_search(api_client: &ApiClient, min_chars: usize) -> UseLieuSearchResult {
    let picker = {
        let api_client = api_client.clone();
        use_memo(min_chars, move |min_chars| LieuPicker::with_config(api_client, *min_chars))
    };
    let suggestions = use_state(SuggestionList::<LieuSuggestion>::new);

    let search = {
        let picker = picker.clone();
        let suggestions = suggestions.clone();

        use_callback((), move |query: String, _| {
            let picker = picker.clone();
            let suggestions = suggestions.clone();

            spawn_local(async move {
                match picker.search(&query).await {
                    Outcome::Completed(Ok(items)) => {
                        let mut list = SuggestionList::new();
                        list.show(items);
                        suggestions.set(list);
                    }
                    Outcome::Completed(Err(e)) => {
                        gloo::console::error!("Venue search failed:", e.to_string());
                        suggestions.set(SuggestionList::new());
                    }
                    // a newer keystroke owns the list now
                    Outcome::Cancelled => {}
                }
            });
        })
    };

    let hide = {
        let picker = picker.clone();
        let suggestions = suggestions.clone();
        Callback::from(move |_: ()| {
            picker.cancel();
            let mut list = (*suggestions).clone();
            list.hide();
            suggestions.set(list);
        })
    };

    UseLieuSearchResult {
        suggestions,
        actions: UseLieuSearchActions { search, hide },
    }
}
