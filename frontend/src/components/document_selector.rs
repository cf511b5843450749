use leptos::prelude::*;

use crate::state::AppState;

/// Drop-down of the document collections the backend can answer from.
#[component]
pub fn DocumentSelector() -> impl IntoView {
    let state = expect_context::<AppState>();

    let selected = move || state.session.with(|s| s.selected_document.clone().unwrap_or_default());
    let disabled = move || {
        state.session.with(|s| s.is_document_list_loading || s.available_documents.is_empty())
    };

    view! {
        <div class="document-selector">
            <label for="doc-select">"Dokumentace:"</label>
            <select
                id="doc-select"
                prop:value=selected
                disabled=disabled
                on:change=move |ev| state.select_document(event_target_value(&ev))
            >
                {move || {
                    let docs = state.session.with(|s| s.available_documents.clone());
                    if docs.is_empty() {
                        view! { <option value="">"Načítání..."</option> }.into_any()
                    } else {
                        view! {
                            <option value="">"-- Vyberte dokumentaci --"</option>
                            {docs
                                .into_iter()
                                .map(|doc| {
                                    let value = doc.clone();
                                    view! { <option value=value>{doc}</option> }
                                })
                                .collect_view()}
                        }
                            .into_any()
                    }
                }}
            </select>
        </div>
    }
}
