mod api;
mod components;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::chat::ChatArea;
use components::document_selector::DocumentSelector;
use state::AppState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide();

    // Load document collections on mount
    state.load_documents();

    view! {
        <div class="app-container">
            <header class="app-header">
                <h1>"Dokumentační asistent"</h1>
            </header>
            <DocumentSelector />
            <ChatArea />
        </div>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
