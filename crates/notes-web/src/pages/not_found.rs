use leptos::prelude::*;
use leptos_router::components::A;

use notes_common::Route;

/// Fallback for any path the router does not know.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"404 Not Found"</h1>
            <p>"The page you're looking for doesn't exist!"</p>
            <A href=Route::Home.path()>"Back to notes"</A>
        </div>
    }
}
