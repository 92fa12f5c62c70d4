//! Notes web app: Leptos CSR WASM application.
//!
//! Single-page app that authenticates against the notes REST API with JWT
//! access/refresh tokens and lists, creates and deletes notes.

pub mod api;
pub mod format;
pub mod pages;
pub mod storage;

use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use notes_common::guard::{self, AuthState, SystemClock};
use notes_common::{ViewScope, routes};

use api::WebApi;
use pages::auth_form::{LoginPage, RegisterPage};
use pages::home::HomePage;
use pages::not_found::NotFoundPage;

// ── Route Guard ─────────────────────────────────────────────────────

/// Renders `children` only once the stored session checks out.
///
/// The check runs once per mount. While it is pending a placeholder is shown;
/// an unauthenticated result redirects to the login page.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let api = expect_context::<WebApi>();
    let (state, set_state) = signal(AuthState::Unknown);

    let scope = ViewScope::new();
    let scope_cleanup = scope.clone();
    on_cleanup(move || scope_cleanup.close());

    leptos::task::spawn_local(async move {
        if let Some(resolved) = scope.run(guard::check_session(&api, &SystemClock)).await {
            log::debug!("Auth guard resolved: {resolved:?}");
            set_state.set(resolved);
        }
    });

    move || match state.get() {
        AuthState::Unknown => view! { <div class="loading">"Loading..."</div> }.into_any(),
        AuthState::Authenticated => children().into_any(),
        AuthState::Unauthenticated => {
            view! { <Redirect path=routes::Route::Login.path() /> }.into_any()
        }
    }
}

// ── Logout ──────────────────────────────────────────────────────────

/// Pseudo-view: wipes persisted client state, then redirects to login.
#[component]
pub fn Logout() -> impl IntoView {
    let api = expect_context::<WebApi>();
    let next = routes::logout(api.session());
    view! { <Redirect path=next.path() /> }
}

// ── App Root ────────────────────────────────────────────────────────

/// Leptos application root.
#[component]
pub fn App() -> impl IntoView {
    provide_context(api::client());

    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <NotFoundPage /> }>
                    <Route
                        path=path!("/")
                        view=|| view! { <ProtectedRoute><HomePage /></ProtectedRoute> }
                    />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/register") view=RegisterPage />
                    <Route path=path!("/logout") view=Logout />
                </Routes>
            </main>
        </Router>
    }
}

// ── WASM entry point ────────────────────────────────────────────────

/// Called by trunk to mount the app.
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("Notes app starting");
    leptos::mount::mount_to_body(App);
}
