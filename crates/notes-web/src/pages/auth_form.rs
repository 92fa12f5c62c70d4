//! Shared login/register form and the two pages built on it.

use leptos::ev;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use notes_common::forms::{self, FormMode, FormOutcome};
use notes_common::{Credentials, ViewScope};

use crate::api::WebApi;

/// Username/password form posting to `endpoint`.
///
/// In login mode a successful submit stores both tokens and navigates home;
/// in register mode it navigates to the login page.
#[component]
pub fn AuthForm(#[prop(into)] endpoint: String, mode: FormMode) -> impl IntoView {
    let api = expect_context::<WebApi>();
    let navigate = use_navigate();
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (loading, set_loading) = signal(false);

    let scope = ViewScope::new();
    let scope_cleanup = scope.clone();
    on_cleanup(move || scope_cleanup.close());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        set_loading.set(true);
        set_error.set(None);

        let credentials = Credentials::new(username.get_untracked(), password.get_untracked());
        let api = api.clone();
        let endpoint = endpoint.clone();
        let navigate = navigate.clone();
        let scope = scope.clone();
        leptos::task::spawn_local(async move {
            let submitted = forms::submit_credentials(&api, &endpoint, mode, &credentials);
            // None: the form was unmounted mid-request and its signals are gone.
            let Some(outcome) = scope.run(submitted).await else {
                return;
            };
            set_loading.set(false);
            match outcome {
                FormOutcome::Navigate(route) => navigate(route.path(), Default::default()),
                FormOutcome::Error(message) => set_error.set(Some(message)),
                FormOutcome::Idle => {}
            }
        });
    };

    let (alt_route, alt_label) = mode.alternate();

    view! {
        <div class="form-page">
            <form class="form-container" on:submit=on_submit>
                <h1>{mode.title()}</h1>

                {move || error.get().map(|e| view! {
                    <div class="form-error" role="alert">{e}</div>
                })}

                <input
                    class="form-input"
                    type="text"
                    placeholder="Username"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
                <input
                    class="form-input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />

                {move || loading.get().then(|| view! {
                    <div class="loading-indicator"><div class="loader"></div></div>
                })}

                <button
                    class="form-button"
                    type="submit"
                    disabled=move || loading.get()
                >
                    {move || mode.submit_label(loading.get())}
                </button>

                <p class="form-switch">
                    <A href=alt_route.path()>{alt_label}</A>
                </p>
            </form>
        </div>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    view! { <AuthForm endpoint=FormMode::Login.endpoint() mode=FormMode::Login /> }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    view! { <AuthForm endpoint=FormMode::Register.endpoint() mode=FormMode::Register /> }
}
