//! Home page: the user's notes, a create form, and per-note delete.

use leptos::ev;
use leptos::prelude::*;

use notes_common::notes::{self, NoticeKind, NotesBoard};
use notes_common::{Note, ViewScope};

use crate::api::WebApi;
use crate::format;

#[component]
pub fn HomePage() -> impl IntoView {
    let api = expect_context::<WebApi>();
    let board = RwSignal::new(NotesBoard::new());

    let scope = ViewScope::new();
    let scope_cleanup = scope.clone();
    on_cleanup(move || scope_cleanup.close());

    // Initial load
    {
        let api = api.clone();
        let scope = scope.clone();
        leptos::task::spawn_local(async move {
            if let Some(loaded) = scope.run(notes::reload(&api)).await {
                board.update(|b| b.apply_reload(loaded));
            }
        });
    }

    let on_delete = Callback::new({
        let api = api.clone();
        let scope = scope.clone();
        move |id: i64| {
            if !board.try_update(|b| b.begin_delete()).unwrap_or(false) {
                return;
            }
            let api = api.clone();
            let scope = scope.clone();
            leptos::task::spawn_local(async move {
                if let Some(mutation) = scope.run(notes::delete_and_reload(&api, id)).await {
                    board.update(|b| b.apply(mutation));
                }
            });
        }
    });

    let on_create = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if let Err(msg) = board.with_untracked(|b| b.draft.validate()) {
            log::warn!("Not submitting note: {msg}");
            return;
        }
        let Some(draft) = board.try_update(|b| b.begin_create()).flatten() else {
            return;
        };
        let api = api.clone();
        let scope = scope.clone();
        leptos::task::spawn_local(async move {
            if let Some(mutation) = scope.run(notes::create_and_reload(&api, &draft)).await {
                board.update(|b| b.finish_create(mutation));
            }
        });
    };

    let busy = Signal::derive(move || board.with(|b| b.busy));

    view! {
        <div class="notes-page">
            <h1>"Welcome to the Home Page"</h1>

            // ── Notice banner ──
            {move || board.with(|b| b.notice.clone()).map(|notice| {
                let class = match notice.kind {
                    NoticeKind::Success => "notice notice-success",
                    NoticeKind::Failure => "notice notice-failure",
                };
                view! {
                    <div class=class role="status">
                        <span>{notice.message}</span>
                        <button
                            class="notice-dismiss"
                            on:click=move |_| board.update(|b| b.dismiss_notice())
                        >
                            "×"
                        </button>
                    </div>
                }
            })}

            // ── Notes list ──
            <div>
                <h2>"Your Notes"</h2>
                <For
                    each=move || board.with(|b| b.notes.clone())
                    key=|note| note.id
                    children=move |note| view! { <NoteCard note=note on_delete=on_delete busy=busy /> }
                />
            </div>

            // ── Create form ──
            <h2>"Create a New Note"</h2>
            <form on:submit=on_create>
                <label for="title">"Title:"</label>
                <br />
                <input
                    id="title"
                    name="title"
                    type="text"
                    required
                    prop:value=move || board.with(|b| b.draft.title.clone())
                    on:input=move |ev| board.update(|b| b.draft.title = event_target_value(&ev))
                />
                <label for="content">"Content:"</label>
                <br />
                <textarea
                    id="content"
                    name="content"
                    required
                    prop:value=move || board.with(|b| b.draft.content.clone())
                    on:input=move |ev| board.update(|b| b.draft.content = event_target_value(&ev))
                ></textarea>
                <br />
                <button type="submit" disabled=move || busy.get()>{notes::CREATE_LABEL}</button>
            </form>
        </div>
    }
}

/// One note: title, body, creation date, delete button.
#[component]
pub fn NoteCard(note: Note, on_delete: Callback<i64>, busy: Signal<bool>) -> impl IntoView {
    let id = note.id;
    let created = format!("Created at: {}", format::created_at(&note.created_at));

    view! {
        <div class="note-container">
            <p class="note-title">{note.title}</p>
            <p class="note-content">{note.content}</p>
            <p class="note-date">{created}</p>
            <button
                class="delete-button"
                disabled=move || busy.get()
                on:click=move |_| on_delete.run(id)
            >
                "Delete"
            </button>
        </div>
    }
}
