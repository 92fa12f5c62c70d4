//! Note resource client and the notes board view-model.
//!
//! The board never inserts or removes notes locally. After every create or
//! delete it re-fetches the whole collection, and the server order is kept.

use crate::api::{ApiClient, ApiResult, endpoints};
use crate::models::{Note, NoteDraft};
use crate::session::SessionRepository;
use crate::transport::Transport;

pub const CREATED_STATUS: u16 = 201;
pub const DELETED_STATUS: u16 = 204;

/// Text of the create form's submit button.
pub const CREATE_LABEL: &str = "Create Note";

/// List/create/delete against `/api/notes/`.
pub struct NoteResource<'a, T, S> {
    api: &'a ApiClient<T, S>,
}

impl<'a, T: Transport, S: SessionRepository> NoteResource<'a, T, S> {
    pub fn new(api: &'a ApiClient<T, S>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ApiResult<Vec<Note>> {
        self.api.get(endpoints::NOTES).await?.json()
    }

    /// Returns the response status; the created note is not needed since the
    /// caller re-fetches.
    pub async fn create(&self, draft: &NoteDraft) -> ApiResult<u16> {
        Ok(self.api.post(endpoints::NOTES, draft).await?.status)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<u16> {
        Ok(self.api.delete(&endpoints::note(id)).await?.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Outcome message shown after a create or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: &str) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.to_string(),
        }
    }

    fn failure(message: &str) -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: message.to_string(),
        }
    }

    pub fn for_create(result: &ApiResult<u16>) -> Self {
        match result {
            Ok(CREATED_STATUS) => Self::success("Note created successfully"),
            _ => Self::failure("Failed to create the note"),
        }
    }

    pub fn for_delete(result: &ApiResult<u16>) -> Self {
        match result {
            Ok(DELETED_STATUS) => Self::success("Note deleted successfully"),
            _ => Self::failure("Failed to delete the note"),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

/// Result of a mutation followed by a reload.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub notice: Notice,
    /// `None` when the follow-up fetch failed; the old list stays on screen.
    pub notes: Option<Vec<Note>>,
}

/// Fetch the collection, logging failures instead of surfacing them.
pub async fn reload<T: Transport, S: SessionRepository>(
    api: &ApiClient<T, S>,
) -> Option<Vec<Note>> {
    match NoteResource::new(api).list().await {
        Ok(notes) => Some(notes),
        Err(e) => {
            log::error!("There was an error fetching the notes: {e}");
            None
        }
    }
}

/// Create a note, then reload regardless of the outcome.
pub async fn create_and_reload<T: Transport, S: SessionRepository>(
    api: &ApiClient<T, S>,
    draft: &NoteDraft,
) -> Mutation {
    let result = NoteResource::new(api).create(draft).await;
    if let Err(e) = &result {
        log::error!("There was an error creating the note: {e}");
    }
    Mutation {
        notice: Notice::for_create(&result),
        notes: reload(api).await,
    }
}

/// Delete a note, then reload regardless of the outcome.
pub async fn delete_and_reload<T: Transport, S: SessionRepository>(
    api: &ApiClient<T, S>,
    id: i64,
) -> Mutation {
    let result = NoteResource::new(api).delete(id).await;
    if let Err(e) = &result {
        log::error!("There was an error deleting the note: {e}");
    }
    Mutation {
        notice: Notice::for_delete(&result),
        notes: reload(api).await,
    }
}

/// State behind the home page: the list, the create form, the last notice.
///
/// Mutations are split into a synchronous `begin_*` step and an `apply`
/// step so the view never holds the board across an await.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotesBoard {
    pub notes: Vec<Note>,
    pub draft: NoteDraft,
    pub notice: Option<Notice>,
    pub busy: bool,
}

impl NotesBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the draft to submit. The inputs keep their contents until
    /// [`finish_create`](Self::finish_create). Returns `None` (and sets
    /// nothing) while a request is in flight.
    pub fn begin_create(&mut self) -> Option<NoteDraft> {
        if self.busy {
            return None;
        }
        self.busy = true;
        self.notice = None;
        Some(self.draft.clone())
    }

    /// Settle a create: both inputs are emptied whatever the outcome,
    /// including anything typed while the request was pending.
    pub fn finish_create(&mut self, mutation: Mutation) {
        self.draft = NoteDraft::default();
        self.apply(mutation);
    }

    pub fn begin_delete(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        self.notice = None;
        true
    }

    pub fn apply(&mut self, mutation: Mutation) {
        self.busy = false;
        self.notice = Some(mutation.notice);
        if let Some(notes) = mutation.notes {
            self.notes = notes;
        }
    }

    pub fn apply_reload(&mut self, notes: Option<Vec<Note>>) {
        if let Some(notes) = notes {
            self.notes = notes;
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
