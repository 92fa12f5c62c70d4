//! Shared core for the notes web app.
//!
//! Everything here is platform-independent so it can be tested natively:
//! - **Session**: token store contract and an in-memory implementation
//! - **Token**: JWT claim decoding (no signature check, expiry only)
//! - **API client**: base URL, bearer interceptor, typed errors over a `Transport`
//! - **Guard**: the mount-time auth check with token refresh
//! - **Notes / forms**: note resource client and view-models for the pages
//! - **Routes**: the route table shared by the router and navigation

pub mod api;
pub mod config;
pub mod format;
pub mod forms;
pub mod guard;
pub mod lifetime;
pub mod models;
pub mod notes;
pub mod routes;
pub mod session;
pub mod token;
pub mod transport;

pub use api::{ApiClient, ApiError, ApiResponse};
pub use config::ClientConfig;
pub use forms::{FormMode, FormOutcome};
pub use guard::{AuthState, Clock, FixedClock, SystemClock};
pub use lifetime::ViewScope;
pub use models::{Credentials, Note, NoteDraft};
pub use notes::{Mutation, NoteResource, NotesBoard, Notice, NoticeKind};
pub use routes::Route;
pub use session::{InMemorySession, Session, SessionRepository, TokenKind};
pub use transport::{HttpRequest, HttpResponse, Method, ScriptedTransport, Transport};
