//! Routed page components.

pub mod auth_form;
pub mod home;
pub mod not_found;
