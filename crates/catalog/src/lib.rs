//! Movie catalog model shared by the service and its clients.
//!
//! The validator in [`validate`] is the single source of field rules: the
//! create and update forms run it before submitting, and the HTTP service
//! runs it again before anything reaches the store.

pub mod movie;
pub mod validate;

pub use movie::{Field, Movie, MovieDraft};
pub use validate::{validate, FieldErrors};
