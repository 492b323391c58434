//! Client side of the movie catalog.
//!
//! [`MovieClient`] talks to the REST service. The views ([`ListView`],
//! [`MovieForm`]) hold the state a front-end renders and drive the API
//! through the [`MovieApi`] trait, so any front-end (the `marquee` CLI, or a
//! test double) can sit on top of them.

pub mod api;
pub mod config;
pub mod form;
pub mod http;
pub mod list;
pub mod notify;
pub mod route;
pub mod scope;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ClientError, MovieApi};
pub use config::ClientConfig;
pub use form::{FormMode, MovieForm, Redirect, SubmitOutcome};
pub use http::MovieClient;
pub use list::{Confirm, DeleteOutcome, ListView, MovieRow, SummaryDisplay};
pub use notify::{Notification, Severity};
pub use route::Route;
pub use scope::{ScopeHandle, ViewScope};
