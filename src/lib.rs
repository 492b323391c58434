//! marquee application library
//!
//! Wires the movie catalog module onto the kernel registry, the SQLite store,
//! and the HTTP facade.

pub mod app;
pub mod modules;

pub use app::{bootstrap, migrate, run, shutdown_signal, App};
