//! `crop-trends` library crate.
//!
//! The binary (`trends`) is a thin wrapper around this library so that:
//!
//! - estimation is testable without spawning processes
//! - the CLI and the TUI share one request path
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod growth;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
