//! Admin panel for the employee directory: a view controller over the
//! directory client, rendering into a pluggable sink.

pub mod config;
pub mod controller;
pub mod ui;
