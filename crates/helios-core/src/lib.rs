//! Core Helios library (config, backend client, realtime push, domain types).

pub mod api;
pub mod config;
pub mod domain;
pub mod logging;
pub mod realtime;
