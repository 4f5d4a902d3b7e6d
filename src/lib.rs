//! auditdeck: a dashboard service for smart-contract scan records.
//!
//! The heart of the crate is [`lifecycle`]: a pure model that derives what
//! the UI should show for a scan from nothing but its upload timestamp and
//! the current time. The rest is collaborator surface around it: a rusqlite
//! record store, an on-disk file store, an axum REST API, and a CLI.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod lifecycle;
pub mod models;
pub mod storage;
