//! Core library for LegalDesk.
//!
//! This crate holds everything that is not presentation:
//!
//! - `api`: typed REST client for the case-management backend
//! - `models`: clients, cases, documents, appointments and portal types
//! - `forms`: outgoing payloads, including numeric coercion for cases
//! - `store`: the in-memory snapshot with its fetch/refresh contract
//! - `filters`: client-side narrowing of fetched collections
//! - `config`: backend origin and request settings

pub mod api;
pub mod config;
pub mod filters;
pub mod forms;
pub mod models;
pub mod store;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use store::{Confirmation, DataStore, Mutation, MutationOutcome, Snapshot};
