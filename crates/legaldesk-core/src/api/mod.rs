//! REST API client module for the LegalDesk backend.
//!
//! This module provides the `ApiClient` for reading the dashboard
//! statistics and entity collections, issuing mutations, uploading
//! documents and querying the client portal.
//!
//! All endpoints live under `{origin}/api`, except uploaded files which
//! are served statically from `{origin}/uploads`.

pub mod client;
pub mod error;

pub use client::{ApiClient, MessageResponse};
pub use error::ApiError;
