//! Data models for LegalDesk entities.
//!
//! This module contains the structures returned by the backend:
//!
//! - `Client`: client records and their `ClientStatus`
//! - `Case`: legal cases with `CaseStatus` and `CaseType`
//! - `Document`: uploaded document metadata
//! - `Appointment`: scheduled meetings and hearings
//! - `DashboardStats`: server-side aggregate counts
//! - Portal types: `CaseUpdate`, `ClientDashboard`, `CaseTimeline`, `PortalSession`

pub mod appointment;
pub mod case;
pub mod client;
pub mod dashboard;
pub mod document;
pub mod portal;

pub use appointment::Appointment;
pub use case::{Case, CaseStatus, CaseType};
pub use client::{Client, ClientStatus};
pub use dashboard::DashboardStats;
pub use document::{Document, UploadResponse};
pub use portal::{CaseTimeline, CaseUpdate, ClientDashboard, PortalSession, UpdateType};
