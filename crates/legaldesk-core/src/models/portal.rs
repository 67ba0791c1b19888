use serde::{Deserialize, Serialize};

use super::{Appointment, Case, Client, Document};

/// Kinds of case update the backend knows about. Stored as free text
/// server-side, so unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    #[default]
    General,
    Progress,
    Hearing,
    Document,
    StatusChange,
    #[serde(untagged)]
    Other(String),
}

impl UpdateType {
    pub fn label(&self) -> &str {
        match self {
            UpdateType::General => "General",
            UpdateType::Progress => "Progreso",
            UpdateType::Hearing => "Audiencia",
            UpdateType::Document => "Documento",
            UpdateType::StatusChange => "Cambio de Estado",
            UpdateType::Other(s) => s,
        }
    }
}

/// A lawyer-authored note on a case, optionally visible in the client portal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CaseUpdate {
    pub id: String,
    pub case_id: String,
    pub client_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub update_type: UpdateType,
    #[serde(default = "default_visible")]
    pub is_visible_to_client: bool,
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_by: String,
}

fn default_visible() -> bool {
    true
}

/// Response of `POST /client/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PortalSession {
    #[serde(default)]
    pub message: String,
    pub client_id: String,
    pub client_name: String,
}

/// Personalized dashboard served to a logged-in client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ClientDashboard {
    pub client_info: Client,
    #[serde(default)]
    pub active_cases: Vec<Case>,
    #[serde(default)]
    pub recent_updates: Vec<CaseUpdate>,
    #[serde(default)]
    pub upcoming_appointments: Vec<Appointment>,
    #[serde(default)]
    pub total_documents: u64,
}

/// Everything attached to one case, as seen from the client portal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CaseTimeline {
    pub case: Case,
    #[serde(default)]
    pub updates: Vec<CaseUpdate>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub documents: Vec<Document>,
}
