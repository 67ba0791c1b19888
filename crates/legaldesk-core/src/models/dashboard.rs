use serde::{Deserialize, Serialize};

/// Aggregate counts computed by the backend. Missing fields read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(default)]
pub struct DashboardStats {
    pub total_clients: u64,
    pub active_clients: u64,
    pub total_cases: u64,
    pub active_cases: u64,
    pub pending_cases: u64,
    pub closed_cases: u64,
    pub upcoming_appointments: u64,
    pub total_documents: u64,
}
