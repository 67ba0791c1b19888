use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    #[default]
    Active,
    Pending,
    Closed,
    OnHold,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 4] = [
        CaseStatus::Active,
        CaseStatus::Pending,
        CaseStatus::Closed,
        CaseStatus::OnHold,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CaseStatus::Active => "Activo",
            CaseStatus::Pending => "Pendiente",
            CaseStatus::Closed => "Cerrado",
            CaseStatus::OnHold => "En espera",
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    #[default]
    Civil,
    Criminal,
    Family,
    Corporate,
    RealEstate,
    Immigration,
    Other,
}

impl CaseType {
    pub fn label(&self) -> &'static str {
        match self {
            CaseType::Civil => "Civil",
            CaseType::Criminal => "Criminal",
            CaseType::Family => "Familia",
            CaseType::Corporate => "Corporativo",
            CaseType::RealEstate => "Inmobiliario",
            CaseType::Immigration => "Inmigración",
            CaseType::Other => "Otro",
        }
    }
}

impl std::fmt::Display for CaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Case {
    pub id: String,
    pub client_id: String,
    pub title: String,
    #[serde(default)]
    pub case_number: String,
    #[serde(default)]
    pub case_type: CaseType,
    #[serde(default)]
    pub status: CaseStatus,
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: String,
    pub end_date: Option<String>,
    pub next_hearing: Option<String>,
    pub court_name: Option<String>,
    pub judge_name: Option<String>,
    pub opposing_party: Option<String>,
    pub case_value: Option<f64>,
    pub hourly_rate: Option<f64>,
    pub total_hours: Option<f64>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Case {
    /// Billed amount (hourly rate times hours), when both are known
    pub fn billed_amount(&self) -> Option<f64> {
        match (self.hourly_rate, self.total_hours) {
            (Some(rate), Some(hours)) => Some(rate * hours),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case() {
        let json = r#"{
            "id": "k-1",
            "client_id": "c-1",
            "title": "Divorcio García",
            "case_number": "2025-FAM-001",
            "case_type": "family",
            "status": "on_hold",
            "start_date": "2025-01-10",
            "case_value": 1500.5,
            "hourly_rate": 120.0,
            "total_hours": 10.5
        }"#;

        let case: Case = serde_json::from_str(json).expect("Failed to parse case JSON");
        assert_eq!(case.case_type, CaseType::Family);
        assert_eq!(case.status, CaseStatus::OnHold);
        assert_eq!(case.case_value, Some(1500.5));
        assert_eq!(case.billed_amount(), Some(1260.0));
        assert!(case.next_hearing.is_none());
    }

    #[test]
    fn test_billed_amount_requires_both_fields() {
        let json = r#"{"id": "k-2", "client_id": "c-1", "title": "Sin horas", "hourly_rate": 90.0}"#;
        let case: Case = serde_json::from_str(json).expect("Failed to parse case JSON");
        assert_eq!(case.billed_amount(), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(CaseStatus::OnHold.label(), "En espera");
        assert_eq!(CaseType::RealEstate.label(), "Inmobiliario");
        assert_eq!(serde_json::to_string(&CaseType::RealEstate).unwrap(), "\"real_estate\"");
        assert_eq!(serde_json::to_string(&CaseStatus::OnHold).unwrap(), "\"on_hold\"");
    }
}
