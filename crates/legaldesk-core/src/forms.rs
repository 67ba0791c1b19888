//! Outgoing payloads for create and update requests.
//!
//! Forms mirror what a user types: flat string fields, no central
//! validation of required values. The one transformation applied before
//! sending is the numeric coercion of the three financial fields of a case.

use std::path::PathBuf;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::models::{
    Appointment, Case, CaseStatus, CaseType, Client, ClientStatus, UpdateType,
};

// ============================================================================
// Clients
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub date_of_birth: String,
    pub occupation: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub status: ClientStatus,
    pub notes: String,
}

impl From<&Client> for ClientForm {
    fn from(client: &Client) -> Self {
        Self {
            first_name: client.first_name.clone(),
            last_name: client.last_name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
            city: client.city.clone(),
            state: client.state.clone(),
            postal_code: client.postal_code.clone(),
            date_of_birth: client.date_of_birth.clone().unwrap_or_default(),
            occupation: client.occupation.clone().unwrap_or_default(),
            emergency_contact: client.emergency_contact.clone().unwrap_or_default(),
            emergency_phone: client.emergency_phone.clone().unwrap_or_default(),
            status: client.status,
            notes: client.notes.clone().unwrap_or_default(),
        }
    }
}

// ============================================================================
// Cases
// ============================================================================

/// A numeric form field after coercion.
///
/// Serializes as a JSON number, as the original text when the field was
/// left empty, or as `null` when the text has no numeric prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormNumber {
    Number(f64),
    Text(String),
    Invalid,
}

impl FormNumber {
    /// Coerce a text field. Empty input is passed through untouched.
    pub fn coerce(text: &str) -> Self {
        if text.is_empty() {
            return FormNumber::Text(String::new());
        }
        match parse_float_prefix(text) {
            Some(value) => FormNumber::Number(value),
            None => FormNumber::Invalid,
        }
    }
}

/// Parse the longest leading decimal number in `text`, ignoring leading
/// whitespace. `"12.5kg"` yields 12.5; `"abc"` yields `None`.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseForm {
    pub client_id: String,
    pub title: String,
    pub case_number: String,
    pub case_type: CaseType,
    pub status: CaseStatus,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub next_hearing: String,
    pub court_name: String,
    pub judge_name: String,
    pub opposing_party: String,
    pub case_value: String,
    pub hourly_rate: String,
    pub total_hours: String,
    pub notes: String,
}

/// Wire form of a `CaseForm`, with the financial fields coerced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CasePayload<'a> {
    pub client_id: &'a str,
    pub title: &'a str,
    pub case_number: &'a str,
    pub case_type: CaseType,
    pub status: CaseStatus,
    pub description: &'a str,
    pub start_date: &'a str,
    pub end_date: &'a str,
    pub next_hearing: &'a str,
    pub court_name: &'a str,
    pub judge_name: &'a str,
    pub opposing_party: &'a str,
    pub case_value: FormNumber,
    pub hourly_rate: FormNumber,
    pub total_hours: FormNumber,
    pub notes: &'a str,
}

impl CaseForm {
    pub fn to_payload(&self) -> CasePayload<'_> {
        CasePayload {
            client_id: &self.client_id,
            title: &self.title,
            case_number: &self.case_number,
            case_type: self.case_type,
            status: self.status,
            description: &self.description,
            start_date: &self.start_date,
            end_date: &self.end_date,
            next_hearing: &self.next_hearing,
            court_name: &self.court_name,
            judge_name: &self.judge_name,
            opposing_party: &self.opposing_party,
            case_value: FormNumber::coerce(&self.case_value),
            hourly_rate: FormNumber::coerce(&self.hourly_rate),
            total_hours: FormNumber::coerce(&self.total_hours),
            notes: &self.notes,
        }
    }
}

fn number_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl From<&Case> for CaseForm {
    fn from(case: &Case) -> Self {
        Self {
            client_id: case.client_id.clone(),
            title: case.title.clone(),
            case_number: case.case_number.clone(),
            case_type: case.case_type,
            status: case.status,
            description: case.description.clone().unwrap_or_default(),
            start_date: case.start_date.clone(),
            end_date: case.end_date.clone().unwrap_or_default(),
            next_hearing: case.next_hearing.clone().unwrap_or_default(),
            court_name: case.court_name.clone().unwrap_or_default(),
            judge_name: case.judge_name.clone().unwrap_or_default(),
            opposing_party: case.opposing_party.clone().unwrap_or_default(),
            case_value: number_text(case.case_value),
            hourly_rate: number_text(case.hourly_rate),
            total_hours: number_text(case.total_hours),
            notes: case.notes.clone().unwrap_or_default(),
        }
    }
}

// ============================================================================
// Appointments
// ============================================================================

fn default_duration() -> u32 {
    60
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentForm {
    pub client_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    pub title: String,
    pub description: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub duration_minutes: u32,
    pub location: String,
    pub notes: String,
}

impl Default for AppointmentForm {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            case_id: None,
            title: String::new(),
            description: String::new(),
            appointment_date: String::new(),
            appointment_time: String::new(),
            duration_minutes: default_duration(),
            location: String::new(),
            notes: String::new(),
        }
    }
}

impl From<&Appointment> for AppointmentForm {
    fn from(appt: &Appointment) -> Self {
        Self {
            client_id: appt.client_id.clone(),
            case_id: appt.case_id.clone(),
            title: appt.title.clone(),
            description: appt.description.clone().unwrap_or_default(),
            appointment_date: appt.appointment_date.clone(),
            appointment_time: appt.appointment_time.clone(),
            duration_minutes: appt.duration_minutes,
            location: appt.location.clone().unwrap_or_default(),
            notes: appt.notes.clone().unwrap_or_default(),
        }
    }
}

/// Body of `PUT /appointments/{id}/complete`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompleteRequest {
    pub notes: Option<String>,
}

impl CompleteRequest {
    /// Blank notes are treated as absent
    pub fn new(notes: Option<&str>) -> Self {
        Self {
            notes: notes
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        }
    }
}

// ============================================================================
// Documents
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    pub client_id: String,
    pub case_id: Option<String>,
    pub path: PathBuf,
    pub description: String,
    pub category: String,
}

impl UploadForm {
    /// A client and a file are the only required inputs
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() || self.path.as_os_str().is_empty() {
            bail!("Por favor seleccione un cliente y un archivo");
        }
        Ok(())
    }

    /// Name sent as the multipart filename
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    }
}

// ============================================================================
// Case updates and portal
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseUpdateForm {
    pub case_id: String,
    pub title: String,
    pub description: String,
    pub update_type: UpdateType,
    pub is_visible_to_client: bool,
}

impl Default for CaseUpdateForm {
    fn default() -> Self {
        Self {
            case_id: String::new(),
            title: String::new(),
            description: String::new(),
            update_type: UpdateType::General,
            is_visible_to_client: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub phone: &'a str,
}
