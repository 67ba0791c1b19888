use serde::{Deserialize, Serialize};

fn default_duration() -> u32 {
    60
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Appointment {
    pub id: String,
    pub client_id: String,
    pub case_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    /// ISO `YYYY-MM-DD`
    pub appointment_date: String,
    /// `HH:MM`
    #[serde(default)]
    pub appointment_time: String,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    pub location: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

impl Appointment {
    /// True when the appointment is on or after `today` and still open.
    ///
    /// Dates are compared as strings, which orders correctly only because
    /// both sides are zero-padded `YYYY-MM-DD`.
    pub fn is_upcoming(&self, today: &str) -> bool {
        self.appointment_date.as_str() >= today && !self.is_completed
    }

    pub fn when_display(&self) -> String {
        if self.appointment_time.is_empty() {
            self.appointment_date.clone()
        } else {
            format!("{} {}", self.appointment_date, self.appointment_time)
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_completed {
            "Completada"
        } else {
            "Pendiente"
        }
    }
}
