//! Client-side narrowing of fetched collections.
//!
//! Filters never re-query the backend. They borrow from the full
//! collection, keep server order, and are cheap enough to recompute on
//! every render pass.

use chrono::{NaiveDate, Utc};

use crate::models::{Appointment, Case, CaseStatus, Client, ClientStatus, Document};
use crate::utils::contains_ignore_case;

/// Today's calendar date in UTC as `YYYY-MM-DD`
pub fn today_utc() -> String {
    iso_date(Utc::now().date_naive())
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    pub search: String,
    pub status: Option<ClientStatus>,
}

impl ClientFilter {
    pub fn matches(&self, client: &Client) -> bool {
        self.matches_needle(client, &self.search.to_lowercase())
    }

    /// `needle` is the lowercased search text, computed once per pass
    fn matches_needle(&self, client: &Client, needle: &str) -> bool {
        let search_ok = needle.is_empty()
            || [
                client.first_name.as_str(),
                client.last_name.as_str(),
                client.email.as_str(),
                client.phone.as_str(),
            ]
            .iter()
            .any(|field| contains_ignore_case(field, needle));
        search_ok && self.status.map_or(true, |s| client.status == s)
    }

    pub fn apply<'a>(&self, clients: &'a [Client]) -> Vec<&'a Client> {
        let needle = self.search.to_lowercase();
        clients
            .iter()
            .filter(|c| self.matches_needle(c, &needle))
            .collect()
    }

    /// Step the status filter: all, then each status in turn, then all again
    pub fn cycle_status(&mut self) {
        self.status = cycle(&ClientStatus::ALL, self.status);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseFilter {
    pub status: Option<CaseStatus>,
    pub client_id: Option<String>,
}

impl CaseFilter {
    pub fn matches(&self, case: &Case) -> bool {
        self.status.map_or(true, |s| case.status == s)
            && self
                .client_id
                .as_deref()
                .map_or(true, |id| case.client_id == id)
    }

    pub fn apply<'a>(&self, cases: &'a [Case]) -> Vec<&'a Case> {
        cases.iter().filter(|c| self.matches(c)).collect()
    }

    pub fn cycle_status(&mut self) {
        self.status = cycle(&CaseStatus::ALL, self.status);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub upcoming_only: bool,
}

impl AppointmentFilter {
    /// `today` is an ISO `YYYY-MM-DD` date; see [`today_utc`].
    pub fn apply<'a>(&self, appointments: &'a [Appointment], today: &str) -> Vec<&'a Appointment> {
        appointments
            .iter()
            .filter(|a| !self.upcoming_only || a.is_upcoming(today))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub client_id: Option<String>,
}

impl DocumentFilter {
    pub fn apply<'a>(&self, documents: &'a [Document]) -> Vec<&'a Document> {
        documents
            .iter()
            .filter(|d| {
                self.client_id
                    .as_deref()
                    .map_or(true, |id| d.client_id == id)
            })
            .collect()
    }
}

/// Step an optional selection through `all`: `None -> all[0] -> ... -> None`
pub fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => {
            let pos = all.iter().position(|v| *v == value)?;
            all.get(pos + 1).copied()
        }
    }
}

/// Step an optional client id through `clients` in list order
pub fn cycle_client_id(clients: &[Client], current: Option<&str>) -> Option<String> {
    match current {
        None => clients.first().map(|c| c.id.clone()),
        Some(id) => {
            let pos = clients.iter().position(|c| c.id == id)?;
            clients.get(pos + 1).map(|c| c.id.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: &str, first: &str, last: &str, email: &str, phone: &str, status: ClientStatus) -> Client {
        Client {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            date_of_birth: None,
            occupation: None,
            emergency_contact: None,
            emergency_phone: None,
            status,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample_clients() -> Vec<Client> {
        vec![
            client("1", "Ana", "García", "ana@example.com", "600111222", ClientStatus::Active),
            client("2", "Luis", "Pérez", "luis@example.com", "600333444", ClientStatus::Inactive),
            client("3", "Marta", "Ruiz", "marta@bufete.es", "600555666", ClientStatus::Potential),
            client("4", "Carlos", "Gómez", "carlos@example.com", "600777888", ClientStatus::Active),
        ]
    }

    fn appointment(id: &str, date: &str, completed: bool) -> Appointment {
        Appointment {
            id: id.to_string(),
            client_id: "1".to_string(),
            case_id: None,
            title: "Reunión".to_string(),
            description: None,
            appointment_date: date.to_string(),
            appointment_time: "10:00".to_string(),
            duration_minutes: 60,
            location: None,
            is_completed: completed,
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn test_status_filter_keeps_subset_in_order() {
        let clients = sample_clients();
        let filter = ClientFilter {
            status: Some(ClientStatus::Active),
            ..Default::default()
        };
        let ids: Vec<&str> = filter.apply(&clients).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_search_matches_any_of_four_fields_ignoring_case() {
        let clients = sample_clients();
        let by = |search: &str| {
            ClientFilter {
                search: search.to_string(),
                status: None,
            }
            .apply(&clients)
            .iter()
            .map(|c| c.id.clone())
            .collect::<Vec<_>>()
        };

        assert_eq!(by("ANA"), vec!["1"]);
        assert_eq!(by("pérez"), vec!["2"]);
        assert_eq!(by("BUFETE"), vec!["3"]);
        assert_eq!(by("777"), vec!["4"]);
        assert!(by("zaragoza").is_empty());
        assert_eq!(by("").len(), 4);
    }

    #[test]
    fn test_search_and_status_combine() {
        let clients = sample_clients();
        let filter = ClientFilter {
            search: "example.com".to_string(),
            status: Some(ClientStatus::Active),
        };
        let ids: Vec<&str> = filter.apply(&clients).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert!(filter.matches(&clients[0]));
        assert!(!filter.matches(&clients[1]));
    }

    #[test]
    fn test_matches_agrees_with_apply() {
        let clients = sample_clients();
        for search in ["ANA", "Example.COM", "777", "nadie", ""] {
            let filter = ClientFilter {
                search: search.to_string(),
                status: Some(ClientStatus::Active),
            };
            let applied: Vec<&str> = filter.apply(&clients).iter().map(|c| c.id.as_str()).collect();
            let matched: Vec<&str> = clients
                .iter()
                .filter(|c| filter.matches(c))
                .map(|c| c.id.as_str())
                .collect();
            assert_eq!(applied, matched, "search {:?}", search);
        }
    }

    #[test]
    fn test_upcoming_only_compares_iso_dates() {
        let appts = vec![
            appointment("a", "2025-06-14", false),
            appointment("b", "2025-06-14", true),
            appointment("c", "2025-06-16", false),
            appointment("d", "2025-06-16", true),
            appointment("e", "2025-06-15", false),
        ];
        let filter = AppointmentFilter { upcoming_only: true };
        let ids: Vec<&str> = filter
            .apply(&appts, "2025-06-15")
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "e"]);

        let all = AppointmentFilter::default().apply(&appts, "2025-06-15");
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_iso_date_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        assert_eq!(iso_date(date), "2025-06-05");
        assert_eq!(today_utc().len(), 10);
    }

    #[test]
    fn test_cycle_wraps_through_none() {
        let mut filter = ClientFilter::default();
        filter.cycle_status();
        assert_eq!(filter.status, Some(ClientStatus::Active));
        filter.cycle_status();
        filter.cycle_status();
        assert_eq!(filter.status, Some(ClientStatus::Potential));
        filter.cycle_status();
        assert_eq!(filter.status, None);
    }

    #[test]
    fn test_cycle_client_id() {
        let clients = sample_clients();
        assert_eq!(cycle_client_id(&clients, None).as_deref(), Some("1"));
        assert_eq!(cycle_client_id(&clients, Some("3")).as_deref(), Some("4"));
        assert_eq!(cycle_client_id(&clients, Some("4")), None);
        assert_eq!(cycle_client_id(&clients, Some("missing")), None);
    }
}
