//! Shared fixtures for HTTP tests against a wiremock backend.

#![allow(dead_code)]

use std::time::Duration;

use legaldesk_core::ApiClient;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const READ_PATHS: [&str; 5] = [
    "/api/dashboard/stats",
    "/api/clients",
    "/api/cases",
    "/api/documents",
    "/api/appointments",
];

pub fn api_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Duration::from_secs(5))
        .expect("Failed to build client")
        .with_backoff(Duration::from_millis(1))
}

pub fn stats_json() -> Value {
    json!({
        "total_clients": 2,
        "active_clients": 1,
        "total_cases": 1,
        "active_cases": 1,
        "pending_cases": 0,
        "closed_cases": 0,
        "upcoming_appointments": 1,
        "total_documents": 1
    })
}

pub fn client_json(id: &str, first: &str, last: &str) -> Value {
    json!({
        "id": id,
        "first_name": first,
        "last_name": last,
        "email": format!("{}@example.com", first.to_lowercase()),
        "phone": "600000000",
        "address": "",
        "city": "Madrid",
        "state": "",
        "postal_code": "",
        "status": "active",
        "created_at": "2025-01-10T09:00:00",
        "updated_at": "2025-01-10T09:00:00"
    })
}

pub fn case_json(id: &str, client_id: &str) -> Value {
    json!({
        "id": id,
        "client_id": client_id,
        "title": "Reclamación de cantidad",
        "case_number": "2025-001",
        "case_type": "civil",
        "status": "active",
        "start_date": "2025-01-15",
        "case_value": 1500.5,
        "hourly_rate": null,
        "total_hours": null
    })
}

pub fn document_json(id: &str, client_id: &str) -> Value {
    json!({
        "id": id,
        "client_id": client_id,
        "filename": "9f1c.pdf",
        "original_filename": "contrato.pdf",
        "file_path": "uploads/9f1c.pdf",
        "file_size": 2048,
        "content_type": "application/pdf",
        "category": "Contratos",
        "uploaded_at": "2025-02-01T10:00:00"
    })
}

pub fn appointment_json(id: &str, client_id: &str, date: &str) -> Value {
    json!({
        "id": id,
        "client_id": client_id,
        "title": "Primera consulta",
        "appointment_date": date,
        "appointment_time": "10:30",
        "duration_minutes": 45,
        "is_completed": false
    })
}

/// Mount the five read endpoints, each expected exactly `times` times.
pub async fn mount_reads(server: &MockServer, times: u64) {
    let bodies = [
        stats_json(),
        json!([client_json("c-1", "Ana", "García"), client_json("c-2", "Luis", "Pérez")]),
        json!([case_json("k-1", "c-1")]),
        json!([document_json("d-1", "c-1")]),
        json!([appointment_json("a-1", "c-1", "2099-01-01")]),
    ];

    for (p, body) in READ_PATHS.iter().zip(bodies) {
        Mock::given(method("GET"))
            .and(path(*p))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(times)
            .mount(server)
            .await;
    }
}
