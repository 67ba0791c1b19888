//! Refresh and mutation behavior of `DataStore` against a mock backend.

mod common;

use std::path::PathBuf;

use legaldesk_core::forms::{AppointmentForm, CaseForm, CaseUpdateForm, ClientForm, UploadForm};
use legaldesk_core::models::{ClientStatus, UpdateType};
use legaldesk_core::{ApiError, Confirmation, DataStore, Mutation, MutationOutcome};
use serde_json::{json, Value};
use wiremock::matchers::{any, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{api_for, appointment_json, case_json, client_json, document_json, mount_reads};

#[tokio::test]
async fn test_refresh_fetches_all_five_collections() {
    let server = MockServer::start().await;
    mount_reads(&server, 1).await;

    let mut store = DataStore::new(api_for(&server));
    assert!(store.snapshot().fetched_at.is_none());

    store.refresh().await.expect("refresh should succeed");

    let snapshot = store.snapshot();
    assert!(!store.is_loading());
    assert!(store.last_error().is_none());
    assert!(snapshot.fetched_at.is_some());
    assert_eq!(snapshot.stats.total_clients, 2);
    assert_eq!(snapshot.clients.len(), 2);
    assert_eq!(snapshot.cases.len(), 1);
    assert_eq!(snapshot.documents.len(), 1);
    assert_eq!(snapshot.appointments.len(), 1);
    assert_eq!(snapshot.client_name("c-2"), "Luis Pérez");
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let server = MockServer::start().await;
    mount_reads(&server, 1).await;

    let mut store = DataStore::new(api_for(&server));
    store.refresh().await.expect("first refresh should succeed");
    let before = store.snapshot().fetched_at;

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/cases"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::stats_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = store.refresh().await.expect_err("refresh should fail");

    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::ServerError(_))
    ));
    assert!(!store.is_loading());
    assert!(store.last_error().is_some());
    assert_eq!(store.snapshot().fetched_at, before);
    assert_eq!(store.snapshot().clients.len(), 2);
}

#[tokio::test]
async fn test_create_client_triggers_full_refresh() {
    let server = MockServer::start().await;
    mount_reads(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/clients"))
        .and(body_partial_json(json!({"first_name": "Marta", "status": "potential"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(client_json("c-3", "Marta", "Ruiz")))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = DataStore::new(api_for(&server));
    let form = ClientForm {
        first_name: "Marta".to_string(),
        last_name: "Ruiz".to_string(),
        status: legaldesk_core::models::ClientStatus::Potential,
        ..Default::default()
    };

    let outcome = store
        .execute(Mutation::CreateClient(form), Confirmation::Confirmed)
        .await
        .expect("mutation should succeed");

    assert_eq!(
        outcome,
        MutationOutcome::Applied {
            message: "Cliente creado".to_string(),
            refreshed: true
        }
    );
    assert!(store.snapshot().fetched_at.is_some());
}

#[tokio::test]
async fn test_confirmed_delete_sends_request_then_refreshes() {
    let server = MockServer::start().await;
    mount_reads(&server, 1).await;
    Mock::given(method("DELETE"))
        .and(path("/api/appointments/a-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Appointment deleted successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut store = DataStore::new(api_for(&server));
    let outcome = store
        .execute(
            Mutation::DeleteAppointment { id: "a-1".into() },
            Confirmation::Confirmed,
        )
        .await
        .expect("delete should succeed");

    assert!(matches!(outcome, MutationOutcome::Applied { refreshed: true, .. }));
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let mut store = DataStore::new(api_for(&server));
    let outcome = store
        .execute(
            Mutation::DeleteClient { id: "c-1".into() },
            Confirmation::Declined,
        )
        .await
        .expect("declining is not an error");

    assert_eq!(outcome, MutationOutcome::Declined);
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
    assert!(store.snapshot().fetched_at.is_none());
}

#[tokio::test]
async fn test_case_form_sends_numeric_case_value() {
    let server = MockServer::start().await;
    mount_reads(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/cases"))
        .and(body_partial_json(json!({
            "case_value": 1500.5,
            "hourly_rate": "",
            "total_hours": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(case_json("k-2", "c-1")))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = DataStore::new(api_for(&server));
    let form = CaseForm {
        client_id: "c-1".to_string(),
        title: "Reclamación de cantidad".to_string(),
        case_value: "1500.50".to_string(),
        total_hours: "n/a".to_string(),
        ..Default::default()
    };

    store
        .execute(Mutation::CreateCase(form), Confirmation::Confirmed)
        .await
        .expect("case create should succeed");
}

#[tokio::test]
async fn test_failed_mutation_skips_refresh() {
    let server = MockServer::start().await;
    mount_reads(&server, 0).await;
    Mock::given(method("POST"))
        .and(path("/api/documents/upload"))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let file: PathBuf = dir.path().join("poder.pdf");
    std::fs::write(&file, b"%PDF-1.4").expect("write fixture");

    let mut store = DataStore::new(api_for(&server));
    let form = UploadForm {
        client_id: "c-1".to_string(),
        path: file,
        ..Default::default()
    };

    let err = store
        .execute(Mutation::UploadDocument(form), Confirmation::Confirmed)
        .await
        .expect_err("upload should fail");

    assert_eq!(err.to_string(), "Error al subir el documento");
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::ServerError(_))
    ));
}

#[tokio::test]
async fn test_mutation_applied_even_when_refresh_fails() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/appointments/a-1/complete"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Appointment marked as completed"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut store = DataStore::new(api_for(&server));
    let outcome = store
        .execute(
            Mutation::CompleteAppointment {
                id: "a-1".into(),
                notes: None,
            },
            Confirmation::Confirmed,
        )
        .await
        .expect("completion itself succeeded");

    assert_eq!(
        outcome,
        MutationOutcome::Applied {
            message: "Cita completada".to_string(),
            refreshed: false
        }
    );
    assert!(!store.is_loading());
}

/// One write request and what the backend should see for it
struct WriteExpectation {
    mutation: Mutation,
    method: &'static str,
    path: &'static str,
    body: Option<Value>,
    response: Value,
    message: &'static str,
}

fn ok_message() -> Value {
    json!({"message": "ok"})
}

#[tokio::test]
async fn test_every_mutation_is_followed_by_a_full_refresh() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("demanda.pdf");
    std::fs::write(&file, b"%PDF-1.4").expect("write fixture");

    let client_form = ClientForm {
        first_name: "Ana".to_string(),
        last_name: "García".to_string(),
        status: ClientStatus::Inactive,
        ..Default::default()
    };
    let case_form = CaseForm {
        client_id: "c-1".to_string(),
        title: "Reclamación de cantidad".to_string(),
        case_value: "2000".to_string(),
        hourly_rate: "150".to_string(),
        total_hours: "12.5h".to_string(),
        ..Default::default()
    };
    let appointment_form = AppointmentForm {
        client_id: "c-1".to_string(),
        title: "Primera consulta".to_string(),
        appointment_date: "2099-01-01".to_string(),
        appointment_time: "10:30".to_string(),
        ..Default::default()
    };

    let expectations = vec![
        WriteExpectation {
            mutation: Mutation::CreateClient(client_form.clone()),
            method: "POST",
            path: "/api/clients",
            body: Some(json!({"first_name": "Ana", "status": "inactive"})),
            response: client_json("c-3", "Ana", "García"),
            message: "Cliente creado",
        },
        WriteExpectation {
            mutation: Mutation::UpdateClient {
                id: "c-1".into(),
                form: client_form,
            },
            method: "PUT",
            path: "/api/clients/c-1",
            body: Some(json!({"first_name": "Ana", "status": "inactive"})),
            response: client_json("c-1", "Ana", "García"),
            message: "Cliente actualizado",
        },
        WriteExpectation {
            mutation: Mutation::DeleteClient { id: "c-1".into() },
            method: "DELETE",
            path: "/api/clients/c-1",
            body: None,
            response: ok_message(),
            message: "Cliente eliminado",
        },
        WriteExpectation {
            mutation: Mutation::CreateCase(case_form.clone()),
            method: "POST",
            path: "/api/cases",
            body: Some(json!({"case_value": 2000.0, "hourly_rate": 150.0, "total_hours": 12.5})),
            response: case_json("k-2", "c-1"),
            message: "Caso creado",
        },
        WriteExpectation {
            mutation: Mutation::UpdateCase {
                id: "k-1".into(),
                form: case_form,
            },
            method: "PUT",
            path: "/api/cases/k-1",
            body: Some(json!({"case_value": 2000.0, "hourly_rate": 150.0, "total_hours": 12.5})),
            response: case_json("k-1", "c-1"),
            message: "Caso actualizado",
        },
        WriteExpectation {
            mutation: Mutation::DeleteCase { id: "k-1".into() },
            method: "DELETE",
            path: "/api/cases/k-1",
            body: None,
            response: ok_message(),
            message: "Caso eliminado",
        },
        WriteExpectation {
            mutation: Mutation::UploadDocument(UploadForm {
                client_id: "c-1".to_string(),
                path: file.clone(),
                description: "Demanda inicial".to_string(),
                ..Default::default()
            }),
            method: "POST",
            path: "/api/documents/upload",
            body: None,
            response: json!({
                "message": "File uploaded successfully",
                "document": document_json("d-2", "c-1"),
                "file_url": "/uploads/9f1c.pdf"
            }),
            message: "Documento subido exitosamente",
        },
        WriteExpectation {
            mutation: Mutation::DeleteDocument { id: "d-1".into() },
            method: "DELETE",
            path: "/api/documents/d-1",
            body: None,
            response: ok_message(),
            message: "Documento eliminado",
        },
        WriteExpectation {
            mutation: Mutation::CreateAppointment(appointment_form.clone()),
            method: "POST",
            path: "/api/appointments",
            body: Some(json!({"title": "Primera consulta", "duration_minutes": 60})),
            response: appointment_json("a-2", "c-1", "2099-01-01"),
            message: "Cita creada",
        },
        WriteExpectation {
            mutation: Mutation::UpdateAppointment {
                id: "a-1".into(),
                form: AppointmentForm {
                    duration_minutes: 90,
                    ..appointment_form
                },
            },
            method: "PUT",
            path: "/api/appointments/a-1",
            body: Some(json!({"duration_minutes": 90})),
            response: appointment_json("a-1", "c-1", "2099-01-01"),
            message: "Cita actualizada",
        },
        WriteExpectation {
            mutation: Mutation::CompleteAppointment {
                id: "a-1".into(),
                notes: Some("Acuerdo alcanzado".into()),
            },
            method: "PUT",
            path: "/api/appointments/a-1/complete",
            body: Some(json!({"notes": "Acuerdo alcanzado"})),
            response: ok_message(),
            message: "Cita completada",
        },
        WriteExpectation {
            mutation: Mutation::DeleteAppointment { id: "a-1".into() },
            method: "DELETE",
            path: "/api/appointments/a-1",
            body: None,
            response: ok_message(),
            message: "Cita eliminada",
        },
        WriteExpectation {
            mutation: Mutation::CreateCaseUpdate(CaseUpdateForm {
                case_id: "k-1".to_string(),
                title: "Audiencia programada".to_string(),
                update_type: UpdateType::Hearing,
                ..Default::default()
            }),
            method: "POST",
            path: "/api/case-updates",
            body: Some(json!({"case_id": "k-1", "update_type": "hearing", "is_visible_to_client": true})),
            response: json!({
                "id": "u-1",
                "case_id": "k-1",
                "client_id": "c-1",
                "title": "Audiencia programada"
            }),
            message: "Actualización creada exitosamente",
        },
        WriteExpectation {
            mutation: Mutation::DeleteCaseUpdate { id: "u-1".into() },
            method: "DELETE",
            path: "/api/case-updates/u-1",
            body: None,
            response: ok_message(),
            message: "Actualización eliminada",
        },
    ];

    for expected in expectations {
        let server = MockServer::start().await;
        mount_reads(&server, 1).await;

        let mut write = Mock::given(method(expected.method)).and(path(expected.path));
        if let Some(body) = expected.body {
            write = write.and(body_partial_json(body));
        }
        write
            .respond_with(ResponseTemplate::new(200).set_body_json(expected.response))
            .expect(1)
            .mount(&server)
            .await;

        let kind = expected.mutation.kind();
        let mut store = DataStore::new(api_for(&server));
        let outcome = store
            .execute(expected.mutation, Confirmation::Confirmed)
            .await
            .unwrap_or_else(|e| panic!("{} failed: {:#}", kind, e));

        assert_eq!(
            outcome,
            MutationOutcome::Applied {
                message: expected.message.to_string(),
                refreshed: true
            },
            "{}",
            kind
        );
        assert_eq!(store.snapshot().clients.len(), 2, "{}", kind);
        server.verify().await;
    }
}
