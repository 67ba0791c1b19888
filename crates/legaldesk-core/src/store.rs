//! In-memory snapshot of the backend and the refresh contract around it.
//!
//! The store never patches its lists locally. Every successful mutation is
//! followed by a full refresh, and a refresh replaces all five collections
//! at once or not at all.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::api::ApiClient;
use crate::forms::{AppointmentForm, CaseForm, CaseUpdateForm, ClientForm, UploadForm};
use crate::models::{Appointment, Case, Client, DashboardStats, Document};

/// Number of entries shown in the dashboard's recent lists
pub const RECENT_LIMIT: usize = 5;

// ============================================================================
// Snapshot
// ============================================================================

/// The statistics and four collections as last returned by the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub stats: DashboardStats,
    pub clients: Vec<Client>,
    pub cases: Vec<Case>,
    pub documents: Vec<Document>,
    pub appointments: Vec<Appointment>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Fetch all five resources concurrently. Fails as a whole if any one fails.
    pub async fn fetch(api: &ApiClient) -> Result<Self> {
        let (stats, clients, cases, documents, appointments) = tokio::try_join!(
            api.fetch_dashboard_stats(),
            api.fetch_clients(),
            api.fetch_cases(),
            api.fetch_documents(),
            api.fetch_appointments(),
        )?;

        Ok(Self {
            stats,
            clients,
            cases,
            documents,
            appointments,
            fetched_at: Some(Utc::now()),
        })
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn case(&self, id: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.id == id)
    }

    pub fn client_name(&self, id: &str) -> String {
        self.client(id)
            .map(Client::full_name)
            .unwrap_or_else(|| "Cliente no encontrado".to_string())
    }

    pub fn case_title(&self, id: &str) -> String {
        self.case(id)
            .map(|c| c.title.clone())
            .unwrap_or_else(|| "Caso no encontrado".to_string())
    }

    pub fn recent_clients(&self) -> &[Client] {
        &self.clients[..self.clients.len().min(RECENT_LIMIT)]
    }

    pub fn recent_cases(&self) -> &[Case] {
        &self.cases[..self.cases.len().min(RECENT_LIMIT)]
    }

    /// Human-readable age, or `None` before the first successful fetch
    pub fn age_display(&self) -> Option<String> {
        self.age_display_at(Utc::now())
    }

    pub fn age_display_at(&self, now: DateTime<Utc>) -> Option<String> {
        let minutes = (now - self.fetched_at?).num_minutes();
        let text = if minutes < 1 {
            "ahora mismo".to_string()
        } else if minutes < 60 {
            format!("hace {}m", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            // 1h 30m+ rounds up to 2h
            if minutes % 60 >= 30 {
                format!("hace {}h", hours + 1)
            } else {
                format!("hace {}h", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("hace {}d", days + 1)
            } else {
                format!("hace {}d", days)
            }
        };
        Some(text)
    }
}

// ============================================================================
// Mutations
// ============================================================================

/// A user's answer to a delete prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// Every write the application can perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    CreateClient(ClientForm),
    UpdateClient { id: String, form: ClientForm },
    DeleteClient { id: String },
    CreateCase(CaseForm),
    UpdateCase { id: String, form: CaseForm },
    DeleteCase { id: String },
    UploadDocument(UploadForm),
    DeleteDocument { id: String },
    CreateAppointment(AppointmentForm),
    UpdateAppointment { id: String, form: AppointmentForm },
    CompleteAppointment { id: String, notes: Option<String> },
    DeleteAppointment { id: String },
    CreateCaseUpdate(CaseUpdateForm),
    DeleteCaseUpdate { id: String },
}

impl Mutation {
    pub fn requires_confirmation(&self) -> bool {
        self.confirmation_prompt().is_some()
    }

    pub fn confirmation_prompt(&self) -> Option<&'static str> {
        match self {
            Mutation::DeleteClient { .. } => Some("¿Está seguro de eliminar este cliente?"),
            Mutation::DeleteCase { .. } => Some("¿Está seguro de eliminar este caso?"),
            Mutation::DeleteDocument { .. } => Some("¿Está seguro de eliminar este documento?"),
            Mutation::DeleteAppointment { .. } => Some("¿Está seguro de eliminar esta cita?"),
            Mutation::DeleteCaseUpdate { .. } => {
                Some("¿Está seguro de eliminar esta actualización?")
            }
            _ => None,
        }
    }

    /// Short name used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::CreateClient(_) => "create_client",
            Mutation::UpdateClient { .. } => "update_client",
            Mutation::DeleteClient { .. } => "delete_client",
            Mutation::CreateCase(_) => "create_case",
            Mutation::UpdateCase { .. } => "update_case",
            Mutation::DeleteCase { .. } => "delete_case",
            Mutation::UploadDocument(_) => "upload_document",
            Mutation::DeleteDocument { .. } => "delete_document",
            Mutation::CreateAppointment(_) => "create_appointment",
            Mutation::UpdateAppointment { .. } => "update_appointment",
            Mutation::CompleteAppointment { .. } => "complete_appointment",
            Mutation::DeleteAppointment { .. } => "delete_appointment",
            Mutation::CreateCaseUpdate(_) => "create_case_update",
            Mutation::DeleteCaseUpdate { .. } => "delete_case_update",
        }
    }

    /// Status-bar text shown when the request fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Mutation::UploadDocument(_) => "Error al subir el documento",
            Mutation::CreateCaseUpdate(_) => "Error al crear la actualización",
            Mutation::CompleteAppointment { .. } => "Error al completar la cita",
            Mutation::DeleteClient { .. }
            | Mutation::DeleteCase { .. }
            | Mutation::DeleteDocument { .. }
            | Mutation::DeleteAppointment { .. }
            | Mutation::DeleteCaseUpdate { .. } => "Error al eliminar",
            _ => "Error al guardar",
        }
    }

    /// Issue the request. Returns the status-bar text for success.
    pub async fn send(&self, api: &ApiClient) -> Result<String> {
        let message = match self {
            Mutation::CreateClient(form) => {
                api.create_client(form).await?;
                "Cliente creado"
            }
            Mutation::UpdateClient { id, form } => {
                api.update_client(id, form).await?;
                "Cliente actualizado"
            }
            Mutation::DeleteClient { id } => {
                api.delete_client(id).await?;
                "Cliente eliminado"
            }
            Mutation::CreateCase(form) => {
                api.create_case(form).await?;
                "Caso creado"
            }
            Mutation::UpdateCase { id, form } => {
                api.update_case(id, form).await?;
                "Caso actualizado"
            }
            Mutation::DeleteCase { id } => {
                api.delete_case(id).await?;
                "Caso eliminado"
            }
            Mutation::UploadDocument(form) => {
                let response = api.upload_document(form).await?;
                info!(file_url = %response.file_url, "Document uploaded");
                "Documento subido exitosamente"
            }
            Mutation::DeleteDocument { id } => {
                api.delete_document(id).await?;
                "Documento eliminado"
            }
            Mutation::CreateAppointment(form) => {
                api.create_appointment(form).await?;
                "Cita creada"
            }
            Mutation::UpdateAppointment { id, form } => {
                api.update_appointment(id, form).await?;
                "Cita actualizada"
            }
            Mutation::CompleteAppointment { id, notes } => {
                api.complete_appointment(id, notes.as_deref()).await?;
                "Cita completada"
            }
            Mutation::DeleteAppointment { id } => {
                api.delete_appointment(id).await?;
                "Cita eliminada"
            }
            Mutation::CreateCaseUpdate(form) => {
                api.create_case_update(form).await?;
                "Actualización creada exitosamente"
            }
            Mutation::DeleteCaseUpdate { id } => {
                api.delete_case_update(id).await?;
                "Actualización eliminada"
            }
        };
        Ok(message.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The request succeeded. `refreshed` is false when the follow-up
    /// refresh failed and the snapshot is stale.
    Applied { message: String, refreshed: bool },
    /// The user declined the confirmation; nothing was sent.
    Declined,
}

// ============================================================================
// DataStore
// ============================================================================

/// Owns the API client and the current snapshot.
pub struct DataStore {
    api: ApiClient,
    snapshot: Snapshot,
    loading: bool,
    last_error: Option<String>,
}

impl DataStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            snapshot: Snapshot::default(),
            loading: false,
            last_error: None,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Mark a refresh as in flight. Pair with [`DataStore::finish_refresh`]
    /// when the fetch runs elsewhere.
    pub fn begin_refresh(&mut self) {
        self.loading = true;
    }

    /// Apply a fetch result. On failure the previous snapshot is kept.
    pub fn finish_refresh(&mut self, result: Result<Snapshot>) -> Result<()> {
        self.loading = false;
        match result {
            Ok(snapshot) => {
                info!(
                    clients = snapshot.clients.len(),
                    cases = snapshot.cases.len(),
                    documents = snapshot.documents.len(),
                    appointments = snapshot.appointments.len(),
                    "Refresh complete"
                );
                self.snapshot = snapshot;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Error fetching data");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn refresh(&mut self) -> Result<()> {
        self.begin_refresh();
        let result = Snapshot::fetch(&self.api).await;
        self.finish_refresh(result)
    }

    /// Run a mutation, then refresh. Deletes need `Confirmation::Confirmed`.
    pub async fn execute(
        &mut self,
        mutation: Mutation,
        confirmation: Confirmation,
    ) -> Result<MutationOutcome> {
        if mutation.requires_confirmation() && confirmation == Confirmation::Declined {
            info!(kind = mutation.kind(), "Mutation declined");
            return Ok(MutationOutcome::Declined);
        }

        let message = match mutation.send(&self.api).await {
            Ok(message) => message,
            Err(e) => {
                error!(kind = mutation.kind(), error = %e, "Mutation failed");
                return Err(e.context(mutation.failure_message()));
            }
        };

        let refreshed = self.refresh().await.is_ok();
        Ok(MutationOutcome::Applied { message, refreshed })
    }
}
