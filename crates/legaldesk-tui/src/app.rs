//! Application state management for the LegalDesk terminal client.
//!
//! `App` owns the data store, the per-tab selection and filter state, and
//! the channel that background fetches and mutations report back through.

use anyhow::Result;
use legaldesk_core::filters::{
    cycle_client_id, today_utc, AppointmentFilter, CaseFilter, ClientFilter, DocumentFilter,
};
use legaldesk_core::models::{Appointment, Case, Client, Document};
use legaldesk_core::{ApiClient, Config, Confirmation, DataStore, Mutation, Snapshot};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 16;

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Maximum length for the completion notes prompt.
const MAX_NOTES_LENGTH: usize = 500;

/// Status-bar prefix for failed loads
const LOAD_ERROR_PREFIX: &str = "Error al cargar datos";

/// Braille spinner frames for the loading screen
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs, in sidebar order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Clients,
    Cases,
    Appointments,
    Documents,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::Clients,
        Tab::Cases,
        Tab::Appointments,
        Tab::Documents,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Clients => "Clientes",
            Tab::Cases => "Casos",
            Tab::Appointments => "Citas",
            Tab::Documents => "Documentos",
        }
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Dashboard => Tab::Clients,
            Tab::Clients => Tab::Cases,
            Tab::Cases => Tab::Appointments,
            Tab::Appointments => Tab::Documents,
            Tab::Documents => Tab::Dashboard,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Dashboard => Tab::Documents,
            Tab::Clients => Tab::Dashboard,
            Tab::Cases => Tab::Clients,
            Tab::Appointments => Tab::Cases,
            Tab::Documents => Tab::Appointments,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    ConfirmingDelete,
    EnteringNotes,
    ConfirmingQuit,
    Quitting,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Messages sent from spawned tasks back to the event loop.
enum BackgroundResult {
    /// A full five-way fetch finished
    Refreshed(Result<Snapshot>),
    /// A mutation succeeded; carries the status-bar text
    MutationApplied(String),
    /// A mutation failed; carries the status-bar text
    MutationFailed(String),
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub store: DataStore,

    // UI State
    pub state: AppState,
    pub current_tab: Tab,
    pub spinner_tick: usize,
    pub status_message: Option<String>,
    /// A mutation landed while a fetch was in flight; fetch again after it
    pub refresh_pending: bool,

    // Filters
    pub client_filter: ClientFilter,
    pub case_filter: CaseFilter,
    pub appointment_filter: AppointmentFilter,
    pub document_filter: DocumentFilter,

    // Selection indices
    pub clients_selection: usize,
    pub cases_selection: usize,
    pub appointments_selection: usize,
    pub documents_selection: usize,

    // Overlays
    pub pending_delete: Option<Mutation>,
    pub completing_id: Option<String>,
    pub notes_input: String,

    // Background task channel
    bg_rx: mpsc::Receiver<BackgroundResult>,
    bg_tx: mpsc::Sender<BackgroundResult>,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let api = ApiClient::from_config(config)?;
        debug!(origin = api.origin(), "API client configured");
        Ok(Self::with_api(api))
    }

    pub fn with_api(api: ApiClient) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            store: DataStore::new(api),

            state: AppState::Normal,
            current_tab: Tab::Dashboard,
            spinner_tick: 0,
            status_message: None,
            refresh_pending: false,

            client_filter: ClientFilter::default(),
            case_filter: CaseFilter::default(),
            appointment_filter: AppointmentFilter::default(),
            document_filter: DocumentFilter::default(),

            clients_selection: 0,
            cases_selection: 0,
            appointments_selection: 0,
            documents_selection: 0,

            pending_delete: None,
            completing_id: None,
            notes_input: String::new(),

            bg_rx: rx,
            bg_tx: tx,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.store.snapshot()
    }

    pub fn tick(&mut self) {
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_tick % SPINNER_FRAMES.len()]
    }

    // =========================================================================
    // Background work
    // =========================================================================

    async fn send_result(tx: &mpsc::Sender<BackgroundResult>, result: BackgroundResult) {
        if tx.send(result).await.is_err() {
            // Receiver is gone once the UI has shut down
            warn!("Dropped background result - channel closed");
        }
    }

    /// Start a full refresh on a background task. No-op while one is running.
    pub fn refresh_background(&mut self) {
        if self.store.is_loading() {
            debug!("Refresh already in flight");
            return;
        }
        self.store.begin_refresh();
        info!("Refreshing all collections");

        let api = self.store.api().clone();
        let tx = self.bg_tx.clone();
        tokio::spawn(async move {
            let result = Snapshot::fetch(&api).await;
            Self::send_result(&tx, BackgroundResult::Refreshed(result)).await;
        });
    }

    /// Send a mutation on a background task. A successful mutation is
    /// followed by a full refresh once its result is processed.
    pub fn submit_mutation(&mut self, mutation: Mutation, confirmation: Confirmation) {
        if mutation.requires_confirmation() && confirmation == Confirmation::Declined {
            info!(kind = mutation.kind(), "Mutation declined");
            self.status_message = Some("Operación cancelada".to_string());
            return;
        }

        let api = self.store.api().clone();
        let tx = self.bg_tx.clone();
        tokio::spawn(async move {
            let result = match mutation.send(&api).await {
                Ok(message) => BackgroundResult::MutationApplied(message),
                Err(e) => {
                    error!(kind = mutation.kind(), error = %e, "Mutation failed");
                    BackgroundResult::MutationFailed(mutation.failure_message().to_string())
                }
            };
            Self::send_result(&tx, result).await;
        });
    }

    /// Drain finished background work and apply it
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.bg_rx.try_recv() {
            results.push(result);
        }

        for result in results {
            self.process_background_result(result);
        }
    }

    fn process_background_result(&mut self, result: BackgroundResult) {
        match result {
            BackgroundResult::Refreshed(result) => {
                if let Err(e) = self.store.finish_refresh(result) {
                    self.status_message = Some(Self::user_error(&e));
                } else {
                    // Keep mutation messages, drop stale load errors
                    if let Some(ref msg) = self.status_message {
                        if msg.starts_with(LOAD_ERROR_PREFIX) {
                            self.status_message = None;
                        }
                    }
                    self.clamp_selections();
                }
                if std::mem::take(&mut self.refresh_pending) {
                    debug!("Running refresh queued by a mutation");
                    self.refresh_background();
                }
            }
            BackgroundResult::MutationApplied(message) => {
                self.status_message = Some(message);
                if self.store.is_loading() {
                    // The fetch in flight may have read the server before this change
                    self.refresh_pending = true;
                } else {
                    self.refresh_background();
                }
            }
            BackgroundResult::MutationFailed(message) => {
                self.status_message = Some(message);
            }
        }
    }

    /// Short status-bar text for a failed load
    fn user_error(e: &anyhow::Error) -> String {
        match e.downcast_ref::<legaldesk_core::ApiError>() {
            Some(api_err) => format!("{}: {} [r] reintentar", LOAD_ERROR_PREFIX, api_err.user_message()),
            None => format!("{} [r] reintentar", LOAD_ERROR_PREFIX),
        }
    }

    // =========================================================================
    // Filtered views
    // =========================================================================

    pub fn visible_clients(&self) -> Vec<&Client> {
        self.client_filter.apply(&self.snapshot().clients)
    }

    pub fn visible_cases(&self) -> Vec<&Case> {
        self.case_filter.apply(&self.snapshot().cases)
    }

    pub fn visible_appointments(&self) -> Vec<&Appointment> {
        self.appointment_filter
            .apply(&self.snapshot().appointments, &today_utc())
    }

    pub fn visible_documents(&self) -> Vec<&Document> {
        self.document_filter.apply(&self.snapshot().documents)
    }

    fn visible_len(&self, tab: Tab) -> usize {
        match tab {
            Tab::Dashboard => 0,
            Tab::Clients => self.visible_clients().len(),
            Tab::Cases => self.visible_cases().len(),
            Tab::Appointments => self.visible_appointments().len(),
            Tab::Documents => self.visible_documents().len(),
        }
    }

    fn selection_mut(&mut self, tab: Tab) -> Option<&mut usize> {
        match tab {
            Tab::Dashboard => None,
            Tab::Clients => Some(&mut self.clients_selection),
            Tab::Cases => Some(&mut self.cases_selection),
            Tab::Appointments => Some(&mut self.appointments_selection),
            Tab::Documents => Some(&mut self.documents_selection),
        }
    }

    /// Move the current tab's selection by `delta`, clamped to the list
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.visible_len(self.current_tab);
        if let Some(sel) = self.selection_mut(self.current_tab) {
            let max = len.saturating_sub(1) as isize;
            *sel = (*sel as isize + delta).clamp(0, max) as usize;
        }
    }

    pub fn select_first(&mut self) {
        if let Some(sel) = self.selection_mut(self.current_tab) {
            *sel = 0;
        }
    }

    pub fn select_last(&mut self) {
        let len = self.visible_len(self.current_tab);
        if let Some(sel) = self.selection_mut(self.current_tab) {
            *sel = len.saturating_sub(1);
        }
    }

    fn clamp_selections(&mut self) {
        for tab in Tab::ALL {
            let len = self.visible_len(tab);
            if let Some(sel) = self.selection_mut(tab) {
                *sel = (*sel).min(len.saturating_sub(1));
            }
        }
    }

    pub fn selected_client(&self) -> Option<&Client> {
        self.visible_clients().get(self.clients_selection).copied()
    }

    pub fn selected_case(&self) -> Option<&Case> {
        self.visible_cases().get(self.cases_selection).copied()
    }

    pub fn selected_appointment(&self) -> Option<&Appointment> {
        self.visible_appointments()
            .get(self.appointments_selection)
            .copied()
    }

    pub fn selected_document(&self) -> Option<&Document> {
        self.visible_documents().get(self.documents_selection).copied()
    }

    // =========================================================================
    // Filter controls
    // =========================================================================

    pub fn cycle_status_filter(&mut self) {
        match self.current_tab {
            Tab::Clients => {
                self.client_filter.cycle_status();
                self.clients_selection = 0;
            }
            Tab::Cases => {
                self.case_filter.cycle_status();
                self.cases_selection = 0;
            }
            _ => {}
        }
    }

    pub fn cycle_client_filter(&mut self) {
        match self.current_tab {
            Tab::Cases => {
                self.case_filter.client_id = cycle_client_id(
                    &self.store.snapshot().clients,
                    self.case_filter.client_id.as_deref(),
                );
                self.cases_selection = 0;
            }
            Tab::Documents => {
                self.document_filter.client_id = cycle_client_id(
                    &self.store.snapshot().clients,
                    self.document_filter.client_id.as_deref(),
                );
                self.documents_selection = 0;
            }
            _ => {}
        }
    }

    pub fn toggle_upcoming(&mut self) {
        if self.current_tab == Tab::Appointments {
            self.appointment_filter.upcoming_only = !self.appointment_filter.upcoming_only;
            self.appointments_selection = 0;
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        self.client_filter.search.push(c);
        self.clients_selection = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.client_filter.search.pop();
        self.clients_selection = 0;
    }

    pub fn clear_search(&mut self) {
        self.client_filter.search.clear();
        self.clients_selection = 0;
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Build the delete for the selected row and open the confirmation overlay
    pub fn request_delete(&mut self) {
        let mutation = match self.current_tab {
            Tab::Dashboard => None,
            Tab::Clients => self
                .selected_client()
                .map(|c| Mutation::DeleteClient { id: c.id.clone() }),
            Tab::Cases => self
                .selected_case()
                .map(|c| Mutation::DeleteCase { id: c.id.clone() }),
            Tab::Appointments => self
                .selected_appointment()
                .map(|a| Mutation::DeleteAppointment { id: a.id.clone() }),
            Tab::Documents => self
                .selected_document()
                .map(|d| Mutation::DeleteDocument { id: d.id.clone() }),
        };

        if let Some(mutation) = mutation {
            self.pending_delete = Some(mutation);
            self.state = AppState::ConfirmingDelete;
        }
    }

    pub fn resolve_delete(&mut self, confirmation: Confirmation) {
        self.state = AppState::Normal;
        if let Some(mutation) = self.pending_delete.take() {
            self.submit_mutation(mutation, confirmation);
        }
    }

    /// Open the notes prompt for the selected open appointment
    pub fn start_complete(&mut self) {
        if self.current_tab != Tab::Appointments {
            return;
        }
        let selected = self
            .selected_appointment()
            .map(|a| (a.id.clone(), a.is_completed));
        match selected {
            Some((_, true)) => {
                self.status_message = Some("La cita ya está completada".to_string());
            }
            Some((id, false)) => {
                self.completing_id = Some(id);
                self.notes_input.clear();
                self.state = AppState::EnteringNotes;
            }
            None => {}
        }
    }

    pub fn push_notes_char(&mut self, c: char) {
        if self.notes_input.chars().count() < MAX_NOTES_LENGTH {
            self.notes_input.push(c);
        }
    }

    /// Close the notes prompt and complete the appointment. Enter keeps the
    /// typed notes; Esc completes it without notes.
    pub fn finish_complete(&mut self, keep_notes: bool) {
        self.state = AppState::Normal;
        let notes = std::mem::take(&mut self.notes_input);

        if let Some(id) = self.completing_id.take() {
            let notes = Some(notes).filter(|n| keep_notes && !n.trim().is_empty());
            self.submit_mutation(
                Mutation::CompleteAppointment { id, notes },
                Confirmation::Confirmed,
            );
        }
    }

    /// Put the selected document's download URL in the status bar
    pub fn show_document_url(&mut self) {
        if self.current_tab != Tab::Documents {
            return;
        }
        let url = self
            .selected_document()
            .map(|doc| self.store.api().file_url(&doc.filename));
        if let Some(url) = url {
            self.status_message = Some(url);
        }
    }
}
