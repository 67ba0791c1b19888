//! LegalDesk - a terminal client for a law firm's case-management backend.
//!
//! Run with no arguments for the interactive UI. A few one-shot commands
//! are available for scripting; see `--help`.

mod app;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use legaldesk_core::forms::UploadForm;
use legaldesk_core::{
    ApiClient, Config, Confirmation, DataStore, Mutation, MutationOutcome,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file name prefix inside the cache directory
const LOG_FILE_NAME: &str = "legaldesk.log";

const USAGE: &str = "\
Uso: legaldesk [COMANDO]

Sin comando se abre la interfaz interactiva.

Comandos:
  --dump                                          Imprime todos los datos como JSON
  --upload <client_id> <ruta> [descripción] [categoría]
                                                  Sube un documento
  --portal <email> <teléfono> [case_id]           Muestra el portal de un cliente,
                                                  o la cronología de un caso
  --help                                          Muestra esta ayuda
";

fn env_filter() -> EnvFilter {
    // RUST_LOG overrides the default level (e.g., RUST_LOG=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr, for the one-shot commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

/// Log to a daily rolling file; the terminal belongs to the UI.
/// The returned guard must live until shutdown to flush buffered lines.
fn init_tui_tracing(config: &Config) -> Option<WorkerGuard> {
    let log_dir = config
        .cache_dir()
        .unwrap_or_else(|_| PathBuf::from("."));
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("No se pudo crear el directorio de logs {}: {}", log_dir.display(), e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(env_filter())
        .init();

    Some(guard)
}

fn load_config() -> Config {
    match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuración inválida, usando valores por defecto: {}", e);
            Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = load_config();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(command) = args.first() {
        init_cli_tracing();
        return match command.as_str() {
            "--dump" => dump(&config).await,
            "--upload" => upload(&config, &args[1..]).await,
            "--portal" => portal(&config, &args[1..]).await,
            "--help" | "-h" => {
                print!("{}", USAGE);
                Ok(())
            }
            other => {
                eprint!("{}", USAGE);
                bail!("Comando desconocido: {}", other)
            }
        };
    }

    let _log_guard = init_tui_tracing(&config);
    info!(origin = %config.backend_url(), "LegalDesk starting");

    let mut app = App::new(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.refresh_background();

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("LegalDesk shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        // Poll with a timeout so background results and the spinner keep moving
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }
                if handle_input(app, key) {
                    return Ok(());
                }
            }
        }

        app.check_background_tasks();
        app.tick();

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

// ============================================================================
// One-shot commands
// ============================================================================

/// Print the full snapshot as JSON
async fn dump(config: &Config) -> Result<()> {
    let mut store = DataStore::new(ApiClient::from_config(config)?);
    store.refresh().await?;
    println!("{}", serde_json::to_string_pretty(store.snapshot())?);
    Ok(())
}

async fn upload(config: &Config, args: &[String]) -> Result<()> {
    let (client_id, path) = match args {
        [client_id, path, ..] => (client_id, path),
        _ => {
            eprint!("{}", USAGE);
            bail!("--upload necesita <client_id> y <ruta>");
        }
    };

    let form = UploadForm {
        client_id: client_id.clone(),
        case_id: None,
        path: PathBuf::from(path),
        description: args.get(2).cloned().unwrap_or_default(),
        category: args.get(3).cloned().unwrap_or_default(),
    };

    let mut store = DataStore::new(ApiClient::from_config(config)?);
    match store
        .execute(Mutation::UploadDocument(form), Confirmation::Confirmed)
        .await?
    {
        MutationOutcome::Applied { message, refreshed } => {
            println!("{}", message);
            if !refreshed {
                warn!("Upload succeeded but the follow-up refresh failed");
            }
        }
        MutationOutcome::Declined => {}
    }
    Ok(())
}

/// Log in as a client and print their portal dashboard
async fn portal(config: &Config, args: &[String]) -> Result<()> {
    let [email, phone, ..] = args else {
        eprint!("{}", USAGE);
        bail!("--portal necesita <email> y <teléfono>");
    };

    let api = ApiClient::from_config(config)?;
    let session = match api.client_login(email, phone).await {
        Ok(session) => session,
        Err(e) => {
            if let Some(api_err) = e.downcast_ref::<legaldesk_core::ApiError>() {
                bail!("{}", api_err.user_message());
            }
            return Err(e);
        }
    };
    println!("Bienvenido/a, {}", session.client_name);
    println!();

    if let Some(case_id) = args.get(2) {
        return print_timeline(&api, &session.client_id, case_id).await;
    }

    let dashboard = api.fetch_client_dashboard(&session.client_id).await?;
    println!("Casos activos ({}):", dashboard.active_cases.len());
    for case in &dashboard.active_cases {
        println!("  {} - {} [{}]", case.case_number, case.title, case.status.label());
    }
    println!();
    println!("Próximas citas ({}):", dashboard.upcoming_appointments.len());
    for appt in &dashboard.upcoming_appointments {
        println!("  {} - {}", appt.when_display(), appt.title);
    }
    println!();
    println!("Actualizaciones recientes ({}):", dashboard.recent_updates.len());
    for update in &dashboard.recent_updates {
        println!("  [{}] {}", update.update_type.label(), update.title);
    }
    println!();
    println!("Documentos: {}", dashboard.total_documents);
    Ok(())
}

/// Print one case with its updates, appointments and documents
async fn print_timeline(api: &ApiClient, client_id: &str, case_id: &str) -> Result<()> {
    let timeline = api.fetch_case_timeline(client_id, case_id).await?;
    let case = &timeline.case;

    println!("{} - {} [{}]", case.case_number, case.title, case.status.label());
    println!();
    println!("Actualizaciones ({}):", timeline.updates.len());
    for update in &timeline.updates {
        println!("  [{}] {}", update.update_type.label(), update.title);
    }
    println!();
    println!("Citas ({}):", timeline.appointments.len());
    for appt in &timeline.appointments {
        println!("  {} - {} ({})", appt.when_display(), appt.title, appt.status_label());
    }
    println!();
    println!("Documentos ({}):", timeline.documents.len());
    for doc in &timeline.documents {
        println!("  {} ({})", doc.original_filename, doc.size_display());
    }
    Ok(())
}
