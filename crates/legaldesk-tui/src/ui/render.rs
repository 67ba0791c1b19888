use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState, Tab};

use super::styles;
use super::tabs::{appointments, cases, clients, dashboard, documents};

pub fn render(frame: &mut Frame, app: &App) {
    if app.store.is_loading() {
        render_loading(frame, app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingDelete => render_delete_overlay(frame, app),
        AppState::EnteringNotes => render_notes_overlay(frame, app),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        _ => {}
    }
}

/// Full-screen loading indicator shown while a refresh is in flight
fn render_loading(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let top = area.height.saturating_sub(3) / 2;
    let mut lines: Vec<Line> = (0..top).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(
        app.spinner_frame(),
        styles::title_style(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Cargando sistema...",
        styles::muted_style(),
    )));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = "  LegalDesk - Gestión de Casos";
    let help_hint = "[?] Ayuda";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize)
                .saturating_sub(title.chars().count() + help_hint.len() + 4),
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in Tab::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        spans.push(Span::styled(
            format!("[{}] {}", i + 1, tab.title()),
            styles::tab_style(app.current_tab == *tab),
        ));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Dashboard => dashboard::render(frame, app, area),
        Tab::Clients => clients::render(frame, app, area),
        Tab::Cases => cases::render(frame, app, area),
        Tab::Appointments => appointments::render(frame, app, area),
        Tab::Documents => documents::render(frame, app, area),
    }
}

fn shortcuts(tab: Tab) -> &'static str {
    match tab {
        Tab::Dashboard => "[r]efrescar | [q]salir",
        Tab::Clients => "[/]buscar [s]estado [d]eliminar | [r] [q]",
        Tab::Cases => "[s]estado [c]liente [d]eliminar | [r] [q]",
        Tab::Appointments => "[u]próximas [x]completar [d]eliminar | [r] [q]",
        Tab::Documents => "[c]liente [o]enlace [d]eliminar | [r] [q]",
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (left_text, left_style) = if matches!(app.state, AppState::Searching) {
        (
            format!(" Buscar: {}▌ ", app.client_filter.search),
            styles::search_style(),
        )
    } else if let Some(ref msg) = app.status_message {
        (format!(" {} ", msg), styles::highlight_style())
    } else if let Some(age) = app.snapshot().age_display() {
        (format!(" Actualizado {} ", age), styles::muted_style())
    } else if let Some(err) = app.store.last_error() {
        (format!(" {} ", err), styles::error_style())
    } else {
        (" Sin datos ".to_string(), styles::muted_style())
    };

    let right_text = format!(" {} ", shortcuts(app.current_tab));

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());
    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    frame.render_widget(
        Paragraph::new(status_line).style(styles::status_bar_style()),
        area,
    );
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 24, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  LegalDesk", styles::title_style())),
        Line::from(Span::styled(
            format!("  versión {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navegación", styles::highlight_style())),
        help_line("1-5", "Cambiar de pestaña"),
        help_line("←/→ Tab", "Pestaña anterior/siguiente"),
        help_line("↑/↓ j/k", "Mover selección"),
        help_line("PgUp/PgDn", "Desplazar página"),
        Line::from(""),
        Line::from(Span::styled(" Acciones", styles::highlight_style())),
        help_line("/", "Buscar clientes"),
        help_line("s", "Filtrar por estado"),
        help_line("c", "Filtrar por cliente"),
        help_line("u", "Solo próximas citas"),
        help_line("x", "Completar cita"),
        help_line("o", "Enlace de descarga del documento"),
        help_line("d", "Eliminar registro"),
        help_line("r", "Refrescar datos"),
        help_line("q", "Salir"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Pulse ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" o ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" para cerrar", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_delete_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(50, 7, frame.area());
    frame.render_widget(Clear, area);

    let prompt = app
        .pending_delete
        .as_ref()
        .and_then(|m| m.confirmation_prompt())
        .unwrap_or("¿Está seguro?");

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", prompt), styles::highlight_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Pulse ", styles::muted_style()),
            Span::styled("[S/Y]", styles::help_key_style()),
            Span::styled(" para eliminar, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" para cancelar", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .title(" Eliminar ")
        .title_style(styles::error_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_notes_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(60, 9, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            " Notas de la cita completada (opcional):",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(format!("{}▌", app.notes_input), styles::selected_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" [Enter]", styles::help_key_style()),
            Span::styled(" completar  ", styles::muted_style()),
            Span::styled("[Esc]", styles::help_key_style()),
            Span::styled(" completar sin notas", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .title(" Completar cita ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Create a centered rectangle with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   ¿Desea salir de LegalDesk?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Pulse ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" para salir, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" para cancelar", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use legaldesk_core::{ApiClient, Snapshot};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::time::Duration;

    fn buffer_text(buffer: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app() -> App {
        let api = ApiClient::new("http://localhost:1", Duration::from_secs(1)).unwrap();
        App::with_api(api)
    }

    #[test]
    fn test_loading_screen_replaces_views() {
        let mut app = app();
        app.store.begin_refresh();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = buffer_text(terminal.backend().buffer());

        assert!(text.contains("Cargando sistema..."));
        assert!(!text.contains("Clientes"));
    }

    #[test]
    fn test_tabs_render_in_sidebar_order() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = buffer_text(terminal.backend().buffer());

        let tab_line = text
            .lines()
            .find(|l| l.contains("[1] Dashboard"))
            .expect("tab line");
        let positions: Vec<usize> = ["Dashboard", "Clientes", "Casos", "Citas", "Documentos"]
            .iter()
            .map(|t| tab_line.find(t).expect("tab title"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_status_bar_shows_snapshot_age() {
        let mut app = app();
        app.store
            .finish_refresh(Ok(Snapshot {
                fetched_at: Some(chrono::Utc::now()),
                ..Default::default()
            }))
            .unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = buffer_text(terminal.backend().buffer());

        assert!(text.contains("Actualizado ahora mismo"));
    }

    #[test]
    fn test_centered_rect_is_clamped() {
        let r = centered_rect_fixed(100, 50, Rect::new(0, 0, 40, 10));
        assert_eq!(r.width, 40);
        assert_eq!(r.height, 10);
    }
}
