use legaldesk_core::models::Client;
use legaldesk_core::utils::{format_date, truncate_string};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

use super::{field_line, panel};

/// Render the Clientes tab - filtered table with a detail panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    render_table(frame, app, chunks[0]);
    render_detail(frame, app.selected_client(), app, chunks[1]);
}

fn table_title(app: &App, shown: usize) -> String {
    let mut title = format!(" Clientes ({}/{})", shown, app.snapshot().clients.len());
    if let Some(status) = app.client_filter.status {
        title.push_str(&format!(" - estado: {}", status.label()));
    }
    if !app.client_filter.search.is_empty() {
        title.push_str(&format!(" - buscar: \"{}\"", app.client_filter.search));
    }
    title.push(' ');
    title
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let clients = app.visible_clients();

    let header = Row::new(["Nombre", "Email", "Teléfono", "Ciudad", "Estado"])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = clients
        .iter()
        .enumerate()
        .map(|(i, client)| {
            let style = if i == app.clients_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            Row::new(vec![
                Cell::from(truncate_string(&client.full_name(), 28)),
                Cell::from(client.email.clone()),
                Cell::from(client.phone.clone()),
                Cell::from(client.city.clone()),
                Cell::from(client.status.label()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Percentage(28),
        Constraint::Fill(3),
        Constraint::Length(14),
        Constraint::Fill(1),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(table_title(app, clients.len()), true))
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !clients.is_empty() {
        state.select(Some(app.clients_selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_detail(frame: &mut Frame, selected: Option<&Client>, app: &App, area: Rect) {
    let Some(client) = selected else {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No se encontraron clientes",
            styles::muted_style(),
        )))
        .block(panel(" Detalle ".to_string(), false));
        frame.render_widget(empty, area);
        return;
    };

    let snapshot = app.snapshot();
    let case_count = snapshot
        .cases
        .iter()
        .filter(|c| c.client_id == client.id)
        .count();
    let document_count = snapshot
        .documents
        .iter()
        .filter(|d| d.client_id == client.id)
        .count();

    let opt = |v: &Option<String>| v.clone().unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(client.full_name(), styles::title_style())),
        Line::from(Span::styled(client.status.label(), styles::success_style())),
        Line::from(""),
        Line::from(Span::styled("Contacto", styles::highlight_style())),
        field_line("Email:", &client.email),
        field_line("Teléfono:", &client.phone),
        field_line("Dirección:", &client.address_line()),
        Line::from(""),
        Line::from(Span::styled("Personal", styles::highlight_style())),
        field_line(
            "Nacimiento:",
            &client.date_of_birth.as_deref().map(format_date).unwrap_or_default(),
        ),
        field_line("Ocupación:", &opt(&client.occupation)),
        field_line("Emergencia:", &opt(&client.emergency_contact)),
        field_line("Tel. emerg.:", &opt(&client.emergency_phone)),
        Line::from(""),
        field_line("Casos:", &case_count.to_string()),
        field_line("Documentos:", &document_count.to_string()),
        field_line(
            "Alta:",
            &client.created_at.as_deref().map(format_date).unwrap_or_default(),
        ),
        Line::from(""),
        field_line("Notas:", &opt(&client.notes)),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(panel(" Detalle ".to_string(), false)),
        area,
    );
}
