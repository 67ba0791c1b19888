use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

use super::panel;

/// Render the Dashboard tab: four stat cards over the two recent lists
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(5)])
        .split(area);

    render_stat_cards(frame, app, chunks[0]);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_recent_clients(frame, app, lists[0]);
    render_recent_cases(frame, app, lists[1]);
}

fn render_stat_cards(frame: &mut Frame, app: &App, area: Rect) {
    let stats = &app.snapshot().stats;
    let cards = [
        ("Total Clientes", stats.total_clients),
        ("Casos Activos", stats.active_cases),
        ("Próximas Citas", stats.upcoming_appointments),
        ("Documentos", stats.total_documents),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((label, value), column) in cards.iter().zip(columns.iter()) {
        let lines = vec![
            Line::from(Span::styled(format!(" {}", label), styles::muted_style())),
            Line::from(Span::styled(format!(" {}", value), styles::stat_value_style())),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border_style(false));
        frame.render_widget(Paragraph::new(lines).block(block), *column);
    }
}

fn render_recent_clients(frame: &mut Frame, app: &App, area: Rect) {
    let recent = app.snapshot().recent_clients();

    let mut lines = Vec::new();
    for client in recent {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<3}", client.initials()), styles::highlight_style()),
            Span::styled(client.full_name(), styles::list_item_style()),
            Span::raw("  "),
            Span::styled(client.status.label(), styles::muted_style()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", client.email),
            styles::muted_style(),
        )));
    }
    if recent.is_empty() {
        lines.push(Line::from(Span::styled(
            " No hay clientes registrados",
            styles::muted_style(),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(panel(" Clientes Recientes ".to_string(), false)),
        area,
    );
}

fn render_recent_cases(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.snapshot();
    let recent = snapshot.recent_cases();

    let mut lines = Vec::new();
    for case in recent {
        lines.push(Line::from(vec![
            Span::styled(format!(" {}", case.title), styles::list_item_style()),
            Span::raw("  "),
            Span::styled(case.status.label(), styles::success_style()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {} · {}", case.case_number, snapshot.client_name(&case.client_id)),
            styles::muted_style(),
        )));
    }
    if recent.is_empty() {
        lines.push(Line::from(Span::styled(
            " No hay casos registrados",
            styles::muted_style(),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(panel(" Casos Recientes ".to_string(), false)),
        area,
    );
}
