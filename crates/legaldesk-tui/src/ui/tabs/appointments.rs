use legaldesk_core::utils::truncate_string;
use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

use super::panel;

/// Render the Citas tab - one table, optionally narrowed to upcoming
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.snapshot();
    let appointments = app.visible_appointments();

    let header = Row::new(["Fecha", "Título", "Cliente", "Duración", "Lugar", "Estado"])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = appointments
        .iter()
        .enumerate()
        .map(|(i, appt)| {
            let style = if i == app.appointments_selection {
                styles::selected_style()
            } else if appt.is_completed {
                styles::muted_style()
            } else {
                styles::list_item_style()
            };
            let status_style = if appt.is_completed {
                styles::success_style()
            } else {
                styles::highlight_style()
            };
            Row::new(vec![
                Cell::from(appt.when_display()),
                Cell::from(truncate_string(&appt.title, 30)),
                Cell::from(snapshot.client_name(&appt.client_id)),
                Cell::from(format!("{} min", appt.duration_minutes)),
                Cell::from(appt.location.clone().unwrap_or_default()),
                Cell::from(appt.status_label()).style(status_style),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(17),
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Length(9),
        Constraint::Fill(2),
        Constraint::Length(11),
    ];

    let filter = if app.appointment_filter.upcoming_only {
        " - solo próximas"
    } else {
        ""
    };
    let title = format!(
        " Citas ({}/{}){} ",
        appointments.len(),
        snapshot.appointments.len(),
        filter
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(title, true))
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !appointments.is_empty() {
        state.select(Some(app.appointments_selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
