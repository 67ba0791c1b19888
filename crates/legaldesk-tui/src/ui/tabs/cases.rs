use legaldesk_core::models::Case;
use legaldesk_core::utils::{format_date, format_money, truncate_string};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

use super::{field_line, panel};

/// Render the Casos tab
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    render_table(frame, app, chunks[0]);
    render_detail(frame, app, app.selected_case(), chunks[1]);
}

fn table_title(app: &App, shown: usize) -> String {
    let mut title = format!(" Casos ({}/{})", shown, app.snapshot().cases.len());
    if let Some(status) = app.case_filter.status {
        title.push_str(&format!(" - estado: {}", status.label()));
    }
    if let Some(ref client_id) = app.case_filter.client_id {
        title.push_str(&format!(" - cliente: {}", app.snapshot().client_name(client_id)));
    }
    title.push(' ');
    title
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.snapshot();
    let cases = app.visible_cases();

    let header = Row::new(["Número", "Título", "Cliente", "Tipo", "Estado"])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = cases
        .iter()
        .enumerate()
        .map(|(i, case)| {
            let style = if i == app.cases_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            Row::new(vec![
                Cell::from(case.case_number.clone()),
                Cell::from(truncate_string(&case.title, 32)),
                Cell::from(snapshot.client_name(&case.client_id)),
                Cell::from(case.case_type.label()),
                Cell::from(case.status.label()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Length(13),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(table_title(app, cases.len()), true))
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !cases.is_empty() {
        state.select(Some(app.cases_selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_detail(frame: &mut Frame, app: &App, selected: Option<&Case>, area: Rect) {
    let Some(case) = selected else {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No se encontraron casos",
            styles::muted_style(),
        )))
        .block(panel(" Detalle ".to_string(), false));
        frame.render_widget(empty, area);
        return;
    };

    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    let date = |v: &Option<String>| v.as_deref().map(format_date).unwrap_or_default();
    let number = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(case.title.clone(), styles::title_style())),
        Line::from(vec![
            Span::styled(case.case_type.label(), styles::highlight_style()),
            Span::raw(" · "),
            Span::styled(case.status.label(), styles::success_style()),
        ]),
        Line::from(""),
        field_line("Número:", &case.case_number),
        field_line("Cliente:", &app.snapshot().client_name(&case.client_id)),
        field_line("Inicio:", &format_date(&case.start_date)),
        field_line("Fin:", &date(&case.end_date)),
        field_line("Próx. vista:", &date(&case.next_hearing)),
        Line::from(""),
        Line::from(Span::styled("Tribunal", styles::highlight_style())),
        field_line("Juzgado:", &opt(&case.court_name)),
        field_line("Juez:", &opt(&case.judge_name)),
        field_line("Contraparte:", &opt(&case.opposing_party)),
        Line::from(""),
        Line::from(Span::styled("Honorarios", styles::highlight_style())),
        field_line("Valor:", &format_money(case.case_value)),
        field_line("Tarifa/hora:", &format_money(case.hourly_rate)),
        field_line("Horas:", &number(case.total_hours)),
        field_line("Facturado:", &format_money(case.billed_amount())),
        Line::from(""),
        field_line("Descripción:", &opt(&case.description)),
        field_line("Notas:", &opt(&case.notes)),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(panel(" Detalle ".to_string(), false)),
        area,
    );
}
