use legaldesk_core::utils::{format_date, truncate_string};
use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

use super::panel;

/// Render the Documentos tab
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.snapshot();
    let documents = app.visible_documents();

    let header = Row::new(["Archivo", "Cliente", "Categoría", "Tamaño", "Subido", "Descripción"])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = documents
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            let style = if i == app.documents_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            Row::new(vec![
                Cell::from(truncate_string(&doc.original_filename, 30)),
                Cell::from(snapshot.client_name(&doc.client_id)),
                Cell::from(doc.category_display().to_string()),
                Cell::from(doc.size_display()),
                Cell::from(
                    doc.uploaded_at
                        .as_deref()
                        .map(format_date)
                        .unwrap_or_default(),
                ),
                Cell::from(doc.description.clone().unwrap_or_default()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Length(16),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Fill(3),
    ];

    let mut title = format!(" Documentos ({}/{})", documents.len(), snapshot.documents.len());
    if let Some(ref client_id) = app.document_filter.client_id {
        title.push_str(&format!(" - cliente: {}", snapshot.client_name(client_id)));
    }
    title.push(' ');

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(title, true))
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !documents.is_empty() {
        state.select(Some(app.documents_selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
