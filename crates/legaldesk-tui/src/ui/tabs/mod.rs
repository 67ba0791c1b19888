//! Per-tab content rendering.

pub mod appointments;
pub mod cases;
pub mod clients;
pub mod dashboard;
pub mod documents;

use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders},
};

use super::styles;

/// Bordered block used by every list and detail panel
pub(crate) fn panel(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused))
}

/// `Label:  value` detail line, with `-` for empty values
pub(crate) fn field_line(label: &'static str, value: &str) -> Line<'static> {
    let value = if value.trim().is_empty() { "-" } else { value };
    Line::from(vec![
        Span::styled(format!("{:<14}", label), styles::muted_style()),
        Span::raw(value.to_string()),
    ])
}
