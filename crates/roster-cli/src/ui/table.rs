//! Record table pane, shared by both list screens.

use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Paragraph, Row, Table, TableState},
};
use roster_core::{
  entity::Entity,
  table::{Tabular, row},
};

use crate::app::{App, ListView};

/// Render `view` as a table into `area`.
pub fn draw<E: Entity + Tabular>(f: &mut Frame, area: Rect, label: &str, view: &ListView<E>, app: &App) {
  let filtered = view.filtered(&app.filter);
  let total = view.controller.items().len();

  // Title with count.
  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" {label} ({}/{}) ", filtered.len(), total)
  } else {
    format!(" {label} ({total}) ")
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Filter bar along the bottom of the pane.
  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let columns = E::columns();
  let header = Row::new(columns.iter().map(|c| c.title))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
  let rows = filtered.iter().map(|e| Row::new(row(columns, e)));
  let widths = columns.iter().map(|c| Constraint::Length(c.width));

  let mut state = TableState::default();
  state.select(if filtered.is_empty() { None } else { Some(view.cursor) });

  f.render_stateful_widget(
    Table::new(rows, widths)
      .header(header)
      .column_spacing(1)
      .row_highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
    inner_area,
    &mut state,
  );
}
