//! Edit dialog popup.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};
use roster_core::validation::Field;

use crate::dialog::Dialog;

const LABEL_WIDTH: usize = 13;

fn label(field: Field) -> &'static str {
  match field {
    Field::Name => "Name",
    Field::Email => "Email",
    Field::BirthDate => "Birth date",
    Field::BaseSalary => "Base salary",
    Field::Department => "Department",
  }
}

/// Draw `dialog` over the list that owns it.
pub fn draw(f: &mut Frame, area: Rect, dialog: &Dialog) {
  let dim = Style::default().fg(Color::DarkGray);
  let error = Style::default().fg(Color::Red);

  let mut lines = vec![Line::from(vec![
    Span::styled(format!("{:<width$}", "Id", width = LABEL_WIDTH), dim),
    Span::styled(dialog.id_text().to_string(), dim),
  ])];

  // One value line and one error line per field.
  for (i, field) in dialog.fields().iter().copied().enumerate() {
    let focused = i == dialog.focus;
    let value = match dialog.text(field) {
      Some(text) if focused => format!("{text}_"),
      Some(text) => text.to_string(),
      None => format!("< {} >", dialog.department_choice().unwrap_or("none")),
    };
    let value_style = if focused {
      Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
      Style::default()
    };
    let marker = if focused { "›" } else { " " };

    lines.push(Line::from(vec![
      Span::styled(marker, Style::default().fg(Color::Cyan)),
      Span::raw(format!("{:<width$}", label(field), width = LABEL_WIDTH - 1)),
      Span::styled(value, value_style),
    ]));
    lines.push(Line::from(Span::styled(
      format!("{:width$}{}", "", dialog.error_text(field), width = LABEL_WIDTH),
      error,
    )));
  }

  if let Some(message) = dialog.dialog_error() {
    lines.push(Line::from(Span::styled(message.to_string(), error)));
  }
  lines.push(Line::from(Span::styled("Enter save  Esc cancel", dim)));

  let height = lines.len() as u16 + 2;
  let popup = super::centered(area, 60, height);
  let block = Block::default()
    .title(format!(" {} data ", dialog.title()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));

  f.render_widget(Clear, popup);
  f.render_widget(Paragraph::new(lines).block(block), popup);
}
