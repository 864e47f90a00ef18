//! Terminal rendering of every pane.

pub mod dialog;
pub mod table;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);

  if let Some(dialog) = &app.dialog {
    dialog::draw(f, area, dialog);
  } else if let Some(target) = app.pending_removal() {
    draw_confirm(f, area, &target);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%d/%m/%Y").to_string();

  let tab = |label: &'static str, screen: Screen| {
    let style = if app.screen == screen {
      Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::White)
    };
    Span::styled(label, style)
  };

  let left = vec![
    Span::styled(" roster  ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    tab(" [d] Departments ", Screen::Departments),
    Span::raw(" "),
    tab(" [s] Sellers ", Screen::Sellers),
  ];
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  // Simple left-right header: pad the middle.
  let left_width: usize = left.iter().map(|s| s.content.chars().count()).sum();
  let pad = (area.width as usize)
    .saturating_sub(left_width)
    .saturating_sub(right.content.len());

  let mut spans = left;
  spans.push(Span::raw(" ".repeat(pad)));
  spans.push(right);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  match app.screen {
    Screen::Departments => table::draw(f, area, "Departments", &app.departments, app),
    Screen::Sellers => table::draw(f, area, "Sellers", &app.sellers, app),
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = if app.dialog.is_some() {
    ("EDIT", "Tab next  ←→ pick  Enter save  Esc cancel")
  } else if app.pending_removal().is_some() {
    ("CONFIRM", "y remove  n keep")
  } else if app.filter_active {
    ("SEARCH", "Type to filter  Esc clear  Enter keep")
  } else {
    ("NORMAL", "↑↓/jk move  n new  Enter edit  x remove  / search  r reload  q quit")
  };

  // List-level failures outrank everything else.
  let (status, status_style) = match app.list_message() {
    Some(message) => (message, Style::default().fg(Color::Red)),
    None if !app.status_msg.is_empty() => {
      (app.status_msg.clone(), Style::default().fg(Color::Green))
    }
    None => (hints.to_string(), Style::default().fg(Color::DarkGray)),
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let status_span = Span::styled(format!("  {status}"), status_style);

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, status_span])).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Confirmation ─────────────────────────────────────────────────────────────

fn draw_confirm(f: &mut Frame, area: Rect, target: &str) {
  let popup = centered(area, 50, 5);
  let block = Block::default()
    .title(" Confirmation ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));

  let text = vec![
    Line::from(format!("Remove {target}?")),
    Line::from(Span::styled("[y] yes  [n] no", Style::default().fg(Color::DarkGray))),
  ];

  f.render_widget(Clear, popup);
  f.render_widget(Paragraph::new(text).block(block), popup);
}

/// A `width` × `height` rectangle centred in `area`, clipped to fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  Rect {
    x: area.x + (area.width - width) / 2,
    y: area.y + (area.height - height) / 2,
    width,
    height,
  }
}
