//! Application state machine and event dispatcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use roster_core::{
  entity::{Department, Entity, Seller},
  form::{DepartmentForm, SellerForm},
  list::{ListController, RemoveOutcome},
  modal::Window,
  service::SharedService,
  table::{Tabular, row},
};

use crate::dialog::Dialog;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  Departments,
  Sellers,
}

// ─── List view ────────────────────────────────────────────────────────────────

/// A list controller plus the cursor and filter over its rows.
pub struct ListView<E: Entity> {
  pub controller: ListController<E>,
  pub cursor:     usize,
}

impl<E: Entity + Tabular> ListView<E> {
  fn new(window: &Window, service: SharedService<E>) -> Self {
    let mut controller = ListController::new(window.clone());
    controller.set_service(service);
    Self { controller, cursor: 0 }
  }

  /// Rows matching `filter`, fuzzily, over their rendered cells.
  pub fn filtered(&self, filter: &str) -> Vec<E> {
    let items = self.controller.items();
    if filter.is_empty() {
      return items.clone();
    }
    let matcher = SkimMatcherV2::default();
    items
      .iter()
      .filter(|e| matcher.fuzzy_match(&row(E::columns(), e).join(" "), filter).is_some())
      .cloned()
      .collect()
  }

  fn cursor_row(&self, filter: &str) -> Option<E> {
    self.filtered(filter).into_iter().nth(self.cursor)
  }

  fn clamp_cursor(&mut self, filter: &str) {
    let len = self.filtered(filter).len();
    self.cursor = self.cursor.min(len.saturating_sub(1));
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen.
  pub screen: Screen,

  /// The main window; list views live here and own its dialogs.
  pub window: Window,

  pub departments: ListView<Department>,
  pub sellers:     ListView<Seller>,

  /// The modal dialog, while one is showing.
  pub dialog: Option<Dialog>,

  /// Current fuzzy-filter string (only active when `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Feeds the seller dialog's department picker.
  department_service: SharedService<Department>,
}

impl App {
  /// Wire both list views. The seller list reloads whenever departments
  /// change, since it shows department names.
  pub fn new(
    departments: SharedService<Department>,
    sellers: SharedService<Seller>,
  ) -> Self {
    let window = Window::root("Roster");
    let mut department_view = ListView::new(&window, departments.clone());
    let seller_view = ListView::new(&window, sellers);
    department_view.controller.subscribe(seller_view.controller.listener());

    Self {
      screen: Screen::Sellers,
      window,
      departments: department_view,
      sellers: seller_view,
      dialog: None,
      filter: String::new(),
      filter_active: false,
      status_msg: String::new(),
      department_service: departments,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Load both lists.
  pub fn load(&mut self) -> anyhow::Result<()> {
    self.departments.controller.update_table_view()?;
    self.sellers.controller.update_table_view()?;
    Ok(())
  }

  /// The list-level message of the current screen, if any.
  pub fn list_message(&self) -> Option<String> {
    match self.screen {
      Screen::Departments => self.departments.controller.message(),
      Screen::Sellers => self.sellers.controller.message(),
    }
  }

  /// Description of the row awaiting delete confirmation.
  pub fn pending_removal(&self) -> Option<String> {
    match self.screen {
      Screen::Departments => self
        .departments
        .controller
        .pending_removal()
        .map(|d| format!("department {:?}", d.name)),
      Screen::Sellers => self
        .sellers
        .controller
        .pending_removal()
        .map(|s| format!("seller {:?}", s.name)),
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  ///
  /// Errors are wiring defects and end the program.
  pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    // A showing dialog owns the keyboard; its parent gets nothing.
    if self.dialog.as_ref().is_some_and(|d| d.blocks(self.window.id)) {
      self.handle_dialog_key(key)?;
      return Ok(true);
    }

    if self.pending_removal().is_some() {
      self.handle_confirm_key(key)?;
      return Ok(true);
    }

    if self.filter_active {
      self.handle_filter_key(key);
      return Ok(true);
    }

    self.handle_list_key(key)
  }

  fn handle_dialog_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
    let Some(dialog) = self.dialog.as_mut() else { return Ok(()) };
    match key.code {
      KeyCode::Esc => dialog.cancel(),
      KeyCode::Enter => {
        if dialog.commit()?.is_saved() {
          self.status_msg = format!("{} saved", dialog.title());
        }
      }
      KeyCode::Tab | KeyCode::Down => dialog.focus_next(),
      KeyCode::BackTab | KeyCode::Up => dialog.focus_prev(),
      KeyCode::Left => dialog.cycle_choice(-1),
      KeyCode::Right => dialog.cycle_choice(1),
      KeyCode::Backspace => dialog.backspace(),
      KeyCode::Char(c) => dialog.type_char(c),
      _ => {}
    }
    if dialog.is_closed() {
      self.dialog = None;
      self.clamp_cursors();
    }
    Ok(())
  }

  fn handle_confirm_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
    let confirmed = match key.code {
      KeyCode::Char('y') | KeyCode::Char('Y') => true,
      KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
      _ => return Ok(()),
    };
    let outcome = match self.screen {
      Screen::Departments => self.departments.controller.resolve_removal(confirmed)?,
      Screen::Sellers => self.sellers.controller.resolve_removal(confirmed)?,
    };
    if outcome == RemoveOutcome::Removed {
      self.status_msg = "Removed".into();
    }
    self.clamp_cursors();
    Ok(())
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
      }
      KeyCode::Enter => self.filter_active = false,
      KeyCode::Backspace => {
        self.filter.pop();
      }
      KeyCode::Char(c) => self.filter.push(c),
      _ => {}
    }
    self.set_cursor(0);
  }

  fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    self.status_msg.clear();
    self.departments.controller.clear_message();
    self.sellers.controller.clear_message();

    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Screens
      KeyCode::Char('d') => self.switch(Screen::Departments),
      KeyCode::Char('s') => self.switch(Screen::Sellers),

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.visible_len();
        let cursor = self.cursor();
        if cursor + 1 < len {
          self.set_cursor(cursor + 1);
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        let cursor = self.cursor();
        self.set_cursor(cursor.saturating_sub(1));
      }

      // Filter
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.set_cursor(0);
      }

      // Reload
      KeyCode::Char('r') => {
        self.load()?;
        self.clamp_cursors();
      }

      // Create / edit / remove
      KeyCode::Char('n') => self.open_dialog(false)?,
      KeyCode::Enter | KeyCode::Char('e') => self.open_dialog(true)?,
      KeyCode::Char('x') | KeyCode::Delete => self.request_remove(),

      _ => {}
    }
    Ok(true)
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  fn switch(&mut self, screen: Screen) {
    if self.screen != screen {
      self.screen = screen;
      self.filter.clear();
      self.filter_active = false;
    }
  }

  /// Open a dialog for the row under the cursor (`edit`), or for a new
  /// record.
  fn open_dialog(&mut self, edit: bool) -> anyhow::Result<()> {
    let dialog = match self.screen {
      Screen::Departments => {
        let entity = if edit {
          let Some(row) = self.departments.cursor_row(&self.filter) else { return Ok(()) };
          row
        } else {
          Department::default()
        };
        let form = DepartmentForm::default();
        Dialog::department(self.departments.controller.create_dialog_form(entity, form)?)
      }
      Screen::Sellers => {
        let entity = if edit {
          let Some(row) = self.sellers.cursor_row(&self.filter) else { return Ok(()) };
          row
        } else {
          Seller::default()
        };
        let form = SellerForm::new(self.department_service.clone());
        Dialog::seller(self.sellers.controller.create_dialog_form(entity, form)?)
      }
    };
    self.dialog = Some(dialog);
    Ok(())
  }

  fn request_remove(&mut self) {
    match self.screen {
      Screen::Departments => {
        if let Some(entity) = self.departments.cursor_row(&self.filter) {
          self.departments.controller.request_remove(entity);
        }
      }
      Screen::Sellers => {
        if let Some(entity) = self.sellers.cursor_row(&self.filter) {
          self.sellers.controller.request_remove(entity);
        }
      }
    }
  }

  // ── Cursor ────────────────────────────────────────────────────────────────

  pub fn cursor(&self) -> usize {
    match self.screen {
      Screen::Departments => self.departments.cursor,
      Screen::Sellers => self.sellers.cursor,
    }
  }

  fn set_cursor(&mut self, cursor: usize) {
    match self.screen {
      Screen::Departments => self.departments.cursor = cursor,
      Screen::Sellers => self.sellers.cursor = cursor,
    }
  }

  fn visible_len(&self) -> usize {
    match self.screen {
      Screen::Departments => self.departments.filtered(&self.filter).len(),
      Screen::Sellers => self.sellers.filtered(&self.filter).len(),
    }
  }

  fn clamp_cursors(&mut self) {
    self.departments.clamp_cursor(&self.filter);
    self.sellers.clamp_cursor(&self.filter);
  }
}

#[cfg(test)]
mod tests {
  use std::rc::Rc;

  use crossterm::event::KeyEvent;
  use roster_store_sqlite::SqliteStore;

  use super::*;

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
      app.handle_key(key(KeyCode::Char(c))).unwrap();
    }
  }

  fn app() -> App {
    let store = Rc::new(SqliteStore::open_in_memory().unwrap());
    store.save_department(&Department { id: None, name: "Computers".into() }).unwrap();
    let mut app = App::new(store.clone(), store);
    app.load().unwrap();
    app
  }

  #[test]
  fn creating_a_department_refreshes_the_list() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('d'))).unwrap();
    app.handle_key(key(KeyCode::Char('n'))).unwrap();
    assert!(app.dialog.is_some());

    // 'q' is typed into the dialog, not treated as quit.
    type_str(&mut app, "Aquarium");
    assert!(app.handle_key(key(KeyCode::Enter)).unwrap());

    assert!(app.dialog.is_none());
    assert_eq!(app.departments.controller.items().len(), 2);
    assert_eq!(app.status_msg, "Department saved");
  }

  #[test]
  fn invalid_seller_keeps_dialog_open() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('n'))).unwrap();
    type_str(&mut app, "Bob");
    app.handle_key(key(KeyCode::Enter)).unwrap();

    let dialog = app.dialog.as_ref().unwrap();
    assert_eq!(dialog.error_text(roster_core::validation::Field::Name), "");
    assert_eq!(dialog.error_text(roster_core::validation::Field::Email), "field required");
    assert!(app.sellers.controller.items().is_empty());
  }

  #[test]
  fn escape_cancels_dialog() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('n'))).unwrap();
    app.handle_key(key(KeyCode::Esc)).unwrap();
    assert!(app.dialog.is_none());
    assert!(app.sellers.controller.items().is_empty());
  }

  #[test]
  fn removing_a_department_in_use_shows_message() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('n'))).unwrap();
    type_str(&mut app, "Bob");
    app.handle_key(key(KeyCode::Tab)).unwrap();
    type_str(&mut app, "bob@gmail.com");
    app.handle_key(key(KeyCode::Tab)).unwrap();
    type_str(&mut app, "21/04/1990");
    app.handle_key(key(KeyCode::Tab)).unwrap();
    type_str(&mut app, "1200.50");
    app.handle_key(key(KeyCode::Enter)).unwrap();
    assert!(app.dialog.is_none());
    {
      let sellers = app.sellers.controller.items();
      assert_eq!(sellers.len(), 1);
      assert_eq!(sellers[0].base_salary, 1200.5);
      assert_eq!(sellers[0].birth_date, chrono::NaiveDate::from_ymd_opt(1990, 4, 21));
    }

    app.handle_key(key(KeyCode::Char('d'))).unwrap();
    app.handle_key(key(KeyCode::Char('x'))).unwrap();
    assert!(app.pending_removal().is_some());
    app.handle_key(key(KeyCode::Char('y'))).unwrap();

    assert_eq!(app.departments.controller.items().len(), 1);
    assert!(app.list_message().is_some());
  }

  #[test]
  fn filter_narrows_rows() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('d'))).unwrap();
    app.handle_key(key(KeyCode::Char('/'))).unwrap();
    type_str(&mut app, "zzz");
    assert_eq!(app.visible_len(), 0);
    app.handle_key(key(KeyCode::Esc)).unwrap();
    assert_eq!(app.visible_len(), 1);
  }
}
