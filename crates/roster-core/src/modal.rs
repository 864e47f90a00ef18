//! Windows and modal scopes.
//!
//! A dialog is opened as a child of the window that asked for it. While the
//! child is showing, its owner receives no input. Closing is terminal.

/// Identity of a window. The root window is depth 0, each modal child one
/// deeper than its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(u32);

impl WindowId {
  pub fn depth(self) -> u32 { self.0 }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
  pub id:    WindowId,
  pub title: String,
}

impl Window {
  /// The top-level application window.
  pub fn root(title: impl Into<String>) -> Self {
    Self { id: WindowId(0), title: title.into() }
  }

  /// A new window owned by `owner`.
  pub fn child_of(owner: &Window, title: impl Into<String>) -> Self {
    Self { id: WindowId(owner.id.0 + 1), title: title.into() }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
  /// Visible; the owner is blocked.
  Showing,
  /// Released. A closed scope is never reopened.
  Closed,
}

/// The lifetime of one modal dialog over its owner.
#[derive(Debug, Clone)]
pub struct ModalScope {
  owner:  WindowId,
  window: Window,
  state:  ModalState,
}

impl ModalScope {
  /// Open a modal child of `owner`; the owner is blocked from now on.
  pub fn open(owner: &Window, title: impl Into<String>) -> Self {
    let window = Window::child_of(owner, title);
    tracing::debug!(owner = owner.id.depth(), title = %window.title, "modal opened");
    Self { owner: owner.id, window, state: ModalState::Showing }
  }

  pub fn owner(&self) -> WindowId { self.owner }

  pub fn window(&self) -> &Window { &self.window }

  pub fn state(&self) -> ModalState { self.state }

  pub fn is_showing(&self) -> bool { self.state == ModalState::Showing }

  /// Whether this scope currently blocks input to `window`.
  pub fn blocks(&self, window: WindowId) -> bool { self.is_showing() && self.owner == window }

  /// Release the scope. Closing twice is a no-op.
  pub fn close(&mut self) {
    if self.state == ModalState::Showing {
      tracing::debug!(title = %self.window.title, "modal closed");
      self.state = ModalState::Closed;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn child_blocks_owner_until_closed() {
    let main = Window::root("Roster");
    let mut scope = ModalScope::open(&main, "Department");

    assert_eq!(scope.window().id.depth(), 1);
    assert!(scope.blocks(main.id));
    assert!(!scope.blocks(scope.window().id));

    scope.close();
    assert_eq!(scope.state(), ModalState::Closed);
    assert!(!scope.blocks(main.id));

    scope.close();
    assert_eq!(scope.state(), ModalState::Closed);
  }
}
