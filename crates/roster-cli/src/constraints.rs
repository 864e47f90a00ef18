//! Key filters for text inputs.
//!
//! A constraint decides whether a typed character may be appended to the
//! current text. It never validates the whole value; that is the form's job
//! at commit time.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
  /// Any printable character, up to `max` characters.
  Text { max: usize },
  /// Digits and at most one decimal point.
  Decimal,
  /// Digits and `/`, up to `dd/mm/yyyy`.
  Date,
}

const DATE_LEN: usize = 10;

impl Constraint {
  pub fn accepts(self, current: &str, c: char) -> bool {
    if c.is_control() {
      return false;
    }
    match self {
      Constraint::Text { max } => current.chars().count() < max,
      Constraint::Decimal => c.is_ascii_digit() || (c == '.' && !current.contains('.')),
      Constraint::Date => current.len() < DATE_LEN && (c.is_ascii_digit() || c == '/'),
    }
  }

  /// Append `c` to `text` if the constraint allows it.
  pub fn push(self, text: &mut String, c: char) -> bool {
    let ok = self.accepts(text, c);
    if ok {
      text.push(c);
    }
    ok
  }
}
