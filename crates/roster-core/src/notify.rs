//! Change notification: a subscriber list fired after a dataset changes.
//!
//! Delivery is synchronous and in subscription order, on the caller's
//! stack. Subscribing the same observer twice fires it twice.

use std::{fmt, rc::Rc};

/// Something that wants to know when the underlying data changed.
pub trait DataChangeListener {
  fn on_data_changed(&self);
}

impl<F: Fn()> DataChangeListener for F {
  fn on_data_changed(&self) { self() }
}

/// A publish/subscribe channel carrying "the dataset changed".
#[derive(Clone, Default)]
pub struct NotificationChannel {
  subscribers: Vec<Rc<dyn DataChangeListener>>,
}

impl NotificationChannel {
  pub fn new() -> Self { Self::default() }

  pub fn subscribe(&mut self, listener: Rc<dyn DataChangeListener>) {
    self.subscribers.push(listener);
  }

  /// Copy every subscriber of `other` into this channel.
  pub fn subscribe_all(&mut self, other: &NotificationChannel) {
    self.subscribers.extend(other.subscribers.iter().cloned());
  }

  /// Invoke every subscriber once, in subscription order.
  pub fn publish(&self) {
    tracing::debug!(subscribers = self.subscribers.len(), "publishing data change");
    for listener in &self.subscribers {
      listener.on_data_changed();
    }
  }

  pub fn len(&self) -> usize { self.subscribers.len() }

  pub fn is_empty(&self) -> bool { self.subscribers.is_empty() }
}

impl fmt::Debug for NotificationChannel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("NotificationChannel")
      .field("subscribers", &self.subscribers.len())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use super::*;

  #[test]
  fn publish_fires_in_subscription_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut channel = NotificationChannel::new();
    for tag in ["first", "second", "third"] {
      let log = log.clone();
      channel.subscribe(Rc::new(move || log.borrow_mut().push(tag)));
    }

    channel.publish();
    assert_eq!(*log.borrow(), ["first", "second", "third"]);
  }

  #[test]
  fn duplicate_subscription_fires_twice() {
    let hits = Rc::new(RefCell::new(0));
    let listener: Rc<dyn DataChangeListener> = {
      let hits = hits.clone();
      Rc::new(move || *hits.borrow_mut() += 1)
    };
    let mut channel = NotificationChannel::new();
    channel.subscribe(listener.clone());
    channel.subscribe(listener);

    channel.publish();
    assert_eq!(*hits.borrow(), 2);
  }

  #[test]
  fn subscribe_all_copies_subscribers() {
    let hits = Rc::new(RefCell::new(0));
    let mut source = NotificationChannel::new();
    {
      let hits = hits.clone();
      source.subscribe(Rc::new(move || *hits.borrow_mut() += 1));
    }
    let mut target = NotificationChannel::new();
    target.subscribe_all(&source);

    assert_eq!(target.len(), 1);
    target.publish();
    assert_eq!(*hits.borrow(), 1);
  }
}
