use std::collections::HashSet;

use super::entities::LineItem;
use super::value_objects::LineItemKey;

/// Ordered line items of one form, addressed by row key
///
/// Display order is insertion order. Keys are unique at all times: rows handed
/// in with a key already present are re-keyed instead of being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineItemCollection {
  rows: Vec<LineItem>,
}

impl LineItemCollection {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends `blank` under a fresh local key and returns that key
  pub fn append(&mut self, mut blank: LineItem) -> LineItemKey {
    blank.key = LineItemKey::local();
    let key = blank.key.clone();
    self.rows.push(blank);
    key
  }

  pub fn remove_by_id(&mut self, key: &LineItemKey) -> bool {
    match self.rows.iter().position(|row| &row.key == key) {
      Some(index) => {
        self.rows.remove(index);
        true
      }
      None => false,
    }
  }

  /// Replaces every row, keeping the keys the rows arrive with
  pub fn replace_all(&mut self, items: Vec<LineItem>) {
    let mut seen = HashSet::with_capacity(items.len());
    self.rows = items
      .into_iter()
      .map(|mut item| {
        if !seen.insert(item.key.clone()) {
          tracing::warn!(key = %item.key, "Duplicate line item key, assigning a local key");
          item.key = LineItemKey::local();
          seen.insert(item.key.clone());
        }
        item
      })
      .collect();
  }

  pub fn to_ordered_sequence(&self) -> &[LineItem] {
    &self.rows
  }

  pub fn get(&self, key: &LineItemKey) -> Option<&LineItem> {
    self.rows.iter().find(|row| &row.key == key)
  }

  pub fn get_mut(&mut self, key: &LineItemKey) -> Option<&mut LineItem> {
    self.rows.iter_mut().find(|row| &row.key == key)
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
    self.rows.iter()
  }
}
