// caller/src/core/values.rs

//! Caller-supplied value sources for `Pipeline::execute`.
//!
//! A `Values` container behaves like an insertion-ordered map whose keys are
//! either positions or names. Whether it is bound positionally or by name is
//! decided once per binding by [`Values::binding_mode`].

use super::value::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
  Index(usize),
  Name(String),
}

impl fmt::Display for ValueKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValueKey::Index(i) => write!(f, "{}", i),
      ValueKey::Name(n) => f.write_str(n),
    }
  }
}

impl From<usize> for ValueKey {
  fn from(i: usize) -> Self {
    ValueKey::Index(i)
  }
}

impl From<&str> for ValueKey {
  fn from(s: &str) -> Self {
    ValueKey::Name(s.to_string())
  }
}

impl From<String> for ValueKey {
  fn from(s: String) -> Self {
    ValueKey::Name(s)
  }
}

/// How a `Values` container is matched against a parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingMode {
  /// Keys are exactly `0..n` in iteration order: match by position.
  Ordered,
  /// Anything else: match by parameter name.
  Named,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values {
  entries: Vec<(ValueKey, Value)>,
}

impl Values {
  pub fn new() -> Self {
    Self::default()
  }

  /// Positional values, keyed `0..n`.
  pub fn ordered<I, V>(items: I) -> Self
  where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
  {
    let entries = items
      .into_iter()
      .enumerate()
      .map(|(idx, v)| (ValueKey::Index(idx), v.into()))
      .collect();
    Self { entries }
  }

  /// Values keyed by parameter name.
  pub fn named<I, K, V>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
  {
    Self::from_entries(pairs.into_iter().map(|(k, v)| (ValueKey::Name(k.into()), v.into())))
  }

  /// Arbitrary keyed entries. A repeated key overwrites the earlier value in place.
  pub fn from_entries<I>(entries: I) -> Self
  where
    I: IntoIterator<Item = (ValueKey, Value)>,
  {
    let mut values = Self::new();
    for (key, value) in entries {
      values.insert(key, value);
    }
    values
  }

  pub fn insert(&mut self, key: impl Into<ValueKey>, value: impl Into<Value>) -> &mut Self {
    let key = key.into();
    let value = value.into();
    match self.entries.iter_mut().find(|(k, _)| *k == key) {
      Some(slot) => slot.1 = value,
      None => self.entries.push((key, value)),
    }
    self
  }

  pub fn get(&self, key: &ValueKey) -> Option<&Value> {
    self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
  }

  pub fn positional(&self, index: usize) -> Option<&Value> {
    self.get(&ValueKey::Index(index))
  }

  pub fn by_name(&self, name: &str) -> Option<&Value> {
    self
      .entries
      .iter()
      .find(|(k, _)| matches!(k, ValueKey::Name(n) if n == name))
      .map(|(_, v)| v)
  }

  /// Classifies the container as a whole. The empty container is ordered.
  pub fn binding_mode(&self) -> BindingMode {
    let contiguous = self
      .entries
      .iter()
      .enumerate()
      .all(|(expected, (key, _))| *key == ValueKey::Index(expected));
    if contiguous {
      BindingMode::Ordered
    } else {
      BindingMode::Named
    }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
