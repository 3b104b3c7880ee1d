// caller/src/core/value.rs

//! Dynamic runtime values passed into and returned from callables, plus the
//! type tags used to declare and check parameter types.

use crate::registry::ClassDef;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Declared type of a parameter, and the runtime category of a `Value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
  /// Accepts anything. A declared set containing `Mixed` is treated as untyped.
  Mixed,
  Null,
  Bool,
  Int,
  Float,
  String,
  Sequence,
  Mapping,
  /// A registered class or interface name.
  Class(String),
  /// The execution context type. Parameters declaring it receive the context handle.
  Context,
}

impl TypeTag {
  pub fn name(&self) -> &str {
    match self {
      TypeTag::Mixed => "mixed",
      TypeTag::Null => "null",
      TypeTag::Bool => "boolean",
      TypeTag::Int => "integer",
      TypeTag::Float => "float",
      TypeTag::String => "string",
      TypeTag::Sequence => "sequence",
      TypeTag::Mapping => "mapping",
      TypeTag::Class(name) => name,
      TypeTag::Context => "context",
    }
  }
}

impl fmt::Display for TypeTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// An instance of a class.
///
/// Cloning is cheap: the state is shared behind an `Arc`. Objects built by
/// `ClassDef::wrap` or `ClassDef::instantiate` keep their class definition, so
/// they can be queued without registering that class anywhere.
#[derive(Clone)]
pub struct Object {
  class: Arc<str>,
  interfaces: Arc<[String]>,
  definition: Option<Arc<ClassDef>>,
  state: Arc<dyn Any + Send + Sync>,
}

impl Object {
  pub fn new<T: Any + Send + Sync>(class: impl Into<String>, state: T) -> Self {
    Self::from_shared(class, Arc::new(state))
  }

  pub(crate) fn from_shared(class: impl Into<String>, state: Arc<dyn Any + Send + Sync>) -> Self {
    let class: String = class.into();
    Self {
      class: Arc::from(class),
      interfaces: Arc::from(Vec::<String>::new()),
      definition: None,
      state,
    }
  }

  pub(crate) fn with_definition(mut self, definition: Arc<ClassDef>) -> Self {
    self.definition = Some(definition);
    self
  }

  /// Declares interface names this instance also satisfies for type checks.
  pub fn with_interfaces<I, S>(mut self, interfaces: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let names: Vec<String> = interfaces.into_iter().map(Into::into).collect();
    self.interfaces = Arc::from(names);
    self
  }

  pub fn class(&self) -> &str {
    &self.class
  }

  /// The definition this object was built from. `None` for `Object::new`.
  pub fn definition(&self) -> Option<&Arc<ClassDef>> {
    self.definition.as_ref()
  }

  /// True when `name` is this object's class or one of its interfaces.
  pub fn is_a(&self, name: &str) -> bool {
    &*self.class == name || self.interfaces.iter().any(|i| i == name)
  }

  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    self.state.downcast_ref::<T>()
  }

  pub fn ptr_eq(&self, other: &Object) -> bool {
    Arc::ptr_eq(&self.state, &other.state)
  }
}

impl fmt::Debug for Object {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Object")
      .field("class", &self.class)
      .field("interfaces", &self.interfaces)
      .field("has_definition", &self.definition.is_some())
      .finish_non_exhaustive()
  }
}

/// A dynamically typed value.
#[derive(Debug, Clone, Default)]
pub enum Value {
  #[default]
  Null,
  Bool(bool),
  Int(i64),
  Float(f64),
  String(String),
  Sequence(Vec<Value>),
  Mapping(BTreeMap<String, Value>),
  Object(Object),
}

impl Value {
  /// Canonical runtime category used by the argument binder's type check.
  pub fn type_tag(&self) -> TypeTag {
    match self {
      Value::Null => TypeTag::Null,
      Value::Bool(_) => TypeTag::Bool,
      Value::Int(_) => TypeTag::Int,
      Value::Float(_) => TypeTag::Float,
      Value::String(_) => TypeTag::String,
      Value::Sequence(_) => TypeTag::Sequence,
      Value::Mapping(_) => TypeTag::Mapping,
      Value::Object(obj) => TypeTag::Class(obj.class().to_string()),
    }
  }

  /// Whether this value satisfies a declared type tag.
  pub fn matches(&self, tag: &TypeTag) -> bool {
    match (tag, self) {
      (TypeTag::Mixed, _) => true,
      (TypeTag::Class(name), Value::Object(obj)) => obj.is_a(name),
      (tag, value) => *tag == value.type_tag(),
    }
  }

  pub fn is_null(&self) -> bool {
    matches!(self, Value::Null)
  }

  pub fn as_int(&self) -> Option<i64> {
    match self {
      Value::Int(i) => Some(*i),
      _ => None,
    }
  }

  pub fn as_float(&self) -> Option<f64> {
    match self {
      Value::Float(f) => Some(*f),
      Value::Int(i) => Some(*i as f64),
      _ => None,
    }
  }

  pub fn as_sequence(&self) -> Option<&[Value]> {
    match self {
      Value::Sequence(items) => Some(items),
      _ => None,
    }
  }
}

// Objects compare by identity, everything else structurally.
impl PartialEq for Value {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Value::Null, Value::Null) => true,
      (Value::Bool(a), Value::Bool(b)) => a == b,
      (Value::Int(a), Value::Int(b)) => a == b,
      (Value::Float(a), Value::Float(b)) => a == b,
      (Value::String(a), Value::String(b)) => a == b,
      (Value::Sequence(a), Value::Sequence(b)) => a == b,
      (Value::Mapping(a), Value::Mapping(b)) => a == b,
      (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
      _ => false,
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Null => Ok(()),
      Value::Bool(b) => write!(f, "{}", b),
      Value::Int(i) => write!(f, "{}", i),
      Value::Float(x) => write!(f, "{}", x),
      Value::String(s) => f.write_str(s),
      Value::Sequence(items) => {
        f.write_str("[")?;
        for (idx, item) in items.iter().enumerate() {
          if idx > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{}", item)?;
        }
        f.write_str("]")
      }
      Value::Mapping(map) => {
        f.write_str("{")?;
        for (idx, (key, item)) in map.iter().enumerate() {
          if idx > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{}: {}", key, item)?;
        }
        f.write_str("}")
      }
      Value::Object(obj) => f.write_str(obj.class()),
    }
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Bool(b)
  }
}

impl From<i32> for Value {
  fn from(i: i32) -> Self {
    Value::Int(i64::from(i))
  }
}

impl From<i64> for Value {
  fn from(i: i64) -> Self {
    Value::Int(i)
  }
}

impl From<u32> for Value {
  fn from(i: u32) -> Self {
    Value::Int(i64::from(i))
  }
}

impl From<f64> for Value {
  fn from(x: f64) -> Self {
    Value::Float(x)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::String(s.to_string())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::String(s)
  }
}

impl From<Object> for Value {
  fn from(obj: Object) -> Self {
    Value::Object(obj)
  }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
  fn from(items: Vec<V>) -> Self {
    Value::Sequence(items.into_iter().map(Into::into).collect())
  }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Value {
  fn from(map: BTreeMap<String, V>) -> Self {
    Value::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
  }
}

impl<V: Into<Value>> From<Option<V>> for Value {
  fn from(opt: Option<V>) -> Self {
    opt.map_or(Value::Null, Into::into)
  }
}

impl From<()> for Value {
  fn from(_: ()) -> Self {
    Value::Null
  }
}
