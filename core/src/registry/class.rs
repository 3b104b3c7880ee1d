// caller/src/registry/class.rs

//! Class definitions: a constructor, a method table, and the interface names
//! instances satisfy.

use crate::core::handler::{Arguments, ConstructorBody, MethodBody};
use crate::core::signature::Signature;
use crate::core::value::{Object, Value};
use anyhow::anyhow;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Method name used when an object or a bare class name is queued as a step.
pub const INVOKE: &str = "invoke";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
  #[default]
  Public,
  Protected,
  Private,
}

#[derive(Clone)]
pub struct MethodDef {
  name: String,
  visibility: Visibility,
  is_static: bool,
  signature: Signature,
  body: MethodBody,
}

impl MethodDef {
  /// A public instance method. The receiver state is downcast to `T`.
  pub fn instance<T, F, R>(name: impl Into<String>, signature: Signature, body: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&T, Arguments) -> anyhow::Result<R> + Send + Sync + 'static,
    R: Into<Value>,
  {
    let name: String = name.into();
    let method_name = name.clone();
    let body: MethodBody = Arc::new(move |this: Option<&Object>, args: Arguments| -> anyhow::Result<Value> {
      let this = this.ok_or_else(|| anyhow!("method `{}` called without an instance", method_name))?;
      let state = this.downcast_ref::<T>().ok_or_else(|| {
        anyhow!(
          "receiver of `{}::{}` is not a `{}`",
          this.class(),
          method_name,
          type_name::<T>()
        )
      })?;
      body(state, args).map(Into::into)
    });
    Self {
      name,
      visibility: Visibility::Public,
      is_static: false,
      signature,
      body,
    }
  }

  /// A public static method.
  pub fn static_fn<F, R>(name: impl Into<String>, signature: Signature, body: F) -> Self
  where
    F: Fn(Arguments) -> anyhow::Result<R> + Send + Sync + 'static,
    R: Into<Value>,
  {
    Self {
      name: name.into(),
      visibility: Visibility::Public,
      is_static: true,
      signature,
      body: Arc::new(move |_this: Option<&Object>, args: Arguments| -> anyhow::Result<Value> {
        body(args).map(Into::into)
      }),
    }
  }

  pub fn visibility(mut self, visibility: Visibility) -> Self {
    self.visibility = visibility;
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn is_public(&self) -> bool {
    self.visibility == Visibility::Public
  }

  pub fn is_static(&self) -> bool {
    self.is_static
  }

  pub fn signature(&self) -> &Signature {
    &self.signature
  }

  pub fn call(&self, this: Option<&Object>, args: Arguments) -> anyhow::Result<Value> {
    (self.body)(this, args)
  }
}

impl fmt::Debug for MethodDef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MethodDef")
      .field("name", &self.name)
      .field("visibility", &self.visibility)
      .field("is_static", &self.is_static)
      .field("signature", &self.signature)
      .finish_non_exhaustive()
  }
}

#[derive(Clone)]
struct ConstructorDef {
  signature: Signature,
  body: ConstructorBody,
}

/// A registered class.
///
/// Classes without a declared constructor instantiate with `()` as their state.
#[derive(Clone)]
pub struct ClassDef {
  name: String,
  interfaces: Vec<String>,
  constructor: Option<ConstructorDef>,
  methods: HashMap<String, Arc<MethodDef>>,
}

impl ClassDef {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      interfaces: Vec::new(),
      constructor: None,
      methods: HashMap::new(),
    }
  }

  pub fn implements(mut self, interface: impl Into<String>) -> Self {
    self.interfaces.push(interface.into());
    self
  }

  pub fn constructor<T, F>(mut self, signature: Signature, body: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(Arguments) -> anyhow::Result<T> + Send + Sync + 'static,
  {
    let body: ConstructorBody = Arc::new(move |args: Arguments| -> anyhow::Result<Arc<dyn Any + Send + Sync>> {
      let state: Arc<dyn Any + Send + Sync> = Arc::new(body(args)?);
      Ok(state)
    });
    self.constructor = Some(ConstructorDef { signature, body });
    self
  }

  pub fn with_method(mut self, method: MethodDef) -> Self {
    self.methods.insert(method.name.clone(), Arc::new(method));
    self
  }

  /// Shorthand for a public instance method.
  pub fn method<T, F, R>(self, name: impl Into<String>, signature: Signature, body: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&T, Arguments) -> anyhow::Result<R> + Send + Sync + 'static,
    R: Into<Value>,
  {
    self.with_method(MethodDef::instance(name, signature, body))
  }

  /// Shorthand for a public static method.
  pub fn static_method<F, R>(self, name: impl Into<String>, signature: Signature, body: F) -> Self
  where
    F: Fn(Arguments) -> anyhow::Result<R> + Send + Sync + 'static,
    R: Into<Value>,
  {
    self.with_method(MethodDef::static_fn(name, signature, body))
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn method_def(&self, name: &str) -> Option<&Arc<MethodDef>> {
    self.methods.get(name)
  }

  /// Constructor signature. Empty when no constructor is declared.
  pub fn constructor_signature(&self) -> Signature {
    self
      .constructor
      .as_ref()
      .map(|c| c.signature.clone())
      .unwrap_or_default()
  }

  /// Builds a new instance from already-bound constructor arguments.
  pub fn instantiate(self: &Arc<Self>, args: Arguments) -> anyhow::Result<Object> {
    let state: Arc<dyn Any + Send + Sync> = match &self.constructor {
      Some(ctor) => (ctor.body)(args)?,
      None => Arc::new(()),
    };
    Ok(self.attach(Object::from_shared(self.name.clone(), state), Arc::clone(self)))
  }

  /// Wraps existing state as an instance of this class without running the constructor.
  pub fn wrap<T: Any + Send + Sync>(&self, state: T) -> Object {
    self.attach(Object::new(self.name.clone(), state), Arc::new(self.clone()))
  }

  fn attach(&self, object: Object, definition: Arc<ClassDef>) -> Object {
    object
      .with_interfaces(self.interfaces.iter().cloned())
      .with_definition(definition)
  }
}

impl fmt::Debug for ClassDef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut methods: Vec<&str> = self.methods.keys().map(String::as_str).collect();
    methods.sort_unstable();
    f.debug_struct("ClassDef")
      .field("name", &self.name)
      .field("interfaces", &self.interfaces)
      .field("has_constructor", &self.constructor.is_some())
      .field("methods", &methods)
      .finish()
  }
}
