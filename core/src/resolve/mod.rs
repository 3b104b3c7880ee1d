// caller/src/resolve/mod.rs

//! Signature extraction, argument binding and dispatch.

pub mod binder;
pub mod dispatcher;
pub mod extractor;

pub use binder::bind;
pub use dispatcher::invoke;
pub use extractor::{describe, SignatureExtractor, CONTEXT_PARAMETER};
