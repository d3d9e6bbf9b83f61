//! The node contract: configuration records, hooks, the execution skeleton and
//! the identifier-keyed resolver.

pub mod algorithm;
pub mod hooks;
pub mod params;
pub mod registry;

use std::any::Any;

/// The Alias for serde_json::Value, used for node inputs, results and kwargs
pub type NodeValue = serde_json::Value;

/// A helper trait that just provides the `as_any` method.
/// Needed for downcasting type-erased nodes back to `Node<A>`.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: 'static> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
