//! # Stagekit
//!
//! The shared contract every node of a multi-stage processing pipeline satisfies:
//! a validated, immutable configuration record, a hook-instrumented execution
//! skeleton, and a resolver that builds nodes from textual identifiers.
//!
//! ## Features
//!
//! - **Frozen Configuration**: Parameters are validated once, at construction, and never change
//! - **Uniform Execution**: Every node runs start hooks, its own `run`, then end hooks
//! - **Dynamic Instantiation**: Build any registered node from an identifier and a kwargs map
//!
//! ## Quick Start
//!
//! ```rust
//! use stagekit::prelude::*;
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! #[serde(default)]
//! struct AdderParams {
//!     increment: i64,
//! }
//!
//! impl Default for AdderParams {
//!     fn default() -> Self {
//!         Self { increment: 1 }
//!     }
//! }
//!
//! impl Parameters for AdderParams {}
//!
//! #[derive(Default)]
//! struct Adder;
//!
//! impl Algorithm for Adder {
//!     type Params = AdderParams;
//!
//!     fn run(&self, params: &AdderParams, input: NodeValue) -> stagekit::Result<NodeValue> {
//!         Ok(json!(input.as_i64().unwrap_or_default() + params.increment))
//!     }
//! }
//!
//! let node = Node::<Adder>::new(Args::new().param("increment", 3)).unwrap();
//! assert_eq!(node.call(json!(5)).unwrap(), json!(8));
//! ```
//!
//! ## Module Organization
//!
//! - [`params`]: Configuration records and the [`Parameters`] shape trait
//! - [`hooks`]: The [`Hook`] observer interface and built-in hooks
//! - [`algorithm`]: The [`Algorithm`] trait, [`Node`] and the type-erased [`Executable`]
//! - [`registry`]: Identifier-keyed construction
//! - [`prelude`]: Commonly used types and traits (import with `use stagekit::prelude::*`)

// ============================================================================
// Core Module
// ============================================================================

mod core;
mod error;

// ============================================================================
// Public Re-exports - Granular Imports
// ============================================================================

pub use crate::core::{algorithm, hooks, params, registry};

pub use crate::core::NodeValue;
pub use crate::core::algorithm::{Algorithm, Args, CALLBACKS_KEY, Executable, Node};
pub use crate::core::hooks::{Hook, HookList, LogHook, Phase, TraceEntry, TraceHook};
pub use crate::core::params::{ConfigRecord, EmptyParams, Parameters};
pub use crate::core::registry::{Registration, Registry, instantiate};
pub use crate::error::{Error, Result};

#[doc(hidden)]
pub use inventory;

// ============================================================================
// Prelude Module - Convenient Bulk Imports
// ============================================================================

/// The main prelude: imports everything needed to declare and run a node.
///
/// # Example
/// ```rust
/// use stagekit::prelude::*;
/// ```
pub mod prelude {
    pub use super::{
        // Construction
        Algorithm,
        Args,
        ConfigRecord,
        EmptyParams,
        Executable,
        // Hooks
        Hook,
        Node,
        NodeValue,
        Parameters,
        // Resolution
        Registry,
        instantiate,
    };
}

// ============================================================================
// Re-export commonly used external types for convenience
// ============================================================================

pub use serde_json::Map as JsonMap;

// ============================================================================
// Library Metadata
// ============================================================================

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");
