use crate::core::algorithm::{Algorithm, Args, Executable, Node};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Builds a type-erased node from keyword arguments.
pub type Constructor = fn(Args) -> Result<Box<dyn Executable>>;

/// The [`Constructor`] for `Node<A>`.
pub fn construct<A: Algorithm + Default>(args: Args) -> Result<Box<dyn Executable>> {
    Ok(Box::new(Node::<A>::new(args)?))
}

/// A link-time registration, submitted by [`register_algorithm!`](crate::register_algorithm).
pub struct Registration {
    pub identifier: &'static str,
    pub constructor: Constructor,
}

impl Registration {
    pub const fn new(identifier: &'static str, constructor: Constructor) -> Self {
        Self {
            identifier,
            constructor,
        }
    }
}

inventory::collect!(Registration);

/// Maps textual identifiers to node constructors.
#[derive(Default, Clone)]
pub struct Registry {
    constructors: HashMap<String, Constructor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every algorithm registered through [`register_algorithm!`](crate::register_algorithm)
    /// in the final binary.
    pub fn from_inventory() -> Self {
        let mut registry = Self::new();
        for registration in inventory::iter::<Registration> {
            registry.register_with(registration.identifier, registration.constructor);
        }
        log::debug!("Collected {} registered algorithm(s)", registry.len());
        registry
    }

    pub fn register<A: Algorithm + Default>(&mut self, identifier: impl Into<String>) -> &mut Self {
        self.register_with(identifier, construct::<A>)
    }

    /// Registers a constructor, replacing any previous one under the same identifier.
    pub fn register_with(
        &mut self,
        identifier: impl Into<String>,
        constructor: Constructor,
    ) -> &mut Self {
        let identifier = identifier.into();
        if self.constructors.contains_key(&identifier) {
            log::warn!(
                "Algorithm {} was already registered, overwriting it.",
                &identifier
            );
        }
        self.constructors.insert(identifier, constructor);
        self
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.constructors.contains_key(identifier)
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Resolves `identifier` and builds a node from `args`.
    ///
    /// An unknown identifier is a [`Error::Lookup`]; errors raised while building
    /// the node are returned as they are.
    pub fn instantiate(&self, identifier: &str, args: Args) -> Result<Box<dyn Executable>> {
        let constructor = self
            .constructors
            .get(identifier)
            .ok_or_else(|| Error::Lookup(identifier.to_string()))?;

        log::debug!("Instantiating {}", identifier);
        constructor(args)
    }
}

static GLOBAL_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry, collected from link-time registrations on first use.
pub fn global() -> &'static Registry {
    GLOBAL_REGISTRY.get_or_init(Registry::from_inventory)
}

/// Builds a node from the process-wide registry.
pub fn instantiate(identifier: &str, args: Args) -> Result<Box<dyn Executable>> {
    global().instantiate(identifier, args)
}

/// Registers an [`Algorithm`] with the process-wide registry at link time.
///
/// Without an explicit identifier the Rust path of the type is used, e.g.
/// `my_crate::nodes::Adder`.
///
/// ```rust,ignore
/// stagekit::register_algorithm!(Adder, "pipeline.nodes.Adder");
/// stagekit::register_algorithm!(Scaler);
/// ```
#[macro_export]
macro_rules! register_algorithm {
    ($ty:ty, $identifier:expr) => {
        $crate::inventory::submit! {
            $crate::registry::Registration::new(
                $identifier,
                $crate::registry::construct::<$ty>,
            )
        }
    };
    ($ty:ty) => {
        $crate::register_algorithm!($ty, concat!(module_path!(), "::", stringify!($ty)));
    };
}
