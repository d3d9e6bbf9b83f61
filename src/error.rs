use thiserror::Error;

/// Every failure the node contract can surface.
///
/// None of these are retried or recovered inside the crate; they are contract
/// violations meant to reach the caller unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// A supplied or defaulted configuration value does not fit the declared shape.
    #[error("invalid parameters for {type_name}: {message}")]
    Validation {
        type_name: &'static str,
        message: String,
    },

    /// Assignment attempted on a frozen configuration record.
    #[error("{type_name} is immutable: cannot assign field '{field}'")]
    ImmutabilityViolation {
        type_name: &'static str,
        field: String,
    },

    /// `run`, `serialize` or `deserialize` called on a type that never provided it.
    #[error("{type_name}.{operation} not implemented!")]
    NotImplemented {
        type_name: &'static str,
        operation: &'static str,
    },

    #[error("could not locate algorithm {0}")]
    Lookup(String),

    #[error("hook failed: {0}")]
    Hook(String),

    /// Raised by a concrete `run` implementation.
    #[error("{type_name} failed: {message}")]
    Execution {
        type_name: &'static str,
        message: String,
    },
}

impl Error {
    pub fn validation(type_name: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            type_name,
            message: message.into(),
        }
    }

    pub fn execution(type_name: &'static str, message: impl Into<String>) -> Self {
        Error::Execution {
            type_name,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Last path segment of `T`'s type name, generics stripped (`a::b::Adder<x::Y>` -> `Adder`).
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
