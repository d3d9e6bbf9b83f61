use crate::core::NodeValue;
use crate::error::{Error, Result, short_type_name};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Map;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// The shape of a node's configuration.
///
/// Field types and `#[serde(default)]` values form the declared shape; keys the
/// shape does not name are ignored when a record is built. `validate` adds checks
/// a type alone cannot express (ranges, non-empty strings, ...).
pub trait Parameters: Serialize + DeserializeOwned + fmt::Debug + Send + Sync + 'static {
    /// Extra shape checks, run after deserialization and before the record is frozen.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// The record's `serialize` contract: produce a transportable representation.
    ///
    /// Not provided by default; fails with [`Error::NotImplemented`] naming the
    /// type and the `serialize` operation.
    fn encode(&self) -> Result<NodeValue> {
        Err(Error::NotImplemented {
            type_name: short_type_name::<Self>(),
            operation: "serialize",
        })
    }

    /// The record's `deserialize` contract: rebuild a shape from [`Parameters::encode`] output.
    ///
    /// Not provided by default; fails with [`Error::NotImplemented`] naming the
    /// type and the `deserialize` operation.
    fn decode(_data: &NodeValue) -> Result<Self> {
        Err(Error::NotImplemented {
            type_name: short_type_name::<Self>(),
            operation: "deserialize",
        })
    }
}

/// Shape for nodes that take no parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyParams {}

impl Parameters for EmptyParams {}

struct Frozen<P> {
    value: P,
    fields: Map<String, NodeValue>,
}

/// A validated, read-only configuration record.
///
/// Typed reads go through `Deref`; there is no `DerefMut` and no setter, so once
/// built the record never changes. Clones share the same frozen value.
pub struct ConfigRecord<P> {
    inner: Arc<Frozen<P>>,
}

impl<P: Parameters> ConfigRecord<P> {
    /// Validates `kwargs` against `P` and freezes the result.
    pub fn from_kwargs(kwargs: Map<String, NodeValue>) -> Result<Self> {
        let type_name = short_type_name::<P>();

        let value: P = serde_json::from_value(NodeValue::Object(kwargs))
            .map_err(|e| Error::validation(type_name, e.to_string()))?;
        value.validate()?;

        let fields = match serde_json::to_value(&value) {
            Ok(NodeValue::Object(map)) => map,
            Ok(other) => {
                return Err(Error::validation(
                    type_name,
                    format!("record must serialize to an object, got {other}"),
                ));
            }
            Err(e) => return Err(Error::validation(type_name, e.to_string())),
        };

        Ok(Self {
            inner: Arc::new(Frozen { value, fields }),
        })
    }

    /// Builds a record from declared defaults only.
    pub fn defaults() -> Result<Self> {
        Self::from_kwargs(Map::new())
    }

    /// Name of the declared shape, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        short_type_name::<P>()
    }

    /// Reads a field by name.
    pub fn get(&self, field: &str) -> Option<&NodeValue> {
        self.inner.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, NodeValue> {
        &self.inner.fields
    }

    pub fn as_value(&self) -> NodeValue {
        NodeValue::Object(self.inner.fields.clone())
    }

    /// Always refused: records are frozen at construction.
    pub fn try_set(&mut self, field: &str, _value: NodeValue) -> Result<()> {
        Err(Error::ImmutabilityViolation {
            type_name: self.type_name(),
            field: field.to_string(),
        })
    }
}

impl<P> Deref for ConfigRecord<P> {
    type Target = P;

    fn deref(&self) -> &Self::Target {
        &self.inner.value
    }
}

impl<P> Clone for ConfigRecord<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P> PartialEq for ConfigRecord<P> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.fields == other.inner.fields
    }
}

impl<P: fmt::Debug> fmt::Debug for ConfigRecord<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner.value, f)
    }
}
