use crate::core::AsAny;
use crate::core::NodeValue;
use crate::core::hooks::{Hook, HookList};
use crate::core::params::{ConfigRecord, Parameters};
use crate::error::{Error, Result, short_type_name};
use serde_json::Map;

/// Reserved keyword naming the hook sequence; never forwarded to a record.
pub const CALLBACKS_KEY: &str = "callbacks";

/// The computation behind a pipeline node.
///
/// `Params` declares the configuration shape every instance validates against.
/// `run` is the only required extension point; the default refuses to run.
pub trait Algorithm: Send + Sync + 'static {
    type Params: Parameters;

    fn run(&self, _params: &Self::Params, _input: NodeValue) -> Result<NodeValue> {
        Err(Error::NotImplemented {
            type_name: short_type_name::<Self>(),
            operation: "run",
        })
    }

    fn name() -> &'static str {
        short_type_name::<Self>()
    }
}

/// Keyword arguments for building a node: configuration values plus the
/// reserved hook sequence.
#[derive(Default, Clone)]
pub struct Args {
    params: Map<String, NodeValue>,
    callbacks: Option<HookList>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments from a JSON object. Anything else is rejected.
    pub fn from_json(value: NodeValue) -> Result<Self> {
        match value {
            NodeValue::Object(params) => Ok(params.into()),
            other => Err(Error::validation(
                "Args",
                format!("keyword arguments must be a JSON object, got {other}"),
            )),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Takes a value copy of `hooks`; the caller's sequence stays theirs.
    pub fn callbacks(mut self, hooks: &[Box<dyn Hook>]) -> Self {
        self.callbacks = Some(hooks.iter().map(|hook| hook.clone_box()).collect());
        self
    }

    pub fn params(&self) -> &Map<String, NodeValue> {
        &self.params
    }

    pub fn has_callbacks(&self) -> bool {
        self.callbacks.is_some()
    }

    /// Splits off the hook sequence. A JSON value under [`CALLBACKS_KEY`] cannot
    /// carry hooks, so only an empty one (`null` or `[]`) is accepted.
    fn into_parts(mut self) -> Result<(Map<String, NodeValue>, HookList)> {
        match self.params.remove(CALLBACKS_KEY) {
            None | Some(NodeValue::Null) => {}
            Some(NodeValue::Array(items)) if items.is_empty() => {}
            Some(value) => {
                return Err(Error::validation(
                    "Args",
                    format!(
                        "'{CALLBACKS_KEY}' cannot be given as keyword value {value}; \
                         supply hooks through Args::callbacks"
                    ),
                ));
            }
        }
        Ok((self.params, self.callbacks.unwrap_or_default()))
    }
}

impl From<Map<String, NodeValue>> for Args {
    fn from(params: Map<String, NodeValue>) -> Self {
        Self {
            params,
            callbacks: None,
        }
    }
}

/// A pipeline node: logic, its frozen configuration and its hooks.
pub struct Node<A: Algorithm> {
    behaviour: A,
    params: ConfigRecord<A::Params>,
    callbacks: HookList,
}

impl<A: Algorithm + Default> Node<A> {
    /// Builds a node around `A::default()`.
    pub fn new(args: Args) -> Result<Self> {
        Self::with_logic(A::default(), args)
    }
}

impl<A: Algorithm> Node<A> {
    /// Builds a node around the given logic, validating `args` into its record.
    pub fn with_logic(behaviour: A, args: Args) -> Result<Self> {
        let (kwargs, callbacks) = args.into_parts()?;
        let params = ConfigRecord::<A::Params>::from_kwargs(kwargs)?;

        log::debug!(
            "Built {} with {} hook(s): {}",
            short_type_name::<A>(),
            callbacks.len(),
            params.as_value()
        );

        Ok(Node {
            behaviour,
            params,
            callbacks,
        })
    }

    /// Start hooks, `run`, end hooks, in registration order.
    pub fn execute(&self, input: NodeValue) -> Result<NodeValue> {
        let name = short_type_name::<A>();

        for hook in &self.callbacks {
            log::trace!("{}: dispatching start hook", name);
            hook.on_execute_start(&input)?;
        }

        let result = self.behaviour.run(&self.params, input)?;

        for hook in &self.callbacks {
            log::trace!("{}: dispatching end hook", name);
            hook.on_execute_end(&result)?;
        }

        Ok(result)
    }

    /// Same as [`Node::execute`].
    pub fn call(&self, input: NodeValue) -> Result<NodeValue> {
        self.execute(input)
    }

    pub fn params(&self) -> &ConfigRecord<A::Params> {
        &self.params
    }

    pub fn callbacks(&self) -> &[Box<dyn Hook>] {
        &self.callbacks
    }

    /// The logic this node runs.
    pub fn behaviour(&self) -> &A {
        &self.behaviour
    }
}

/// Type-erased view of any [`Node`], as handed out by the registry.
pub trait Executable: AsAny + Send + Sync {
    fn name(&self) -> &'static str;

    fn execute(&self, input: NodeValue) -> Result<NodeValue>;

    fn call(&self, input: NodeValue) -> Result<NodeValue> {
        self.execute(input)
    }

    /// The configuration record as a JSON object.
    fn params(&self) -> NodeValue;

    fn param(&self, field: &str) -> Option<NodeValue>;

    fn hook_count(&self) -> usize;
}

impl<A: Algorithm> Executable for Node<A> {
    fn name(&self) -> &'static str {
        short_type_name::<A>()
    }

    fn execute(&self, input: NodeValue) -> Result<NodeValue> {
        Node::execute(self, input)
    }

    fn params(&self) -> NodeValue {
        self.params.as_value()
    }

    fn param(&self, field: &str) -> Option<NodeValue> {
        self.params.get(field).cloned()
    }

    fn hook_count(&self) -> usize {
        self.callbacks.len()
    }
}

impl dyn Executable {
    /// Recover the concrete node type.
    pub fn downcast_ref<A: Algorithm>(&self) -> Option<&Node<A>> {
        self.as_any().downcast_ref::<Node<A>>()
    }
}
