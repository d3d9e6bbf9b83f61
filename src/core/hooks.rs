use crate::core::NodeValue;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// An observer wrapped around a node's computation.
///
/// `on_execute_start` sees the node's input before `run`, `on_execute_end` sees
/// the result after it. Neither can change the result; returning an error aborts
/// the remaining hooks and the node call.
pub trait Hook: Send + Sync + 'static {
    fn on_execute_start(&self, _input: &NodeValue) -> Result<()> {
        Ok(())
    }

    fn on_execute_end(&self, _result: &NodeValue) -> Result<()> {
        Ok(())
    }

    /// Create a boxed clone of this trait object.
    fn clone_box(&self) -> Box<dyn Hook>;
}

impl Clone for Box<dyn Hook> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Ordered hook sequence owned by a node.
pub type HookList = Vec<Box<dyn Hook>>;

/// Which side of `run` a hook fired on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Start,
    End,
}

/// Writes one log record per phase.
#[derive(Debug, Clone)]
pub struct LogHook {
    label: String,
    level: log::Level,
}

impl LogHook {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            level: log::Level::Debug,
        }
    }

    pub fn with_level(mut self, level: log::Level) -> Self {
        self.level = level;
        self
    }
}

impl Hook for LogHook {
    fn on_execute_start(&self, input: &NodeValue) -> Result<()> {
        log::log!(self.level, "[{}] execute start: {}", self.label, input);
        Ok(())
    }

    fn on_execute_end(&self, result: &NodeValue) -> Result<()> {
        log::log!(self.level, "[{}] execute end: {}", self.label, result);
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Hook> {
        Box::new(self.clone())
    }
}

/// A single entry in the execution trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub timestamp: u64,
    pub label: String,
    pub phase: Phase,
    pub value: NodeValue,
}

/// Records every phase into an in-memory sink.
///
/// Clones write to the same sink, so a hook handed to a node can still be read
/// back through the caller's handle.
#[derive(Debug, Clone)]
pub struct TraceHook {
    label: String,
    traces: Arc<Mutex<Vec<TraceEntry>>>,
}

impl TraceHook {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            traces: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A hook with a different label writing into this hook's sink.
    pub fn sibling(&self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            traces: Arc::clone(&self.traces),
        }
    }

    pub fn get_traces(&self) -> Vec<TraceEntry> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TraceEntry>> {
        // A panicking hook elsewhere must not hide the entries already recorded.
        self.traces.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, phase: Phase, value: &NodeValue) {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        self.lock().push(TraceEntry {
            timestamp,
            label: self.label.clone(),
            phase,
            value: value.clone(),
        });
    }
}

impl Hook for TraceHook {
    fn on_execute_start(&self, input: &NodeValue) -> Result<()> {
        self.record(Phase::Start, input);
        Ok(())
    }

    fn on_execute_end(&self, result: &NodeValue) -> Result<()> {
        self.record(Phase::End, result);
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Hook> {
        Box::new(self.clone())
    }
}
