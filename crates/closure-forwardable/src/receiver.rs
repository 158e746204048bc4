use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{CallError, ForwardError};
use crate::name::MethodName;

pub type CallResult = Result<Value, CallError>;

/// The continuation handed to a forwarded method.
pub type Block<'a> = &'a mut (dyn FnMut(&[Value]) -> CallResult + 'a);

/// Shared handle to a receiver. Forwarding operations hold clones of it.
pub type ReceiverRef = Arc<dyn Receiver>;

/// Anything a forwarding operation can dispatch into.
///
/// Nothing checks up front that `method` is implemented; receivers decide at
/// call time and usually answer unknown names with
/// [`ForwardError::UndefinedMethod`].
pub trait Receiver: Send + Sync {
    fn respond(&self, method: &MethodName, args: &[Value], block: Option<Block<'_>>) -> CallResult;
}

type Handler = Box<dyn Fn(&[Value], Option<Block<'_>>) -> CallResult + Send + Sync>;

/// A receiver assembled from closures, one per method name.
#[derive(Default)]
pub struct MethodTable {
    methods: HashMap<MethodName, Handler>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the handler for `name`.
    pub fn method<F>(mut self, name: impl Into<MethodName>, handler: F) -> Self
    where
        F: Fn(&[Value], Option<Block<'_>>) -> CallResult + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Box::new(handler));
        self
    }

    pub fn into_ref(self) -> ReceiverRef {
        Arc::new(self)
    }
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.methods.keys().map(MethodName::as_str).collect();
        names.sort_unstable();
        f.debug_struct("MethodTable").field("methods", &names).finish()
    }
}

impl Receiver for MethodTable {
    fn respond(&self, method: &MethodName, args: &[Value], block: Option<Block<'_>>) -> CallResult {
        match self.methods.get(method) {
            Some(handler) => handler(args, block),
            None => Err(ForwardError::UndefinedMethod {
                method: method.to_string(),
            }
            .into()),
        }
    }
}
