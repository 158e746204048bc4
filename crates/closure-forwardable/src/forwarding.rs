use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::backtrace::{self, FilterPolicy, Frame};
use crate::error::CallError;
use crate::name::MethodName;
use crate::receiver::{Block, CallResult, ReceiverRef};

/// An installed forwarder: calling it calls `method` on the captured receiver.
///
/// Arguments, continuation and return value pass through untouched. An error
/// coming back from the receiver is re-raised as is, after this operation's
/// frame has been added to its history and the [`FilterPolicy`] captured at
/// installation has been applied.
#[derive(Clone)]
pub struct ForwardingOperation {
    receiver: ReceiverRef,
    method: MethodName,
    alias: MethodName,
    policy: FilterPolicy,
}

impl ForwardingOperation {
    pub fn new(
        receiver: ReceiverRef,
        method: MethodName,
        alias: MethodName,
        policy: FilterPolicy,
    ) -> Self {
        Self {
            receiver,
            method,
            alias,
            policy,
        }
    }

    pub fn method(&self) -> &MethodName {
        &self.method
    }

    pub fn alias(&self) -> &MethodName {
        &self.alias
    }

    pub fn receiver(&self) -> &ReceiverRef {
        &self.receiver
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    /// Whether this operation forwards into `receiver` (by identity).
    pub fn targets(&self, receiver: &ReceiverRef) -> bool {
        Arc::ptr_eq(&self.receiver, receiver)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "forwarding.call", skip_all, fields(alias = %self.alias, method = %self.method))
    )]
    pub fn call(&self, args: &[Value], block: Option<Block<'_>>) -> CallResult {
        self.receiver
            .respond(&self.method, args, block)
            .map_err(|error| self.reraise(error))
    }

    fn reraise(&self, mut error: CallError) -> CallError {
        error.history_mut().push(Frame::here(self.alias.as_str()));
        backtrace::filter(&mut error, self.policy);
        error
    }
}

impl fmt::Debug for ForwardingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardingOperation")
            .field("alias", &self.alias)
            .field("method", &self.method)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
