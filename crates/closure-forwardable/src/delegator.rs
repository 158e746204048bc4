//! The dispatch table forwarding operations are installed into.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::backtrace::{self, FilterPolicy};
use crate::config::DelegatorConfig;
use crate::error::{CallError, ForwardError};
use crate::forwarding::ForwardingOperation;
use crate::name::{ExclusionSet, MethodName, MethodNames};
use crate::receiver::{Block, CallResult, Receiver, ReceiverRef};

/// Method identifiers paired with the receiver they forward to, for
/// [`Delegator::delegate`].
#[derive(Default, Clone)]
pub struct DelegationMap {
    entries: Vec<(MethodNames, ReceiverRef)>,
}

impl DelegationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps one identifier, or a list of them, to `receiver`.
    pub fn entry(mut self, methods: impl Into<MethodNames>, receiver: &ReceiverRef) -> Self {
        self.entries.push((methods.into(), Arc::clone(receiver)));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for DelegationMap {
    type Item = (MethodNames, ReceiverRef);
    type IntoIter = std::vec::IntoIter<(MethodNames, ReceiverRef)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A type exposing forwarding operations by alias.
///
/// Installation takes `&mut self` and is meant to happen once at setup;
/// [`call`](Self::call) takes `&self` and may run concurrently.
#[derive(Default, Clone)]
pub struct Delegator {
    operations: HashMap<MethodName, ForwardingOperation>,
    excluded: ExclusionSet,
    policy: FilterPolicy,
}

impl Delegator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A delegator whose operations apply `policy` instead of consulting the
    /// process-wide debug flag.
    pub fn with_policy(policy: FilterPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn with_config(config: &DelegatorConfig) -> Self {
        Self {
            operations: HashMap::new(),
            excluded: config.exclusions(),
            policy: config.policy(),
        }
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    pub fn excluded(&self) -> &ExclusionSet {
        &self.excluded
    }

    /// Delegates every identifier of every entry to that entry's receiver,
    /// each aliased to itself.
    pub fn delegate<I, M>(&mut self, mapping: I)
    where
        I: IntoIterator<Item = (M, ReceiverRef)>,
        M: Into<MethodNames>,
    {
        for (methods, receiver) in mapping {
            for method in methods.into() {
                self.def_delegator(&receiver, method);
            }
        }
    }

    pub fn closure_delegate<I, M>(&mut self, mapping: I)
    where
        I: IntoIterator<Item = (M, ReceiverRef)>,
        M: Into<MethodNames>,
    {
        self.delegate(mapping)
    }

    /// Delegates each of `methods` to `receiver` under its own name.
    /// Excluded identifiers are skipped.
    pub fn def_delegators(&mut self, receiver: &ReceiverRef, methods: impl Into<MethodNames>) {
        for method in methods.into() {
            self.def_delegator(receiver, method);
        }
    }

    pub fn def_closure_delegators(
        &mut self,
        receiver: &ReceiverRef,
        methods: impl Into<MethodNames>,
    ) {
        self.def_delegators(receiver, methods)
    }

    /// Installs `method` on `receiver` under its own name.
    pub fn def_delegator(&mut self, receiver: &ReceiverRef, method: impl Into<MethodName>) {
        let method = method.into();
        let alias = method.clone();
        self.install(receiver, method, alias);
    }

    /// Installs a forwarder named `alias` for `method` on `receiver`.
    pub fn def_delegator_as(
        &mut self,
        receiver: &ReceiverRef,
        method: impl Into<MethodName>,
        alias: impl Into<MethodName>,
    ) {
        self.install(receiver, method.into(), alias.into());
    }

    pub fn def_closure_delegator(
        &mut self,
        receiver: &ReceiverRef,
        method: impl Into<MethodName>,
        alias: Option<MethodName>,
    ) {
        let method = method.into();
        let alias = alias.unwrap_or_else(|| method.clone());
        self.install(receiver, method, alias);
    }

    fn install(&mut self, receiver: &ReceiverRef, method: MethodName, alias: MethodName) {
        if self.excluded.contains(&alias) {
            log::debug!("not forwarding excluded method `{}`", alias);
            return;
        }

        let operation =
            ForwardingOperation::new(Arc::clone(receiver), method, alias.clone(), self.policy);
        log::debug!("forwarding `{}` to `{}`", alias, operation.method());
        if let Some(previous) = self.operations.insert(alias, operation) {
            log::trace!(
                "replaced forwarder `{}` (was targeting `{}`)",
                previous.alias(),
                previous.method()
            );
        }
    }

    /// Invokes the forwarder installed under `alias`.
    ///
    /// Calling an alias that was never installed raises
    /// [`ForwardError::NoMethod`] from the caller's location.
    #[track_caller]
    pub fn call(
        &self,
        alias: impl Into<MethodName>,
        args: &[Value],
        block: Option<Block<'_>>,
    ) -> CallResult {
        let alias = alias.into();
        match self.operations.get(&alias) {
            Some(operation) => operation.call(args, block),
            None => {
                let mut error = CallError::from(ForwardError::NoMethod {
                    alias: alias.to_string(),
                });
                backtrace::filter(&mut error, self.policy);
                Err(error)
            }
        }
    }

    pub fn forwarding(&self, alias: impl Into<MethodName>) -> Option<&ForwardingOperation> {
        self.operations.get(&alias.into())
    }

    pub fn responds_to(&self, alias: impl Into<MethodName>) -> bool {
        self.operations.contains_key(&alias.into())
    }

    /// Installed aliases, sorted.
    pub fn instance_methods(&self) -> Vec<MethodName> {
        let mut names: Vec<_> = self.operations.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Receiver for Delegator {
    fn respond(&self, method: &MethodName, args: &[Value], block: Option<Block<'_>>) -> CallResult {
        self.call(method, args, block)
    }
}
