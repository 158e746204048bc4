//! Method delegation to arbitrary captured receivers.
//!
//! A [`Delegator`] is a dispatch table of forwarding operations. Each one is
//! installed under an alias and, when called, invokes a method on a receiver
//! captured at installation time, passing arguments and an optional
//! continuation through unchanged and returning the receiver's result as is.
//!
//! ```
//! use closure_forwardable::{Delegator, MethodTable, sym};
//! use serde_json::json;
//!
//! let queue = MethodTable::new()
//!     .method("push", |args, _| Ok(json!(args.len())))
//!     .into_ref();
//!
//! let mut delegator = Delegator::new();
//! delegator.def_delegator_as(&queue, sym("push"), "<<");
//! assert_eq!(delegator.call("<<", &[json!(42)], None).unwrap(), json!(1));
//! ```
//!
//! Errors raised by a receiver come back with their type and message intact.
//! Their [`CallHistory`] has the delegation layer's own frames removed unless
//! [`debug`] is on, or the delegator was built with an explicit
//! [`FilterPolicy`].

pub mod backtrace;
pub mod config;
pub mod debug;
pub mod delegator;
pub mod error;
pub mod forwarding;
pub mod name;
pub mod receiver;
pub mod version;

pub use backtrace::{CallHistory, FilterPolicy, Frame};
pub use config::DelegatorConfig;
pub use debug::{debug, init_debug_from_env, set_debug};
pub use delegator::{DelegationMap, Delegator};
pub use error::{CallError, ForwardError};
pub use forwarding::ForwardingOperation;
pub use name::{EXCLUDED_METHODS, MethodName, MethodNames, Symbol, sym};
pub use receiver::{Block, CallResult, MethodTable, Receiver, ReceiverRef};

/// The crate version as a semver string.
pub const VERSION: &str = version::STRING;
