use std::fmt;
use std::panic::Location;

use thiserror::Error;

use crate::backtrace::{CallHistory, Frame};

/// Errors raised by the delegation layer itself.
#[derive(Error, Debug)]
pub enum ForwardError {
    /// The alias has no forwarding operation installed.
    #[error("undefined method `{alias}` for delegator")]
    NoMethod { alias: String },

    /// Raised by receivers that do not implement the requested method.
    #[error("undefined method `{method}` for receiver")]
    UndefinedMethod { method: String },

    /// Raised by receivers when the forwarded arguments do not fit the method.
    #[error("Invalid Arguments: {0}")]
    InvalidArguments(String),

    /// Malformed delegator configuration.
    #[error("Config Error: {0}")]
    Config(#[from] toml::de::Error),

    /// Handles standard I/O errors.
    #[error("I/O Error")]
    IoError(#[from] std::io::Error),
}

/// An error travelling through a forwarding call.
///
/// The wrapped error is never altered: its type can be recovered with
/// [`CallError::downcast_ref`] and its message is what `Display` prints.
/// Only the attached [`CallHistory`] is touched by the forwarding layer.
pub struct CallError {
    error: anyhow::Error,
    history: CallHistory,
}

impl CallError {
    /// Wraps `error`, recording the caller's location as the raise site.
    #[track_caller]
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::raised(anyhow::Error::new(error), Location::caller())
    }

    /// Raises a plain message error.
    #[track_caller]
    pub fn msg<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Self::raised(anyhow::Error::msg(message), Location::caller())
    }

    fn raised(error: anyhow::Error, location: &'static Location<'static>) -> Self {
        let mut history = CallHistory::default();
        history.push(Frame::at(location, "raise"));
        Self { error, history }
    }

    /// Appends a frame located at the caller, e.g. when a receiver wants its
    /// own method to show up in the history.
    #[track_caller]
    pub fn frame(mut self, label: impl Into<String>) -> Self {
        self.history.push(Frame::at(Location::caller(), label));
        self
    }

    pub fn error(&self) -> &anyhow::Error {
        &self.error
    }

    pub fn into_inner(self) -> anyhow::Error {
        self.error
    }

    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.error.downcast_ref::<E>()
    }

    pub fn is<E>(&self) -> bool
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.error.is::<E>()
    }

    /// The recorded call history, innermost frame first.
    pub fn history(&self) -> &CallHistory {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut CallHistory {
        &mut self.history
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{:#}", self.error)
        } else {
            write!(f, "{}", self.error)
        }
    }
}

impl fmt::Debug for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallError")
            .field("error", &self.error)
            .field("history", &self.history)
            .finish()
    }
}

impl std::error::Error for CallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.error.source()
    }
}

impl From<ForwardError> for CallError {
    #[track_caller]
    fn from(err: ForwardError) -> Self {
        Self::raised(anyhow::Error::new(err), Location::caller())
    }
}

impl From<anyhow::Error> for CallError {
    #[track_caller]
    fn from(err: anyhow::Error) -> Self {
        Self::raised(err, Location::caller())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error, PartialEq)]
    #[error("boom: {0}")]
    struct Boom(u32);

    #[test]
    fn keeps_type_and_message() {
        let err = CallError::new(Boom(7));
        assert_eq!(err.to_string(), "boom: 7");
        assert!(err.is::<Boom>());
        assert_eq!(err.downcast_ref::<Boom>(), Some(&Boom(7)));
    }

    #[test]
    fn records_raise_site() {
        let err = CallError::msg("nope");
        let frame = &err.history().frames()[0];
        assert_eq!(frame.file(), file!());
        assert_eq!(frame.label(), "raise");
    }

    #[test]
    fn frame_appends_in_order() {
        let err = CallError::msg("nope").frame("outer");
        let labels: Vec<_> = err.history().iter().map(|f| f.label().to_string()).collect();
        assert_eq!(labels, vec!["raise", "outer"]);
    }

    #[test]
    fn forward_error_converts() {
        let err: CallError = ForwardError::NoMethod {
            alias: "echo".into(),
        }
        .into();
        assert_eq!(err.to_string(), "undefined method `echo` for delegator");
        assert!(matches!(
            err.downcast_ref::<ForwardError>(),
            Some(ForwardError::NoMethod { .. })
        ));
    }
}
