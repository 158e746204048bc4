//! Call history carried by forwarded errors and the filter that trims it.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

use serde::{Deserialize, Serialize};

use crate::debug;
use crate::error::CallError;

/// Path of this file as the compiler sees it; its directory is the
/// delegation layer's source root.
const THIS_FILE: &str = file!();

fn source_root() -> &'static str {
    match THIS_FILE.rfind(['/', '\\']) {
        Some(idx) => &THIS_FILE[..=idx],
        None => "",
    }
}

/// Whether `file` belongs to the delegation layer's own source.
pub fn is_internal_file(file: &str) -> bool {
    let root = source_root();
    if root.is_empty() {
        return file == THIS_FILE;
    }
    file.starts_with(root)
}

/// One entry of a [`CallHistory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    file: &'static str,
    line: u32,
    column: u32,
    label: Cow<'static, str>,
}

impl Frame {
    pub fn at(location: &'static Location<'static>, label: impl Into<String>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
            label: Cow::Owned(label.into()),
        }
    }

    /// A frame at the caller's location.
    #[track_caller]
    pub fn here(label: impl Into<String>) -> Self {
        Self::at(Location::caller(), label)
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_internal(&self) -> bool {
        is_internal_file(self.file)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: in `{}`",
            self.file, self.line, self.column, self.label
        )
    }
}

/// Ordered frames of a forwarded error, innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallHistory {
    frames: Vec<Frame>,
    filtered: bool,
}

impl CallHistory {
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn contains_internal(&self) -> bool {
        self.frames.iter().any(Frame::is_internal)
    }

    /// Set once internal frames have been stripped from this history.
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// Drops every internal frame, returning how many were removed.
    pub fn strip_internal(&mut self) -> usize {
        let before = self.frames.len();
        self.frames.retain(|frame| !frame.is_internal());
        self.filtered = true;
        before - self.frames.len()
    }
}

impl fmt::Display for CallHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.frames {
            writeln!(f, "{frame}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a CallHistory {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// How a forwarding operation treats internal frames of errors it re-raises.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPolicy {
    /// Follow the process-wide [`debug`](crate::debug::debug) flag, read per error.
    #[default]
    Inherit,
    /// Always keep internal frames.
    KeepInternal,
    /// Always strip internal frames.
    StripInternal,
}

impl FilterPolicy {
    /// Maps an optional debug setting onto a policy; `None` inherits.
    pub fn from_debug(debug: Option<bool>) -> Self {
        match debug {
            None => FilterPolicy::Inherit,
            Some(true) => FilterPolicy::KeepInternal,
            Some(false) => FilterPolicy::StripInternal,
        }
    }

    pub fn keeps_internal(self) -> bool {
        match self {
            FilterPolicy::Inherit => debug::debug(),
            FilterPolicy::KeepInternal => true,
            FilterPolicy::StripInternal => false,
        }
    }
}

/// Applies `policy` to an error surfacing through a forwarding operation.
pub fn filter(error: &mut CallError, policy: FilterPolicy) {
    if policy.keeps_internal() {
        return;
    }
    let removed = error.history_mut().strip_internal();
    if removed > 0 {
        log::trace!("stripped {} internal frame(s) from `{}`", removed, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn this_file_is_internal() {
        assert!(is_internal_file(file!()));
        assert!(Frame::here("probe").is_internal());
    }

    #[test]
    fn foreign_files_are_not_internal() {
        assert!(!is_internal_file("app/src/main.rs"));
        assert!(!is_internal_file("/tmp/elsewhere/lib.rs"));
    }

    #[test]
    fn strip_keeps_foreign_frames() {
        let mut history = CallHistory::default();
        history.push(Frame {
            file: "app/src/receiver.rs",
            line: 10,
            column: 5,
            label: Cow::Borrowed("raise"),
        });
        history.push(Frame::here("forward"));

        assert!(history.contains_internal());
        assert_eq!(history.strip_internal(), 1);
        assert!(history.is_filtered());
        assert_eq!(history.len(), 1);
        assert_eq!(history.frames()[0].file(), "app/src/receiver.rs");
    }

    #[test]
    fn explicit_policies_ignore_global_flag() {
        assert!(FilterPolicy::KeepInternal.keeps_internal());
        assert!(!FilterPolicy::StripInternal.keeps_internal());
        assert_eq!(FilterPolicy::from_debug(None), FilterPolicy::Inherit);
        assert_eq!(FilterPolicy::from_debug(Some(true)), FilterPolicy::KeepInternal);
    }

    #[test]
    fn frame_display() {
        let frame = Frame {
            file: "a.rs",
            line: 1,
            column: 2,
            label: Cow::Borrowed("echo"),
        };
        assert_eq!(frame.to_string(), "a.rs:1:2: in `echo`");
    }
}
