//! Delegator configuration.
//!
//! Plain serializable settings, loadable from TOML:
//!
//! ```toml
//! debug = true
//! excluded = ["object_id", ":instance_variable_get"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::backtrace::FilterPolicy;
use crate::error::ForwardError;
use crate::name::{ExclusionSet, MethodName};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DelegatorConfig {
    /// Keep (`true`) or strip (`false`) internal frames of forwarded errors.
    /// Unset follows the process-wide debug flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    /// Identifiers to skip on top of `__send__` and `__id__`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded: Vec<MethodName>,
}

impl DelegatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ForwardError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ForwardError> {
        let path = path.as_ref();
        log::debug!("loading delegator config from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = Some(enabled);
        self
    }

    pub fn exclude(mut self, name: impl Into<MethodName>) -> Self {
        self.excluded.push(name.into());
        self
    }

    pub fn policy(&self) -> FilterPolicy {
        FilterPolicy::from_debug(self.debug)
    }

    pub fn exclusions(&self) -> ExclusionSet {
        let mut set = ExclusionSet::default();
        set.extend(self.excluded.iter());
        set
    }
}
